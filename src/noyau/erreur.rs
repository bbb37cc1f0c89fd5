// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Une seule famille, quatre genres. Seul `calculate` les traduit en triple
// d’erreur uniforme ("Error", "Error", message).

use std::fmt;

pub type Resultat<T> = std::result::Result<T, ErreurCalcul>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErreurCalcul {
    /// Caractères non reconnus, opérateur/opérande manquant, parenthèses.
    Syntaxe(String),
    /// Division explicite par zéro ou fraction littérale de dénominateur 0.
    DivisionParZero,
    /// Littéral mal formé, unité inconnue, unités incompatibles.
    Valeur(String),
    /// Tout le reste (invariant interne cassé).
    Interne(String),
}

impl ErreurCalcul {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn valeur(msg: impl Into<String>) -> Self {
        Self::Valeur(msg.into())
    }

    pub fn interne(msg: impl Into<String>) -> Self {
        Self::Interne(msg.into())
    }

    /// Nom du genre (pour la démarche).
    pub fn genre(&self) -> &'static str {
        match self {
            Self::Syntaxe(_) => "SyntaxError",
            Self::DivisionParZero => "ZeroDivisionError",
            Self::Valeur(_) => "ValueError",
            Self::Interne(_) => "InternalError",
        }
    }
}

impl fmt::Display for ErreurCalcul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntaxe(msg) | Self::Valeur(msg) => f.write_str(msg),
            Self::DivisionParZero => f.write_str("Division by zero"),
            Self::Interne(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ErreurCalcul {}

// src/noyau/unites.rs
//
// Unités de longueur.
// - Table d’alias immuable (partagée en lecture seule)
// - Facteurs EXACTS vers le mètre (pas de flottant : 0.3048 = 3048/10000)
// - Unité de sortie : les 5 unités + le composite "Feet-In"

use num_bigint::BigInt;
use num_rational::BigRational;
use std::fmt;
use std::str::FromStr;

use super::erreur::{ErreurCalcul, Resultat};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unite {
    Feet,
    Inch,
    Meter,
    Centimeter,
    Millimeter,
}

/// alias (minuscules) -> unité canonique
const ALIAS: &[(&str, Unite)] = &[
    ("ft", Unite::Feet),
    ("feet", Unite::Feet),
    ("foot", Unite::Feet),
    ("in", Unite::Inch),
    ("inch", Unite::Inch),
    ("inches", Unite::Inch),
    ("m", Unite::Meter),
    ("meter", Unite::Meter),
    ("meters", Unite::Meter),
    ("cm", Unite::Centimeter),
    ("centimeter", Unite::Centimeter),
    ("centimeters", Unite::Centimeter),
    ("mm", Unite::Millimeter),
    ("millimeter", Unite::Millimeter),
    ("millimeters", Unite::Millimeter),
];

impl Unite {
    /// Résout un suffixe (insensible à la casse).
    pub fn depuis_suffixe(suffixe: &str) -> Resultat<Self> {
        let bas = suffixe.trim().to_lowercase();
        ALIAS
            .iter()
            .find(|(alias, _)| *alias == bas)
            .map(|(_, u)| *u)
            .ok_or_else(|| ErreurCalcul::valeur(format!("Unknown unit: {suffixe}")))
    }

    /// Facteur exact : 1 <unité> = facteur mètres.
    pub fn facteur(self) -> BigRational {
        let (n, d): (i64, i64) = match self {
            Unite::Feet => (3048, 10_000),
            Unite::Inch => (254, 10_000),
            Unite::Meter => (1, 1),
            Unite::Centimeter => (1, 100),
            Unite::Millimeter => (1, 1000),
        };
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    pub fn libelle(self) -> &'static str {
        match self {
            Unite::Feet => "Feet",
            Unite::Inch => "Inch",
            Unite::Meter => "Meter",
            Unite::Centimeter => "Centimeter",
            Unite::Millimeter => "Millimeter",
        }
    }
}

/// Unité demandée pour l’affichage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UniteSortie {
    Meter,
    Centimeter,
    Millimeter,
    Inch,
    Feet,
    /// pieds + pouces fractionnaires ; la grandeur finale est en pouces
    #[default]
    FeetIn,
}

impl UniteSortie {
    pub const TOUTES: [UniteSortie; 6] = [
        UniteSortie::FeetIn,
        UniteSortie::Inch,
        UniteSortie::Feet,
        UniteSortie::Meter,
        UniteSortie::Centimeter,
        UniteSortie::Millimeter,
    ];

    /// Unité dans laquelle la grandeur finale est exprimée.
    pub fn unite_de_base(self) -> Unite {
        match self {
            UniteSortie::Meter => Unite::Meter,
            UniteSortie::Centimeter => Unite::Centimeter,
            UniteSortie::Millimeter => Unite::Millimeter,
            UniteSortie::Inch | UniteSortie::FeetIn => Unite::Inch,
            UniteSortie::Feet => Unite::Feet,
        }
    }

    pub fn est_pieds_pouces(self) -> bool {
        matches!(self, UniteSortie::FeetIn)
    }

    pub fn libelle(self) -> &'static str {
        match self {
            UniteSortie::FeetIn => "Feet-In",
            autre => autre.unite_de_base().libelle(),
        }
    }

    /// Libellé long (sélecteur de l’UI).
    pub fn description(self) -> &'static str {
        match self {
            UniteSortie::FeetIn => "Feet & Inches",
            UniteSortie::Inch => "Inches",
            UniteSortie::Feet => "Feet (Decimal)",
            UniteSortie::Meter => "Meters",
            UniteSortie::Centimeter => "Centimeters",
            UniteSortie::Millimeter => "Millimeters",
        }
    }

    /// mètres -> unité de sortie
    pub fn depuis_metres(self, metres: &BigRational) -> BigRational {
        metres / self.unite_de_base().facteur()
    }

    /// unité de sortie -> mètres
    pub fn vers_metres(self, grandeur: &BigRational) -> BigRational {
        grandeur * self.unite_de_base().facteur()
    }
}

impl fmt::Display for UniteSortie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.libelle())
    }
}

impl FromStr for UniteSortie {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UniteSortie::TOUTES
            .into_iter()
            .find(|u| u.libelle() == s.trim())
            .ok_or_else(|| ErreurCalcul::valeur(format!("Unknown unit: {s}")))
    }
}

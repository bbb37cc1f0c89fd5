//! Noyau exact : fractions + longueurs
//!
//! Organisation interne :
//! - lecture.rs       : un littéral -> rationnel exact
//! - unites.rs        : alias d’unités, facteurs exacts vers le mètre
//! - pretraitement.rs : fractions, pieds-pouces, espaces avant unité
//! - jetons.rs        : tokenisation + contrôle de couverture
//! - rpn.rs           : shunting-yard sur valeurs étiquetées (unité oui/non)
//! - approx.rs        : grille 1/D + approximation rationnelle bornée
//! - format.rs        : mixte / impropre / décimal / pieds-pouces
//! - erreur.rs        : genres d’erreurs
//! - eval.rs          : pipeline complet (`calculate`)

pub mod approx;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod pretraitement;
pub mod rpn;
pub mod unites;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{calculate, calculate_avec, Mode, Reglages, ResultatCalcul};
pub use unites::UniteSortie;

//! Calculatrice fractions & longueurs : noyau d’évaluation exact.
//!
//! `calculate("1ft 6in", Mode::Avance, UniteSortie::FeetIn, true, 32)`
//! rend ("1ft 6in", "18/1 in", "18").

pub mod noyau;

pub use noyau::{calculate, calculate_avec, ErreurCalcul, Mode, Reglages, ResultatCalcul, UniteSortie};

// src/noyau/lecture.rs
//
// Lecture d’UN littéral numérique -> rationnel exact.
// Formes acceptées : entier, décimal, fraction simple a/b, fraction mixte "a b/c".
// Aucune unité ici (voir unites.rs).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use regex::Regex;
use std::sync::OnceLock;

use super::erreur::{ErreurCalcul, Resultat};
use super::eval::Demarche;
use super::format::format_rat_pretty;

fn motif_mixte() -> &'static Regex {
    static MIXTE: OnceLock<Regex> = OnceLock::new();
    MIXTE.get_or_init(|| Regex::new(r"^(\d+)\s+(\d+)/(\d+)$").expect("motif fraction mixte"))
}

fn nombre_invalide() -> ErreurCalcul {
    ErreurCalcul::valeur("Invalid number")
}

/// Entier décimal non signé (chiffres ASCII seulement).
fn lire_entier(s: &str) -> Resultat<BigInt> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(nombre_invalide());
    }
    BigInt::parse_bytes(s.as_bytes(), 10).ok_or_else(nombre_invalide)
}

fn fraction(num: BigInt, den: BigInt) -> Resultat<BigRational> {
    if den.is_zero() {
        return Err(ErreurCalcul::DivisionParZero);
    }
    Ok(BigRational::new(num, den))
}

/// Décimal exact : "12.375" -> 12375/1000, ".5" -> 1/2, "7" -> 7.
fn lire_decimal(s: &str) -> Resultat<BigRational> {
    let (ent, frac) = match s.split_once('.') {
        Some((e, f)) => (e, f),
        None => (s, ""),
    };
    if !ent.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(nombre_invalide());
    }

    let chiffres = format!("{ent}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(nombre_invalide)?;
    let echelle: BigInt = BigInt::from(10u32).pow(frac.len() as u32);
    Ok(BigRational::new(n, echelle))
}

/// Lit un littéral (déjà isolé par le tokenizer).
///
/// Ordre des règles :
/// 1. deux '.' ou plus -> "Invalid number"
/// 2. "a b/c" (mixte) -> a + b/c
/// 3. contient '/' -> a/b
/// 4. "." seul -> 0
/// 5. décimal / entier ; chaîne vide -> 0
pub fn parse_nombre(texte: &str, demarche: &mut Demarche) -> Resultat<BigRational> {
    let s = texte.trim();
    demarche.note(format!("Parsing Number: '{s}'"));

    if s.matches('.').count() > 1 {
        return Err(nombre_invalide());
    }

    if let Some(c) = motif_mixte().captures(s) {
        let entier = lire_entier(&c[1])?;
        let num = lire_entier(&c[2])?;
        let den = lire_entier(&c[3])?;
        demarche.note(format!("Found Mixed Fraction: {entier} {num}/{den}"));
        let v = BigRational::from_integer(entier) + fraction(num, den)?;
        demarche.note(format!("Value: {}", format_rat_pretty(&v)));
        return Ok(v);
    }

    if let Some((a, b)) = s.split_once('/') {
        demarche.note(format!("Found Fraction: {s}"));
        return fraction(lire_entier(a)?, lire_entier(b)?);
    }

    if s == "." || s.is_empty() {
        return Ok(BigRational::zero());
    }

    let v = lire_decimal(s)?;
    demarche.note(format!("Found Decimal/Int: {}", format_rat_pretty(&v)));
    Ok(v)
}

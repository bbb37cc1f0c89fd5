// src/noyau/format.rs
//
// Affichage du résultat :
// - décimal (4 chiffres, zéros finaux retirés)
// - fraction mixte / impropre sur la grille 1/D
// - pieds-pouces (grandeur en pouces), avec retenue à 12"
//
// Un seul arrondi : accroche_grille. Tout le reste travaille sur v' (exact).
// Pieds-pouces : les pieds sur la valeur brute, le reste accroché (retenue à 12").

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::approx::{accroche_grille, approx_bornee, arrondi_pair};
use super::erreur::Resultat;

/// Chiffres après la virgule pour l’affichage décimal.
pub const DECIMALES: usize = 4;

/* ------------------------ Helpers rationnels ------------------------ */

/// n ou n/d (démarche).
pub fn format_rat_pretty(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };
    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }
    format!("{signe}{int_part}.{frac}")
}

/* ------------------------ Décimal ------------------------ */

/// v arrondi à 4 décimales, zéros finaux et point final retirés.
/// "1.2500" -> "1.25", "18.0000" -> "18". Jamais de "-0".
pub fn format_decimal(v: &BigRational) -> String {
    let scaled = arrondi_pair(&(v * BigRational::from_integer(pow10(DECIMALES))));
    if scaled.is_zero() {
        return "0".to_string();
    }
    let texte = scaled_to_decimal(scaled, DECIMALES);
    texte
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/* ------------------------ Fractions sur la grille ------------------------ */

/// v -> fraction réduite de dénominateur ≤ D (après accroche à la grille).
pub fn reduit(v: &BigRational, d: &BigInt) -> Resultat<BigRational> {
    approx_bornee(&accroche_grille(v, d)?, d)
}

/// (négatif?, entier, reste, dénominateur) en signe-grandeur.
fn decoupe_mixte(f: &BigRational) -> (bool, BigInt, BigInt, BigInt) {
    let den = f.denom().clone();
    let abs_num = f.numer().abs();
    let (entier, reste) = abs_num.div_rem(&den);
    (f.is_negative(), entier, reste, den)
}

/// Fraction mixte : "7", "3/4", "1 1/4", "-1 1/4".
pub fn format_mixed(v: &BigRational, d: &BigInt) -> Resultat<String> {
    let f = reduit(v, d)?;
    if f.denom().is_one() {
        return Ok(format!("{}", f.numer()));
    }

    let (neg, entier, reste, den) = decoupe_mixte(&f);
    let signe = if neg { "-" } else { "" };

    Ok(if reste.is_zero() {
        format!("{signe}{entier}")
    } else if entier.is_zero() {
        format!("{signe}{reste}/{den}")
    } else {
        format!("{signe}{entier} {reste}/{den}")
    })
}

/// Fraction impropre : toujours "n/d" (même "18/1").
pub fn format_improper(v: &BigRational, d: &BigInt) -> Resultat<String> {
    let f = reduit(v, d)?;
    Ok(format!("{}/{}", f.numer(), f.denom()))
}

/* ------------------------ Pieds-pouces ------------------------ */

/// Grandeur en pouces -> "<signe><pieds>ft <pouces>in".
///
/// Les pieds sont pris sur la valeur brute, seul le reste en pouces passe par
/// la grille : un reste de 11.999" peut s’accrocher à 12, la retenue passe
/// alors dans les pieds. Les pouces affichés ne valent jamais 12.
pub fn format_pieds_pouces(pouces: &BigRational, d: &BigInt) -> Resultat<String> {
    let douze = BigRational::from_integer(BigInt::from(12));

    let abs = pouces.abs();
    let mut pieds = (&abs / &douze).floor().to_integer();
    let reste = &abs - &douze * BigRational::from_integer(pieds.clone());

    let f = reduit(&reste, d)?;
    let pouces_txt = if f.denom().is_one() {
        if f.numer() == &BigInt::from(12) {
            pieds += 1u32;
            "0".to_string()
        } else {
            format!("{}", f.numer())
        }
    } else {
        let (_, entier, r, den) = decoupe_mixte(&f);
        if entier.is_zero() {
            format!("{r}/{den}")
        } else {
            format!("{entier} {r}/{den}")
        }
    };

    // signe de la valeur accrochée : "-0ft 0in" n’existe pas
    let signe = if accroche_grille(pouces, d)?.is_negative() {
        "-"
    } else {
        ""
    };
    Ok(format!("{signe}{pieds}ft {pouces_txt}in"))
}

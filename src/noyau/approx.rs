// src/noyau/approx.rs
//
// Grille de précision 1/D + meilleure approximation rationnelle bornée.
//
// - arrondi_pair     : entier le plus proche, égalité -> pair (figé, testé)
// - accroche_grille  : v' = round(v·D)/D (SEUL arrondi du formatage)
// - approx_bornee    : fractions continues, dénominateur ≤ D
// - depuis_flottant  : f64 -> rationnel borné (sans explosion du dénominateur)

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed};
use std::cmp::Ordering;

use super::erreur::{ErreurCalcul, Resultat};

/// Arrondi à l’entier le plus proche ; à égale distance, l’entier pair.
pub fn arrondi_pair(r: &BigRational) -> BigInt {
    let plancher = r.floor();
    let base = plancher.to_integer();
    let reste = r - &plancher;
    let demi = BigRational::new(BigInt::one(), BigInt::from(2));

    match reste.cmp(&demi) {
        Ordering::Less => base,
        Ordering::Greater => base + 1u32,
        Ordering::Equal => {
            if base.is_even() {
                base
            } else {
                base + 1u32
            }
        }
    }
}

/// Borne de dénominateur utilisable : D ≥ 1.
pub fn verifie_borne(d: &BigInt) -> Resultat<()> {
    if d.is_positive() {
        Ok(())
    } else {
        Err(ErreurCalcul::valeur("Invalid precision"))
    }
}

/// Multiple de 1/D le plus proche de v.
pub fn accroche_grille(v: &BigRational, d: &BigInt) -> Resultat<BigRational> {
    verifie_borne(d)?;
    let k = arrondi_pair(&(v * BigRational::from_integer(d.clone())));
    Ok(BigRational::new(k, d.clone()))
}

/// Fraction la plus proche de x parmi celles de dénominateur ≤ max_den.
///
/// Développement en fractions continues jusqu’à dépasser la borne, puis choix
/// entre le dernier convergent et le meilleur semi-convergent.
pub fn approx_bornee(x: &BigRational, max_den: &BigInt) -> Resultat<BigRational> {
    verifie_borne(max_den)?;
    if x.denom() <= max_den {
        return Ok(x.clone());
    }

    let (mut p0, mut q0) = (BigInt::from(0), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::from(0));
    let (mut n, mut d) = (x.numer().clone(), x.denom().clone());

    loop {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if &q2 > max_den {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);

        let r = &n - &a * &d;
        n = std::mem::replace(&mut d, r);
    }

    let k = (max_den - &q0).div_floor(&q1);
    let semi = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let conv = BigRational::new(p1, q1);

    if (&conv - x).abs() <= (&semi - x).abs() {
        Ok(conv)
    } else {
        Ok(semi)
    }
}

/// Flottant -> rationnel de dénominateur ≤ max_den.
pub fn depuis_flottant(f: f64, max_den: &BigInt) -> Resultat<BigRational> {
    let exact = BigRational::from_float(f)
        .ok_or_else(|| ErreurCalcul::valeur(format!("Invalid number: {f}")))?;
    approx_bornee(&exact, max_den)
}

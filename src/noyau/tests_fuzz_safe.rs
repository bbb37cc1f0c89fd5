//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - valeur de référence calculée à la génération (rationnels exacts)
//! - invariants : erreur uniforme, mixte ≡ impropre, jamais "12in",
//!   relire le mixte redonne la valeur accrochée

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::eval::{calculate, Mode};
use super::format::{format_improper, reduit};
use super::unites::UniteSortie;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (texte + valeur exacte) ------------------------ */

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Atome : entier, fraction, mixte ou décimal. Jamais de dénominateur nul.
fn gen_atom(rng: &mut Rng) -> (String, BigRational) {
    let a = rng.pick(10) as i64;
    let b = 1 + rng.pick(16) as i64;
    match rng.pick(4) {
        0 => (format!("{a}"), rat(a, 1)),
        1 => (format!("{a}/{b}"), rat(a, b)),
        2 => {
            let w = 1 + rng.pick(5) as i64;
            (format!("{w} {a}/{b}"), rat(w, 1) + rat(a, b))
        }
        _ => (format!("{a}.{b}"), decimal(a, b)),
    }
}

fn decimal(ent: i64, frac: i64) -> BigRational {
    let chiffres = frac.to_string().len() as u32;
    rat(ent, 1) + rat(frac, 10i64.pow(chiffres))
}

/// Expression entièrement parenthésée + valeur (None si division par zéro).
fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Option<BigRational>) {
    if depth == 0 || rng.pick(4) == 0 {
        let (t, v) = gen_atom(rng);
        return (t, Some(v));
    }

    let (ta, va) = gen_expr(rng, depth - 1);
    let (tb, vb) = gen_expr(rng, depth - 1);
    let op_idx = rng.pick(4);

    // "x / 3/4" se lit ((x/3)/4) : le diviseur fraction doit être parenthésé
    let tb = if op_idx == 3 && fraction_nue(&tb) {
        format!("({tb})")
    } else {
        tb
    };

    let (op, v) = match op_idx {
        0 => ("+", va.zip(vb).map(|(a, b)| a + b)),
        1 => ("-", va.zip(vb).map(|(a, b)| a - b)),
        2 => ("*", va.zip(vb).map(|(a, b)| a * b)),
        _ => (
            "/",
            match (va, vb) {
                (Some(a), Some(b)) if !b.is_zero() => Some(a / b),
                _ => None,
            },
        ),
    };
    (format!("({ta} {op} {tb})"), v)
}

fn fraction_nue(t: &str) -> bool {
    t.contains('/') && !t.contains(' ') && !t.starts_with('(')
}

/* ------------------------ Helpers invariants ------------------------ */

/// "w r/d" | "r/d" | "n" (signe devant) -> rationnel.
fn relit_mixte(s: &str) -> BigRational {
    let (neg, corps) = match s.strip_prefix('-') {
        Some(c) => (true, c),
        None => (false, s),
    };
    let v = match corps.split_once(' ') {
        Some((w, frac)) => BigRational::from_integer(w.parse().unwrap()) + relit_fraction(frac),
        None if corps.contains('/') => relit_fraction(corps),
        None => BigRational::from_integer(corps.parse().unwrap()),
    };
    if neg {
        -v
    } else {
        v
    }
}

fn relit_fraction(s: &str) -> BigRational {
    let (n, d) = s.split_once('/').unwrap();
    BigRational::new(n.parse().unwrap(), d.parse().unwrap())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_basique_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let d = BigInt::from(64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 4);
        let r = calculate(&expr, Mode::Basique, UniteSortie::FeetIn, true, 64);

        match attendu {
            Some(v) => {
                assert!(!r.est_erreur, "expr={expr:?} err={}", r.decimal);
                assert_eq!(r.impropre, format_improper(&v, &d).unwrap(), "expr={expr:?}");
                // mixte ≡ impropre
                assert_eq!(relit_mixte(&r.mixte), relit_fraction(&r.impropre), "expr={expr:?}");
                seen_ok += 1;
            }
            None => {
                assert!(r.est_erreur, "expr={expr:?}");
                assert_eq!((r.mixte.as_str(), r.impropre.as_str()), ("Error", "Error"));
                assert_eq!(r.decimal, "Division by zero");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_idempotence_sur_la_grille() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for den in [16u32, 32, 64, 128] {
        let d = BigInt::from(den);
        for _ in 0..25 {
            budget(t0, max);

            let (expr, attendu) = gen_expr(&mut rng, 3);
            let Some(v) = attendu else { continue };

            let r1 = calculate(&expr, Mode::Basique, UniteSortie::FeetIn, true, den);
            let r2 = calculate(&r1.mixte, Mode::Basique, UniteSortie::FeetIn, true, den);
            assert!(!r2.est_erreur, "relecture de {:?}: {}", r1.mixte, r2.decimal);

            // relire le mixte redonne la valeur accrochée (à 1/D près, ici exactement)
            let accroche = reduit(&v, &d).unwrap();
            let relu = relit_fraction(&r2.impropre);
            assert_eq!(relu, accroche, "expr={expr:?} mixte={:?}", r1.mixte);
            assert!((&relu - &v).abs() <= BigRational::new(BigInt::from(1), d.clone()));
        }
    }
}

#[test]
fn fuzz_safe_pieds_pouces_jamais_douze() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..200 {
        budget(t0, max);

        // longueurs proches des multiples de 12" (là où la retenue se joue)
        let pieds = rng.pick(20);
        let pouces = 11 + rng.pick(2);
        let millioniemes = 990_000 + rng.pick(10_000);
        let signe = if rng.coin() { "" } else { "-" };
        let expr = format!("{signe}({pieds}ft + {pouces}.{millioniemes}in)");

        for den in [16u32, 32, 64, 128] {
            let r = calculate(&expr, Mode::Avance, UniteSortie::FeetIn, true, den);
            assert!(!r.est_erreur, "expr={expr:?} err={}", r.decimal);
            assert!(
                !r.mixte.contains(" 12in") && !r.mixte.contains(" 12 "),
                "expr={expr:?} mixte={:?}",
                r.mixte
            );
            assert!(r.mixte.ends_with("in"), "mixte={:?}", r.mixte);
        }
    }
}

#[test]
fn fuzz_safe_erreurs_toujours_uniformes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xFEED_u64);
    let morceaux = [
        "1", "2/3", "ft", "in", "cm", "+", "-", "*", "/", "(", ")", " ", "x", ".", "1 1/2", "$",
    ];

    for _ in 0..300 {
        budget(t0, max);

        let n = 1 + rng.pick(8) as usize;
        let expr: String = (0..n)
            .map(|_| morceaux[rng.pick(morceaux.len() as u32) as usize])
            .collect();
        let mode = if rng.coin() { Mode::Basique } else { Mode::Avance };

        let r = calculate(&expr, mode, UniteSortie::Centimeter, true, 32);
        if r.est_erreur {
            assert_eq!((r.mixte.as_str(), r.impropre.as_str()), ("Error", "Error"));
            assert!(!r.decimal.is_empty());
        } else {
            assert_ne!(r.mixte, "Error", "expr={expr:?}");
            assert_ne!(r.impropre, "Error", "expr={expr:?}");
        }
        assert!(!r.trace.is_empty());
    }
}

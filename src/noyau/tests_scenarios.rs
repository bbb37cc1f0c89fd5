//! Tests de scénarios : pipeline complet via `calculate`.
//!
//! - scénarios de référence (basique / avancé / vide / erreurs)
//! - unités métriques et impériales, pieds-pouces
//! - forme uniforme des erreurs (jamais de mélange valeur/erreur)

use super::eval::{calculate, Mode, ResultatCalcul};
use super::unites::UniteSortie;

fn basique(expr: &str) -> ResultatCalcul {
    calculate(expr, Mode::Basique, UniteSortie::FeetIn, true, 32)
}

fn avance(expr: &str, sortie: UniteSortie, d: u32) -> ResultatCalcul {
    calculate(expr, Mode::Avance, sortie, true, d)
}

fn assert_triple(r: &ResultatCalcul, mixte: &str, impropre: &str, decimal: &str) {
    assert!(!r.est_erreur, "erreur inattendue: {:?}", r.decimal);
    assert_eq!(
        (r.mixte.as_str(), r.impropre.as_str(), r.decimal.as_str()),
        (mixte, impropre, decimal)
    );
}

fn assert_erreur(r: &ResultatCalcul, message: &str) {
    assert!(r.est_erreur, "erreur attendue, obtenu {:?}", r.mixte);
    assert_eq!(r.mixte, "Error");
    assert_eq!(r.impropre, "Error");
    assert_eq!(r.decimal, message);
}

/* ------------------------ Scénarios de référence ------------------------ */

#[test]
fn scen_basique_addition_fractions() {
    assert_triple(&basique("3/4 + 1/2"), "1 1/4", "5/4", "1.25");
}

#[test]
fn scen_basique_division_par_zero() {
    let r = basique("1/0");
    assert_erreur(&r, "Division by zero");
}

#[test]
fn scen_pieds_pouces() {
    let r = avance("1ft 6in", UniteSortie::FeetIn, 32);
    assert_triple(&r, "1ft 6in", "18/1 in", "18");
}

#[test]
fn scen_centimetres() {
    let r = avance("3cm + 2cm", UniteSortie::Centimeter, 32);
    assert_triple(&r, "5 Centimeter", "5/1 Centimeter", "5 Centimeter");
}

#[test]
fn scen_unite_et_nombre_sans_unite() {
    let r = avance("1ft + 2", UniteSortie::FeetIn, 32);
    assert_erreur(&r, "Unit mismatch");
}

#[test]
fn scen_entree_vide() {
    for expr in ["", "   "] {
        let r = avance(expr, UniteSortie::FeetIn, 32);
        assert!(!r.est_erreur);
        assert_eq!((r.mixte.as_str(), r.impropre.as_str(), r.decimal.as_str()), ("—", "—", "—"));
    }
}

/* ------------------------ Basique ------------------------ */

#[test]
fn basique_mixtes_et_symboles() {
    assert_triple(&basique("1 1/2 + 1 1/4"), "2 3/4", "11/4", "2.75");
    assert_triple(&basique("2 × 3 ÷ 4"), "1 1/2", "3/2", "1.5");
    assert_triple(&basique("5 − 7"), "-2", "-2/1", "-2");
    assert_triple(&basique("3 / 8"), "3/8", "3/8", "0.375");
}

#[test]
fn basique_associativite_division() {
    assert_triple(&basique("12 / 4 / 6 / 2"), "1/4", "1/4", "0.25");
    assert_triple(&basique("12/4/6/2"), "1/4", "1/4", "0.25");
}

#[test]
fn basique_refuse_unites_et_code() {
    assert_erreur(&basique("3ft + 1"), "Unexpected: 'ft'");
    assert_erreur(&basique("__import__('os')"), "Unexpected: '__import__'");
    assert_erreur(&basique("2 ** 3"), "Missing operand");
}

#[test]
fn basique_negatif_signe_grandeur() {
    assert_triple(&basique("1/4 - 1 1/2"), "-1 1/4", "-5/4", "-1.25");
    assert_triple(&basique("-(3/8)"), "-3/8", "-3/8", "-0.375");
}

/* ------------------------ Avancé ------------------------ */

#[test]
fn avance_pieds_pouces_fraction() {
    let r = avance("5ft 7 3/8in", UniteSortie::FeetIn, 16);
    assert_triple(&r, "5ft 7 3/8in", "539/8 in", "67.375");
}

#[test]
fn avance_pieds_pouces_decimaux_sans_zero() {
    let r = avance(".5ft 6in", UniteSortie::FeetIn, 32);
    assert_triple(&r, "1ft 0in", "12/1 in", "12");

    let r = avance("1ft .5in", UniteSortie::FeetIn, 32);
    assert_triple(&r, "1ft 1/2in", "25/2 in", "12.5");

    // même triple que la forme écrite avec '+'
    let r = avance(".5ft + 6in", UniteSortie::FeetIn, 32);
    assert_triple(&r, "1ft 0in", "12/1 in", "12");
}

#[test]
fn avance_scalaire_fois_longueur() {
    let r = avance("2 * 1ft 6in", UniteSortie::FeetIn, 32);
    assert_triple(&r, "3ft 0in", "36/1 in", "36");
}

#[test]
fn avance_negatif_pieds_pouces() {
    let r = avance("1ft - 2ft 6in", UniteSortie::FeetIn, 32);
    assert_triple(&r, "-1ft 6in", "-18/1 in", "-18");
}

#[test]
fn avance_metrique() {
    let r = avance("1m", UniteSortie::Millimeter, 32);
    assert_triple(&r, "1000 Millimeter", "1000/1 Millimeter", "1000 Millimeter");

    let r = avance("2.5cm + 5 mm", UniteSortie::Centimeter, 32);
    assert_triple(&r, "3 Centimeter", "3/1 Centimeter", "3 Centimeter");
}

#[test]
fn avance_grille_sur_metres() {
    // 1in = 0.0254m -> 127/5000 ; sur 1/32 : 1/32 (0.8128/32 -> 1)
    let r = avance("1in", UniteSortie::Meter, 32);
    assert_triple(&r, "1/32 Meter", "1/32 Meter", "0.0254 Meter");

    // précision désactivée : 127/5000 est déjà sur la grille 1/10^6
    let r = calculate("1in", Mode::Avance, UniteSortie::Meter, false, 32);
    assert_triple(&r, "127/5000 Meter", "127/5000 Meter", "0.0254 Meter");
}

#[test]
fn avance_pouces_en_pieds() {
    let r = avance("6in * 3", UniteSortie::Feet, 64);
    assert_triple(&r, "1 1/2 Feet", "3/2 Feet", "1.5 Feet");
}

#[test]
fn avance_sans_unite() {
    let r = avance("1 1/2 + 1", UniteSortie::Centimeter, 32);
    assert_triple(&r, "2 1/2", "5/2", "2.5");
}

#[test]
fn avance_erreurs() {
    assert_erreur(&avance("3inrg", UniteSortie::FeetIn, 32), "Unknown unit: inrg");
    assert_erreur(&avance("3in rg", UniteSortie::FeetIn, 32), "Unexpected: 'rg'");
    assert_erreur(&avance("1ft 3/8", UniteSortie::FeetIn, 32), "Missing operator");
    assert_erreur(
        &avance("2ft * 3in", UniteSortie::FeetIn, 32),
        "Cannot multiply/divide units",
    );
    assert_erreur(&avance("1ft / (2 - 2)", UniteSortie::FeetIn, 32), "Division by zero");
    assert_erreur(&avance("1.2.3in", UniteSortie::FeetIn, 32), "Missing operator");
    assert_erreur(&avance("(1ft + 2in", UniteSortie::FeetIn, 32), "Missing ')'");
}

#[test]
fn trace_toujours_rendue() {
    let ok = avance("1ft 6in", UniteSortie::FeetIn, 32);
    assert!(ok.trace.first().unwrap().contains("Mode=advanced"));
    assert!(ok.trace.iter().any(|e| e.starts_with("Formatted:")));

    let ko = basique("1/0");
    assert!(ko.trace.iter().any(|e| e.contains("Basic Eval Formula")));
    assert!(ko.trace.last().unwrap().starts_with("ZeroDivisionError"));
}

#[test]
fn appels_concurrents_independants() {
    let poignees: Vec<_> = (1..=8)
        .map(|i| {
            std::thread::spawn(move || {
                let r = avance(&format!("{i}ft"), UniteSortie::Inch, 32);
                (i, r)
            })
        })
        .collect();

    for p in poignees {
        let (i, r) = p.join().expect("thread");
        assert_eq!(r.decimal, format!("{} Inch", i * 12));
        // chaque démarche ne parle que de son propre calcul
        assert!(r.trace.iter().all(|e| !e.starts_with("Expression:")
            || e == &format!("Expression: {i}ft")));
    }
}

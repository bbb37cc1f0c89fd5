// src/noyau/pretraitement.rs
//
// Prétraitement (avant jetons) :
// - symboles : × -> *, ÷ -> /, − -> -
// - fractions : "3 / 8" -> "3/8"
// - avancé : "3 cm" -> "3cm" puis "1ft 6in" -> "(1ft+6in)"
// - basique : "1 1/2" -> "(1+1/2)"
//
// Les motifs sont compilés une seule fois (OnceLock), partagés en lecture seule.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::eval::{Demarche, Mode};

/// Nombre tel qu’écrit avant une unité : entier, a/b, "a b/c", décimal ou ".5".
const NOMBRE: &str = r"(?:\d+(?:/\d+|\s+\d+/\d+|\.\d+)?|\.\d+)";

struct Motifs {
    fraction: Regex,
    pieds_pouces: Regex,
    espace_unite: Regex,
    mixte: Regex,
}

fn motifs() -> &'static Motifs {
    static MOTIFS: OnceLock<Motifs> = OnceLock::new();
    MOTIFS.get_or_init(|| Motifs {
        fraction: Regex::new(r"(\d+)\s*/\s*(\d+)(\.\d+)?").expect("motif fraction"),
        pieds_pouces: Regex::new(&format!(
            r"(?i)({NOMBRE}(?:feet|foot|ft))\s*({NOMBRE}(?:inches|inch|in))"
        ))
        .expect("motif pieds-pouces"),
        espace_unite: Regex::new(&format!(r"({NOMBRE})\s+([a-zA-Z]+)")).expect("motif unité"),
        mixte: Regex::new(r"(\d+)\s+(\d+/\d+)").expect("motif mixte"),
    })
}

/// Normalise les symboles du clavier (×, ÷, −).
pub fn normalise_symboles(expr: &str) -> String {
    expr.replace('×', "*").replace('÷', "/").replace('−', "-")
}

/// "3 / 8" -> "3/8"
///
/// Sauf juste après un '/' : "12 / 4 / 6 / 2" garde "6 / 2" en divisions,
/// sinon "6/2" deviendrait un littéral et casserait l’associativité à gauche.
/// Un diviseur décimal ("7 / 3.5") reste aussi une division.
pub fn colle_fractions(expr: &str) -> String {
    motifs()
        .fraction
        .replace_all(expr, |c: &Captures| {
            let debut = c.get(0).map_or(0, |m| m.start());
            if c.get(3).is_some() || expr[..debut].trim_end().ends_with('/') {
                c[0].to_string()
            } else {
                format!("{}/{}", &c[1], &c[2])
            }
        })
        .into_owned()
}

/// "1ft 6in" -> "(1ft+6in)"
pub fn fusionne_pieds_pouces(expr: &str) -> String {
    motifs()
        .pieds_pouces
        .replace_all(expr, "(${1}+${2})")
        .into_owned()
}

/// "3 cm" -> "3cm"
pub fn colle_unites(expr: &str) -> String {
    motifs()
        .espace_unite
        .replace_all(expr, "${1}${2}")
        .into_owned()
}

/// "1 1/2" -> "(1+1/2)"
pub fn developpe_mixtes(expr: &str) -> String {
    motifs().mixte.replace_all(expr, "(${1}+${2})").into_owned()
}

/// Pipeline complet selon le mode.
pub fn pretraite(expr: &str, mode: Mode, demarche: &mut Demarche) -> String {
    let s = normalise_symboles(expr.trim());

    demarche.note("Preprocessing: Normalizing fractions...");
    let s = colle_fractions(&s);
    demarche.note(format!("After Fraction Fix: {s}"));

    let s = match mode {
        // unités collées d’abord : "1 ft 6 in" fusionne comme "1ft 6in"
        Mode::Avance => fusionne_pieds_pouces(&colle_unites(&s)),
        Mode::Basique => developpe_mixtes(&s),
    };

    demarche.note(format!("Final Preprocessed: {s}"));
    s
}

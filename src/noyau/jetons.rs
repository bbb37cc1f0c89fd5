// src/noyau/jetons.rs

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

use super::erreur::{ErreurCalcul, Resultat};
use super::eval::{Demarche, Mode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Littéral tel qu’écrit ("1 3/4", "2.5", "3/8") + suffixe d’unité éventuel.
    Num {
        texte: String,
        unite: Option<String>,
    },

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,
}

/// Littéral : mixte | fraction | décimal | entier (le plus long d’abord).
const LITTERAL: &str = r"\d+\s+\d+/\d+|\d+/\d+|\d+\.\d+|\.\d+|\d+";

fn motif(mode: Mode) -> &'static Regex {
    static AVANCE: OnceLock<Regex> = OnceLock::new();
    static BASIQUE: OnceLock<Regex> = OnceLock::new();

    match mode {
        // en avancé, le littéral peut porter un suffixe alphabétique (l’unité)
        Mode::Avance => AVANCE.get_or_init(|| {
            Regex::new(&format!(r"(?P<num>{LITTERAL})(?P<unite>[a-zA-Z]+)?|(?P<op>[-+*/()])"))
                .expect("motif jetons avancé")
        }),
        Mode::Basique => BASIQUE.get_or_init(|| {
            Regex::new(&format!(r"(?P<num>{LITTERAL})|(?P<op>[-+*/()])"))
                .expect("motif jetons basique")
        }),
    }
}

fn tok_operateur(c: &str) -> Resultat<Tok> {
    Ok(match c {
        "+" => Tok::Plus,
        "-" => Tok::Minus,
        "*" => Tok::Star,
        "/" => Tok::Slash,
        "(" => Tok::LPar,
        ")" => Tok::RPar,
        autre => return Err(ErreurCalcul::interne(format!("opérateur inconnu: {autre}"))),
    })
}

/// Premier reste non blanc entre les spans reconnus (ou après le dernier).
fn premier_reste(s: &str, spans: &[Range<usize>]) -> Option<String> {
    let mut fin = 0;
    for sp in spans {
        let saute = s[fin..sp.start].trim();
        if !saute.is_empty() {
            return Some(saute.to_string());
        }
        fin = sp.end;
    }
    let queue = s[fin..].trim();
    (!queue.is_empty()).then(|| queue.to_string())
}

/// Après un '/', une fraction nue "b/c" redevient "b", '/', "c" :
/// "12/4/6/2" vaut ((12/4)/6)/2 et non (12/4)/(6/2).
fn pousse_nombre(out: &mut Vec<Tok>, texte: &str, unite: Option<String>) {
    let apres_slash = matches!(out.last(), Some(Tok::Slash));
    if let (true, None, Some((a, b))) = (apres_slash, &unite, texte.split_once('/')) {
        if !texte.contains(char::is_whitespace) {
            out.push(Tok::Num {
                texte: a.to_string(),
                unite: None,
            });
            out.push(Tok::Slash);
            out.push(Tok::Num {
                texte: b.to_string(),
                unite: None,
            });
            return;
        }
    }
    out.push(Tok::Num {
        texte: texte.to_string(),
        unite,
    });
}

/// Tokenize une chaîne prétraitée.
///
/// Vérifie ensuite que les spans reconnus couvrent toute l’entrée (hors blancs) :
/// "3in $" ne doit pas être tronqué en "3in" mais échouer sur "$".
pub fn tokenize(s: &str, mode: Mode, demarche: &mut Demarche) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let mut spans = Vec::new();

    for c in motif(mode).captures_iter(s) {
        let Some(m) = c.get(0) else { continue };
        spans.push(m.range());

        if let Some(num) = c.name("num") {
            let unite = c.name("unite").map(|u| u.as_str().to_string());
            pousse_nombre(&mut out, num.as_str(), unite);
        } else if let Some(op) = c.name("op") {
            out.push(tok_operateur(op.as_str())?);
        }
    }

    demarche.note(format!("Tokens: [{}]", format_tokens(&out)));

    if let Some(reste) = premier_reste(s, &spans) {
        return Err(ErreurCalcul::syntaxe(format!("Unexpected: '{reste}'")));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num { texte, unite } => match unite {
                Some(u) => format!("'{texte}{u}'"),
                None => format!("'{texte}'"),
            },

            Tok::Plus => "'+'".to_string(),
            Tok::Minus => "'-'".to_string(),
            Tok::Star => "'*'".to_string(),
            Tok::Slash => "'/'".to_string(),

            Tok::LPar => "'('".to_string(),
            Tok::RPar => "')'".to_string(),
        };
        out.push(s);
    }
    out.join(", ")
}

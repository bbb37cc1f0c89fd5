//! Noyau : évaluation (pipeline réel)
//!
//! prétraitement -> jetons (+ couverture) -> shunting-yard (valeurs étiquetées)
//!        -> conversion de sortie -> grille 1/D -> mixte / impropre / décimal
//!
//! Tout vit le temps d’UN appel : la démarche est locale (passée en `&mut`),
//! aucun état global mutable. Appels concurrents sans verrou.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreur::{ErreurCalcul, Resultat};
use super::format::{
    format_decimal, format_improper, format_mixed, format_pieds_pouces, format_rat_pretty,
};
use super::jetons::tokenize;
use super::pretraitement::pretraite;
use super::rpn::{convertit_sortie, evalue, Valeur};
use super::unites::UniteSortie;

/// Dénominateurs proposés par l’UI (1/16" … 1/128").
pub const PRECISIONS: [u32; 4] = [16, 32, 64, 128];

/// Grille quand la précision est désactivée (≈ décimal continu).
pub const DENOMINATEUR_CONTINU: u32 = 1_000_000;

/// Affichage quand l’entrée est vide.
pub const VIDE: &str = "—";

/* ------------------------ Démarche (trace locale) ------------------------ */

/// Étapes lisibles d’un calcul. Chaque étape part aussi dans `log` (debug).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    etapes: Vec<String>,
}

impl Demarche {
    pub fn note(&mut self, etape: impl Into<String>) {
        let etape = etape.into();
        log::debug!("{etape}");
        self.etapes.push(etape);
    }

    pub fn etapes(&self) -> &[String] {
        &self.etapes
    }

    pub fn into_etapes(self) -> Vec<String> {
        self.etapes
    }
}

/* ------------------------ Réglages ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Arithmétique rationnelle pure, sans unités.
    #[default]
    Basique,
    /// Unités de longueur + conversion de sortie.
    Avance,
}

impl Mode {
    pub fn libelle(self) -> &'static str {
        match self {
            Mode::Basique => "basic",
            Mode::Avance => "advanced",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.libelle())
    }
}

impl FromStr for Mode {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "basic" => Ok(Mode::Basique),
            "advanced" => Ok(Mode::Avance),
            autre => Err(ErreurCalcul::valeur(format!("Unknown mode: {autre}"))),
        }
    }
}

/// Paramètres d’un calcul (ceux que l’UI fournit à chaque recalcul).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub mode: Mode,
    pub unite_sortie: UniteSortie,
    pub precision_active: bool,
    pub denominateur: u32,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode: Mode::Basique,
            unite_sortie: UniteSortie::FeetIn,
            precision_active: true,
            denominateur: 32,
        }
    }
}

impl Reglages {
    /// Borne D de la grille.
    pub fn grille(&self) -> Resultat<BigInt> {
        if !self.precision_active {
            return Ok(BigInt::from(DENOMINATEUR_CONTINU));
        }
        if self.denominateur == 0 {
            return Err(ErreurCalcul::valeur("Invalid precision"));
        }
        Ok(BigInt::from(self.denominateur))
    }
}

/* ------------------------ Résultat ------------------------ */

/// Résultat d’un appel ; jamais modifié après construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultatCalcul {
    pub mixte: String,
    pub impropre: String,
    pub decimal: String,
    pub est_erreur: bool,
    pub trace: Vec<String>,
}

impl ResultatCalcul {
    fn vide(demarche: Demarche) -> Self {
        Self {
            mixte: VIDE.to_string(),
            impropre: VIDE.to_string(),
            decimal: VIDE.to_string(),
            est_erreur: false,
            trace: demarche.into_etapes(),
        }
    }

    fn erreur(e: &ErreurCalcul, demarche: Demarche) -> Self {
        Self {
            mixte: "Error".to_string(),
            impropre: "Error".to_string(),
            decimal: e.to_string(),
            est_erreur: true,
            trace: demarche.into_etapes(),
        }
    }
}

/* ------------------------ Évaluateurs ------------------------ */

/// Mode basique : rationnels purs (+ - * / et parenthèses), aucune unité.
pub fn evaluate_basic(expression: &str, demarche: &mut Demarche) -> Resultat<BigRational> {
    let s = pretraite(expression, Mode::Basique, demarche);
    demarche.note(format!("Basic Eval Formula: {s}"));
    let jetons = tokenize(&s, Mode::Basique, demarche)?;
    Ok(evalue(&jetons, demarche)?.grandeur)
}

/// Mode avancé : unités -> mètres, puis conversion vers `sortie`.
pub fn evaluate_advanced(
    expression: &str,
    sortie: UniteSortie,
    demarche: &mut Demarche,
) -> Resultat<Valeur> {
    let s = pretraite(expression, Mode::Avance, demarche);
    let jetons = tokenize(&s, Mode::Avance, demarche)?;
    let v = evalue(&jetons, demarche)?;
    Ok(convertit_sortie(v, sortie, demarche))
}

/// (mixte, impropre, décimal) ; échoue au premier problème.
fn calcule(
    expression: &str,
    reglages: &Reglages,
    demarche: &mut Demarche,
) -> Resultat<(String, String, String)> {
    let d = reglages.grille()?;

    let (v, suffixe, pieds_pouces) = match reglages.mode {
        Mode::Basique => (evaluate_basic(expression, demarche)?, String::new(), false),
        Mode::Avance => {
            let v = evaluate_advanced(expression, reglages.unite_sortie, demarche)?;
            let sortie = reglages.unite_sortie;
            if v.avec_unite && sortie.est_pieds_pouces() {
                (v.grandeur, String::new(), true)
            } else if v.avec_unite {
                (v.grandeur, format!(" {}", sortie.libelle()), false)
            } else {
                (v.grandeur, String::new(), false)
            }
        }
    };

    demarche.note(format!("Evaluated Value: {}", format_rat_pretty(&v)));

    let decimal = format!("{}{suffixe}", format_decimal(&v));
    let (mixte, impropre) = if pieds_pouces {
        (
            format_pieds_pouces(&v, &d)?,
            format!("{} in", format_improper(&v, &d)?),
        )
    } else {
        (
            format!("{}{suffixe}", format_mixed(&v, &d)?),
            format!("{}{suffixe}", format_improper(&v, &d)?),
        )
    };

    demarche.note(format!(
        "Formatted: Mixed={mixte}, Imp={impropre}, Dec={decimal}"
    ));
    Ok((mixte, impropre, decimal))
}

/* ------------------------ API publique ------------------------ */

/// Point d’entrée : évalue `expression` et rend les trois affichages + la démarche.
///
/// - entrée vide -> "—" partout, pas d’erreur
/// - toute erreur -> ("Error", "Error", message), `est_erreur = true`
/// - la démarche accumulée est rendue dans les deux cas
pub fn calculate(
    expression: &str,
    mode: Mode,
    unite_sortie: UniteSortie,
    precision_active: bool,
    denominateur: u32,
) -> ResultatCalcul {
    let reglages = Reglages {
        mode,
        unite_sortie,
        precision_active,
        denominateur,
    };
    calculate_avec(expression, &reglages)
}

/// Variante avec réglages groupés (utilisée par l’UI).
pub fn calculate_avec(expression: &str, reglages: &Reglages) -> ResultatCalcul {
    let mut demarche = Demarche::default();
    demarche.note(format!("--- Start Calculation: Mode={} ---", reglages.mode));
    demarche.note(format!("Expression: {expression}"));

    if expression.trim().is_empty() {
        return ResultatCalcul::vide(demarche);
    }

    match calcule(expression, reglages, &mut demarche) {
        Ok((mixte, impropre, decimal)) => ResultatCalcul {
            mixte,
            impropre,
            decimal,
            est_erreur: false,
            trace: demarche.into_etapes(),
        },
        Err(e) => {
            log::debug!("{} sur {expression:?}: {e}", e.genre());
            demarche.note(format!("{}: {e}", e.genre()));
            ResultatCalcul::erreur(&e, demarche)
        }
    }
}

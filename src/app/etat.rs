//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, réglages, dernier résultat,
//! historique) et offrir les actions simples (C / DEL / historique).
//!
//! Le calcul lui-même est délégué au noyau (`calculate_avec`), l’état ne fait
//! que déposer le résultat et tenir l’historique.

use chrono::{DateTime, Local};

use calculatrice_fractions::{calculate_avec, Mode, Reglages, ResultatCalcul, UniteSortie};

/// Taille max de l’historique (les plus anciens tombent).
pub const HISTORIQUE_MAX: usize = 100;

/// Forme affichée en grand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VueResultat {
    #[default]
    Mixte,
    Impropre,
    Decimal,
}

impl VueResultat {
    pub const TOUTES: [VueResultat; 3] =
        [VueResultat::Mixte, VueResultat::Impropre, VueResultat::Decimal];

    pub fn libelle(self) -> &'static str {
        match self {
            VueResultat::Mixte => "Mixed",
            VueResultat::Impropre => "Improper",
            VueResultat::Decimal => "Decimal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: ResultatCalcul,
    pub horodatage: DateTime<Local>,
}

impl EntreeHistorique {
    /// "HH:MM" (liste d’historique).
    pub fn heure(&self) -> String {
        self.horodatage.format("%H:%M").to_string()
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sortie (dernier calcul) ---
    pub resultat: Option<ResultatCalcul>,
    pub vue: VueResultat,

    // --- paramètres ---
    pub reglages: Reglages,

    // --- historique (plus récent en tête) ---
    pub historique: Vec<EntreeHistorique>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: None,
            vue: VueResultat::default(),
            reglages: Reglages::default(),
            historique: Vec::new(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” ------------------------ */

    /// C : efface l’entrée et le résultat (l’historique reste).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.resultat = None;
        self.focus_entree = true;
    }

    /// DEL : retire le dernier caractère (et les blancs qui le suivaient).
    pub fn backspace_entree(&mut self) {
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        self.focus_entree = true;
    }

    pub fn clear_historique(&mut self) {
        self.historique.clear();
    }

    /// Clic sur une entrée d’historique : on récupère son expression.
    pub fn restaure(&mut self, index: usize) {
        if let Some(h) = self.historique.get(index) {
            self.entree = h.expression.clone();
            self.resultat = Some(h.resultat.clone());
            self.focus_entree = true;
        }
    }

    /* ------------------------ Calcul ------------------------ */

    /// Enter / "=" : calcule et, si succès, ajoute à l’historique.
    pub fn evalue(&mut self) {
        let r = self.calcule();
        if !r.est_erreur && !self.entree.trim().is_empty() {
            self.pousse_historique(self.entree.trim().to_string(), r.clone());
        }
        self.resultat = Some(r);
        self.focus_entree = true;
    }

    /// Unité ou précision changée : recalcul silencieux (pas d’historique),
    /// seulement en avancé et s’il y a quelque chose à recalculer.
    pub fn recalcule(&mut self) {
        if self.reglages.mode != Mode::Avance || self.entree.trim().is_empty() {
            return;
        }
        self.resultat = Some(self.calcule());
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.reglages.mode != mode {
            self.reglages.mode = mode;
            self.resultat = None;
        }
    }

    pub fn set_unite_sortie(&mut self, unite: UniteSortie) {
        if self.reglages.unite_sortie != unite {
            self.reglages.unite_sortie = unite;
            self.recalcule();
        }
    }

    pub fn set_precision(&mut self, active: bool, denominateur: u32) {
        let avant = (self.reglages.precision_active, self.reglages.denominateur);
        if avant != (active, denominateur) {
            self.reglages.precision_active = active;
            self.reglages.denominateur = denominateur;
            self.recalcule();
        }
    }

    fn calcule(&self) -> ResultatCalcul {
        calculate_avec(&self.entree, &self.reglages)
    }

    fn pousse_historique(&mut self, expression: String, resultat: ResultatCalcul) {
        // doublon consécutif (même expression, même mixte) : ignoré
        if let Some(h) = self.historique.first() {
            if h.expression == expression && h.resultat.mixte == resultat.mixte {
                return;
            }
        }

        log::info!("historique: {expression} = {}", resultat.mixte);
        self.historique.insert(
            0,
            EntreeHistorique {
                expression,
                resultat,
                horodatage: Local::now(),
            },
        );
        self.historique.truncate(HISTORIQUE_MAX);
    }
}

// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// - Clavier : Enter évalue (quand le champ a le focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Réglages : mode, unité de sortie, précision (avancé)
// - Résultat : mixte / impropre / décimal, erreur en couleur d’erreur
// - Historique cliquable + démarche repliable

use eframe::egui;

use calculatrice_fractions::noyau::eval::PRECISIONS;
use calculatrice_fractions::{Mode, UniteSortie};

use super::etat::{AppCalc, VueResultat};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice fractions");
                ui.add_space(6.0);

                self.ui_reglages(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
                self.ui_demarche(ui);
            });
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Mode :");
            let mut mode = self.reglages.mode;
            ui.selectable_value(&mut mode, Mode::Basique, "Basic");
            ui.selectable_value(&mut mode, Mode::Avance, "Advanced");
            self.set_mode(mode);
        });

        if self.reglages.mode != Mode::Avance {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.label("Unit :");
            let mut unite = self.reglages.unite_sortie;
            egui::ComboBox::from_id_salt("unite_sortie")
                .selected_text(unite.description())
                .show_ui(ui, |ui| {
                    for u in UniteSortie::TOUTES {
                        ui.selectable_value(&mut unite, u, u.description());
                    }
                });
            self.set_unite_sortie(unite);

            ui.separator();

            let mut active = self.reglages.precision_active;
            let mut den = self.reglages.denominateur;
            ui.checkbox(&mut active, "Precision");
            ui.add_enabled_ui(active, |ui| {
                egui::ComboBox::from_id_salt("precision")
                    .selected_text(format!("1/{den}"))
                    .show_ui(ui, |ui| {
                        for p in PRECISIONS {
                            ui.selectable_value(&mut den, p, format!("1/{p}"));
                        }
                    });
            });
            self.set_precision(active, den);
        });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        let hint = match self.reglages.mode {
            Mode::Basique => "Ex: 3/4 + 1 1/2",
            Mode::Avance => "Ex: 5ft 7 3/8in + 2 1/4in",
        };

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text(hint)
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter seulement si le champ a le focus (pas de déclenchement “global”)
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.evalue();
        }

        ui.add_space(8.0);
        self.ui_pave(ui);
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_fractions")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in [["7", "8", "9", "/", "("], ["4", "5", "6", "*", ")"], [
                    "1", "2", "3", "-", " ",
                ]] {
                    for t in rangee {
                        self.bouton_insert(ui, t);
                    }
                    ui.end_row();
                }

                self.bouton_insert(ui, "0");
                self.bouton_insert(ui, ".");
                self.bouton_action(ui, "C", "Efface l’entrée et le résultat", Action::Clear);
                self.bouton_insert(ui, "+");
                self.bouton_action(ui, "DEL", "Efface le dernier caractère", Action::Backspace);
                ui.end_row();
            });

        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            if self.reglages.mode == Mode::Avance {
                for u in ["ft", "in", "m", "cm", "mm"] {
                    self.bouton_insert(ui, u);
                }
                ui.add_space(10.0);
            }

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.evalue();
            }
        });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for v in VueResultat::TOUTES {
                ui.radio_value(&mut self.vue, v, v.libelle());
            }
        });

        let Some(r) = &self.resultat else {
            Self::champ_monospace(ui, "resultat_out", "—", 2);
            return;
        };

        if r.est_erreur {
            ui.colored_label(ui.visuals().error_fg_color, &r.decimal);
            return;
        }

        let principal = match self.vue {
            VueResultat::Mixte => &r.mixte,
            VueResultat::Impropre => &r.impropre,
            VueResultat::Decimal => &r.decimal,
        };
        Self::champ_monospace(ui, "resultat_out", principal, 2);

        ui.add_space(4.0);
        ui.monospace(format!("{}  |  {}  |  {}", r.mixte, r.impropre, r.decimal));
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut choisi = None;
        let mut vider = false;

        egui::CollapsingHeader::new(format!("History ({})", self.historique.len()))
            .default_open(false)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.label("—");
                    return;
                }
                for (i, h) in self.historique.iter().enumerate() {
                    let texte = format!("{}  {} = {}", h.heure(), h.expression, h.resultat.mixte);
                    if ui.selectable_label(false, texte).clicked() {
                        choisi = Some(i);
                    }
                }
                ui.add_space(4.0);
                vider = ui.button("Clear history").clicked();
            });

        if let Some(i) = choisi {
            self.restaure(i);
        }
        if vider {
            self.clear_historique();
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Debug trace")
            .default_open(false)
            .show(ui, |ui| match &self.resultat {
                Some(r) => {
                    let trace = r.trace.join("\n");
                    Self::champ_monospace(ui, "demarche_out", &trace, r.trace.len());
                }
                None => {
                    ui.monospace("—");
                }
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule : Frame + Label monospace, pas de TextEdit.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Clear => self.clear_entree(),
                Action::Backspace => self.backspace_entree(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, texte: &str) {
        let label = if texte == " " { "␣" } else { texte };
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match texte {
            "+" | "-" | "*" => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
                self.entree.push(' ');
            }
            // '/' collé : "3/8" reste une fraction
            _ => self.entree.push_str(texte),
        }

        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Clear,
    Backspace,
}

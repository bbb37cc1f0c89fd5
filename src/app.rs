// src/app.rs
//
// Calculatrice fractions : module App (racine)
// --------------------------------------------
// - Sous-modules : etat.rs (état + actions) et vue.rs (widgets egui)
// - Impl eframe::App (natif + web)
//
// Enter est géré dans vue.rs, quand le champ a le focus.

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = comme le bouton "C"
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

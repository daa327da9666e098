// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Pavé : même disposition que la calculatrice d’origine
// - Chaque bouton envoie son texte à AppCalc::appuyer_touche (même chemin que le clavier)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::EtatSaisie;

/// Pavé, ligne par ligne.
const PAVE: [&[&str]; 6] = [
    &["C", "(", ")", "%"],
    &["7", "8", "9", "/"],
    &["4", "5", "6", "*"],
    &["1", "2", "3", "-"],
    &["0", ".", "=", "+"],
    &["^", "√"],
];

const TAILLE_BOUTON: [f32; 2] = [64.0, 48.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.heading("Calculatrice");
        ui.add_space(6.0);

        self.ui_affichage(ui);

        ui.add_space(8.0);
        self.ui_pave(ui);

        ui.add_space(8.0);
        ui.separator();
        self.ui_demarche(ui);
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        let couleur = if self.etat() == EtatSaisie::Erreur {
            ui.visuals().error_fg_color
        } else {
            ui.visuals().strong_text_color()
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.affichage)
                            .monospace()
                            .size(28.0)
                            .color(couleur),
                    );
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for &touche in ligne {
                        let resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(touche));
                        if resp.clicked() {
                            self.appuyer_touche(touche);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                ui.label("Jetons :");
                ui.monospace(self.controleur.trace());
            });
    }
}

// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Clavier et boutons produisent la MÊME entrée (Entree::depuis_touche) :
//   une seule machine à états, pas une par canal.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use calculatrice_portfolio::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

/// Touches nommées relayées au contrôleur (le reste passe par Event::Text).
fn nom_touche(key: egui::Key) -> Option<&'static str> {
    match key {
        egui::Key::Enter => Some("Enter"),
        egui::Key::Backspace => Some("Backspace"),
        egui::Key::Escape => Some("Escape"),
        _ => None,
    }
}

impl AppCalc {
    /// Collecte les touches de la frame, dans l’ordre de frappe.
    fn touches_clavier(ctx: &egui::Context) -> Vec<String> {
        ctx.input(|i| {
            let mut touches = Vec::new();
            for ev in &i.events {
                match ev {
                    egui::Event::Text(t) => touches.extend(t.chars().map(String::from)),
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => {
                        if let Some(nom) = nom_touche(*key) {
                            touches.push(nom.to_string());
                        }
                    }
                    _ => {}
                }
            }
            touches
        })
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for touche in Self::touches_clavier(ctx) {
            self.appuyer_touche(&touche);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }

    /// Seul l’affichage est sauvegardé (la session repart vide).
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, etat::CLE_INSTANTANE, &self.instantane());
    }
}

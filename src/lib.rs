//! Calculatrice du portfolio : moteur d’expressions + écran egui (natif + web).
//!
//! - `noyau` : pur, sans UI (tokenisation, évaluation, session, contrôleur de saisie)
//! - `app`   : écran hôte (état + vue egui + persistance de l’affichage)

pub mod app;
pub mod noyau;

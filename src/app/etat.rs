//! src/app/etat.rs
//!
//! État de l’écran calculatrice (sans vue).
//!
//! Rôle : posséder le texte affiché, la session (= répété) et le contrôleur,
//! et offrir un point d’entrée unique pour les touches (clavier ET boutons).
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par le contrôleur du noyau.
//! - Seul le texte affiché survit à la fermeture de l’écran (instantané) ;
//!   la session repart toujours vide.

use serde::{Deserialize, Serialize};

use crate::noyau::controleur::AFFICHAGE_INITIAL;
use crate::noyau::{Controleur, Entree, EtatSaisie, Session};

/// Clé de l’instantané dans le stockage eframe.
pub const CLE_INSTANTANE: &str = "calculatrice_affichage";

/// Ce qui est persisté entre deux ouvertures de l’écran.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instantane {
    pub affichage: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- affichage (seul canal saisie <-> moteur) ---
    pub affichage: String,

    // --- mémoire du = répété (jamais persistée) ---
    pub session: Session,

    pub controleur: Controleur,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            affichage: AFFICHAGE_INITIAL.to_string(),
            session: Session::default(),
            controleur: Controleur::default(),
        }
    }
}

impl AppCalc {
    /// Crée l’écran, en restaurant le dernier affichage s’il existe.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let instantane = cc
            .storage
            .and_then(|s| eframe::get_value::<Instantane>(s, CLE_INSTANTANE));

        match instantane {
            Some(i) => {
                log::debug!("affichage restauré: {:?}", i.affichage);
                Self::depuis_instantane(i)
            }
            None => Self::default(),
        }
    }

    /* ------------------------ Saisie ------------------------ */

    /// Applique une entrée canonique.
    pub fn appuyer(&mut self, entree: Entree) {
        self.controleur
            .traiter(entree, &mut self.affichage, &mut self.session);
    }

    /// Texte de touche/bouton -> entrée. Les touches inconnues sont ignorées.
    pub fn appuyer_touche(&mut self, touche: &str) {
        if let Some(e) = Entree::depuis_touche(touche) {
            self.appuyer(e);
        }
    }

    pub fn etat(&self) -> EtatSaisie {
        self.controleur.etat()
    }

    /* ------------------------ Instantané ------------------------ */

    pub fn instantane(&self) -> Instantane {
        Instantane {
            affichage: self.affichage.clone(),
        }
    }

    /// Texte restauré tel quel ; session vide.
    pub fn depuis_instantane(i: Instantane) -> Self {
        // garde-fou : un stockage vide ne doit pas laisser l’écran vide
        let affichage = if i.affichage.is_empty() {
            AFFICHAGE_INITIAL.to_string()
        } else {
            i.affichage
        };

        Self {
            controleur: Controleur::restaurer(&affichage),
            affichage,
            session: Session::default(),
        }
    }
}

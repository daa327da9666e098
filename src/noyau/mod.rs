//! Noyau de calcul (flottants double précision)
//!
//! Organisation interne :
//! - erreur.rs     : taxonomie des erreurs (texte affiché)
//! - operateurs.rs : registre fermé des opérateurs (précédence, arité, application)
//! - jetons.rs     : tokenisation + multiplication implicite
//! - eval.rs       : évaluation à deux piles
//! - session.rs    : mémoire du = répété
//! - format.rs     : rendu / relecture de la valeur affichée
//! - controleur.rs : machine à états de la saisie

pub mod controleur;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod operateurs;
pub mod session;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use controleur::{Controleur, Ecran, Entree, EtatSaisie};
pub use erreur::ErreurCalc;
pub use eval::evaluer;
pub use session::Session;

// src/noyau/session.rs
//
// Mémoire “répéter la dernière opération” (= = =).
// Valeur explicite, passée à la main : pas d’état global.

use super::erreur::ErreurCalc;
use super::operateurs::Operateur;

/// Dernière opération binaire appliquée + son opérande de droite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerniereOperation {
    pub operateur: Operateur,
    pub operande: f64,
}

impl DerniereOperation {
    /// `valeur (op) operande`
    pub fn reappliquer(&self, valeur: f64) -> Result<f64, ErreurCalc> {
        let v = self.operateur.appliquer(&[valeur, self.operande])?;
        if v.is_nan() {
            return Err(ErreurCalc::ResultatNonNombre);
        }
        Ok(v)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Session {
    derniere: Option<DerniereOperation>,
}

impl Session {
    /// Écrase (n’accumule pas) l’opération mémorisée.
    pub fn memoriser(&mut self, op: DerniereOperation) {
        self.derniere = Some(op);
    }

    pub fn vider(&mut self) {
        self.derniere = None;
    }

    pub fn derniere(&self) -> Option<DerniereOperation> {
        self.derniere
    }

    pub fn est_vide(&self) -> bool {
        self.derniere.is_none()
    }

    /// Réapplique l’opération mémorisée à la valeur affichée.
    /// None : rien de mémorisé (le “=” répété ne fait rien).
    pub fn repeter(&self, valeur_affichee: f64) -> Option<Result<f64, ErreurCalc>> {
        self.derniere.map(|op| op.reappliquer(valeur_affichee))
    }
}

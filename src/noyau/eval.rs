//! Noyau — évaluation (deux piles, précédence)
//!
//! texte -> jetons -> piles valeurs/opérateurs -> f64
//!
//! Règles :
//! - précédence égale : on dépile AVANT d’empiler (associatif à gauche, `^` compris)
//! - √ (préfixe) : empilé sans rien dépiler, doit être suivi d’un opérande
//! - toute panne du registre interrompt tout : aucune valeur partielle
//! - chaque application binaire devient la “dernière opération” (répétition du =)

use super::erreur::ErreurCalc;
use super::jetons::{tokenize, Jeton};
use super::operateurs::{Fonction, Operateur};
use super::session::DerniereOperation;

/// Résultat d’une évaluation réussie.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub valeur: f64,
    /// Dernière application binaire (None si l’expression n’en contient aucune).
    pub derniere: Option<DerniereOperation>,
}

/// API publique : évalue un texte (fonction pure, sans contrôleur).
pub fn evaluer(texte: &str) -> Result<f64, ErreurCalc> {
    calculer(texte).map(|e| e.valeur)
}

/// Comme `evaluer`, en gardant la dernière opération binaire.
pub fn calculer(texte: &str) -> Result<Evaluation, ErreurCalc> {
    evaluer_jetons(&tokenize(texte))
}

/// Entrée de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Attente {
    Parenthese,
    Op(Operateur),
}

#[derive(Default)]
struct Piles {
    valeurs: Vec<f64>,
    ops: Vec<Attente>,
    derniere: Option<DerniereOperation>,
}

impl Piles {
    fn appliquer(&mut self, op: Operateur) -> Result<(), ErreurCalc> {
        let manque = op.erreur_operande_manquant();

        let v = match op.fonction() {
            Fonction::Unaire(f) => {
                let a = self.valeurs.pop().ok_or(manque)?;
                f(a)?
            }
            Fonction::Binaire(f) => {
                let b = self.valeurs.pop().ok_or(manque)?;
                let a = self.valeurs.pop().ok_or(manque)?;
                let v = f(a, b)?;
                self.derniere = Some(DerniereOperation {
                    operateur: op,
                    operande: b,
                });
                v
            }
        };

        self.valeurs.push(v);
        Ok(())
    }

    /// Dépile et applique tant que le sommet lie au moins aussi fort que `precedence`.
    fn reduire(&mut self, precedence: u8) -> Result<(), ErreurCalc> {
        while let Some(&Attente::Op(haut)) = self.ops.last() {
            if haut.precedence() < precedence {
                break;
            }
            self.ops.pop();
            self.appliquer(haut)?;
        }
        Ok(())
    }

    /// `)` : applique jusqu’à la `(` correspondante, qui est jetée.
    fn fermer_parenthese(&mut self) -> Result<(), ErreurCalc> {
        loop {
            match self.ops.pop() {
                Some(Attente::Parenthese) => return Ok(()),
                Some(Attente::Op(op)) => self.appliquer(op)?,
                None => return Err(ErreurCalc::ExpressionMalformee),
            }
        }
    }
}

/// Évalue une suite de jetons (algorithme à deux piles).
pub fn evaluer_jetons(jetons: &[Jeton]) -> Result<Evaluation, ErreurCalc> {
    let mut piles = Piles::default();

    // vrai juste après un √ : le jeton suivant doit ouvrir un opérande
    let mut attend_operande = false;

    for &jeton in jetons {
        if attend_operande && !ouvre_operande(jeton) {
            return Err(ErreurCalc::RacineInvalide);
        }
        attend_operande = false;

        match jeton {
            Jeton::Nombre(v) => {
                if v.is_nan() {
                    return Err(ErreurCalc::ExpressionMalformee);
                }
                piles.valeurs.push(v);
            }

            Jeton::ParentheseOuvrante => piles.ops.push(Attente::Parenthese),

            Jeton::ParentheseFermante => piles.fermer_parenthese()?,

            Jeton::Operateur(op) if op.est_unaire() => {
                piles.ops.push(Attente::Op(op));
                attend_operande = true;
            }

            Jeton::Operateur(op) => {
                piles.reduire(op.precedence())?;
                piles.ops.push(Attente::Op(op));
            }
        }
    }

    if attend_operande {
        return Err(ErreurCalc::RacineInvalide);
    }

    // vide la pile ops
    while let Some(attente) = piles.ops.pop() {
        match attente {
            // parenthèse jamais fermée
            Attente::Parenthese => return Err(ErreurCalc::ExpressionMalformee),
            Attente::Op(op) => piles.appliquer(op)?,
        }
    }

    let valeur = match piles.valeurs.as_slice() {
        &[v] => v,
        _ => return Err(ErreurCalc::ExpressionMalformee),
    };
    if valeur.is_nan() {
        return Err(ErreurCalc::ResultatNonNombre);
    }

    Ok(Evaluation {
        valeur,
        derniere: piles.derniere,
    })
}

fn ouvre_operande(jeton: Jeton) -> bool {
    matches!(
        jeton,
        Jeton::Nombre(_) | Jeton::ParentheseOuvrante | Jeton::Operateur(Operateur::Racine)
    )
}

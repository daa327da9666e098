//! src/noyau/controleur.rs
//!
//! Contrôleur de saisie : machine à états qui applique UNE entrée canonique
//! (clavier ou bouton, même type) au texte affiché et à la session.
//!
//! Contrats :
//! - un seul point d’entrée synchrone : `Controleur::traiter`
//! - l’affichage est le seul canal entre saisie et moteur (trait `Ecran`)
//! - la session est passée explicitement (injectable / observable en test)
//! - aucune erreur ne sort d’ici : tout devient texte affiché

use super::erreur::{est_texte_erreur, ErreurCalc};
use super::eval::evaluer_jetons;
use super::format::{formater_nombre, lire_nombre};
use super::jetons::{format_jetons, tokenize};
use super::operateurs::Operateur;
use super::session::Session;

/// Texte affiché au démarrage et après C/Escape.
pub const AFFICHAGE_INITIAL: &str = "0";

/// Garde-fou : au-delà, les ajouts sont ignorés.
pub const LONGUEUR_MAX_AFFICHAGE: usize = 64;

/// Poignée d’affichage fournie par l’écran hôte.
pub trait Ecran {
    fn texte(&self) -> &str;
    fn ecrire(&mut self, texte: String);
}

impl Ecran for String {
    fn texte(&self) -> &str {
        self
    }

    fn ecrire(&mut self, texte: String) {
        *self = texte;
    }
}

/// Entrée canonique (clavier et boutons produisent la même).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entree {
    Chiffre(char),
    Point,
    /// Opérateur binaire seulement (+ - * / % ^).
    Operateur(Operateur),
    ParentheseOuvrante,
    ParentheseFermante,
    Racine,
    /// `=` ou Enter
    Valider,
    /// Backspace
    Effacer,
    /// C ou Escape
    Annuler,
}

impl Entree {
    /// Texte de touche (clavier) ou de bouton -> entrée. None : touche ignorée.
    pub fn depuis_touche(touche: &str) -> Option<Entree> {
        match touche {
            "=" | "Enter" => return Some(Entree::Valider),
            "Backspace" => return Some(Entree::Effacer),
            "Escape" | "C" => return Some(Entree::Annuler),
            _ => {}
        }

        let mut chars = touche.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        match c {
            '0'..='9' => Some(Entree::Chiffre(c)),
            '.' => Some(Entree::Point),
            '(' => Some(Entree::ParentheseOuvrante),
            ')' => Some(Entree::ParentheseFermante),
            '√' => Some(Entree::Racine),
            _ => Operateur::depuis_symbole(c)
                .filter(|op| !op.est_unaire())
                .map(Entree::Operateur),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EtatSaisie {
    /// "0" ou juste effacé
    #[default]
    Neuf,
    Edition,
    /// l’affichage contient l’issue d’un calcul
    Resultat,
    Erreur,
}

#[derive(Clone, Debug, Default)]
pub struct Controleur {
    etat: EtatSaisie,
    /// Dernière entrée qui a pris effet (désambiguïse le = répété).
    derniere: Option<Entree>,
    /// Jetons de la dernière expression évaluée (démarche).
    trace: String,
}

impl Controleur {
    pub fn etat(&self) -> EtatSaisie {
        self.etat
    }

    pub fn derniere(&self) -> Option<Entree> {
        self.derniere
    }

    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// Contrôleur neuf pour un texte restauré (la session, elle, n’est jamais restaurée).
    pub fn restaurer(texte: &str) -> Self {
        let etat = if texte == AFFICHAGE_INITIAL {
            EtatSaisie::Neuf
        } else if est_texte_erreur(texte) {
            EtatSaisie::Erreur
        } else {
            EtatSaisie::Edition
        };
        Self {
            etat,
            ..Self::default()
        }
    }

    /// Point d’entrée unique : une entrée, traitée jusqu’au bout.
    pub fn traiter<E: Ecran + ?Sized>(
        &mut self,
        entree: Entree,
        ecran: &mut E,
        session: &mut Session,
    ) {
        let a_pris_effet = match entree {
            Entree::Annuler => {
                self.annuler(ecran, session);
                false
            }
            Entree::Valider => self.valider(ecran, session),
            Entree::Effacer => self.effacer(ecran, session),
            Entree::Racine => self.racine(ecran),
            Entree::Chiffre(c) => self.chiffre(c, ecran, session),
            Entree::Operateur(Operateur::Moins) => self.moins(ecran),
            Entree::Point => self.inserer(ecran, "."),
            Entree::Operateur(op) => self.inserer(ecran, &op.symbole().to_string()),
            Entree::ParentheseOuvrante => self.inserer(ecran, "("),
            Entree::ParentheseFermante => self.inserer(ecran, ")"),
        };

        if a_pris_effet {
            self.derniere = Some(entree);
        } else {
            log::debug!("entrée non mémorisée: {entree:?} (état {:?})", self.etat);
        }
    }

    /* ------------------------ Transitions ------------------------ */

    fn annuler<E: Ecran + ?Sized>(&mut self, ecran: &mut E, session: &mut Session) {
        ecran.ecrire(AFFICHAGE_INITIAL.to_string());
        session.vider();
        self.derniere = None;
        self.etat = EtatSaisie::Neuf;
    }

    fn valider<E: Ecran + ?Sized>(&mut self, ecran: &mut E, session: &mut Session) -> bool {
        let texte = ecran.texte().to_string();

        // = sur une erreur : efface
        if est_texte_erreur(&texte) {
            self.annuler(ecran, session);
            return false;
        }

        if self.derniere == Some(Entree::Valider) {
            self.repeter(&texte, ecran, session);
            return true;
        }

        let jetons = tokenize(&texte);
        self.trace = format_jetons(&jetons);

        let resultat = evaluer_jetons(&jetons).map(|e| {
            if let Some(op) = e.derniere {
                session.memoriser(op);
            }
            e.valeur
        });
        log::debug!("évaluation {texte:?} -> {resultat:?}");
        self.afficher(ecran, resultat);
        true
    }

    /// = répété : réapplique la dernière opération à la valeur affichée.
    fn repeter<E: Ecran + ?Sized>(&mut self, texte: &str, ecran: &mut E, session: &Session) {
        let resultat = match lire_nombre(texte) {
            Some(v) => session.repeter(v),
            None => session
                .derniere()
                .map(|_| Err(ErreurCalc::ResultatNonNombre)),
        };
        let Some(resultat) = resultat else {
            log::debug!("= répété sans opération mémorisée");
            return;
        };

        log::debug!("répétition {:?} sur {texte:?} -> {resultat:?}", session.derniere());
        self.afficher(ecran, resultat);
    }

    fn effacer<E: Ecran + ?Sized>(&mut self, ecran: &mut E, session: &mut Session) -> bool {
        let texte = ecran.texte();
        if texte == AFFICHAGE_INITIAL
            || self.derniere == Some(Entree::Valider)
            || self.etat == EtatSaisie::Erreur
        {
            return false;
        }

        let mut reste = texte.to_string();
        reste.pop();
        if reste.is_empty() {
            self.annuler(ecran, session);
            return false;
        }

        ecran.ecrire(reste);
        self.etat = EtatSaisie::Edition;
        true
    }

    fn chiffre<E: Ecran + ?Sized>(
        &mut self,
        c: char,
        ecran: &mut E,
        session: &mut Session,
    ) -> bool {
        // un chiffre après un résultat (ou une erreur) commence une nouvelle expression
        if matches!(self.etat, EtatSaisie::Resultat | EtatSaisie::Erreur) {
            session.vider();
            ecran.ecrire(c.to_string());
            self.etat = EtatSaisie::Edition;
            return true;
        }
        self.inserer(ecran, &c.to_string())
    }

    /// `-` : collé en tête ou après un opérateur / `(`, sinon précédé d’un espace.
    fn moins<E: Ecran + ?Sized>(&mut self, ecran: &mut E) -> bool {
        let texte = ecran.texte();
        if texte == AFFICHAGE_INITIAL || finit_par_operateur(texte) {
            self.inserer(ecran, "-")
        } else {
            self.inserer(ecran, " -")
        }
    }

    /// √ : littéral si "0" ou après un opérateur, sinon appliquée tout de suite
    /// à la valeur affichée (sans passer par l’évaluateur).
    fn racine<E: Ecran + ?Sized>(&mut self, ecran: &mut E) -> bool {
        if self.etat == EtatSaisie::Erreur {
            return false;
        }

        let texte = ecran.texte();
        if texte == AFFICHAGE_INITIAL || finit_par_operateur(texte) {
            return self.inserer(ecran, "√");
        }

        // Règle retenue : seul un texte qui se lit comme UN nombre prend la √ directe.
        // "2+3" (opérateur au milieu, pas en fin) est refusé, pas complété en "2+3√".
        let resultat = lire_nombre(texte)
            .ok_or(ErreurCalc::RacineInvalide)
            .and_then(|v| Operateur::Racine.appliquer(&[v]));
        log::debug!("√ directe sur {texte:?} -> {resultat:?}");
        self.afficher(ecran, resultat);
        true
    }

    /// Ajout brut (chiffre, point, opérateur, parenthèse).
    fn inserer<E: Ecran + ?Sized>(&mut self, ecran: &mut E, ajout: &str) -> bool {
        if self.etat == EtatSaisie::Erreur {
            return false;
        }

        let texte = ecran.texte();
        if texte.chars().count() + ajout.chars().count() > LONGUEUR_MAX_AFFICHAGE {
            return false;
        }

        // "0" est remplacé par ce qui ouvre une expression, complété sinon ("0." / "0+")
        let nouveau = if texte == AFFICHAGE_INITIAL && remplace_zero(ajout) {
            ajout.to_string()
        } else {
            format!("{texte}{ajout}")
        };

        ecran.ecrire(nouveau);
        self.etat = EtatSaisie::Edition;
        true
    }

    fn afficher<E: Ecran + ?Sized>(&mut self, ecran: &mut E, resultat: Result<f64, ErreurCalc>) {
        match resultat {
            Ok(v) => {
                let texte = formater_nombre(v);
                // Infinity / -Infinity : texte réservé, même état qu’une erreur restaurée
                self.etat = if est_texte_erreur(&texte) {
                    log::warn!("résultat non fini: {texte}");
                    EtatSaisie::Erreur
                } else {
                    EtatSaisie::Resultat
                };
                ecran.ecrire(texte);
            }
            Err(e) => {
                log::warn!("calcul refusé: {e:?}");
                ecran.ecrire(e.to_string());
                self.etat = EtatSaisie::Erreur;
            }
        }
    }
}

fn remplace_zero(ajout: &str) -> bool {
    matches!(ajout, "-" | "(" | "√") || ajout.chars().all(|c| c.is_ascii_digit())
}

/// Dernier caractère non blanc : opérateur ou `(`.
fn finit_par_operateur(texte: &str) -> bool {
    texte
        .trim_end()
        .chars()
        .next_back()
        .is_some_and(|c| c == '(' || Operateur::depuis_symbole(c).is_some())
}

// src/noyau/operateurs.rs
//
// Registre des opérateurs (table fixe, sans état).
// - ensemble FERMÉ : ajouter un opérateur force à compléter chaque `match`
// - √ : unaire préfixe ; tous les autres : binaires infixes, associatifs à gauche
// - seules pannes définies : a / 0 et √a avec a < 0

use super::erreur::ErreurCalc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Division,
    Modulo,
    Puissance,
    Racine,
}

/// Fonction d’application, selon l’arité.
#[derive(Clone, Copy, Debug)]
pub enum Fonction {
    Unaire(fn(f64) -> Result<f64, ErreurCalc>),
    Binaire(fn(f64, f64) -> Result<f64, ErreurCalc>),
}

impl Operateur {
    pub const TOUS: [Operateur; 7] = [
        Operateur::Plus,
        Operateur::Moins,
        Operateur::Fois,
        Operateur::Division,
        Operateur::Modulo,
        Operateur::Puissance,
        Operateur::Racine,
    ];

    pub fn depuis_symbole(c: char) -> Option<Operateur> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Division),
            '%' => Some(Operateur::Modulo),
            '^' => Some(Operateur::Puissance),
            '√' => Some(Operateur::Racine),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Division => '/',
            Operateur::Modulo => '%',
            Operateur::Puissance => '^',
            Operateur::Racine => '√',
        }
    }

    /// Rang : plus haut = lie plus fort.
    pub fn precedence(self) -> u8 {
        match self {
            Operateur::Plus | Operateur::Moins => 1,
            Operateur::Fois | Operateur::Division | Operateur::Modulo => 2,
            Operateur::Puissance | Operateur::Racine => 3,
        }
    }

    pub fn arite(self) -> usize {
        match self.fonction() {
            Fonction::Unaire(_) => 1,
            Fonction::Binaire(_) => 2,
        }
    }

    pub fn est_unaire(self) -> bool {
        self.arite() == 1
    }

    pub fn fonction(self) -> Fonction {
        match self {
            Operateur::Plus => Fonction::Binaire(|a, b| Ok(a + b)),
            Operateur::Moins => Fonction::Binaire(|a, b| Ok(a - b)),
            Operateur::Fois => Fonction::Binaire(|a, b| Ok(a * b)),
            Operateur::Division => Fonction::Binaire(diviser),
            // reste flottant (signe du dividende), comme le % des navigateurs
            Operateur::Modulo => Fonction::Binaire(|a, b| Ok(a % b)),
            Operateur::Puissance => Fonction::Binaire(|a, b| Ok(a.powf(b))),
            Operateur::Racine => Fonction::Unaire(racine),
        }
    }

    /// Erreur à remonter quand la pile de valeurs ne fournit pas assez d’opérandes.
    pub fn erreur_operande_manquant(self) -> ErreurCalc {
        match self {
            Operateur::Racine => ErreurCalc::RacineInvalide,
            _ => ErreurCalc::ExpressionMalformee,
        }
    }

    /// Applique l’opérateur ; `operandes.len()` doit égaler l’arité.
    pub fn appliquer(self, operandes: &[f64]) -> Result<f64, ErreurCalc> {
        match (self.fonction(), operandes) {
            (Fonction::Unaire(f), &[a]) => f(a),
            (Fonction::Binaire(f), &[a, b]) => f(a, b),
            _ => Err(self.erreur_operande_manquant()),
        }
    }
}

fn diviser(a: f64, b: f64) -> Result<f64, ErreurCalc> {
    // -0.0 == 0.0 : les deux zéros sont refusés
    if b == 0.0 {
        return Err(ErreurCalc::DivisionParZero);
    }
    Ok(a / b)
}

fn racine(a: f64) -> Result<f64, ErreurCalc> {
    if a < 0.0 {
        return Err(ErreurCalc::RacineNegative);
    }
    Ok(a.sqrt())
}

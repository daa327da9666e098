// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Le texte Display EST le message affiché à l’écran (aucune erreur ne traverse l’UI).

/// Erreurs de calcul (tokenisation, évaluation, répétition).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErreurCalc {
    #[error("Error: Division by zero")]
    DivisionParZero,

    #[error("Error: Square root of negative number")]
    RacineNegative,

    /// √ sans opérande numérique derrière.
    #[error("Error: Invalid square root operation")]
    RacineInvalide,

    #[error("Error: Invalid operation")]
    ResultatNonNombre,

    /// Pile vide, parenthèse orpheline, littéral illisible, valeurs en trop…
    #[error("Error: Invalid operation")]
    ExpressionMalformee,
}

/// Préfixe commun des messages d’erreur affichés.
pub const PREFIXE_ERREUR: &str = "Error";

/// Vrai si le texte affiché est un état d’erreur réservé.
///
/// Les rendus non finis (NaN, ±Infinity) comptent comme erreurs :
/// ils ne se relisent pas comme une expression.
pub fn est_texte_erreur(texte: &str) -> bool {
    let t = texte.trim();
    t.starts_with(PREFIXE_ERREUR) || t == "NaN" || t == "Infinity" || t == "-Infinity"
}

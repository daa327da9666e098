// src/noyau/format.rs

/* ------------------------ Affichage d’un résultat ------------------------ */

/// Seuils de la notation exponentielle (comme un navigateur).
const EXPO_MIN: f64 = 1e-6;
const EXPO_MAX: f64 = 1e21;

/// Rend un f64 comme un navigateur rend un nombre :
/// - entier sans partie décimale (7, pas 7.0)
/// - -0 affiché 0
/// - plus court décimal qui se relit à l’identique (0.30000000000000004)
/// - exponentielle hors de [1e-6, 1e21), exposant toujours signé (1e+21, 1.5e-7)
/// - NaN, Infinity, -Infinity
pub fn formater_nombre(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let a = v.abs();
    if !(EXPO_MIN..EXPO_MAX).contains(&a) {
        let s = format!("{v:e}");
        return match s.split_once('e') {
            Some((mantisse, exposant)) if !exposant.starts_with('-') => {
                format!("{mantisse}e+{exposant}")
            }
            _ => s,
        };
    }
    format!("{v}")
}

/* ------------------------ Relecture de l’affichage ------------------------ */

/// Valeur numérique du texte affiché, s’il contient UN nombre fini (et rien d’autre).
/// Sert au = répété et à la √ directe.
pub fn lire_nombre(texte: &str) -> Option<f64> {
    let v: f64 = texte.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

// src/noyau/jetons.rs

use super::operateurs::Operateur;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f64),
    Operateur(Operateur),
    ParentheseOuvrante,
    ParentheseFermante,
}

/// Tokenize une chaîne en jetons. N’échoue jamais :
/// une chaîne malformée donne une suite que l’évaluateur refusera.
///
/// - opérateurs + - * / % ^ √ et parenthèses : séparateurs
/// - espaces : ignorés (mais coupent un nombre)
/// - tout autre passage : littéral numérique (chiffres + au plus un point,
///   éventuellement suivi d’un exposant signé `e+21` / `e-7` tel qu’un résultat
///   s’affiche), sinon Nombre(NaN)
/// - multiplication implicite : `2(`, `)(`, `)2` reçoivent un `*`
pub fn tokenize(s: &str) -> Vec<Jeton> {
    let mut bruts = Vec::new();
    let mut nombre = String::new();

    for c in s.chars() {
        // signe d’exposant : reste dans le nombre
        if matches!(c, '+' | '-') && nombre.ends_with('e') {
            nombre.push(c);
            continue;
        }

        let jeton = if c == '(' {
            Some(Jeton::ParentheseOuvrante)
        } else if c == ')' {
            Some(Jeton::ParentheseFermante)
        } else {
            Operateur::depuis_symbole(c).map(Jeton::Operateur)
        };

        if jeton.is_some() || c.is_whitespace() {
            vider_nombre(&mut nombre, &mut bruts);
            bruts.extend(jeton);
            continue;
        }

        nombre.push(c);
    }
    vider_nombre(&mut nombre, &mut bruts);

    multiplication_implicite(bruts)
}

fn vider_nombre(nombre: &mut String, out: &mut Vec<Jeton>) {
    if nombre.is_empty() {
        return;
    }
    out.push(Jeton::Nombre(lire_litteral(nombre)));
    nombre.clear();
}

/// Littéral strict : mantisse (au moins un chiffre, au plus un point),
/// puis exposant optionnel `e` + signe + chiffres. Rien d’autre.
/// (`str::parse` seul accepterait "inf", "NaN", "1e5"…)
fn lire_litteral(s: &str) -> f64 {
    let (mantisse, exposant) = match s.split_once('e') {
        Some((m, x)) => (m, Some(x)),
        None => (s, None),
    };

    let chiffres = mantisse.chars().filter(|c| c.is_ascii_digit()).count();
    let points = mantisse.chars().filter(|&c| c == '.').count();
    if chiffres == 0 || points > 1 || chiffres + points != mantisse.chars().count() {
        return f64::NAN;
    }

    if let Some(x) = exposant {
        let Some(puissance) = x.strip_prefix('+').or_else(|| x.strip_prefix('-')) else {
            return f64::NAN;
        };
        if puissance.is_empty() || !puissance.chars().all(|c| c.is_ascii_digit()) {
            return f64::NAN;
        }
    }

    s.parse().unwrap_or(f64::NAN)
}

fn multiplication_implicite(bruts: Vec<Jeton>) -> Vec<Jeton> {
    let mut out: Vec<Jeton> = Vec::with_capacity(bruts.len());

    for jeton in bruts {
        if let Some(&precedent) = out.last() {
            let inserer = matches!(
                (precedent, jeton),
                (
                    Jeton::Nombre(_) | Jeton::ParentheseFermante,
                    Jeton::ParentheseOuvrante
                ) | (Jeton::ParentheseFermante, Jeton::Nombre(_))
            );
            if inserer {
                out.push(Jeton::Operateur(Operateur::Fois));
            }
        }
        out.push(jeton);
    }

    out
}

/// Format utilitaire (démarche) : liste de jetons en texte, séparés par un espace.
/// Le texte se re-tokenize en la même suite.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::with_capacity(jetons.len());
    for t in jetons {
        let s = match t {
            Jeton::Nombre(v) => format!("{v}"),
            Jeton::Operateur(op) => op.symbole().to_string(),
            Jeton::ParentheseOuvrante => "(".to_string(),
            Jeton::ParentheseFermante => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

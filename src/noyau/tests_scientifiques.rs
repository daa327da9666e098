//! Tests scientifiques (campagne) : invariants arithmétiques + séquences de saisie.
//!
//! But : vérifier le moteur de bout en bout sans faire chauffer la machine.
//! - budget temps global sur les tests de stress
//! - tailles bornées (la saisie est de toute façon limitée en longueur)
//!
//! Notes (aligné avec l’état actuel du noyau) :
//! - `-` est toujours binaire : "-5" seul n’est pas une expression valide.
//! - `^` associatif à gauche (même bande que √).

use std::time::{Duration, Instant};

use super::controleur::{Controleur, Entree, EtatSaisie, AFFICHAGE_INITIAL};
use super::erreur::ErreurCalc;
use super::eval::{calculer, evaluer};
use super::format::formater_nombre;
use super::session::Session;

fn eval_ok(expr: &str) -> f64 {
    evaluer(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_eval(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0),
        "expr={expr:?} v={v} attendu={attendu}"
    );
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Joue une suite de touches (séparées par des espaces) sur un écran neuf.
fn jouer(touches: &str) -> (String, Session, Controleur) {
    let mut ecran = AFFICHAGE_INITIAL.to_string();
    let mut session = Session::default();
    let mut ctrl = Controleur::default();

    for t in touches.split_whitespace() {
        let e = Entree::depuis_touche(t).unwrap_or_else(|| panic!("touche inconnue {t:?}"));
        ctrl.traiter(e, &mut ecran, &mut session);
    }
    (ecran, session, ctrl)
}

/* ------------------------ Invariants arithmétiques ------------------------ */

#[test]
fn sci_precedence_et_associativite() {
    assert_eval("2+3*4", 14.0);
    assert_eval("(2+3)*4", 20.0);
    assert_eval("20/5*2", 8.0);
    assert_eval("20-5+2", 17.0);
    assert_eval("2*3^2", 18.0);
    assert_eval("17%5%3", 2.0);
}

#[test]
fn sci_implicite_equivaut_a_explicite() {
    for (implicite, explicite) in [
        ("2(3+4)", "2*(3+4)"),
        ("(2+1)(3+1)", "(2+1)*(3+1)"),
        ("(1.5)4", "(1.5)*4"),
        ("3(2)(2)", "3*(2)*(2)"),
    ] {
        assert_eq!(eval_ok(implicite), eval_ok(explicite), "{implicite:?}");
    }
}

#[test]
fn sci_distributivite_sur_entiers() {
    // a(b+c) = ab + ac (valeurs exactes en f64)
    for a in 1..6 {
        for b in 0..6 {
            for c in 0..6 {
                let gauche = eval_ok(&format!("{a}({b}+{c})"));
                let droite = eval_ok(&format!("{a}*{b}+{a}*{c}"));
                assert_eq!(gauche, droite, "a={a} b={b} c={c}");
            }
        }
    }
}

#[test]
fn sci_racines_carres_parfaits() {
    for k in 0..50u32 {
        let carre = k * k;
        assert_eq!(eval_ok(&format!("√{carre}")), f64::from(k));
        assert_eq!(eval_ok(&format!("√({carre})^2")), f64::from(carre));
    }
}

#[test]
fn sci_flottants_comme_un_navigateur() {
    assert_eq!(formater_nombre(eval_ok("0.1+0.2")), "0.30000000000000004");
    assert_eq!(formater_nombre(eval_ok("1/3")), "0.3333333333333333");
    assert_eq!(formater_nombre(eval_ok("2^70")), "1.1805916207174113e+21");
    assert_eq!(formater_nombre(eval_ok("10^400")), "Infinity");
}

#[test]
fn sci_resultats_exponentiels_reutilisables() {
    let (ecran, _s, ctrl) = jouer("2 ^ 7 0 = + 1 =");
    assert_eq!(ecran, "1.1805916207174113e+21");
    assert_eq!(ctrl.etat(), EtatSaisie::Resultat);

    let (ecran, _s, _c) = jouer("1 / 3 0 0 0 0 0 0 = * 3 =");
    assert_eq!(ecran, formater_nombre(1.0 / 3_000_000.0 * 3.0));

    // l’affichage d’un résultat se relit comme la même valeur
    for expr in ["2^70", "1/3000000", "7^30", "0.5^30"] {
        let v = eval_ok(expr);
        assert_eq!(eval_ok(&formater_nombre(v)), v, "expr={expr:?}");
    }
}

#[test]
fn sci_infini_se_comporte_comme_une_erreur() {
    let (ecran, _s, ctrl) = jouer("1 0 ^ 4 0 0 = + ( 2");
    // le chiffre final repart de zéro, + et ( ont été ignorés
    assert_eq!(ecran, "2");
    assert_eq!(ctrl.etat(), EtatSaisie::Edition);

    let (ecran, _s, ctrl) = jouer("1 0 ^ 4 0 0 = + (");
    assert_eq!(ecran, "Infinity");
    assert_eq!(ctrl.etat(), EtatSaisie::Erreur);
}

#[test]
fn sci_erreurs_atomiques() {
    // une panne au milieu : aucune valeur partielle
    assert_eq!(evaluer("1+2*(3/0)+4"), Err(ErreurCalc::DivisionParZero));
    assert_eq!(evaluer("(1+2)*√(1-2)"), Err(ErreurCalc::RacineNegative));
    assert_eq!(evaluer("3%(2-2)"), Err(ErreurCalc::ResultatNonNombre));
    assert_eq!(evaluer("((1+2)"), Err(ErreurCalc::ExpressionMalformee));
}

#[test]
fn sci_derniere_operation_est_la_plus_externe() {
    let e = calculer("(1+2)*(3+4)").unwrap();
    assert_eq!(e.valeur, 21.0);
    let d = e.derniere.unwrap();
    assert_eq!(d.operateur.symbole(), '*');
    assert_eq!(d.operande, 7.0);
}

/* ------------------------ Séquences de saisie ------------------------ */

#[test]
fn sci_egal_repete_progression() {
    let (ecran, _s, _c) = jouer("3 + 4 = = = =");
    // 7, 11, 15, 19
    assert_eq!(ecran, "19");

    let (ecran, _s, _c) = jouer("2 * 3 = = =");
    // 6, 18, 54
    assert_eq!(ecran, "54");

    let (ecran, _s, _c) = jouer("1 0 0 / 2 = = =");
    // 50, 25, 12.5
    assert_eq!(ecran, "12.5");
}

#[test]
fn sci_repetition_apres_edition_recalcule() {
    // "= + 1 =" : l’édition coupe la répétition, on recalcule "7+1"
    let (ecran, session, _c) = jouer("3 + 4 = + 1 = =");
    assert_eq!(ecran, "9");
    assert_eq!(session.derniere().map(|d| d.operande), Some(1.0));
}

#[test]
fn sci_clavier_et_boutons_equivalents() {
    // Enter (clavier) et = (bouton) ; Escape (clavier) et C (bouton)
    assert_eq!(jouer("5 * 5 Enter Enter").0, jouer("5 * 5 = =").0);
    assert_eq!(jouer("9 Escape").0, jouer("9 C").0);
}

#[test]
fn sci_annuler_est_un_retour_a_neuf() {
    let (ecran, session, ctrl) = jouer("1 + 2 = = C");
    assert_eq!(ecran, "0");
    assert!(session.est_vide());
    assert_eq!(ctrl.etat(), EtatSaisie::Neuf);
    assert_eq!(ctrl.derniere(), None);
}

#[test]
fn sci_erreur_terminale() {
    let (ecran, _s, ctrl) = jouer("8 / 0 = + ( . √ Backspace");
    assert_eq!(ecran, "Error: Division by zero");
    assert_eq!(ctrl.etat(), EtatSaisie::Erreur);

    assert_eq!(jouer("8 / 0 = =").0, "0");
    assert_eq!(jouer("8 / 0 = 6").0, "6");
}

#[test]
fn sci_racine_directe_puis_calcul() {
    // √ directe sur 16 => 4, puis "+1" continue sur le résultat
    let (ecran, _s, _c) = jouer("1 6 √ + 1 =");
    assert_eq!(ecran, "5");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_parentheses_imbriquees_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 200 niveaux : les piles sont itératives, pas de récursion
    let profondeur = 200;
    let expr = format!("{}1{}", "(".repeat(profondeur), "+1)".repeat(profondeur));
    budget(t0, max);

    assert_eq!(eval_ok(&expr), 201.0);
    budget(t0, max);
}

#[test]
fn sci_stress_longue_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..500 {
        if k > 0 {
            expr.push('+');
        }
        expr.push_str("0.5");
        budget(t0, max);
    }

    assert_eq!(eval_ok(&expr), 250.0);
}

//! Tests scénarios (campagne) : séquences de touches réelles, bout en bout.
//!
//! Chaque scénario part d'une session neuve et ne passe que par l'API publique :
//! saisie, opérations, "=", ⌫, C, bascules.
//! Invariant vérifié partout : "Error" est sur les deux chaînes ou sur aucune.

use super::constantes::ERREUR;
use super::session::CalculatorSession;
use super::{EvalOutcome, HistorySink, Mode, Operation};

#[derive(Default)]
struct Historique(Vec<(String, String)>);

impl HistorySink for Historique {
    fn add(&mut self, expression: &str, resultat: &str) {
        self.0.push((expression.to_string(), resultat.to_string()));
    }
}

fn taper(s: &mut CalculatorSession, touches: &str) {
    for c in touches.chars() {
        s.operations().saisir(c);
    }
}

fn chaines(s: &CalculatorSession) -> (String, String) {
    let e = s.expression();
    assert_eq!(
        e.evaluable() == ERREUR,
        e.affichage() == ERREUR,
        "sentinelle désynchronisée: {e:?}"
    );
    (e.evaluable().to_string(), e.affichage().to_string())
}

fn paire(eval: &str, aff: &str) -> (String, String) {
    (eval.to_string(), aff.to_string())
}

/* ------------------------ Puissances ------------------------ */

#[test]
fn scenario_carre_puis_retour_arriere() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "5");
    s.operations().square();
    assert_eq!(chaines(&s), paire("5**2", "5²"));
    assert_eq!(s.ecran().texte(), "5²");

    s.backspace();
    assert_eq!(chaines(&s), paire("5", "5"));
}

#[test]
fn scenario_cube_puis_carre_remplace() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "3");
    s.toggle(Mode::Secondary);
    s.operations().square();
    assert_eq!(chaines(&s), paire("3**3", "3³"));

    s.toggle(Mode::Secondary);
    s.operations().square();
    assert_eq!(chaines(&s), paire("3**2", "3²"));
}

#[test]
fn scenario_carre_jamais_empile() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "4");
    for _ in 0..3 {
        s.operations().square();
    }
    assert_eq!(chaines(&s), paire("4**2", "4²"));

    let mut h = Historique::default();
    s.controleur().equals(&mut h);
    assert_eq!(chaines(&s), paire("16", "16"));
}

#[test]
fn scenario_puissance_de_dix() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "5");
    s.operations().puissance_dix();
    assert_eq!(chaines(&s), paire("5*10**", "5*10^"));

    let mut vide = CalculatorSession::default();
    vide.operations().puissance_dix();
    assert_eq!(chaines(&vide), paire("10**", "10^"));

    let mut apres_op = CalculatorSession::default();
    taper(&mut apres_op, "2+");
    apres_op.operations().puissance_dix();
    assert_eq!(chaines(&apres_op), paire("2+10**", "2+10^"));

    taper(&mut apres_op, "3");
    let mut h = Historique::default();
    apres_op.controleur().equals(&mut h);
    assert_eq!(chaines(&apres_op), paire("1002", "1002"));
}

#[test]
fn scenario_puissance_generale() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "2");
    s.operations().puissance();
    taper(&mut s, "10");
    assert_eq!(chaines(&s), paire("2**10", "2^10"));

    s.backspace();
    s.backspace();
    s.backspace();
    assert_eq!(chaines(&s), paire("2", "2"));
}

/* ------------------------ "=" et historique ------------------------ */

#[test]
fn scenario_egal_et_historique() {
    let mut s = CalculatorSession::default();
    let mut h = Historique::default();
    taper(&mut s, "2+2");

    let issue = s.controleur().equals(&mut h);

    assert_eq!(
        issue,
        EvalOutcome::Succes {
            expression: "2+2".into(),
            resultat: "4".into()
        }
    );
    assert_eq!(s.ecran().texte(), "4");
    assert_eq!(h.0, vec![paire("2+2", "4")]);
}

#[test]
fn scenario_division_par_zero() {
    let mut s = CalculatorSession::default();
    let mut h = Historique::default();
    taper(&mut s, "5/0");

    let issue = s.controleur().equals(&mut h);

    assert!(matches!(issue, EvalOutcome::Echec(_)));
    assert_eq!(chaines(&s), paire(ERREUR, ERREUR));
    assert_eq!(s.ecran().texte(), ERREUR);
    assert!(h.0.is_empty());
}

#[test]
fn scenario_erreur_collante_puis_sortie() {
    let mut s = CalculatorSession::default();
    let mut h = Historique::default();
    taper(&mut s, "1/0");
    s.controleur().equals(&mut h);

    taper(&mut s, "7");
    s.operations().square();
    s.operations().pi();
    assert_eq!(chaines(&s), paire(ERREUR, ERREUR));

    // DEG/RAD bascule quand même
    s.toggle(Mode::Degree);
    assert_eq!(s.modes().unite(), "RAD");

    s.backspace();
    assert_eq!(chaines(&s), paire("", ""));
    assert_eq!(s.ecran().texte(), "0");

    taper(&mut s, "8");
    s.clear();
    assert_eq!(chaines(&s), paire("", ""));
}

#[test]
fn scenario_libelle_historique_est_l_affichage() {
    let mut s = CalculatorSession::default();
    let mut h = Historique::default();
    s.operations().racine();
    taper(&mut s, "16)");
    s.operations().square();

    s.controleur().equals(&mut h);

    assert_eq!(h.0, vec![paire("√(16)²", "16")]);
}

/* ------------------------ n!, ±, 1/x ------------------------ */

#[test]
fn scenario_factorielle() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "5");
    s.operations().factorielle();
    assert_eq!(chaines(&s), paire("120", "5!"));

    taper(&mut s, "+1");
    let mut h = Historique::default();
    s.controleur().equals(&mut h);
    assert_eq!(h.0, vec![paire("5!+1", "121")]);
}

#[test]
fn scenario_changement_de_signe_idempotent() {
    for touches in ["7", "3-5", "2*4.5", "(1+2)*-8"] {
        let mut s = CalculatorSession::default();
        taper(&mut s, touches);
        let avant = chaines(&s);
        s.operations().changer_signe();
        assert_ne!(chaines(&s), avant, "{touches:?}");
        s.operations().changer_signe();
        assert_eq!(chaines(&s), avant, "{touches:?}");
    }
}

#[test]
fn scenario_inverse_puis_egal() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "3+8");
    s.operations().inverse();
    assert_eq!(chaines(&s), paire("3+1/(8)", "3+1/(8)"));

    let mut h = Historique::default();
    s.controleur().equals(&mut h);
    assert_eq!(chaines(&s), paire("3.125", "3.125"));
}

/* ------------------------ Trig et modes ------------------------ */

#[test]
fn scenario_sinus_degres_et_radians() {
    let mut s = CalculatorSession::default();
    let mut h = Historique::default();
    s.operations().trig(Operation::Sin);
    taper(&mut s, "30)");
    assert_eq!(chaines(&s), paire("Math.sin((Math.PI/180)*30)", "sin(30)"));
    s.controleur().equals(&mut h);
    assert_eq!(s.ecran().texte(), "0.5");

    s.clear();
    s.toggle(Mode::Degree);
    s.operations().trig(Operation::Cos);
    taper(&mut s, "0)");
    assert_eq!(chaines(&s), paire("Math.cos(0)", "cos(0)"));
    s.controleur().equals(&mut h);
    assert_eq!(s.ecran().texte(), "1");
}

#[test]
fn scenario_retour_arriere_jeton_compose() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "2*");
    s.operations().trig(Operation::Tan);
    assert_eq!(chaines(&s), paire("2*Math.tan((Math.PI/180)*", "2*tan("));

    s.backspace();
    assert_eq!(chaines(&s), paire("2*", "2*"));

    s.operations().fonction(Operation::Ln);
    s.backspace();
    assert_eq!(chaines(&s), paire("2*", "2*"));
}

#[test]
fn scenario_signe_puis_retour_arriere_reste_aligne() {
    let mut s = CalculatorSession::default();
    s.toggle(Mode::Degree);
    s.operations().trig(Operation::Sin);
    taper(&mut s, "5");
    s.operations().changer_signe();
    assert_eq!(chaines(&s), paire("Math.sin(-5", "Math.sin(-5"));

    s.backspace();
    assert_eq!(chaines(&s), paire("Math.sin(-", "Math.sin(-"));
    s.backspace();
    assert_eq!(chaines(&s), paire("Math.sin(", "Math.sin("));
    s.backspace();
    assert_eq!(chaines(&s), paire("Math.sin", "Math.sin"));
    assert_eq!(s.ecran().texte(), "Math.sin");

    // "=" voit ce que l'écran montre
    let mut h = Historique::default();
    assert!(matches!(s.controleur().equals(&mut h), EvalOutcome::Echec(_)));
    assert_eq!(chaines(&s), paire(ERREUR, ERREUR));
}

#[test]
fn scenario_inverse_dans_une_fonction_puis_retour_arriere() {
    for op in [Operation::Abs, Operation::Plancher, Operation::Plafond] {
        let mut s = CalculatorSession::default();
        s.operations().fonction(op);
        taper(&mut s, "4");
        s.operations().inverse();
        let (eval, aff) = chaines(&s);
        assert_eq!(eval, aff, "{op:?}");
        assert!(eval.ends_with("(1/(4)"), "{op:?}: {eval}");
        let ouvrant = eval.trim_end_matches("1/(4)").to_string();

        for _ in 0..6 {
            s.backspace();
            let (eval, aff) = chaines(&s);
            assert_eq!(eval, aff, "{op:?}");
            assert!(!eval.is_empty(), "{op:?}");
        }
        // six caractères partis : "1/(4)" puis la parenthèse ouvrante
        assert_eq!(chaines(&s).0, ouvrant.trim_end_matches('('), "{op:?}");

        while !s.expression().is_empty() {
            s.backspace();
            let (eval, aff) = chaines(&s);
            assert_eq!(eval, aff, "{op:?}");
        }
        assert_eq!(s.ecran().texte(), "0");
    }
}

#[test]
fn scenario_factorielle_puis_retour_arriere() {
    let mut s = CalculatorSession::default();
    taper(&mut s, "2+3");
    s.operations().factorielle();
    s.operations().factorielle();
    assert_eq!(chaines(&s), paire("2+720", "2+3!!"));

    s.backspace();
    assert_eq!(chaines(&s), paire("2+6", "2+3!"));
    s.backspace();
    assert_eq!(chaines(&s), paire("2+3", "2+3"));

    let mut h = Historique::default();
    s.controleur().equals(&mut h);
    assert_eq!(s.ecran().texte(), "5");
}

#[test]
fn scenario_notation_exponentielle() {
    let mut s = CalculatorSession::default();
    let mut h = Historique::default();
    taper(&mut s, "123*1000");
    s.controleur().equals(&mut h);

    s.toggle(Mode::Exponential);
    assert!(s.modes().exponential);
    assert_eq!(s.ecran().texte(), "1.23×10^5");
    assert_eq!(s.expression().evaluable(), "123000");

    s.toggle(Mode::Exponential);
    assert_eq!(chaines(&s), paire("123000", "123000"));
}

#[test]
fn scenario_constantes() {
    let mut s = CalculatorSession::default();
    let mut h = Historique::default();
    taper(&mut s, "2");
    s.operations().pi();
    assert_eq!(chaines(&s), paire("2*Math.PI", "2*π"));
    s.controleur().equals(&mut h);
    assert_eq!(s.ecran().texte(), "6.283");
}

#[test]
fn scenario_chaque_touche_rafraichit() {
    let mut s = CalculatorSession::default();
    let depart = s.ecran().rendus();
    taper(&mut s, "12");
    s.operations().square();
    s.backspace();
    assert_eq!(s.ecran().rendus(), depart + 4);
}

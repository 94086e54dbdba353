//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler la session avec des suites de touches aléatoires sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur de séquence bornée
//! - budget temps global
//! - invariants clés après CHAQUE touche :
//!   - "Error" sur les deux chaînes ou sur aucune
//!   - deux chaînes vides ou aucune
//!   - l'écran montre l'affichage ("0" si vide)
//!   - un "=" réussi laisse deux chaînes identiques

use std::time::{Duration, Instant};

use super::constantes::{AFFICHAGE_VIDE, ERREUR};
use super::session::CalculatorSession;
use super::{EvalOutcome, HistorySink, Mode, Operation};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

#[derive(Default)]
struct Compteur {
    ajouts: usize,
}

impl HistorySink for Compteur {
    fn add(&mut self, expression: &str, resultat: &str) {
        assert!(!expression.is_empty());
        assert_ne!(resultat, ERREUR);
        self.ajouts += 1;
    }
}

const TOUCHES: &str = "0123456789.()+-*/";

/// Une touche au hasard (saisie, opération, bascule, ⌫, =, C).
/// Retourne l'issue si la touche était "=".
fn touche(s: &mut CalculatorSession, rng: &mut Rng, h: &mut Compteur) -> Option<EvalOutcome> {
    match rng.pick(30) {
        0..=7 => {
            let i = rng.pick(TOUCHES.len() as u32) as usize;
            let c = TOUCHES.as_bytes()[i] as char;
            s.operations().saisir(c);
        }
        8 => s.operations().square(),
        9 => s.operations().puissance_dix(),
        10 => s.operations().puissance(),
        11 => s.operations().pi(),
        12 => s.operations().e(),
        13 => s.operations().factorielle(),
        // ± et 1/x recopient l'évaluable dans l'affichage : chemin à part pour ⌫
        14 | 24 | 25 => s.operations().changer_signe(),
        15 | 26 | 27 => s.operations().inverse(),
        16 => {
            let op = [Operation::Sin, Operation::Cos, Operation::Tan][rng.pick(3) as usize];
            s.operations().trig(op);
        }
        17 => {
            let op = [
                Operation::Plancher,
                Operation::Plafond,
                Operation::Log,
                Operation::Ln,
                Operation::Abs,
            ][rng.pick(5) as usize];
            s.operations().fonction(op);
        }
        18 => s.operations().racine(),
        19 => {
            let m = [Mode::Degree, Mode::Secondary, Mode::Exponential][rng.pick(3) as usize];
            s.toggle(m);
        }
        20 | 21 | 28 | 29 => s.backspace(),
        22 => return Some(s.controleur().equals(h)),
        _ => {
            if rng.pick(4) == 0 {
                s.clear();
            } else {
                s.operations().saisir('1');
            }
        }
    }
    None
}

fn check_invariants(s: &CalculatorSession) {
    let e = s.expression();
    assert_eq!(
        e.evaluable() == ERREUR,
        e.affichage() == ERREUR,
        "sentinelle désynchronisée: {e:?}"
    );
    assert_eq!(
        e.evaluable().is_empty(),
        e.affichage().is_empty(),
        "une seule chaîne vide: {e:?}"
    );

    let attendu = if e.affichage().is_empty() {
        AFFICHAGE_VIDE
    } else {
        e.affichage()
    };
    assert_eq!(s.ecran().texte(), attendu);
}

/// Joue `n` touches depuis une session neuve; retourne l'état final.
fn jouer(seed: u64, n: usize, t0: Instant, max: Duration) -> (String, String, usize) {
    let mut rng = Rng::new(seed);
    let mut s = CalculatorSession::default();
    let mut h = Compteur::default();

    for _ in 0..n {
        budget(t0, max);

        let issue = touche(&mut s, &mut rng, &mut h);
        check_invariants(&s);

        if let Some(EvalOutcome::Succes { resultat, .. }) = issue {
            assert_eq!(s.expression().evaluable(), resultat);
            assert_eq!(s.expression().affichage(), resultat);
        }
    }

    let e = s.expression();
    (e.evaluable().to_string(), e.affichage().to_string(), h.ajouts)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_invariants_double_chaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    for seed in 0..40u64 {
        jouer(0xC0FFEE_u64 ^ seed, 150, t0, max);
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Même seed => mêmes touches => même état final
    let a = jouer(0xBADC0DE_u64, 200, t0, max);
    let b = jouer(0xBADC0DE_u64, 200, t0, max);
    assert_eq!(a, b);
}

#[test]
fn fuzz_safe_evaluations_vues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut succes = 0usize;
    for seed in 0..60u64 {
        let (_, _, ajouts) = jouer(seed.wrapping_mul(0x9E37_79B9), 120, t0, max);
        succes += ajouts;
    }

    // On veut au moins quelques "=" réussis, sinon le fuzz ne balaye rien.
    assert!(succes > 5, "trop peu de succès: {succes}");
}

#[test]
fn fuzz_safe_miroir_puis_retour() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // préfixe au hasard, ± ou 1/x (chaînes recopiées), puis ⌫ en rafale :
    // deux chaînes identiques le restent jusqu'au vide
    for seed in 0..200u64 {
        let mut rng = Rng::new(0x5EED_u64 ^ seed.wrapping_mul(0x2545_F491));
        let mut s = CalculatorSession::default();
        let mut h = Compteur::default();
        if rng.pick(2) == 0 {
            s.toggle(Mode::Degree);
        }
        for _ in 0..rng.pick(8) {
            touche(&mut s, &mut rng, &mut h);
        }
        if rng.pick(2) == 0 {
            s.operations().changer_signe();
        } else {
            s.operations().inverse();
        }
        check_invariants(&s);

        let mut coups = 0;
        while !s.expression().is_empty() {
            budget(t0, max);
            coups += 1;
            assert!(coups < 1000, "seed {seed}: ⌫ sans fin sur {:?}", s.expression());
            let e = s.expression();
            let miroir = e.evaluable() == e.affichage();
            s.backspace();
            check_invariants(&s);
            if miroir {
                let e = s.expression();
                assert_eq!(e.evaluable(), e.affichage(), "seed {seed}");
            }
        }
        assert_eq!(s.ecran().texte(), AFFICHAGE_VIDE);
    }
}

#[test]
fn fuzz_safe_longue_saisie_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // (((...1...))) : profondeur 400, évaluée sans récursion
    let mut s = CalculatorSession::default();
    for _ in 0..400 {
        s.operations().saisir('(');
    }
    s.operations().saisir('1');
    for _ in 0..400 {
        s.operations().saisir(')');
    }
    budget(t0, max);

    let mut h = Compteur::default();
    let issue = s.controleur().equals(&mut h);
    budget(t0, max);

    assert_eq!(
        issue,
        EvalOutcome::Succes {
            expression: format!("{}1{}", "(".repeat(400), ")".repeat(400)),
            resultat: "1".into()
        }
    );
}

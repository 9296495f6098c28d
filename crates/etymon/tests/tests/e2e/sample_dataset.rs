//! E2E: the numbered sample dataset through the whole pipeline.
//!
//! ```text
//! L0 ─┬─ L1 ─┬─ L3          L0:p1 ─┬─ w1 ── w3
//!     │      └─ L4 ◀┐              └─ w2 ─┬─ w5
//!     └─ L2 ─── L5  ┆ contact             └─ w4 (borrowed)
//!         └─ ─ ─ ─ ─┘
//! ```

use etymon_facts::{Predicate, RecordingBackend};
use etymon_pipeline::Pipeline;
use etymon_tests::data_path;

fn run() -> (etymon_pipeline::RunSummary, RecordingBackend) {
    let mut backend = RecordingBackend::new();
    let summary = Pipeline::default()
        .run(
            data_path("sample.tree"),
            data_path("sample.descent"),
            &mut backend,
        )
        .unwrap();
    (summary, backend)
}

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.map_or(false, |v| (v - expected).abs() < 1e-9)
}

#[test]
fn summary_counts() {
    let (summary, backend) = run();
    assert_eq!(summary.languages, 6);
    assert_eq!(summary.contacts, 1);
    assert_eq!(summary.forms, 6);
    assert_eq!(summary.known_forms, 3);
    assert_eq!(summary.pegs, 1);
    assert!(backend.is_finished());

    let counts = &summary.per_predicate;
    assert_eq!(counts[&Predicate::Eunk], 6);
    assert_eq!(counts[&Predicate::Xloa], 1);
    assert_eq!(counts[&Predicate::Eloa], 1 + 6);
    assert_eq!(counts[&Predicate::Einh], 5);
    assert_eq!(counts[&Predicate::Xdst], 30);
    // every 0 <= j < i <= 4
    assert_eq!(counts[&Predicate::Xsth], 10);
    assert_eq!(counts[&Predicate::Fsim], 36);
    assert_eq!(counts[&Predicate::Fhom], 6);
    // one language family, so every Xinh is a form-level candidate
    assert_eq!(counts[&Predicate::Xinh], counts[&Predicate::Einh]);
}

#[test]
fn similarities_of_attested_forms() {
    let (_, backend) = run();
    assert!(approx(backend.observation(Predicate::Fsim, &["w4", "w5"]), 0.9));
    assert!(approx(backend.observation(Predicate::Fsim, &["w3", "w4"]), 0.7));
    assert!(approx(backend.observation(Predicate::Fsim, &["w5", "w3"]), 0.6));
    assert!(backend.is_fixed(Predicate::Fsim, &["w5", "w3"]));

    assert!(backend.has_target(Predicate::Fsim, &["w1", "w3"]));
    assert!(backend.has_target(Predicate::Fsim, &["w3", "w1"]));
    assert!(approx(backend.observation(Predicate::Fsim, &["w1", "w1"]), 1.0));
}

#[test]
fn candidate_edges() {
    let (_, backend) = run();
    assert!(approx(backend.observation(Predicate::Xloa, &["w4", "w2"]), 1.0));
    assert!(backend.has_target(Predicate::Eloa, &["w4", "w2"]));
    for (child, parent) in [("w1", "L0:p1"), ("w2", "L0:p1"), ("w3", "w1"), ("w4", "w1"), ("w5", "w2")] {
        assert!(approx(backend.observation(Predicate::Xinh, &[child, parent]), 1.0));
        assert!(backend.has_target(Predicate::Einh, &[child, parent]));
    }
}

#[test]
fn tree_distance_observations() {
    let (_, backend) = run();
    assert!(approx(backend.observation(Predicate::Xdst, &["w3", "w5", "4"]), 1.0));
    assert!(approx(backend.observation(Predicate::Xdst, &["w5", "w3", "4"]), 1.0));
    assert!(approx(backend.observation(Predicate::Xdst, &["w1", "L0:p1", "1"]), 1.0));
    for (j, i) in [("0", "1"), ("0", "4"), ("1", "2"), ("1", "4"), ("2", "3"), ("3", "4")] {
        assert!(approx(backend.observation(Predicate::Xsth, &[j, i]), 1.0));
    }
    assert_eq!(backend.observation(Predicate::Xsth, &["2", "1"]), None);
}

#[test]
fn homologue_sets_and_controls() {
    let (_, backend) = run();
    for form in ["w3", "w4", "w5"] {
        assert!(approx(backend.observation(Predicate::Fhom, &[form, "L0:p1"]), 1.0));
        assert!(backend.is_fixed(Predicate::Fhom, &[form, "L0:p1"]));
    }
    for form in ["L0:p1", "w1", "w2"] {
        assert!(backend.has_target(Predicate::Fhom, &[form, "L0:p1"]));
        assert!(!backend.is_fixed(Predicate::Fhom, &[form, "L0:p1"]));
    }
    for form in ["L0:p1", "w1", "w2", "w3", "w4", "w5"] {
        assert!(approx(backend.observation(Predicate::Eloa, &[form, "eloaCtrl"]), 0.0));
        assert!(backend.is_hidden(Predicate::Eloa, &[form, "eloaCtrl"]));
    }
}

#[test]
fn runs_are_deterministic() {
    let (a, first) = run();
    let (b, second) = run();
    assert_eq!(a, b);
    assert_eq!(first.calls(), second.calls());
}

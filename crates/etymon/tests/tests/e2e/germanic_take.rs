//! E2E: two language families, three concept anchors, a cross-family loan.
//!
//! English `take` is borrowed from Old Norse; the Germanic and Romance
//! families share no ancestor below the root, so both families are climbed
//! to their own common ancestor.

use etymon_facts::{Predicate, RecordingBackend};
use etymon_phylogeny::LanguageId;
use etymon_pipeline::Pipeline;
use etymon_tests::read_data;

fn inputs() -> (String, String) {
    (
        read_data("germanic.tree").unwrap(),
        read_data("take.descent").unwrap(),
    )
}

#[test]
fn language_tree_shape() {
    let (tree, descent) = inputs();
    let dataset = Pipeline::default().prepare(&tree, &descent).unwrap();
    let p = &dataset.phylogeny;

    assert_eq!(
        p.to_newick(),
        "((((EN)OE,(DE)OHG,(NL)ODu)PWGmc,((IS,SV)ON)PNGmc,Got)PGmc,(Fr,It)Lat)ROOT;"
    );
    assert_eq!(p.distance("EN", "SV").unwrap(), 6);
    assert_eq!(p.distance("Fr", "It").unwrap(), 2);
    assert_eq!(p.top_level_ancestor("IS").unwrap(), LanguageId::new("PGmc"));
    assert!(p.incoming_influences("EN").unwrap().contains("Fr"));
    assert!(p.outgoing_influences("DE").unwrap().contains("SV"));
}

#[test]
fn descent_metadata() {
    let (tree, descent) = inputs();
    let dataset = Pipeline::default().prepare(&tree, &descent).unwrap();
    let t = &dataset.tree;

    assert_eq!(t.len(), 14);
    assert_eq!(t.pegs().len(), 3);
    assert_eq!(t.forms().filter(|f| f.known).count(), 9);

    let take = t.get("EN:take").unwrap();
    assert_eq!(take.language, LanguageId::new("EN"));
    assert_eq!(take.root_distance, 8);
    assert_eq!(take.peg.as_ref().map(|p| p.as_str()), Some("ON:taka"));

    assert_eq!(dataset.distances.get("EN:take", "SV:ta").unwrap(), 1);
    assert_eq!(dataset.distances.get("EN:nim", "EN:take").unwrap(), 18);
    assert_eq!(dataset.distances.get("DE:nehmen", "NL:nemen").unwrap(), 4);
}

#[test]
fn families_are_climbed_separately() {
    let (tree, descent) = inputs();
    let mut backend = RecordingBackend::new();
    let summary = Pipeline::default()
        .run_str(&tree, &descent, &mut backend)
        .unwrap();

    // 14 climbed language edges on top of 9 form-level candidates
    assert_eq!(summary.per_predicate[&Predicate::Xinh], 14 + 9);
    assert_eq!(summary.per_predicate[&Predicate::Einh], 9);
    for (child, parent) in [
        ("EN", "OE"),
        ("OE", "PWGmc"),
        ("PWGmc", "PGmc"),
        ("SV", "ON"),
        ("ON", "PNGmc"),
        ("PNGmc", "PGmc"),
        ("Got", "PGmc"),
        ("Fr", "Lat"),
        ("It", "Lat"),
    ] {
        assert_eq!(backend.observation(Predicate::Xinh, &[child, parent]), Some(1.0));
        assert!(!backend.has_target(Predicate::Einh, &[child, parent]));
    }
    assert_eq!(backend.observation(Predicate::Xinh, &["PGmc", "ROOT"]), None);
    assert_eq!(backend.observation(Predicate::Xinh, &["Lat", "ROOT"]), None);
}

#[test]
fn contact_and_inheritance_candidates() {
    let (tree, descent) = inputs();
    let mut backend = RecordingBackend::new();
    let summary = Pipeline::default()
        .run_str(&tree, &descent, &mut backend)
        .unwrap();

    assert_eq!(summary.per_predicate[&Predicate::Xloa], 3);
    assert!(backend.has_target(Predicate::Eloa, &["EN:take", "Fr:capter"]));
    assert!(backend.has_target(Predicate::Eloa, &["EN:nim", "Fr:capter"]));
    assert!(backend.has_target(Predicate::Eloa, &["SV:ta", "DE:nehmen"]));

    assert_eq!(summary.per_predicate[&Predicate::Einh], 9);
    assert!(backend.has_target(Predicate::Einh, &["EN:take", "OE:niman"]));
    assert!(backend.has_target(Predicate::Einh, &["Got:niman", "PGmc:nemanan"]));
    assert!(backend.has_target(Predicate::Einh, &["It:capire", "Lat:capere"]));
}

#[test]
fn similarity_and_homologue_observations() {
    let (tree, descent) = inputs();
    let mut backend = RecordingBackend::new();
    let summary = Pipeline::default()
        .run_str(&tree, &descent, &mut backend)
        .unwrap();

    let sim = backend
        .observation(Predicate::Fsim, &["EN:take", "SV:ta"])
        .unwrap();
    assert!((sim - 0.9).abs() < 1e-9);
    let floor = backend
        .observation(Predicate::Fsim, &["EN:nim", "EN:take"])
        .unwrap();
    assert!((floor - 0.1).abs() < 1e-9);

    assert_eq!(summary.per_predicate[&Predicate::Fhom], 14 * 3);
    assert_eq!(
        backend.observation(Predicate::Fhom, &["EN:take", "ON:taka"]),
        Some(1.0)
    );
    assert_eq!(
        backend.observation(Predicate::Fhom, &["EN:take", "PGmc:nemanan"]),
        Some(0.0)
    );
    assert!(backend.has_target(Predicate::Fhom, &["ON:taka", "ON:taka"]));
}

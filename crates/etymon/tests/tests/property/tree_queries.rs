//! Property tests: language-tree parsing and LCA / distance queries on
//! randomly shaped trees.

use etymon_phylogeny::{parse_phylogeny, LanguageId, Phylogeny};
use etymon_tests::{normalize_depths, render_indented};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Random indentation profile of 1..16 lines.
fn arb_depths() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, 1..16).prop_map(|raw| normalize_depths(&raw))
}

/// Random contact edges as (source, target) line indices.
fn arb_contacts() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..16, 0usize..16), 0..6)
}

fn lang(i: usize) -> String {
    format!("L{}", i)
}

/// Tree text with languages `L0..Ln`; each contact is written on its target line.
fn tree_text(depths: &[usize], contacts: &[(usize, usize)]) -> String {
    let n = depths.len();
    let lines: Vec<(usize, String)> = depths
        .iter()
        .enumerate()
        .map(|(i, &depth)| {
            let sources: Vec<String> = contacts
                .iter()
                .filter(|(s, t)| t % n == i && s % n != i)
                .map(|(s, _)| lang(s % n))
                .collect();
            if sources.is_empty() {
                (depth, lang(i))
            } else {
                (depth, format!("{} <- {}", lang(i), sources.join(",")))
            }
        })
        .collect();
    render_indented(&lines)
}

fn ids(p: &Phylogeny) -> Vec<LanguageId> {
    p.languages().cloned().collect()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Every generated line becomes exactly one language.
    #[test]
    fn every_line_is_a_language(depths in arb_depths(), contacts in arb_contacts()) {
        let p = parse_phylogeny(&tree_text(&depths, &contacts)).unwrap();
        prop_assert_eq!(p.languages().count(), depths.len());
        for (i, &depth) in depths.iter().enumerate() {
            prop_assert_eq!(p.depth(&lang(i)).unwrap(), depth + 1);
        }
    }

    /// Consecutive lines at equal depth are siblings.
    #[test]
    fn equal_indentation_attaches_siblings(depths in arb_depths()) {
        let p = parse_phylogeny(&tree_text(&depths, &[])).unwrap();
        for i in 1..depths.len() {
            if depths[i] == depths[i - 1] {
                prop_assert_eq!(
                    p.parent(&lang(i)).unwrap(),
                    p.parent(&lang(i - 1)).unwrap()
                );
            }
            if depths[i] == depths[i - 1] + 1 {
                let parent = p.parent(&lang(i)).unwrap().cloned();
                prop_assert_eq!(parent, Some(LanguageId::new(lang(i - 1))));
            }
        }
    }

    /// dist is a symmetric tree metric consistent with LCA depth.
    #[test]
    fn distance_matches_lca_depth(depths in arb_depths()) {
        let p = parse_phylogeny(&tree_text(&depths, &[])).unwrap();
        let all = ids(&p);
        for a in &all {
            prop_assert_eq!(p.distance(a.as_str(), a.as_str()).unwrap(), 0);
            prop_assert_eq!(p.lca([a]).unwrap(), a.clone());
            for b in &all {
                let d = p.distance(a.as_str(), b.as_str()).unwrap();
                prop_assert_eq!(d, p.distance(b.as_str(), a.as_str()).unwrap());
                let lca = p.lca([a, b]).unwrap();
                let expected = p.depth(a.as_str()).unwrap() + p.depth(b.as_str()).unwrap()
                    - 2 * p.depth(lca.as_str()).unwrap();
                prop_assert_eq!(d, expected);
            }
        }
    }

    /// Each parent is at distance one; top-level languages meet at the root.
    #[test]
    fn parent_edges_have_unit_distance(depths in arb_depths()) {
        let p = parse_phylogeny(&tree_text(&depths, &[])).unwrap();
        let top: Vec<LanguageId> = depths
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == 0)
            .map(|(i, _)| LanguageId::new(lang(i)))
            .collect();
        for id in ids(&p) {
            if let Some(parent) = p.parent(id.as_str()).unwrap() {
                if !parent.is_root() {
                    prop_assert_eq!(p.distance(id.as_str(), parent.as_str()).unwrap(), 1);
                }
            }
        }
        if top.len() > 1 {
            prop_assert!(p.lca(top.iter()).unwrap().is_root());
        }
        prop_assert!(p.lca(std::iter::empty()).unwrap().is_root());
    }

    /// Contact edges are mirrored as incoming and outgoing sets.
    #[test]
    fn contacts_are_registered_both_ways(depths in arb_depths(), contacts in arb_contacts()) {
        let n = depths.len();
        let p = parse_phylogeny(&tree_text(&depths, &contacts)).unwrap();
        for (s, t) in &contacts {
            let (s, t) = (s % n, t % n);
            if s == t {
                continue;
            }
            prop_assert!(p.incoming_influences(&lang(t)).unwrap().contains(lang(s).as_str()));
            prop_assert!(p.outgoing_influences(&lang(s)).unwrap().contains(lang(t).as_str()));
        }
    }

    /// Newick output has balanced parentheses and names every language.
    #[test]
    fn newick_is_well_formed(depths in arb_depths()) {
        let p = parse_phylogeny(&tree_text(&depths, &[])).unwrap();
        let newick = p.to_newick();
        prop_assert!(newick.ends_with("ROOT;"));
        prop_assert_eq!(newick.matches('(').count(), newick.matches(')').count());
        for i in 0..depths.len() {
            prop_assert!(newick.contains(&lang(i)));
        }
    }
}

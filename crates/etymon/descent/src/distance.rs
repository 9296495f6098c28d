//! Distance resolution over the descent tree and the distance-to-similarity
//! conversion.
//!
//! `dist(a, b) = rootDist(a) + rootDist(b) - 2 * rootDist(lca(a, b))`, where
//! the LCA is the first entry of `b`'s source chain that also occurs in
//! `a`'s chain. Self pairs are fixed at 0.

use crate::error::{DescentError, DescentResult};
use crate::tree::DescentTree;
use crate::types::{FormId, Source};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use tracing::debug;

// ── Similarity ───────────────────────────────────────────────────────

/// Clamped linear decay from distance to expected similarity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityModel {
    /// Similarity lost per unit of distance.
    pub decay: f64,
    /// Floor of the similarity.
    pub min_similarity: f64,
}

impl SimilarityModel {
    /// `max(min_similarity, 1 - decay * dist)`.
    pub fn similarity(&self, distance: u32) -> f64 {
        let sim = 1.0 - self.decay * f64::from(distance);
        if sim < self.min_similarity {
            self.min_similarity
        } else {
            sim
        }
    }
}

impl Default for SimilarityModel {
    fn default() -> Self {
        Self {
            decay: 0.1,
            min_similarity: 0.1,
        }
    }
}

// ── Distance table ───────────────────────────────────────────────────

/// Symmetric form-to-form distances, populated for every pair.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DistanceTable {
    /// Keyed by the ordered pair `(min, max)`; self pairs included.
    distances: BTreeMap<(FormId, FormId), u32>,
}

impl DistanceTable {
    /// Compute the distance of every form pair in `tree`.
    pub fn resolve(tree: &DescentTree) -> DescentResult<Self> {
        let mut chains: BTreeMap<&FormId, (Vec<Source>, HashSet<Source>)> = BTreeMap::new();
        for form in tree.forms() {
            let chain = tree.source_chain(form.id.as_str())?;
            let members = chain.iter().cloned().collect();
            chains.insert(&form.id, (chain, members));
        }

        let ids: Vec<&FormId> = chains.keys().copied().collect();
        let mut distances = BTreeMap::new();
        for (i, a) in ids.iter().enumerate() {
            distances.insert(((*a).clone(), (*a).clone()), 0);
            for b in &ids[i + 1..] {
                let (_, members_a) = &chains[a];
                let (chain_b, _) = &chains[b];
                let lca = chain_b
                    .iter()
                    .find(|s| members_a.contains(*s))
                    .unwrap_or(&Source::Root);

                let root_a = tree.get(a.as_str())?.root_distance;
                let root_b = tree.get(b.as_str())?.root_distance;
                let root_lca = tree.root_distance(lca)?;
                let dist = (root_a - root_lca)
                    .checked_add(root_b - root_lca)
                    .ok_or_else(|| DescentError::DistanceOverflow {
                        a: a.to_string(),
                        b: b.to_string(),
                    })?;
                distances.insert(((*a).clone(), (*b).clone()), dist);
            }
        }

        debug!(
            forms = ids.len(),
            pairs = distances.len(),
            "Resolved form distances"
        );
        Ok(Self { distances })
    }

    /// Distance between `a` and `b`, in either order.
    pub fn get(&self, a: &str, b: &str) -> DescentResult<u32> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.distances
            .get(&(FormId::new(key.0), FormId::new(key.1)))
            .copied()
            .ok_or_else(|| DescentError::MissingDistance {
                a: a.to_string(),
                b: b.to_string(),
            })
    }

    /// Expected similarity of `a` and `b` under `model`.
    pub fn similarity(&self, a: &str, b: &str, model: &SimilarityModel) -> DescentResult<f64> {
        Ok(model.similarity(self.get(a, b)?))
    }

    /// Number of stored unordered pairs, self pairs included.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Largest distance in the table.
    pub fn max_distance(&self) -> u32 {
        self.distances.values().copied().max().unwrap_or(0)
    }

    /// Upper-triangular matrix of expected similarities, forms in id order.
    pub fn render_similarity_matrix(&self, tree: &DescentTree, model: &SimilarityModel) -> String {
        let ids: Vec<&str> = tree.forms().map(|f| f.id.as_str()).collect();
        let width = ids.iter().map(|id| id.len()).max().unwrap_or(0).max(4);

        let mut out = String::new();
        let _ = write!(out, "{:width$}", "");
        for id in &ids {
            let _ = write!(out, " {:>width$}", id);
        }
        out.push('\n');

        for (i, a) in ids.iter().enumerate() {
            let _ = write!(out, "{:width$}", a);
            for (j, b) in ids.iter().enumerate() {
                match self.get(a, b) {
                    Ok(dist) if j >= i => {
                        let _ = write!(out, " {:>width$.1}", model.similarity(dist));
                    }
                    _ => {
                        let _ = write!(out, " {:width$}", "");
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}

//! Multi-family extension of the active language set.
//!
//! When the active languages share no ancestor below the root, each
//! top-level family is handled on its own: the family's languages are
//! climbed up to their common ancestor, and every language passed on the
//! way joins the active set.

use etymon_phylogeny::{LanguageId, Phylogeny, PhylogenyResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// One language-tree edge walked while climbing to a family's LCA.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClimbedEdge {
    pub child: LanguageId,
    pub parent: LanguageId,
}

/// Group `languages` by their top-level ancestor.
pub fn partition_by_family<'a, I>(
    phylogeny: &Phylogeny,
    languages: I,
) -> PhylogenyResult<BTreeMap<LanguageId, BTreeSet<LanguageId>>>
where
    I: IntoIterator<Item = &'a LanguageId>,
{
    let mut families: BTreeMap<LanguageId, BTreeSet<LanguageId>> = BTreeMap::new();
    for language in languages {
        let top = phylogeny.top_level_ancestor(language.as_str())?;
        families.entry(top).or_default().insert(language.clone());
    }
    Ok(families)
}

/// Extend `active` across language families.
///
/// Does nothing unless the LCA of `active` is the root. Returns the climbed
/// edges, each once, in family order.
pub fn extend_across_families(
    phylogeny: &Phylogeny,
    active: &mut BTreeSet<LanguageId>,
) -> PhylogenyResult<Vec<ClimbedEdge>> {
    if active.is_empty() || !phylogeny.lca(active.iter())?.is_root() {
        return Ok(Vec::new());
    }

    let families = partition_by_family(phylogeny, active.iter())?;
    let mut seen = BTreeSet::new();
    let mut climbed = Vec::new();

    for (family, members) in &families {
        let target = phylogeny.lca(members.iter())?;
        for member in members {
            let mut current = member.clone();
            while current != target {
                let Some(parent) = phylogeny.parent(current.as_str())?.cloned() else {
                    break;
                };
                let edge = ClimbedEdge {
                    child: current,
                    parent: parent.clone(),
                };
                if seen.insert(edge.clone()) {
                    climbed.push(edge);
                }
                active.insert(parent.clone());
                current = parent;
            }
        }
        debug!(family = %family, lca = %target, members = members.len(), "Climbed family");
    }

    debug!(
        families = families.len(),
        edges = climbed.len(),
        active = active.len(),
        "Extended active languages across families"
    );
    Ok(climbed)
}

//! The language phylogeny: a rooted tree plus directed contact edges.

use crate::error::{PhylogenyError, PhylogenyResult};
use crate::types::{LanguageId, LanguageNode};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Language-family tree with contact (influence) edges.
///
/// All families hang below an abstract root with id [`LanguageId::ROOT`].
/// The tree is append-only: languages can only be attached below an
/// existing node, so the parent relation cannot form a cycle. For that
/// reason it serializes for output but is only built through the parser or
/// [`Phylogeny::add_language`].
#[derive(Clone, Debug, Serialize)]
pub struct Phylogeny {
    nodes: BTreeMap<LanguageId, LanguageNode>,
}

impl Phylogeny {
    /// An empty phylogeny holding only the root.
    pub fn new() -> Self {
        let root = LanguageId::root();
        let mut nodes = BTreeMap::new();
        nodes.insert(root.clone(), LanguageNode::new(root, None));
        Self { nodes }
    }

    /// Attach `id` as the last child of `parent`.
    pub fn add_language(&mut self, id: LanguageId, parent: &LanguageId) -> PhylogenyResult<()> {
        if id.as_str().is_empty() {
            return Err(PhylogenyError::EmptyId);
        }
        if id.is_root() {
            return Err(PhylogenyError::ReservedId(id.0));
        }
        if self.nodes.contains_key(&id) {
            return Err(PhylogenyError::DuplicateLanguage(id.0));
        }
        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| PhylogenyError::UnknownLanguage(parent.0.clone()))?;
        parent_node.children.push(id.clone());
        self.nodes
            .insert(id.clone(), LanguageNode::new(id, Some(parent.clone())));
        Ok(())
    }

    /// Register the directed contact edge `source → target`.
    pub fn add_influence(&mut self, source: &LanguageId, target: &LanguageId) -> PhylogenyResult<()> {
        if source == target {
            return Err(PhylogenyError::SelfInfluence(source.0.clone()));
        }
        for id in [source, target] {
            if id.is_root() || !self.nodes.contains_key(id) {
                return Err(PhylogenyError::UnknownLanguage(id.0.clone()));
            }
        }
        if let Some(node) = self.nodes.get_mut(source) {
            node.outgoing.insert(target.clone());
        }
        if let Some(node) = self.nodes.get_mut(target) {
            node.incoming.insert(source.clone());
        }
        Ok(())
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn root(&self) -> LanguageId {
        LanguageId::root()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> PhylogenyResult<&LanguageNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| PhylogenyError::UnknownLanguage(id.to_string()))
    }

    /// Tree parent of `id`; `None` for the root.
    pub fn parent(&self, id: &str) -> PhylogenyResult<Option<&LanguageId>> {
        Ok(self.node(id)?.parent.as_ref())
    }

    pub fn children(&self, id: &str) -> PhylogenyResult<&[LanguageId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn is_leaf(&self, id: &str) -> PhylogenyResult<bool> {
        Ok(self.node(id)?.is_leaf())
    }

    pub fn incoming_influences(&self, id: &str) -> PhylogenyResult<&BTreeSet<LanguageId>> {
        Ok(&self.node(id)?.incoming)
    }

    pub fn outgoing_influences(&self, id: &str) -> PhylogenyResult<&BTreeSet<LanguageId>> {
        Ok(&self.node(id)?.outgoing)
    }

    pub fn has_incoming_influences(&self, id: &str) -> PhylogenyResult<bool> {
        Ok(!self.node(id)?.incoming.is_empty())
    }

    /// All languages except the root, in id order.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageId> {
        self.nodes.keys().filter(|id| !id.is_root())
    }

    /// Number of languages, not counting the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of contact edges.
    pub fn influence_count(&self) -> usize {
        self.nodes.values().map(|n| n.incoming.len()).sum()
    }

    // ── Tree queries ─────────────────────────────────────────────────

    /// Path from the root down to `id`, both ends included.
    pub fn path_from_root(&self, id: &str) -> PhylogenyResult<Vec<LanguageId>> {
        let mut path = vec![self.node(id)?.id.clone()];
        let mut current = self.node(id)?;
        while let Some(parent) = &current.parent {
            current = self.node(parent.as_str())?;
            path.push(current.id.clone());
        }
        path.reverse();
        Ok(path)
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: &str) -> PhylogenyResult<usize> {
        Ok(self.path_from_root(id)?.len() - 1)
    }

    /// Edge count along the tree path between `a` and `b`.
    pub fn distance(&self, a: &str, b: &str) -> PhylogenyResult<usize> {
        let path_a = self.path_from_root(a)?;
        let path_b = self.path_from_root(b)?;
        let shared = common_prefix_len(&path_a, &path_b);
        Ok((path_a.len() - shared) + (path_b.len() - shared))
    }

    /// Lowest common ancestor of all `ids`.
    ///
    /// An empty set yields the root; a single id yields itself.
    pub fn lca<'a, I>(&self, ids: I) -> PhylogenyResult<LanguageId>
    where
        I: IntoIterator<Item = &'a LanguageId>,
    {
        let mut shared: Option<Vec<LanguageId>> = None;
        for id in ids {
            let path = self.path_from_root(id.as_str())?;
            shared = Some(match shared {
                None => path,
                Some(mut prefix) => {
                    prefix.truncate(common_prefix_len(&prefix, &path));
                    prefix
                }
            });
        }
        Ok(shared
            .and_then(|path| path.last().cloned())
            .unwrap_or_else(LanguageId::root))
    }

    /// The child of the root that `id` descends from (the root for the root).
    pub fn top_level_ancestor(&self, id: &str) -> PhylogenyResult<LanguageId> {
        let path = self.path_from_root(id)?;
        Ok(path.get(1).cloned().unwrap_or_else(LanguageId::root))
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the tree in Newick notation, e.g. `((L2,L3)L1,L4)ROOT;`.
    pub fn to_newick(&self) -> String {
        let mut out = String::new();
        self.write_newick(&LanguageId::root(), &mut out);
        out.push(';');
        out
    }

    fn write_newick(&self, id: &LanguageId, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.children.is_empty() {
            out.push('(');
            for (i, child) in node.children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                self.write_newick(child, out);
            }
            out.push(')');
        }
        out.push_str(id.as_str());
    }
}

impl Default for Phylogeny {
    fn default() -> Self {
        Self::new()
    }
}

fn common_prefix_len(a: &[LanguageId], b: &[LanguageId]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

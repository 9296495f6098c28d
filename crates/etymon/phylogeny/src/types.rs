//! Core phylogeny types: language identifiers, tree nodes, and the
//! textual syntax of the language-tree file.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

// ── Identifiers ──────────────────────────────────────────────────────

/// Identifier of a language (or of the abstract tree root).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(pub String);

impl LanguageId {
    /// Reserved id of the abstract root above every language family.
    pub const ROOT: &'static str = "ROOT";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LanguageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Nodes ────────────────────────────────────────────────────────────

/// A language in the family tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LanguageNode {
    pub id: LanguageId,
    /// Tree parent; `None` only for the root.
    pub parent: Option<LanguageId>,
    /// Children in input order.
    pub children: Vec<LanguageId>,
    /// Languages with a contact edge into this one.
    pub incoming: BTreeSet<LanguageId>,
    /// Languages this one has a contact edge into.
    pub outgoing: BTreeSet<LanguageId>,
}

impl LanguageNode {
    pub fn new(id: LanguageId, parent: Option<LanguageId>) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            incoming: BTreeSet::new(),
            outgoing: BTreeSet::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// ── Input syntax ─────────────────────────────────────────────────────

/// Tokens of the language-tree file format.
///
/// A line reads `<indent><language>[ <separator> <contact>,<contact>...]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSyntax {
    /// Token separating a language from its contact list.
    pub contact_separator: String,
    /// Delimiter between contact ids.
    pub contact_delimiter: char,
}

impl Default for TreeSyntax {
    fn default() -> Self {
        Self {
            contact_separator: "<-".into(),
            contact_delimiter: ',',
        }
    }
}

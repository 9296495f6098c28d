//! Word-form identifiers, descent edges, and descent-file configuration.

use etymon_phylogeny::LanguageId;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

// ── Identifiers ──────────────────────────────────────────────────────

/// Identifier of a word form, exactly as written in the descent file.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub String);

impl FormId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FormId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FormId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Descent edges ────────────────────────────────────────────────────

/// Where a word form comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// The virtual root above every concept anchor.
    Root,
    /// Another word form.
    Form(FormId),
}

impl Source {
    pub fn form(&self) -> Option<&FormId> {
        match self {
            Self::Root => None,
            Self::Form(id) => Some(id),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("ROOT"),
            Self::Form(id) => write!(f, "{}", id),
        }
    }
}

/// How a form is connected to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Attached directly to the virtual root.
    Root,
    Inheritance,
    Borrowing,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Inheritance => write!(f, "inheritance"),
            Self::Borrowing => write!(f, "borrowing"),
        }
    }
}

/// A word form placed in the descent tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordForm {
    pub id: FormId,
    pub language: LanguageId,
    pub source: Source,
    pub edge: EdgeKind,
    /// Cost of the edge to `source`.
    pub edge_cost: u32,
    /// Sum of edge costs from the virtual root down to this form.
    pub root_distance: u32,
    /// Attested form: its language is a leaf of the phylogeny.
    pub known: bool,
    /// Concept anchor this form belongs to.
    pub peg: Option<FormId>,
}

impl WordForm {
    pub fn is_peg(&self) -> bool {
        self.peg.as_ref() == Some(&self.id)
    }
}

// ── Configuration ────────────────────────────────────────────────────

/// Derives a language id from a form id that carries no explicit prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageDerivation {
    /// Substring replaced in the form id.
    pub from: String,
    /// Replacement text.
    pub to: String,
}

impl LanguageDerivation {
    pub fn derive(&self, form_id: &str) -> LanguageId {
        if self.from.is_empty() {
            return LanguageId::new(form_id);
        }
        LanguageId::new(form_id.replace(self.from.as_str(), &self.to))
    }
}

impl Default for LanguageDerivation {
    /// `w12` → `L12`.
    fn default() -> Self {
        Self {
            from: "w".into(),
            to: "L".into(),
        }
    }
}

/// Edge costs and tokens of the descent-file format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescentConfig {
    /// Cost of an inheritance edge.
    pub inheritance_cost: u32,
    /// Cost of a borrowing edge.
    pub borrowing_cost: u32,
    /// Cost of attaching a form directly to the virtual root.
    pub root_cost: u32,
    /// Token marking a borrowing line.
    pub borrowing_marker: String,
    /// Separator between an explicit language prefix and the form.
    pub language_separator: char,
    /// Fallback used when a form has no language prefix.
    pub language_derivation: LanguageDerivation,
}

impl DescentConfig {
    pub fn edge_cost(&self, edge: EdgeKind) -> u32 {
        match edge {
            EdgeKind::Root => self.root_cost,
            EdgeKind::Inheritance => self.inheritance_cost,
            EdgeKind::Borrowing => self.borrowing_cost,
        }
    }
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            inheritance_cost: 1,
            borrowing_cost: 0,
            root_cost: 8,
            borrowing_marker: "->".into(),
            language_separator: ':',
            language_derivation: LanguageDerivation::default(),
        }
    }
}

//! Ground atoms and the deduplicating fact set.

use crate::error::{FactError, FactResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ── Predicates ───────────────────────────────────────────────────────

/// Predicates of the downstream rule set; variant names are the wire names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Predicate {
    /// Form has an unknown origin.
    Eunk,
    /// Form borrowed from form.
    Eloa,
    /// Form inherited from form.
    Einh,
    /// Borrowing is possible between two forms.
    Xloa,
    /// Inheritance is possible between two forms, or along a climbed
    /// language-tree edge.
    Xinh,
    /// Tree distance between the languages of two forms.
    Xdst,
    /// First distance value is smaller than the second.
    Xsth,
    /// Phonetic similarity of two forms.
    Fsim,
    /// Form belongs to the homologue set of a peg.
    Fhom,
}

impl Predicate {
    pub const ALL: [Predicate; 9] = [
        Self::Eunk,
        Self::Eloa,
        Self::Einh,
        Self::Xloa,
        Self::Xinh,
        Self::Xdst,
        Self::Xsth,
        Self::Fsim,
        Self::Fhom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Eunk => "Eunk",
            Self::Eloa => "Eloa",
            Self::Einh => "Einh",
            Self::Xloa => "Xloa",
            Self::Xinh => "Xinh",
            Self::Xdst => "Xdst",
            Self::Xsth => "Xsth",
            Self::Fsim => "Fsim",
            Self::Fhom => "Fhom",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Self::Eunk => 1,
            Self::Xdst => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Atoms ────────────────────────────────────────────────────────────

/// Whether the engine receives a value for an atom or infers it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    /// Known truth value in `[0, 1]`.
    Observation { value: f64 },
    /// Value to be inferred.
    Target,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Observation { value } => write!(f, "observation {}", value),
            Self::Target => write!(f, "target"),
        }
    }
}

/// A fully instantiated predicate with its role and modifiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: Predicate,
    pub args: Vec<String>,
    #[serde(flatten)]
    pub role: Role,
    /// The engine must not revise the value.
    #[serde(default)]
    pub fixed: bool,
    /// Excluded from result display.
    #[serde(default)]
    pub hidden: bool,
}

impl Atom {
    pub fn observation<I, S>(predicate: Predicate, value: f64, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(predicate, Role::Observation { value }, args)
    }

    pub fn target<I, S>(predicate: Predicate, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(predicate, Role::Target, args)
    }

    fn new<I, S>(predicate: Predicate, role: Role, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            predicate,
            args: args.into_iter().map(Into::into).collect(),
            role,
            fixed: false,
            hidden: false,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn value(&self) -> Option<f64> {
        match self.role {
            Role::Observation { value } => Some(value),
            Role::Target => None,
        }
    }

    pub fn is_target(&self) -> bool {
        self.role == Role::Target
    }

    /// `Pred(a, b)` without role or modifiers.
    pub fn signature(&self) -> String {
        format!("{}({})", self.predicate, self.args.join(", "))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.signature(), self.role)?;
        if self.fixed {
            f.write_str(" [fixed]")?;
        }
        if self.hidden {
            f.write_str(" [hidden]")?;
        }
        Ok(())
    }
}

// ── Fact set ─────────────────────────────────────────────────────────

type AtomKey = (Predicate, Vec<String>);

/// Ground atoms of one run, unique by predicate and arguments, in emission order.
#[derive(Clone, Debug, Default)]
pub struct FactSet {
    atoms: Vec<Atom>,
    index: HashMap<AtomKey, usize>,
}

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom. Returns `false` if an identical atom was already present,
    /// in which case the fixed/hidden modifiers are merged into it.
    ///
    /// Fails when the same predicate and arguments already carry a different
    /// role or value.
    pub fn insert(&mut self, atom: Atom) -> FactResult<bool> {
        if atom.args.len() != atom.predicate.arity() {
            return Err(FactError::Arity {
                predicate: atom.predicate.to_string(),
                expected: atom.predicate.arity(),
                found: atom.args.len(),
            });
        }

        let key = (atom.predicate, atom.args.clone());
        if let Some(&pos) = self.index.get(&key) {
            let existing = &mut self.atoms[pos];
            if existing.role != atom.role {
                return Err(FactError::ConflictingAtom {
                    atom: existing.signature(),
                    existing: existing.role.to_string(),
                    incoming: atom.role.to_string(),
                });
            }
            existing.fixed |= atom.fixed;
            existing.hidden |= atom.hidden;
            return Ok(false);
        }

        self.index.insert(key, self.atoms.len());
        self.atoms.push(atom);
        Ok(true)
    }

    pub fn get(&self, predicate: Predicate, args: &[&str]) -> Option<&Atom> {
        let key = (predicate, args.iter().map(|a| a.to_string()).collect());
        self.index.get(&key).map(|&pos| &self.atoms[pos])
    }

    pub fn contains(&self, predicate: Predicate, args: &[&str]) -> bool {
        self.get(predicate, args).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    pub fn with_predicate(&self, predicate: Predicate) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(move |a| a.predicate == predicate)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Atom count per predicate; predicates without atoms are omitted.
    pub fn counts(&self) -> BTreeMap<Predicate, usize> {
        let mut counts = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(atom.predicate).or_insert(0) += 1;
        }
        counts
    }

    pub fn observation_count(&self) -> usize {
        self.atoms.iter().filter(|a| !a.is_target()).count()
    }

    pub fn target_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.is_target()).count()
    }

    pub fn into_atoms(self) -> Vec<Atom> {
        self.atoms
    }
}

impl IntoIterator for FactSet {
    type Item = Atom;
    type IntoIter = std::vec::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}

//! The descent tree: every word form with its source, edge cost,
//! accumulated root distance, attestation flag and concept anchor.

use crate::error::{DescentError, DescentResult};
use crate::types::{EdgeKind, FormId, Source, WordForm};
use etymon_phylogeny::{LanguageId, Phylogeny};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// All word forms of one etymological dataset under a virtual root.
///
/// Forms can only be attached below the root or below an existing form,
/// so source chains always terminate at the root. The tree serializes for
/// output but is only built through the attach methods.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DescentTree {
    forms: BTreeMap<FormId, WordForm>,
    /// Insertion order, for rendering in file order.
    order: Vec<FormId>,
}

impl DescentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new concept anchor below the virtual root; it becomes its own peg.
    pub fn attach_root(&mut self, id: FormId, language: LanguageId, cost: u32) -> DescentResult<&WordForm> {
        self.check_new(&id, &language)?;
        let form = WordForm {
            peg: Some(id.clone()),
            id,
            language,
            source: Source::Root,
            edge: EdgeKind::Root,
            edge_cost: cost,
            root_distance: cost,
            known: false,
        };
        Ok(self.insert(form))
    }

    /// Attach `id` below the existing form `source`; it inherits the source's peg.
    pub fn attach_child(
        &mut self,
        id: FormId,
        language: LanguageId,
        source: &FormId,
        edge: EdgeKind,
        cost: u32,
    ) -> DescentResult<&WordForm> {
        self.check_new(&id, &language)?;
        let parent = self.get(source.as_str())?;
        let root_distance = parent
            .root_distance
            .checked_add(cost)
            .ok_or_else(|| DescentError::CostOverflow(id.0.clone()))?;
        let form = WordForm {
            root_distance,
            peg: parent.peg.clone(),
            id,
            language,
            source: Source::Form(source.clone()),
            edge,
            edge_cost: cost,
            known: false,
        };
        Ok(self.insert(form))
    }

    fn check_new(&self, id: &FormId, language: &LanguageId) -> DescentResult<()> {
        if id.as_str().is_empty() {
            return Err(DescentError::EmptyId);
        }
        if language.as_str().is_empty() {
            return Err(DescentError::EmptyLanguage(id.0.clone()));
        }
        if self.forms.contains_key(id) {
            return Err(DescentError::DuplicateForm(id.0.clone()));
        }
        Ok(())
    }

    fn insert(&mut self, form: WordForm) -> &WordForm {
        let id = form.id.clone();
        self.order.push(id.clone());
        self.forms.entry(id).or_insert(form)
    }

    /// Remove the concept anchor of a form.
    ///
    /// Homologue membership of such a form is inferred against every peg.
    pub fn clear_peg(&mut self, id: &str) -> DescentResult<()> {
        let form = self
            .forms
            .get_mut(id)
            .ok_or_else(|| DescentError::UnknownForm(id.to_string()))?;
        form.peg = None;
        Ok(())
    }

    /// Flag every form whose language is a leaf of `phylogeny` as known.
    ///
    /// Fails on the first form whose language the phylogeny lacks.
    pub fn mark_known(&mut self, phylogeny: &Phylogeny) -> DescentResult<usize> {
        let mut known = 0;
        for form in self.forms.values_mut() {
            form.known = phylogeny
                .is_leaf(form.language.as_str())
                .map_err(|_| DescentError::UnknownLanguage {
                    form: form.id.0.clone(),
                    language: form.language.0.clone(),
                })?;
            if form.known {
                known += 1;
            }
        }
        Ok(known)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn get(&self, id: &str) -> DescentResult<&WordForm> {
        self.forms
            .get(id)
            .ok_or_else(|| DescentError::UnknownForm(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.forms.contains_key(id)
    }

    /// Forms in id order.
    pub fn forms(&self) -> impl Iterator<Item = &WordForm> {
        self.forms.values()
    }

    /// Forms in the order they were attached.
    pub fn forms_in_file_order(&self) -> impl Iterator<Item = &WordForm> {
        self.order.iter().filter_map(|id| self.forms.get(id))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Root distance of a source; the virtual root sits at 0.
    pub fn root_distance(&self, source: &Source) -> DescentResult<u32> {
        match source {
            Source::Root => Ok(0),
            Source::Form(id) => Ok(self.get(id.as_str())?.root_distance),
        }
    }

    /// The form itself followed by its ancestors, ending with the root.
    pub fn source_chain(&self, id: &str) -> DescentResult<Vec<Source>> {
        let mut current = self.get(id)?;
        let mut chain = vec![Source::Form(current.id.clone())];
        while let Source::Form(parent) = &current.source {
            chain.push(Source::Form(parent.clone()));
            current = self.get(parent.as_str())?;
        }
        chain.push(Source::Root);
        Ok(chain)
    }

    /// Every peg assigned to at least one form.
    pub fn pegs(&self) -> BTreeSet<FormId> {
        self.forms.values().filter_map(|f| f.peg.clone()).collect()
    }

    /// Forms grouped by language, both in id order.
    pub fn forms_by_language(&self) -> BTreeMap<LanguageId, Vec<FormId>> {
        let mut grouped: BTreeMap<LanguageId, Vec<FormId>> = BTreeMap::new();
        for form in self.forms.values() {
            grouped
                .entry(form.language.clone())
                .or_default()
                .push(form.id.clone());
        }
        grouped
    }
}

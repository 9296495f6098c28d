//! Fact generation.
//!
//! The generator reads a phylogeny, a descent tree and its distance table,
//! and produces the complete ground-fact set for the downstream rule set.
//! It keeps no state between runs.

use crate::atom::{Atom, FactSet, Predicate};
use crate::error::{FactError, FactResult};
use crate::family::extend_across_families;
use etymon_descent::{DescentTree, DistanceTable, FormId, SimilarityModel};
use etymon_phylogeny::{LanguageId, Phylogeny};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Generator settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Second argument of the per-form control atom.
    pub control_sentinel: String,
    /// Climb language families when the active languages share no ancestor.
    pub multi_family_extension: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            control_sentinel: "eloaCtrl".into(),
            multi_family_extension: true,
        }
    }
}

/// Emits ground facts over a phylogeny and a descent tree.
#[derive(Clone, Debug, Default)]
pub struct FactGenerator {
    config: GeneratorConfig,
    similarity: SimilarityModel,
}

/// Inputs shared by the emission steps of one run.
struct Run<'a> {
    phylogeny: &'a Phylogeny,
    tree: &'a DescentTree,
    distances: &'a DistanceTable,
    forms_by_language: BTreeMap<LanguageId, Vec<FormId>>,
    active: BTreeSet<LanguageId>,
}

impl Run<'_> {
    fn forms_of(&self, language: &LanguageId) -> &[FormId] {
        self.forms_by_language
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl FactGenerator {
    pub fn new(config: GeneratorConfig, similarity: SimilarityModel) -> Self {
        Self { config, similarity }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn similarity(&self) -> &SimilarityModel {
        &self.similarity
    }

    /// Produce every ground fact for one dataset.
    pub fn generate(
        &self,
        phylogeny: &Phylogeny,
        tree: &DescentTree,
        distances: &DistanceTable,
    ) -> FactResult<FactSet> {
        for form in tree.forms() {
            if !phylogeny.contains(form.language.as_str()) {
                return Err(FactError::UnknownLanguage {
                    form: form.id.to_string(),
                    language: form.language.to_string(),
                });
            }
        }

        let forms_by_language = tree.forms_by_language();
        let active = forms_by_language.keys().cloned().collect();
        let mut run = Run {
            phylogeny,
            tree,
            distances,
            forms_by_language,
            active,
        };
        let mut facts = FactSet::new();

        if self.config.multi_family_extension {
            self.emit_climbed_edges(&mut run, &mut facts)?;
        }
        self.emit_unknown_origins(&run, &mut facts)?;
        self.emit_borrowing_candidates(&run, &mut facts)?;
        self.emit_inheritance_candidates(&run, &mut facts)?;
        self.emit_tree_distances(&run, &mut facts)?;
        self.emit_similarities(&run, &mut facts)?;
        self.emit_homologue_sets(&run, &mut facts)?;
        self.emit_controls(&run, &mut facts)?;

        info!(
            atoms = facts.len(),
            observations = facts.observation_count(),
            targets = facts.target_count(),
            forms = tree.len(),
            languages = run.active.len(),
            "Generated ground facts"
        );
        Ok(facts)
    }

    fn emit_climbed_edges(&self, run: &mut Run<'_>, facts: &mut FactSet) -> FactResult<()> {
        let climbed = extend_across_families(run.phylogeny, &mut run.active)?;
        for edge in &climbed {
            facts.insert(Atom::observation(
                Predicate::Xinh,
                1.0,
                [edge.child.as_str(), edge.parent.as_str()],
            ))?;
        }
        debug!(edges = climbed.len(), "Xinh climbed");
        Ok(())
    }

    fn emit_unknown_origins(&self, run: &Run<'_>, facts: &mut FactSet) -> FactResult<()> {
        for form in run.tree.forms() {
            facts.insert(Atom::target(Predicate::Eunk, [form.id.as_str()]))?;
        }
        debug!(atoms = run.tree.len(), "Eunk");
        Ok(())
    }

    fn emit_borrowing_candidates(&self, run: &Run<'_>, facts: &mut FactSet) -> FactResult<()> {
        let mut pairs = 0usize;
        for language in &run.active {
            for contact in run.phylogeny.incoming_influences(language.as_str())? {
                if !run.active.contains(contact) {
                    continue;
                }
                for form in run.forms_of(language) {
                    for contact_form in run.forms_of(contact) {
                        let args = [form.as_str(), contact_form.as_str()];
                        facts.insert(Atom::observation(Predicate::Xloa, 1.0, args))?;
                        facts.insert(Atom::target(Predicate::Eloa, args))?;
                        pairs += 1;
                    }
                }
            }
        }
        debug!(pairs, "Xloa/Eloa");
        Ok(())
    }

    fn emit_inheritance_candidates(&self, run: &Run<'_>, facts: &mut FactSet) -> FactResult<()> {
        let mut pairs = 0usize;
        for language in &run.active {
            let Some(parent) = run.phylogeny.parent(language.as_str())? else {
                continue;
            };
            if !run.active.contains(parent) {
                continue;
            }
            for form in run.forms_of(language) {
                for parent_form in run.forms_of(parent) {
                    let args = [form.as_str(), parent_form.as_str()];
                    facts.insert(Atom::observation(Predicate::Xinh, 1.0, args))?;
                    facts.insert(Atom::target(Predicate::Einh, args))?;
                    pairs += 1;
                }
            }
        }
        debug!(pairs, "Xinh/Einh");
        Ok(())
    }

    fn emit_tree_distances(&self, run: &Run<'_>, facts: &mut FactSet) -> FactResult<()> {
        let mut max = 0usize;
        let mut emitted = 0usize;
        for a in &run.active {
            for b in &run.active {
                if a == b {
                    continue;
                }
                let forms_a = run.forms_of(a);
                let forms_b = run.forms_of(b);
                if forms_a.is_empty() || forms_b.is_empty() {
                    continue;
                }
                let dist = run.phylogeny.distance(a.as_str(), b.as_str())?;
                let dist_arg = dist.to_string();
                max = max.max(dist);
                for form_a in forms_a {
                    for form_b in forms_b {
                        facts.insert(Atom::observation(
                            Predicate::Xdst,
                            1.0,
                            [form_a.as_str(), form_b.as_str(), dist_arg.as_str()],
                        ))?;
                        emitted += 1;
                    }
                }
            }
        }

        for larger in 1..=max {
            for smaller in 0..larger {
                facts.insert(Atom::observation(
                    Predicate::Xsth,
                    1.0,
                    [smaller.to_string(), larger.to_string()],
                ))?;
            }
        }
        debug!(xdst = emitted, max, "Xdst/Xsth");
        Ok(())
    }

    fn emit_similarities(&self, run: &Run<'_>, facts: &mut FactSet) -> FactResult<()> {
        let forms: Vec<_> = run.tree.forms().collect();
        let mut observed = 0usize;
        for (i, a) in forms.iter().enumerate() {
            let id_a = a.id.as_str();
            facts.insert(Atom::observation(Predicate::Fsim, 1.0, [id_a, id_a]).fixed())?;

            for b in &forms[i + 1..] {
                let id_b = b.id.as_str();
                if a.known && b.known {
                    let sim = run.distances.similarity(id_a, id_b, &self.similarity)?;
                    facts.insert(Atom::observation(Predicate::Fsim, sim, [id_a, id_b]).fixed())?;
                    facts.insert(Atom::observation(Predicate::Fsim, sim, [id_b, id_a]).fixed())?;
                    observed += 1;
                } else {
                    facts.insert(Atom::target(Predicate::Fsim, [id_a, id_b]))?;
                    facts.insert(Atom::target(Predicate::Fsim, [id_b, id_a]))?;
                }
            }
        }
        debug!(forms = forms.len(), observed, "Fsim");
        Ok(())
    }

    fn emit_homologue_sets(&self, run: &Run<'_>, facts: &mut FactSet) -> FactResult<()> {
        let pegs = run.tree.pegs();
        for form in run.tree.forms() {
            let id = form.id.as_str();
            for peg in &pegs {
                let args = [id, peg.as_str()];
                let atom = match &form.peg {
                    None => Atom::target(Predicate::Fhom, args).fixed(),
                    Some(own) if form.known => {
                        let value = if own == peg { 1.0 } else { 0.0 };
                        Atom::observation(Predicate::Fhom, value, args).fixed()
                    }
                    Some(_) => Atom::target(Predicate::Fhom, args),
                };
                facts.insert(atom)?;
            }
        }
        debug!(pegs = pegs.len(), "Fhom");
        Ok(())
    }

    fn emit_controls(&self, run: &Run<'_>, facts: &mut FactSet) -> FactResult<()> {
        let sentinel = self.config.control_sentinel.as_str();
        for form in run.tree.forms() {
            facts.insert(
                Atom::observation(Predicate::Eloa, 0.0, [form.id.as_str(), sentinel])
                    .fixed()
                    .hidden(),
            )?;
        }
        debug!(atoms = run.tree.len(), "Eloa control");
        Ok(())
    }
}

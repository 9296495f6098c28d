//! One parse-then-generate pass over a language tree and a descent file.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use etymon_descent::{DescentParser, DescentTree, DistanceTable};
use etymon_facts::{forward, FactGenerator, FactSet, InferenceBackend, Predicate};
use etymon_phylogeny::{Phylogeny, PhylogenyParser};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parsed inputs of one run.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub phylogeny: Phylogeny,
    pub tree: DescentTree,
    pub distances: DistanceTable,
}

/// Counts reported after a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub languages: usize,
    pub contacts: usize,
    pub forms: usize,
    pub known_forms: usize,
    pub pegs: usize,
    pub atoms: usize,
    pub observations: usize,
    pub targets: usize,
    pub fixed: usize,
    pub hidden: usize,
    pub per_predicate: BTreeMap<Predicate, usize>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} languages, {} contacts, {} forms ({} known), {} pegs",
            self.languages, self.contacts, self.forms, self.known_forms, self.pegs
        )?;
        write!(
            f,
            "{} atoms: {} observations, {} targets, {} fixed, {} hidden",
            self.atoms, self.observations, self.targets, self.fixed, self.hidden
        )?;
        for (predicate, count) in &self.per_predicate {
            write!(f, "\n  {:<5} {}", predicate.name(), count)?;
        }
        Ok(())
    }
}

/// Runs the parsers, the distance resolver and the fact generator in order.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parse both inputs and resolve form distances.
    pub fn prepare(&self, tree_text: &str, descent_text: &str) -> PipelineResult<Dataset> {
        let phylogeny = PhylogenyParser::new(self.config.tree.clone()).parse(tree_text)?;
        debug!(newick = %phylogeny.to_newick(), "Language tree");

        let tree = DescentParser::new(self.config.descent.clone()).parse_against(descent_text, &phylogeny)?;
        let distances = DistanceTable::resolve(&tree)?;
        debug!(
            "Expected similarities:\n{}",
            distances.render_similarity_matrix(&tree, &self.config.similarity)
        );

        Ok(Dataset {
            phylogeny,
            tree,
            distances,
        })
    }

    /// Produce the fact set for already parsed inputs.
    pub fn generate(&self, dataset: &Dataset) -> PipelineResult<FactSet> {
        let generator = FactGenerator::new(self.config.generator.clone(), self.config.similarity);
        Ok(generator.generate(&dataset.phylogeny, &dataset.tree, &dataset.distances)?)
    }

    /// Run on in-memory inputs and forward the facts to `backend` once.
    pub fn run_str<B>(&self, tree_text: &str, descent_text: &str, backend: &mut B) -> PipelineResult<RunSummary>
    where
        B: InferenceBackend + ?Sized,
    {
        let dataset = self.prepare(tree_text, descent_text)?;
        let facts = self.generate(&dataset)?;

        let mut summary = RunSummary {
            languages: dataset.phylogeny.languages().count(),
            contacts: dataset.phylogeny.influence_count(),
            forms: dataset.tree.len(),
            known_forms: dataset.tree.forms().filter(|f| f.known).count(),
            pegs: dataset.tree.pegs().len(),
            atoms: facts.len(),
            per_predicate: facts.counts(),
            ..RunSummary::default()
        };

        let stats = forward(facts, backend)?;
        summary.observations = stats.observations;
        summary.targets = stats.targets;
        summary.fixed = stats.fixed;
        summary.hidden = stats.hidden;

        info!(
            forms = summary.forms,
            atoms = summary.atoms,
            "Facts forwarded"
        );
        Ok(summary)
    }

    /// Read both files, then run. Nothing is forwarded if either read fails.
    pub fn run<B>(
        &self,
        tree_path: impl AsRef<Path>,
        descent_path: impl AsRef<Path>,
        backend: &mut B,
    ) -> PipelineResult<RunSummary>
    where
        B: InferenceBackend + ?Sized,
    {
        let tree_path = tree_path.as_ref();
        let descent_path = descent_path.as_ref();
        info!(
            tree = %tree_path.display(),
            descent = %descent_path.display(),
            "Starting run"
        );

        let result = read_input(tree_path).and_then(|tree_text| {
            let descent_text = read_input(descent_path)?;
            self.run_str(&tree_text, &descent_text, backend)
        });
        result.inspect_err(|e| warn!(error = %e, "Run failed"))
    }
}

fn read_input(path: &Path) -> PipelineResult<String> {
    std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

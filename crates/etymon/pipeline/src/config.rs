//! Pipeline configuration

use crate::error::{PipelineError, PipelineResult};
use etymon_descent::{DescentConfig, SimilarityModel};
use etymon_facts::GeneratorConfig;
use etymon_phylogeny::TreeSyntax;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for every stage of a run. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language-tree file syntax
    pub tree: TreeSyntax,

    /// Descent-file syntax and edge costs
    pub descent: DescentConfig,

    /// Distance-to-similarity conversion
    pub similarity: SimilarityModel,

    /// Fact generator settings
    pub generator: GeneratorConfig,
}

impl PipelineConfig {
    /// Load configuration from a JSON file, or the defaults if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| PipelineError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| PipelineError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

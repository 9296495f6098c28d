use etymon_descent::DescentError;
use etymon_facts::FactError;
use etymon_phylogeny::PhylogenyError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("language tree: {0}")]
    Phylogeny(#[from] PhylogenyError),

    #[error("descent: {0}")]
    Descent(#[from] DescentError),

    #[error("fact generation: {0}")]
    Facts(#[from] FactError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

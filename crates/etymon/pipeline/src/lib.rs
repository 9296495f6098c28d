//! # etymon-pipeline
//!
//! Loads a language tree and a descent file, generates the ground facts and
//! forwards them to an inference backend exactly once.
//!
//! ```text
//!   tree.txt ────▶ PhylogenyParser ──┐
//!                                    ├──▶ DistanceTable ──▶ FactGenerator ──▶ backend
//!   descent.txt ─▶ DescentParser ────┘
//! ```
//!
//! ```no_run
//! use etymon_facts::JsonLinesBackend;
//! use etymon_pipeline::{init_tracing, Pipeline, PipelineConfig};
//!
//! init_tracing(false);
//! let config = PipelineConfig::load("etymon.json")?;
//! let mut backend = JsonLinesBackend::new(std::io::stdout());
//! let summary = Pipeline::new(config).run("tree.txt", "descent.txt", &mut backend)?;
//! eprintln!("{summary}");
//! # Ok::<(), etymon_pipeline::PipelineError>(())
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Dataset, Pipeline, RunSummary};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `debug` when `verbose` and `info` otherwise.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init();
}

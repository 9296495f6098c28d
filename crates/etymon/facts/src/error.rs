use etymon_descent::DescentError;
use etymon_phylogeny::PhylogenyError;
use thiserror::Error;

/// Errors raised while generating or forwarding ground facts.
#[derive(Debug, Error)]
pub enum FactError {
    #[error("phylogeny error: {0}")]
    Phylogeny(#[from] PhylogenyError),

    #[error("descent error: {0}")]
    Descent(#[from] DescentError),

    /// A form is assigned to a language the phylogeny does not contain.
    #[error("word form `{form}` belongs to unknown language `{language}`")]
    UnknownLanguage { form: String, language: String },

    #[error("{predicate} takes {expected} arguments, got {found}")]
    Arity {
        predicate: String,
        expected: usize,
        found: usize,
    },

    /// The same ground atom was emitted twice with different roles or values.
    #[error("conflicting emissions for {atom}: {existing} vs {incoming}")]
    ConflictingAtom {
        atom: String,
        existing: String,
        incoming: String,
    },

    #[error("backend error: {0}")]
    Backend(String),

    #[error("backend I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for fact generation.
pub type FactResult<T> = Result<T, FactError>;

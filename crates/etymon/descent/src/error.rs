//! Descent error types.

use etymon_phylogeny::{IndentChar, IndentJump};
use thiserror::Error;

/// Errors raised while building a descent tree or resolving distances.
#[derive(Debug, Error)]
pub enum DescentError {
    #[error("duplicate word form: {0}")]
    DuplicateForm(String),

    #[error("unknown word form: {0}")]
    UnknownForm(String),

    #[error("empty word-form id")]
    EmptyId,

    #[error("word form `{0}` has an empty language prefix")]
    EmptyLanguage(String),

    /// A form is assigned to a language the phylogeny does not contain.
    #[error("word form `{form}` belongs to unknown language `{language}`")]
    UnknownLanguage { form: String, language: String },

    #[error("root distance of word form `{0}` overflows")]
    CostOverflow(String),

    #[error("distance between `{a}` and `{b}` overflows")]
    DistanceOverflow { a: String, b: String },

    #[error("no distance recorded between `{a}` and `{b}`")]
    MissingDistance { a: String, b: String },

    #[error(transparent)]
    Indentation(#[from] IndentJump),

    #[error(transparent)]
    IndentCharacter(#[from] IndentChar),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<DescentError>,
    },
}

impl DescentError {
    /// Attach the 1-based input line the error was raised for.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Indentation(_) | Self::IndentCharacter(_) | Self::AtLine { .. } => self,
            other => Self::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any line annotation stripped.
    pub fn kind(&self) -> &DescentError {
        match self {
            Self::AtLine { source, .. } => source.kind(),
            other => other,
        }
    }
}

/// Result type for descent operations.
pub type DescentResult<T> = Result<T, DescentError>;

//! Phylogeny error types.
//!
//! Covers malformed tree input (indentation jumps, duplicate or reserved
//! ids, dangling contacts) and lookups of languages that are not part of
//! the tree.

use thiserror::Error;

/// A line is indented more than one level deeper than the line before it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: indentation jumps from depth {previous} to depth {depth}")]
pub struct IndentJump {
    /// 1-based line number of the offending line.
    pub line: usize,
    /// Depth of the offending line.
    pub depth: usize,
    /// Depth of the previous non-blank line (`-1` before the first line).
    pub previous: isize,
}

/// A line is indented with something other than spaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: indentation must use spaces only, found {found:?}")]
pub struct IndentChar {
    /// 1-based line number of the offending line.
    pub line: usize,
    /// First non-space character in the indentation.
    pub found: char,
}

/// Errors raised while building or querying a [`Phylogeny`](crate::Phylogeny).
#[derive(Debug, Error)]
pub enum PhylogenyError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("duplicate language: {0}")]
    DuplicateLanguage(String),

    #[error("language id `{0}` is reserved for the tree root")]
    ReservedId(String),

    #[error("empty language id")]
    EmptyId,

    #[error("language `{0}` cannot influence itself")]
    SelfInfluence(String),

    #[error(transparent)]
    Indentation(#[from] IndentJump),

    #[error(transparent)]
    IndentCharacter(#[from] IndentChar),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<PhylogenyError>,
    },
}

impl PhylogenyError {
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
    pub fn kind(&self) -> &PhylogenyError {
        match self {
            Self::AtLine { source, .. } => source.kind(),
            other => other,
        }
    }
}

/// Result type for phylogeny operations.
pub type PhylogenyResult<T> = Result<T, PhylogenyError>;

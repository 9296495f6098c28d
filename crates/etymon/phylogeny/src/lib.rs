//! # etymon-phylogeny
//!
//! Language-family tree annotated with directed contact edges.
//!
//! ```text
//!            ROOT
//!           /    \
//!          A      E        A, E: top-level families
//!         / \     |
//!        B   D    F ─ ─ ┐  contact edge F → C
//!        |              ┊
//!        C  ◀─ ─ ─ ─ ─ ─┘
//! ```
//!
//! - [`PhylogenyParser`] reads the indented tree file
//! - [`Phylogeny`] answers parent, children, path, influence, distance
//!   and LCA queries
//! - [`indent`] holds the indentation-stack discipline shared with the
//!   descent-file parser

#![deny(unsafe_code)]

pub mod error;
pub mod indent;
pub mod parser;
pub mod phylogeny;
pub mod types;

pub use error::{IndentChar, IndentJump, PhylogenyError, PhylogenyResult};
pub use parser::{parse_phylogeny, PhylogenyParser};
pub use phylogeny::Phylogeny;
pub use types::{LanguageId, LanguageNode, TreeSyntax};

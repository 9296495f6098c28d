//! # etymon-descent
//!
//! Word-form descent trees and pairwise form distances.
//!
//! ```text
//!   ROOT ──8── p1 ──1── w1 ──1── w3
//!               │
//!               └─0── w2          (borrowed)
//!
//!   dist(w2, w3) = (8 - 8) + (10 - 8) = 2
//! ```
//!
//! - [`DescentParser`] reads the indented descent file
//! - [`DescentTree`] keeps every form with its source, root distance,
//!   attestation flag and concept anchor (peg)
//! - [`DistanceTable`] resolves the distance of every form pair
//! - [`SimilarityModel`] maps distances to expected similarities

#![deny(unsafe_code)]

pub mod distance;
pub mod error;
pub mod parser;
pub mod tree;
pub mod types;

pub use distance::{DistanceTable, SimilarityModel};
pub use error::{DescentError, DescentResult};
pub use parser::{parse_descent, DescentParser};
pub use tree::DescentTree;
pub use types::{DescentConfig, EdgeKind, FormId, LanguageDerivation, Source, WordForm};

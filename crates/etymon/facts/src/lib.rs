//! # etymon-facts
//!
//! Ground-fact generation for the etymological inference rule set.
//!
//! ```text
//!   Phylogeny ──┐
//!               ├──▶ FactGenerator ──▶ FactSet ──▶ forward() ──▶ InferenceBackend
//!   DescentTree ┤        (steps)         (dedup)     (once)        Recording / JsonLines
//!   Distances ──┘
//! ```
//!
//! The generator emits, in order: climbed family edges (`Xinh` between languages),
//! unknown-origin targets (`Eunk`), borrowing and inheritance candidates
//! (`Xloa`/`Eloa`, `Xinh`/`Einh`), tree distances and their ordering
//! (`Xdst`, `Xsth`), phonetic similarities (`Fsim`), homologue-set
//! membership (`Fhom`) and one hidden control atom per form.

#![deny(unsafe_code)]

pub mod atom;
pub mod backend;
pub mod error;
pub mod family;
pub mod generator;

pub use atom::{Atom, FactSet, Predicate, Role};
pub use backend::{
    forward, BackendCall, ForwardStats, InferenceBackend, JsonLinesBackend, RecordingBackend,
};
pub use error::{FactError, FactResult};
pub use family::{extend_across_families, partition_by_family, ClimbedEdge};
pub use generator::{FactGenerator, GeneratorConfig};

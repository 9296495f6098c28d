//! Inference-backend boundary.
//!
//! A [`FactSet`] is handed to a backend exactly once through [`forward`];
//! the set is consumed, so the same facts cannot be sent twice.

use crate::atom::{FactSet, Predicate, Role};
use crate::error::FactResult;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::debug;

/// Fact-recording interface of an inference engine.
pub trait InferenceBackend {
    fn add_observation(&mut self, predicate: Predicate, value: f64, args: &[String]) -> FactResult<()>;

    fn add_target(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()>;

    /// Exclude an already added atom from re-inference.
    fn add_fixed_atom(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()>;

    /// Exclude an already added atom from result display.
    fn add_hidden_atom(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()>;

    /// Called once after the last atom.
    fn finish(&mut self) -> FactResult<()> {
        Ok(())
    }
}

/// What [`forward`] sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardStats {
    pub observations: usize,
    pub targets: usize,
    pub fixed: usize,
    pub hidden: usize,
}

/// Send every atom of `facts` to `backend`, then call `finish`.
///
/// Each atom is added first; its fixed and hidden markers follow directly.
pub fn forward<B>(facts: FactSet, backend: &mut B) -> FactResult<ForwardStats>
where
    B: InferenceBackend + ?Sized,
{
    let mut stats = ForwardStats::default();
    for atom in facts {
        match atom.role {
            Role::Observation { value } => {
                backend.add_observation(atom.predicate, value, &atom.args)?;
                stats.observations += 1;
            }
            Role::Target => {
                backend.add_target(atom.predicate, &atom.args)?;
                stats.targets += 1;
            }
        }
        if atom.fixed {
            backend.add_fixed_atom(atom.predicate, &atom.args)?;
            stats.fixed += 1;
        }
        if atom.hidden {
            backend.add_hidden_atom(atom.predicate, &atom.args)?;
            stats.hidden += 1;
        }
    }
    backend.finish()?;
    debug!(
        observations = stats.observations,
        targets = stats.targets,
        fixed = stats.fixed,
        hidden = stats.hidden,
        "Forwarded facts to backend"
    );
    Ok(stats)
}

// ── Adapters ─────────────────────────────────────────────────────────

/// One call made against a backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum BackendCall {
    Observation {
        predicate: Predicate,
        args: Vec<String>,
        value: f64,
    },
    Target {
        predicate: Predicate,
        args: Vec<String>,
    },
    Fixed {
        predicate: Predicate,
        args: Vec<String>,
    },
    Hidden {
        predicate: Predicate,
        args: Vec<String>,
    },
}

/// In-memory backend that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    finished: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Value of the observation `predicate(args)`, if one was recorded.
    pub fn observation(&self, predicate: Predicate, args: &[&str]) -> Option<f64> {
        self.calls.iter().find_map(|call| match call {
            BackendCall::Observation {
                predicate: p,
                args: a,
                value,
            } if *p == predicate && a == args => Some(*value),
            _ => None,
        })
    }

    pub fn has_target(&self, predicate: Predicate, args: &[&str]) -> bool {
        self.calls.iter().any(|call| {
            matches!(call, BackendCall::Target { predicate: p, args: a } if *p == predicate && a == args)
        })
    }

    pub fn is_fixed(&self, predicate: Predicate, args: &[&str]) -> bool {
        self.calls.iter().any(|call| {
            matches!(call, BackendCall::Fixed { predicate: p, args: a } if *p == predicate && a == args)
        })
    }

    pub fn is_hidden(&self, predicate: Predicate, args: &[&str]) -> bool {
        self.calls.iter().any(|call| {
            matches!(call, BackendCall::Hidden { predicate: p, args: a } if *p == predicate && a == args)
        })
    }
}

impl InferenceBackend for RecordingBackend {
    fn add_observation(&mut self, predicate: Predicate, value: f64, args: &[String]) -> FactResult<()> {
        self.calls.push(BackendCall::Observation {
            predicate,
            args: args.to_vec(),
            value,
        });
        Ok(())
    }

    fn add_target(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()> {
        self.calls.push(BackendCall::Target {
            predicate,
            args: args.to_vec(),
        });
        Ok(())
    }

    fn add_fixed_atom(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()> {
        self.calls.push(BackendCall::Fixed {
            predicate,
            args: args.to_vec(),
        });
        Ok(())
    }

    fn add_hidden_atom(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()> {
        self.calls.push(BackendCall::Hidden {
            predicate,
            args: args.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self) -> FactResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes one JSON object per call, newline-delimited.
pub struct JsonLinesBackend<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> JsonLinesBackend<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_call(&mut self, call: &BackendCall) -> FactResult<()> {
        serde_json::to_writer(&mut self.writer, call)?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }
}

impl<W: Write> InferenceBackend for JsonLinesBackend<W> {
    fn add_observation(&mut self, predicate: Predicate, value: f64, args: &[String]) -> FactResult<()> {
        self.write_call(&BackendCall::Observation {
            predicate,
            args: args.to_vec(),
            value,
        })
    }

    fn add_target(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()> {
        self.write_call(&BackendCall::Target {
            predicate,
            args: args.to_vec(),
        })
    }

    fn add_fixed_atom(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()> {
        self.write_call(&BackendCall::Fixed {
            predicate,
            args: args.to_vec(),
        })
    }

    fn add_hidden_atom(&mut self, predicate: Predicate, args: &[String]) -> FactResult<()> {
        self.write_call(&BackendCall::Hidden {
            predicate,
            args: args.to_vec(),
        })
    }

    fn finish(&mut self) -> FactResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

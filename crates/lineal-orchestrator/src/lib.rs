//! Lineal Orchestration Layer
//!
//! Drives the two workflow modes over the lineage graph:
//!
//! - **Sequential**: analysis -> plan -> execution, each phase gated on the
//!   previous phase's signature
//! - **Parallel**: analysis -> two competing plans -> contradiction check ->
//!   conditional synthesis
//!
//! The orchestrator exclusively owns its `LineageGraph` for the duration of
//! one problem-processing run; registered signatures are shared-read
//! afterwards through the graph export.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod contradiction;
pub mod error;
pub mod orchestrator;
pub mod roles;
pub mod synthesis;

pub use config::{ForkSpec, OrchestratorConfig};
pub use contradiction::ContradictionEvaluator;
pub use error::OrchestratorError;
pub use orchestrator::{Orchestrator, RunOutcome};
pub use synthesis::Synthesizer;

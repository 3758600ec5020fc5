//! Lineal Domain Layer
//!
//! Core data model for the thought-lineage system. Defines the fundamental
//! concepts and the trait interface to the external reasoning service; all
//! infrastructure implementations live in other crates.
//!
//! ## Key Concepts
//!
//! - **Signature**: one recorded reasoning event with provenance and confidence
//! - **Category**: why a signature exists (analysis, decision, evaluation, synthesis)
//! - **ReasoningPayload**: the structured output of one reasoning-service call
//! - **ContradictionVerdict**: a structured judgment of how two signatures conflict
//!
//! Signatures are immutable once created; derivation creates new signatures
//! linked through `parent_ids`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod payload;
pub mod signature;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use payload::{ArbitrationRationale, ReasoningPayload};
pub use signature::{
    AlternativePath, Category, ReasoningStep, Signature, SignatureId, SignatureSummary,
};
pub use traits::ReasoningProvider;
pub use verdict::{ContradictionCategory, ContradictionVerdict};

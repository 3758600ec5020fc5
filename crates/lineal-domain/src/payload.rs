//! Structured reasoning-service output shapes

use crate::signature::{AlternativePath, ReasoningStep};
use serde::{Deserialize, Serialize};

/// The structured output of one reasoning-service call
///
/// This is the validated form of the service's JSON response; the service
/// boundary rejects anything that cannot be parsed into this shape. The core
/// does not validate payload content beyond its shape - a zero-step chain or
/// an out-of-range confidence is legal here and is stored as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningPayload {
    /// Ordered reasoning chain
    pub steps: Vec<ReasoningStep>,
    /// Final recommendation
    pub conclusion: String,
    /// Overall confidence as reported by the service
    pub confidence: f64,
    /// Approaches considered and rejected
    pub alternatives: Vec<AlternativePath>,
}

/// Judicial record attached to a synthesis payload
///
/// Captures which side's assumption was downweighted and what unified
/// assumption replaced it. Free text from the service; never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrationRationale {
    /// Which assumption was downweighted and why
    pub deprioritized_assumption: String,
    /// The new unified assumption created to satisfy both sides
    pub hybrid_assumption: String,
    /// Reasoning behind the synthesized confidence score
    pub confidence_justification: String,
    /// How risks from both paths were addressed
    pub risk_resolution: String,
}

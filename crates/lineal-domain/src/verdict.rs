//! Contradiction verdict - structured judgment of how two signatures conflict

use crate::signature::SignatureId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of conflict was found between two signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContradictionCategory {
    /// Conflicting final recommendations
    Conclusion,
    /// Incompatible underlying assumptions
    Assumption,
    /// Same data, conflicting readings of it
    Evidence,
    /// Divergent interpretation of the problem
    Interpretation,
    /// No conflict found
    None,
    /// Evaluation itself failed; verdict is degraded
    Error,
}

impl fmt::Display for ContradictionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContradictionCategory::Conclusion => "conclusion",
            ContradictionCategory::Assumption => "assumption",
            ContradictionCategory::Evidence => "evidence",
            ContradictionCategory::Interpretation => "interpretation",
            ContradictionCategory::None => "none",
            ContradictionCategory::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Structured judgment of whether and how two signatures conflict
///
/// Ephemeral: consumed by the orchestrator to decide whether synthesis runs,
/// never stored as a node in the lineage graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionVerdict {
    /// Whether a conflict was found
    pub has_contradiction: bool,
    /// Kind of conflict
    pub category: ContradictionCategory,
    /// How serious the conflict is, in [0.0, 1.0]
    pub severity: f64,
    /// Explanation of the core conflict
    pub root_cause: String,
    /// Core assumption attributed to the first signature
    pub assumption_a: String,
    /// Core assumption attributed to the second signature
    pub assumption_b: String,
    /// The fundamental trade-off the two sides disagree on
    pub fundamental_tradeoff: String,
    /// How the conflict might be reconciled
    pub resolution_hint: String,
    /// The pair of signature ids that were compared, in comparison order
    pub compared: (SignatureId, SignatureId),
}

impl ContradictionVerdict {
    /// Degraded verdict emitted when contradiction evaluation itself fails.
    ///
    /// A failed comparison must never abort the surrounding run, so this
    /// reports "no contradiction" with the failure recorded as the root cause.
    pub fn degraded(a: SignatureId, b: SignatureId, reason: impl Into<String>) -> Self {
        Self {
            has_contradiction: false,
            category: ContradictionCategory::Error,
            severity: 0.0,
            root_cause: format!("Detection failed: {}", reason.into()),
            assumption_a: String::new(),
            assumption_b: String::new(),
            fundamental_tradeoff: String::new(),
            resolution_hint: "Manual review required".to_string(),
            compared: (a, b),
        }
    }
}

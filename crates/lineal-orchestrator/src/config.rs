//! Orchestrator configuration and policy constants

/// Policy constants for workflow decisions
///
/// These are tunable policy, not derived values.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// A contradiction triggers synthesis only above this severity
    pub severity_threshold: f64,

    /// Confidence multiplier applied by the synthesis fallback
    pub fallback_penalty: f64,

    /// How many leading reasoning steps go into comparison prompts
    pub step_preview_limit: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            severity_threshold: 0.5,
            fallback_penalty: 0.9,
            step_preview_limit: 3,
        }
    }
}

/// The two competing branches of a parallel run
///
/// The two plan requests share the analysis parent but carry disjoint,
/// intentionally competing constraint sets so the branches diverge rather
/// than negotiate agreement.
#[derive(Debug, Clone)]
pub struct ForkSpec {
    /// Origin label for the first branch
    pub origin_a: String,
    /// Constraints biasing the first branch
    pub constraints_a: Vec<String>,
    /// Origin label for the second branch
    pub origin_b: String,
    /// Constraints biasing the second branch
    pub constraints_b: Vec<String>,
}

impl Default for ForkSpec {
    fn default() -> Self {
        Self {
            origin_a: "planner-growth-focus".to_string(),
            constraints_a: vec![
                "Maximize growth".to_string(),
                "Build user base".to_string(),
                "Compete aggressively".to_string(),
            ],
            origin_b: "planner-revenue-focus".to_string(),
            constraints_b: vec![
                "Maximize revenue".to_string(),
                "Premium positioning".to_string(),
                "Target enterprise".to_string(),
            ],
        }
    }
}

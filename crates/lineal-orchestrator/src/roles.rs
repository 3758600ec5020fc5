//! Role definitions for the fixed workflow phases

use lineal_llm::RoleSpec;

/// Origin tag for signatures produced by the synthesizer
pub const SYNTHESIS_ORIGIN: &str = "synthesizer-orchestrator";

/// Problem decomposition role (phase 1)
pub fn analyzer() -> RoleSpec {
    RoleSpec::new(
        "analyzer-agent",
        "Problem Decomposition Specialist - breaks complex problems into \
         manageable sub-components and identifies key factors",
    )
}

/// Strategic planning role (phase 2)
pub fn planner() -> RoleSpec {
    RoleSpec::new(
        "planner-agent",
        "Strategic Planning Specialist - creates actionable plans with \
         timing, sequencing, and resource allocation",
    )
}

/// Planning role under a branch-specific origin, used by parallel forks
pub fn planner_as(origin: impl Into<String>) -> RoleSpec {
    RoleSpec::new(
        origin,
        "Strategic Planning Specialist - creates actionable plans with \
         timing, sequencing, and resource allocation",
    )
}

/// Execution role (phase 3)
pub fn executor() -> RoleSpec {
    RoleSpec::new(
        "executor-agent",
        "Execution Specialist - transforms strategic plans into concrete \
         implementation steps with measurable outcomes",
    )
}

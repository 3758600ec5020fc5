//! End-to-end workflow tests against the mock provider

use lineal_orchestrator::{ForkSpec, Orchestrator, OrchestratorError};
use lineal_llm::{MockProvider, ServiceError};

fn payload_json(conclusion: &str, confidence: f64) -> String {
    format!(
        r#"{{
            "reasoning_chain": [
                {{"step": 1, "thought": "reasoning for {conclusion}", "confidence": 0.9, "evidence": ["observed fact"]}}
            ],
            "conclusion": "{conclusion}",
            "confidence_score": {confidence}
        }}"#
    )
}

fn verdict_json(has_contradiction: bool, severity: f64) -> String {
    format!(
        r#"{{
            "has_contradiction": {has_contradiction},
            "contradiction_type": "conclusion",
            "severity": {severity},
            "root_cause": "opposed pricing positions",
            "assumption_a": "users first",
            "assumption_b": "margin first",
            "fundamental_tradeoff": "growth vs margin",
            "resolution_suggestion": "tiered pricing"
        }}"#
    )
}

/// Mock scripted per phase: role prompts are distinguished by their origin
/// line, comparison prompts by their fixed header, arbitration prompts by
/// the CHIEF JUSTICE framing.
fn sequential_provider() -> MockProvider {
    let mut provider = MockProvider::new("unused");
    provider.add_contains_response("You are analyzer-agent", payload_json("analysis done", 0.8));
    provider.add_contains_response("You are planner-agent", payload_json("plan ready", 0.85));
    provider.add_contains_response("You are executor-agent", payload_json("execute in 3 steps", 0.9));
    provider
}

fn parallel_provider(verdict: String) -> MockProvider {
    let mut provider = MockProvider::new("unused");
    provider.add_contains_response("You are analyzer-agent", payload_json("analysis done", 0.8));
    provider.add_contains_response("You are planner-growth-focus", payload_json("free tier", 0.7));
    provider.add_contains_response("You are planner-revenue-focus", payload_json("premium only", 0.9));
    provider.add_contains_response("Analyze these two reasoning chains", verdict);
    provider.add_contains_response("CHIEF JUSTICE", {
        let mut synthesis = payload_json("tiered pricing", 0.82);
        synthesis.insert_str(synthesis.rfind('}').unwrap(), r#",
            "arbitration_log": {
                "deprioritized_assumption": "pure growth",
                "hybrid_assumption": "growth within a margin floor",
                "confidence_justification": "balanced",
                "risk_resolution": "price floor"
            }"#);
        synthesis
    });
    provider
}

#[test]
fn sequential_run_builds_three_signature_chain() {
    let mut orchestrator = Orchestrator::new(sequential_provider());
    let outcome = orchestrator
        .run_sequential("Choose the pricing strategy", vec!["Launch this quarter".to_string()])
        .unwrap();

    assert_eq!(outcome.signatures.len(), 3);
    let [s1, s2, s3] = &outcome.signatures[..] else {
        panic!("expected exactly three signatures");
    };

    // Parent chain S1 <- S2 <- S3
    assert!(s1.parent_ids.is_empty());
    assert_eq!(s2.parent_ids, vec![s1.id]);
    assert_eq!(s3.parent_ids, vec![s2.id]);

    assert_eq!(outcome.final_conclusion, s3.conclusion);
    assert_eq!(outcome.final_conclusion, "execute in 3 steps");
    assert!(outcome.contradiction.is_none());

    // The graph export mirrors the run
    assert_eq!(outcome.graph.nodes.len(), 3);
    assert_eq!(outcome.graph.edges.len(), 2);

    // The executor saw the rewritten problem
    assert_eq!(
        s3.inputs["problem"],
        "Create concrete execution steps for: Choose the pricing strategy"
    );
}

#[test]
fn sequential_phase_failure_aborts_the_run() {
    let mut provider = sequential_provider();
    provider.add_contains_error("You are planner-agent");
    let mut orchestrator = Orchestrator::new(provider);

    let result = orchestrator.run_sequential("problem", vec![]);
    assert!(matches!(
        result.unwrap_err(),
        OrchestratorError::Service(ServiceError::Unavailable(_))
    ));

    // Only the completed analysis phase was registered; the failed phase
    // left nothing behind.
    assert_eq!(orchestrator.graph().len(), 1);
}

#[test]
fn sequential_malformed_payload_aborts_the_run() {
    let mut provider = sequential_provider();
    provider.add_contains_response("You are executor-agent", "not json".to_string());
    let mut orchestrator = Orchestrator::new(provider);

    let result = orchestrator.run_sequential("problem", vec![]);
    assert!(matches!(
        result.unwrap_err(),
        OrchestratorError::Service(ServiceError::MalformedResponse(_))
    ));
    assert_eq!(orchestrator.graph().len(), 2);
}

#[test]
fn parallel_run_with_severe_contradiction_synthesizes() {
    let mut orchestrator = Orchestrator::new(parallel_provider(verdict_json(true, 0.8)));
    let outcome = orchestrator
        .run_parallel("Choose the pricing strategy", ForkSpec::default())
        .unwrap();

    assert_eq!(outcome.signatures.len(), 4);
    let [s1, sa, sb, sc] = &outcome.signatures[..] else {
        panic!("expected exactly four signatures");
    };

    // Both forks hang off the analysis, independently
    assert_eq!(sa.parent_ids, vec![s1.id]);
    assert_eq!(sb.parent_ids, vec![s1.id]);

    // The synthesis joins the two branches, in branch order
    assert_eq!(sc.parent_ids, vec![sa.id, sb.id]);
    assert_eq!(outcome.final_conclusion, sc.conclusion);
    assert_eq!(outcome.final_conclusion, "tiered pricing");

    let verdict = outcome.contradiction.expect("verdict should be reported");
    assert_eq!(verdict.severity, 0.8);
    assert_eq!(verdict.compared, (sa.id, sb.id));

    assert_eq!(outcome.graph.nodes.len(), 4);
    assert_eq!(outcome.graph.edges.len(), 4);
}

#[test]
fn parallel_run_below_threshold_skips_synthesis() {
    let mut orchestrator = Orchestrator::new(parallel_provider(verdict_json(true, 0.3)));
    let outcome = orchestrator
        .run_parallel("Choose the pricing strategy", ForkSpec::default())
        .unwrap();

    assert_eq!(outcome.signatures.len(), 3);
    // First branch wins by fixed tie-break when no synthesis runs.
    assert_eq!(outcome.final_conclusion, "free tier");
    assert!(outcome.contradiction.is_some());
    assert_eq!(outcome.graph.nodes.len(), 3);
}

#[test]
fn parallel_run_without_contradiction_reports_none() {
    let mut orchestrator = Orchestrator::new(parallel_provider(verdict_json(false, 0.0)));
    let outcome = orchestrator
        .run_parallel("Choose the pricing strategy", ForkSpec::default())
        .unwrap();

    assert_eq!(outcome.signatures.len(), 3);
    assert!(outcome.contradiction.is_none());
    assert_eq!(outcome.final_conclusion, "free tier");
}

#[test]
fn parallel_run_survives_evaluator_failure() {
    let mut provider = parallel_provider(String::new());
    provider.add_contains_error("Analyze these two reasoning chains");
    let mut orchestrator = Orchestrator::new(provider);

    // A failed comparison must not prevent returning the two valid plans.
    let outcome = orchestrator
        .run_parallel("Choose the pricing strategy", ForkSpec::default())
        .unwrap();

    assert_eq!(outcome.signatures.len(), 3);
    assert!(outcome.contradiction.is_none());
    assert_eq!(outcome.final_conclusion, "free tier");
}

#[test]
fn parallel_run_synthesis_failure_falls_back() {
    let mut provider = parallel_provider(verdict_json(true, 0.8));
    provider.add_contains_error("CHIEF JUSTICE");
    let mut orchestrator = Orchestrator::new(provider);

    let outcome = orchestrator
        .run_parallel("Choose the pricing strategy", ForkSpec::default())
        .unwrap();

    assert_eq!(outcome.signatures.len(), 4);
    let synthesis = &outcome.signatures[3];

    // Plan B carried confidence 0.9 > plan A's 0.7: its conclusion wins and
    // the penalty factor applies.
    assert_eq!(synthesis.conclusion, "premium only");
    assert!((synthesis.confidence - 0.9 * 0.9).abs() < 1e-9);
    assert_eq!(outcome.final_conclusion, "premium only");
}

#[test]
fn parallel_forks_do_not_observe_each_other() {
    // Tripwire for prompt leakage: any later prompt that quotes the first
    // fork's conclusion gets a scrambled response. The second fork's prompt
    // must contain only the problem, the shared analysis prior, and its own
    // constraints, so its scripted payload still parses.
    let mut provider = parallel_provider(verdict_json(false, 0.0));
    provider.add_contains_response("free tier", "scrambled".to_string());
    let mut orchestrator = Orchestrator::new(provider);

    let outcome = orchestrator
        .run_parallel("Choose the pricing strategy", ForkSpec::default())
        .unwrap();

    assert_eq!(outcome.signatures.len(), 3);
    assert_eq!(outcome.signatures[1].conclusion, "free tier");
    assert_eq!(outcome.signatures[2].conclusion, "premium only");

    // The comparison prompt legitimately quotes both plans, so its response
    // was scrambled and evaluation degraded; that is absorbed, not fatal.
    assert!(outcome.contradiction.is_none());
}

#[test]
fn repeated_runs_accumulate_in_the_shared_graph() {
    let mut orchestrator = Orchestrator::new(sequential_provider());
    let first = orchestrator.run_sequential("problem one", vec![]).unwrap();
    let second = orchestrator.run_sequential("problem two", vec![]).unwrap();

    // Each outcome reports only its own run's signatures, but the graph
    // export keeps everything registered on this instance.
    assert_eq!(first.signatures.len(), 3);
    assert_eq!(second.signatures.len(), 3);
    assert_eq!(first.graph.nodes.len(), 3);
    assert_eq!(second.graph.nodes.len(), 6);
    assert_eq!(orchestrator.graph().len(), 6);

    // The second run's chain is rooted fresh, not grafted onto the first.
    assert!(second.signatures[0].parent_ids.is_empty());
}

#[test]
fn parallel_fork_failure_is_fatal() {
    let mut provider = parallel_provider(verdict_json(true, 0.8));
    provider.add_contains_error("You are planner-revenue-focus");
    let mut orchestrator = Orchestrator::new(provider);

    let result = orchestrator.run_parallel("problem", ForkSpec::default());
    assert!(result.is_err());
    // Analysis and the first fork registered; the failed fork left nothing.
    assert_eq!(orchestrator.graph().len(), 2);
}

#[test]
fn run_outcome_serializes_for_the_api_surface() {
    let mut orchestrator = Orchestrator::new(sequential_provider());
    let outcome = orchestrator.run_sequential("problem", vec![]).unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["mode"], "sequential");
    assert_eq!(json["final_conclusion"], "execute in 3 steps");
    assert_eq!(json["graph"]["nodes"].as_array().unwrap().len(), 3);
}

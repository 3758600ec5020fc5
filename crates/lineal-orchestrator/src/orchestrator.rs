//! The orchestrator - sequencing of reasoning phases over the lineage graph

use crate::config::{ForkSpec, OrchestratorConfig};
use crate::contradiction::ContradictionEvaluator;
use crate::error::OrchestratorError;
use crate::roles;
use crate::synthesis::Synthesizer;
use lineal_domain::{Category, ContradictionVerdict, ReasoningProvider, Signature};
use lineal_graph::{GraphExport, LineageGraph};
use lineal_llm::{ReasoningClient, ReasoningRequest, RoleSpec, ServiceError};
use serde::Serialize;
use tracing::info;

/// Which workflow produced a run outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// analysis -> plan -> execution
    Sequential,
    /// analysis -> two competing plans -> contradiction check -> synthesis
    Parallel,
}

/// Result of one problem-processing run
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// The problem that was processed
    pub problem: String,
    /// Workflow mode
    pub mode: RunMode,
    /// All signatures produced, in creation order
    pub signatures: Vec<Signature>,
    /// The contradiction verdict, when the parallel workflow found one
    pub contradiction: Option<ContradictionVerdict>,
    /// The overall answer
    pub final_conclusion: String,
    /// Visualization-ready projection of the whole graph
    pub graph: GraphExport,
}

/// Coordinates role-specific reasoning requests and manages lineage
///
/// Exclusively owns its `LineageGraph`. The graph is append-only and shared
/// across runs: calling a run method again on the same instance registers
/// the new signatures alongside the earlier ones, and `RunOutcome.graph`
/// exports everything registered so far while `RunOutcome.signatures` holds
/// only the current run's. There is no ambient global state: everything
/// flows through this context object.
pub struct Orchestrator<P> {
    graph: LineageGraph,
    client: ReasoningClient<P>,
    config: OrchestratorConfig,
}

impl<P> Orchestrator<P>
where
    P: ReasoningProvider,
    P::Error: Into<ServiceError>,
{
    /// Create an orchestrator over the given provider with default policy
    pub fn new(provider: P) -> Self {
        Self {
            graph: LineageGraph::new(),
            client: ReasoningClient::new(provider),
            config: OrchestratorConfig::default(),
        }
    }

    /// Override the policy constants
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// The lineage graph accumulated so far
    pub fn graph(&self) -> &LineageGraph {
        &self.graph
    }

    /// Process a problem through the sequential workflow
    ///
    /// Three ordered phases, each gated on the previous phase's signature:
    /// analysis (no parents), plan (parent = analysis), execution (parent =
    /// plan, problem rewritten to ask for concrete execution steps). If any
    /// phase fails the whole run fails and no partial result is returned.
    /// Signatures from earlier runs on this instance stay in the graph and
    /// appear in the outcome's export.
    pub fn run_sequential(
        &mut self,
        problem: &str,
        constraints: Vec<String>,
    ) -> Result<RunOutcome, OrchestratorError> {
        info!(problem = %truncate(problem, 100), "Processing problem (sequential)");

        info!("Phase 1: analysis");
        let analysis = self.phase(
            roles::analyzer(),
            problem,
            &[],
            constraints.clone(),
            Category::Analysis,
        )?;

        info!("Phase 2: planning");
        let plan = self.phase(
            roles::planner(),
            problem,
            &[&analysis],
            constraints.clone(),
            Category::Decision,
        )?;

        info!("Phase 3: execution planning");
        let execution_problem = format!("Create concrete execution steps for: {}", problem);
        let execution = self.phase(
            roles::executor(),
            &execution_problem,
            &[&plan],
            constraints,
            Category::Evaluation,
        )?;

        let final_conclusion = execution.conclusion.clone();
        Ok(RunOutcome {
            problem: problem.to_string(),
            mode: RunMode::Sequential,
            signatures: vec![analysis, plan, execution],
            contradiction: None,
            final_conclusion,
            graph: self.graph.export(),
        })
    }

    /// Process a problem through the parallel workflow
    ///
    /// Analysis, then two independent plan requests sharing the analysis
    /// parent under the fork's competing constraint sets. Neither fork
    /// observes the other's output. The contradiction verdict then decides
    /// whether synthesis runs. Signatures from earlier runs on this instance
    /// stay in the graph and appear in the outcome's export.
    pub fn run_parallel(
        &mut self,
        problem: &str,
        fork: ForkSpec,
    ) -> Result<RunOutcome, OrchestratorError> {
        info!(problem = %truncate(problem, 100), "Processing problem (parallel)");

        info!("Phase 1: analysis");
        let analysis = self.phase(roles::analyzer(), problem, &[], vec![], Category::Analysis)?;

        info!("Phase 2: competing plans");
        let plan_a = self.phase(
            roles::planner_as(fork.origin_a),
            problem,
            &[&analysis],
            fork.constraints_a,
            Category::Decision,
        )?;
        let plan_b = self.phase(
            roles::planner_as(fork.origin_b),
            problem,
            &[&analysis],
            fork.constraints_b,
            Category::Decision,
        )?;

        info!("Phase 3: contradiction evaluation");
        let evaluator = ContradictionEvaluator::new(self.client.clone(), self.config.clone());
        let verdict = evaluator.detect(&plan_a, &plan_b);

        let mut signatures = vec![analysis, plan_a, plan_b];
        let synthesis = if verdict.has_contradiction
            && verdict.severity > self.config.severity_threshold
        {
            info!(severity = verdict.severity, "Phase 4: synthesis");
            let synthesizer = Synthesizer::new(self.client.clone(), self.config.clone());
            let synthesis = synthesizer.synthesize(&signatures[1], &signatures[2], &verdict);
            self.graph.register(synthesis.clone())?;
            signatures.push(synthesis.clone());
            Some(synthesis)
        } else {
            None
        };

        // When no synthesis ran the first branch wins: a fixed tie-break,
        // not a quality comparison.
        let final_conclusion = match &synthesis {
            Some(s) => s.conclusion.clone(),
            None => signatures[1].conclusion.clone(),
        };

        Ok(RunOutcome {
            problem: problem.to_string(),
            mode: RunMode::Parallel,
            signatures,
            contradiction: verdict.has_contradiction.then_some(verdict),
            final_conclusion,
            graph: self.graph.export(),
        })
    }

    /// Issue one role-tagged reasoning request and register the result
    fn phase(
        &mut self,
        role: RoleSpec,
        problem: &str,
        priors: &[&Signature],
        constraints: Vec<String>,
        category: Category,
    ) -> Result<Signature, OrchestratorError> {
        let origin = role.origin.clone();
        let request = ReasoningRequest::new(role, problem)
            .with_priors(priors.iter().map(|s| s.summary()).collect())
            .with_constraints(constraints.clone());

        let payload = self.client.reason(&request)?;

        let signature = Signature::from_payload(
            origin,
            category,
            payload,
            priors.iter().map(|s| s.id).collect(),
            serde_json::json!({ "problem": problem }),
            constraints,
        );
        self.graph.register(signature.clone())?;
        info!(id = %signature.id, origin = %signature.origin, "Registered signature");
        Ok(signature)
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

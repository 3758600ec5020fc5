//! Prompt construction for each reasoning-request kind

use lineal_domain::{ContradictionVerdict, ReasoningStep, Signature, SignatureId, SignatureSummary};

/// The role a reasoning request is issued under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSpec {
    /// Role/agent label, recorded as the resulting signature's origin
    pub origin: String,
    /// What this role is biased toward
    pub description: String,
}

impl RoleSpec {
    /// Create a role spec
    pub fn new(origin: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            description: description.into(),
        }
    }
}

/// A structured reasoning request, ready to be rendered into a prompt
#[derive(Debug, Clone)]
pub struct ReasoningRequest {
    /// Role issuing the request
    pub role: RoleSpec,
    /// Problem or question to reason about
    pub problem: String,
    /// Prior signatures supplied as context
    pub priors: Vec<SignatureSummary>,
    /// Constraints to consider
    pub constraints: Vec<String>,
}

impl ReasoningRequest {
    /// Create a request with no priors and no constraints
    pub fn new(role: RoleSpec, problem: impl Into<String>) -> Self {
        Self {
            role,
            problem: problem.into(),
            priors: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Attach prior signature summaries as context
    pub fn with_priors(mut self, priors: Vec<SignatureSummary>) -> Self {
        self.priors = priors;
        self
    }

    /// Attach constraints
    pub fn with_constraints(mut self, constraints: Vec<String>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Render the full prompt for this request
    pub fn build_prompt(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "You are {}: {}\n\n",
            self.role.origin, self.role.description
        ));
        prompt.push_str(
            "CRITICAL: You are DEEPLY BIASED toward your domain expertise. \
             Defend your perspective aggressively.\n\
             Your recommendation should be NARROWLY OPTIMAL for your specific \
             domain, even if it creates conflicts with other perspectives.\n\n",
        );
        prompt.push_str("Analyze this problem and emit a structured thought signature.\n\n");
        prompt.push_str(&format!("PROBLEM: {}", self.problem));

        if !self.priors.is_empty() {
            prompt.push_str("\n\nPREVIOUS REASONING:\n");
            for (i, prior) in self.priors.iter().enumerate() {
                prompt.push_str(&format!("\nSignature {} (from {}):\n", i + 1, prior.origin));
                prompt.push_str(&format!("  Conclusion: {}\n", prior.conclusion));
                prompt.push_str(&format!("  Confidence: {}\n", prior.confidence));
            }
        }

        if !self.constraints.is_empty() {
            prompt.push_str("\n\nCONSTRAINTS:\n");
            for constraint in &self.constraints {
                prompt.push_str(&format!("- {}\n", constraint));
            }
        }

        prompt.push_str("\n\n");
        prompt.push_str(REASONING_OUTPUT_FORMAT);
        prompt
    }
}

/// Bounded view of a signature for comparison and arbitration prompts
///
/// Carries the conclusion, confidence, and a bounded prefix of the reasoning
/// chain so prompts stay small regardless of chain length.
#[derive(Debug, Clone)]
pub struct SignaturePreview {
    /// Id of the previewed signature
    pub id: SignatureId,
    /// Role/agent label
    pub origin: String,
    /// Final recommendation
    pub conclusion: String,
    /// Overall confidence
    pub confidence: f64,
    /// Total steps in the full chain
    pub total_steps: usize,
    /// Leading reasoning steps, up to the preview limit
    pub steps: Vec<ReasoningStep>,
}

impl SignaturePreview {
    /// Build a preview of a signature with at most `limit` leading steps
    pub fn of(signature: &Signature, limit: usize) -> Self {
        Self {
            id: signature.id,
            origin: signature.origin.clone(),
            conclusion: signature.conclusion.clone(),
            confidence: signature.confidence,
            total_steps: signature.reasoning_steps.len(),
            steps: signature.reasoning_steps.iter().take(limit).cloned().collect(),
        }
    }

    fn format_steps(&self) -> String {
        self.steps
            .iter()
            .map(|step| {
                let thought: String = step.thought.chars().take(150).collect();
                format!("  Step {}: {}...", step.step, thought)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render the comparison prompt for contradiction evaluation
pub fn contradiction_prompt(a: &SignaturePreview, b: &SignaturePreview) -> String {
    format!(
        "Analyze these two reasoning chains for logical contradictions.\n\n\
         SIGNATURE A (from {}):\n\
         Conclusion: {}\n\
         Confidence: {}\n\
         Reasoning Steps: {} steps\n\n\
         Key reasoning:\n{}\n\n\
         SIGNATURE B (from {}):\n\
         Conclusion: {}\n\
         Confidence: {}\n\
         Reasoning Steps: {} steps\n\n\
         Key reasoning:\n{}\n\n\
         Questions to analyze:\n\
         1. Do they reach conflicting conclusions?\n\
         2. Are their underlying assumptions incompatible?\n\
         3. Is there evidence conflict (same data, different interpretations)?\n\
         4. What's the root cause of any divergence?\n\n\
         {}",
        a.origin,
        a.conclusion,
        a.confidence,
        a.total_steps,
        a.format_steps(),
        b.origin,
        b.conclusion,
        b.confidence,
        b.total_steps,
        b.format_steps(),
        VERDICT_OUTPUT_FORMAT,
    )
}

/// Render the arbitration prompt for synthesis
pub fn synthesis_prompt(
    a: &SignaturePreview,
    b: &SignaturePreview,
    verdict: &ContradictionVerdict,
) -> String {
    format!(
        "You are the CHIEF JUSTICE presiding over a reasoning conflict. \
         Your role is to arbitrate and synthesize.\n\n\
         PATH 1 (from {}):\n\
         Core Assumption: {}\n\
         Conclusion: {}\n\
         Confidence: {}\n\n\
         PATH 2 (from {}):\n\
         Core Assumption: {}\n\
         Conclusion: {}\n\
         Confidence: {}\n\n\
         REASONING COLLISION DETECTED:\n\
         Type: {}\n\
         Severity: {}\n\
         Root Cause: {}\n\
         Fundamental Trade-off: {}\n\n\
         YOUR ARBITRATION MUST INCLUDE:\n\n\
         1. An arbitration log documenting which assumption you deprioritized \
         (and why), the new HYBRID ASSUMPTION you created to satisfy both \
         constraints, and the justification for the confidence score.\n\
         2. Synthesis logic that preserves the valid concerns from both paths, \
         resolves the logical incompatibility, and balances the fundamental \
         trade-off.\n\n\
         {}",
        a.origin,
        non_empty_or(&verdict.assumption_a, "Unknown"),
        a.conclusion,
        a.confidence,
        b.origin,
        non_empty_or(&verdict.assumption_b, "Unknown"),
        b.conclusion,
        b.confidence,
        verdict.category,
        verdict.severity,
        verdict.root_cause,
        non_empty_or(&verdict.fundamental_tradeoff, "Not specified"),
        SYNTHESIS_OUTPUT_FORMAT,
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

const REASONING_OUTPUT_FORMAT: &str = r#"Output ONLY valid JSON matching this exact schema:
{
  "reasoning_chain": [
    {
      "step": 1,
      "thought": "detailed reasoning text",
      "confidence": 0.85,
      "evidence": ["supporting fact 1", "supporting fact 2"]
    }
  ],
  "conclusion": "your final recommendation or decision",
  "confidence_score": 0.82,
  "alternative_paths": [
    {
      "reasoning": "alternative approach description",
      "why_rejected": "reason for not choosing this path",
      "confidence": 0.65
    }
  ]
}

Remember: Output ONLY the JSON, no additional text."#;

const VERDICT_OUTPUT_FORMAT: &str = r#"Output ONLY valid JSON:
{
  "has_contradiction": true,
  "contradiction_type": "conclusion|assumption|evidence|interpretation|none",
  "severity": 0.0,
  "root_cause": "explanation of the core conflict",
  "assumption_a": "core assumption behind signature A",
  "assumption_b": "core assumption behind signature B",
  "fundamental_tradeoff": "the trade-off the two sides disagree on",
  "resolution_suggestion": "how to reconcile these views"
}"#;

const SYNTHESIS_OUTPUT_FORMAT: &str = r#"Output ONLY valid JSON:
{
  "reasoning_chain": [
    {
      "step": 1,
      "thought": "synthesis reasoning",
      "confidence": 0.8,
      "evidence": ["supporting facts"]
    }
  ],
  "conclusion": "synthesized recommendation",
  "confidence_score": 0.8,
  "arbitration_log": {
    "deprioritized_assumption": "which assumption was downweighted and why",
    "hybrid_assumption": "the new unified assumption created",
    "confidence_justification": "reason for the confidence score",
    "risk_resolution": "how risks from both paths were addressed"
  },
  "alternative_paths": [
    {
      "reasoning": "original path approach",
      "why_rejected": "reason for not using it exclusively",
      "confidence": 0.7
    }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use lineal_domain::{Category, ContradictionCategory, ReasoningPayload, Signature};

    fn sig(origin: &str, steps: usize) -> Signature {
        Signature::from_payload(
            origin,
            Category::Decision,
            ReasoningPayload {
                steps: (1..=steps)
                    .map(|n| ReasoningStep {
                        step: n,
                        thought: format!("thought {}", n),
                        confidence: 0.8,
                        evidence: vec![],
                    })
                    .collect(),
                conclusion: "go left".to_string(),
                confidence: 0.8,
                alternatives: vec![],
            },
            vec![],
            serde_json::Value::Null,
            vec![],
        )
    }

    #[test]
    fn test_reasoning_prompt_includes_role_problem_and_constraints() {
        let request = ReasoningRequest::new(
            RoleSpec::new("planner-agent", "Strategic Planning Specialist"),
            "pick a pricing strategy",
        )
        .with_constraints(vec!["Maximize growth".to_string()]);

        let prompt = request.build_prompt();
        assert!(prompt.contains("planner-agent"));
        assert!(prompt.contains("PROBLEM: pick a pricing strategy"));
        assert!(prompt.contains("- Maximize growth"));
        assert!(prompt.contains("reasoning_chain"));
        assert!(!prompt.contains("PREVIOUS REASONING"));
    }

    #[test]
    fn test_reasoning_prompt_includes_priors() {
        let prior = sig("analyzer-agent", 1).summary();
        let request = ReasoningRequest::new(
            RoleSpec::new("planner-agent", "planner"),
            "problem",
        )
        .with_priors(vec![prior]);

        let prompt = request.build_prompt();
        assert!(prompt.contains("PREVIOUS REASONING"));
        assert!(prompt.contains("from analyzer-agent"));
        assert!(prompt.contains("Conclusion: go left"));
    }

    #[test]
    fn test_preview_bounds_steps() {
        let signature = sig("planner-agent", 5);
        let preview = SignaturePreview::of(&signature, 3);

        assert_eq!(preview.steps.len(), 3);
        assert_eq!(preview.total_steps, 5);
        assert_eq!(preview.steps[2].step, 3);
    }

    #[test]
    fn test_contradiction_prompt_shape() {
        let a = SignaturePreview::of(&sig("growth", 4), 3);
        let b = SignaturePreview::of(&sig("revenue", 2), 3);
        let prompt = contradiction_prompt(&a, &b);

        assert!(prompt.contains("SIGNATURE A (from growth)"));
        assert!(prompt.contains("SIGNATURE B (from revenue)"));
        assert!(prompt.contains("Reasoning Steps: 4 steps"));
        assert!(prompt.contains("has_contradiction"));
    }

    #[test]
    fn test_synthesis_prompt_carries_verdict_fields() {
        let sig_a = sig("growth", 1);
        let sig_b = sig("revenue", 1);
        let verdict = ContradictionVerdict {
            has_contradiction: true,
            category: ContradictionCategory::Assumption,
            severity: 0.8,
            root_cause: "price positioning".to_string(),
            assumption_a: "users first".to_string(),
            assumption_b: "margin first".to_string(),
            fundamental_tradeoff: "growth vs margin".to_string(),
            resolution_hint: "tiered pricing".to_string(),
            compared: (sig_a.id, sig_b.id),
        };

        let prompt = synthesis_prompt(
            &SignaturePreview::of(&sig_a, 3),
            &SignaturePreview::of(&sig_b, 3),
            &verdict,
        );
        assert!(prompt.contains("CHIEF JUSTICE"));
        assert!(prompt.contains("users first"));
        assert!(prompt.contains("growth vs margin"));
        assert!(prompt.contains("arbitration_log"));
    }
}

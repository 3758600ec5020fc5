//! Reasoning client - one call, one validated payload

use crate::parser::{parse_payload, parse_synthesis, parse_verdict};
use crate::prompt::{contradiction_prompt, synthesis_prompt, ReasoningRequest, SignaturePreview};
use crate::ServiceError;
use lineal_domain::{
    ArbitrationRationale, ContradictionVerdict, ReasoningPayload, ReasoningProvider,
};
use std::sync::Arc;
use tracing::debug;

/// Typed facade over a `ReasoningProvider`
///
/// Builds the prompt for each request kind, forwards it to the provider, and
/// strictly parses the response at the boundary. Cheap to clone; all clones
/// share the underlying provider.
#[derive(Debug)]
pub struct ReasoningClient<P> {
    provider: Arc<P>,
}

impl<P> Clone for ReasoningClient<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P> ReasoningClient<P>
where
    P: ReasoningProvider,
    P::Error: Into<ServiceError>,
{
    /// Create a client over the given provider
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Issue a role-tagged reasoning request and parse the payload
    pub fn reason(&self, request: &ReasoningRequest) -> Result<ReasoningPayload, ServiceError> {
        let prompt = request.build_prompt();
        debug!(
            role = %request.role.origin,
            prompt_len = prompt.len(),
            "Issuing reasoning request"
        );
        let response = self.call(&prompt)?;
        parse_payload(&response)
    }

    /// Issue a comparison request over two signature previews
    pub fn compare(
        &self,
        a: &SignaturePreview,
        b: &SignaturePreview,
    ) -> Result<ContradictionVerdict, ServiceError> {
        let prompt = contradiction_prompt(a, b);
        debug!(a = %a.id, b = %b.id, "Issuing contradiction request");
        let response = self.call(&prompt)?;
        parse_verdict(&response, a.id, b.id)
    }

    /// Issue an arbitration request over two conflicting previews
    pub fn arbitrate(
        &self,
        a: &SignaturePreview,
        b: &SignaturePreview,
        verdict: &ContradictionVerdict,
    ) -> Result<(ReasoningPayload, ArbitrationRationale), ServiceError> {
        let prompt = synthesis_prompt(a, b, verdict);
        debug!(a = %a.id, b = %b.id, severity = verdict.severity, "Issuing arbitration request");
        let response = self.call(&prompt)?;
        parse_synthesis(&response)
    }

    // Provider errors keep their own classification: a provider that already
    // reports a malformed response must not surface as unavailability.
    fn call(&self, prompt: &str) -> Result<String, ServiceError> {
        self.provider.generate(prompt).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::RoleSpec;
    use crate::MockProvider;
    use lineal_domain::{Category, Signature};

    const PAYLOAD_JSON: &str = r#"{
        "reasoning_chain": [{"step": 1, "thought": "t", "confidence": 0.9}],
        "conclusion": "ship it",
        "confidence_score": 0.9
    }"#;

    fn request() -> ReasoningRequest {
        ReasoningRequest::new(RoleSpec::new("analyzer-agent", "analyst"), "problem")
    }

    #[test]
    fn test_reason_parses_payload() {
        let client = ReasoningClient::new(MockProvider::new(PAYLOAD_JSON));
        let payload = client.reason(&request()).unwrap();
        assert_eq!(payload.conclusion, "ship it");
    }

    #[test]
    fn test_reason_maps_provider_failure_to_unavailable() {
        let mut provider = MockProvider::default();
        provider.add_contains_error("PROBLEM:");
        let client = ReasoningClient::new(provider);

        assert!(matches!(
            client.reason(&request()).unwrap_err(),
            ServiceError::Unavailable(_)
        ));
    }

    #[test]
    fn test_reason_keeps_provider_error_classification() {
        // A provider that rejects its own transport-level response (e.g. a
        // body with no candidates) already classifies the failure; the
        // client must not relabel it as unavailability.
        struct EmptyBodyProvider;
        impl lineal_domain::ReasoningProvider for EmptyBodyProvider {
            type Error = ServiceError;
            fn generate(&self, _prompt: &str) -> Result<String, ServiceError> {
                Err(ServiceError::MalformedResponse(
                    "Response contained no candidates".to_string(),
                ))
            }
        }

        let client = ReasoningClient::new(EmptyBodyProvider);
        assert!(matches!(
            client.reason(&request()).unwrap_err(),
            ServiceError::MalformedResponse(_)
        ));
    }

    #[test]
    fn test_reason_rejects_malformed_response() {
        let client = ReasoningClient::new(MockProvider::new("not json at all"));
        assert!(matches!(
            client.reason(&request()).unwrap_err(),
            ServiceError::MalformedResponse(_)
        ));
    }

    #[test]
    fn test_compare_carries_compared_ids() {
        let verdict_json = r#"{
            "has_contradiction": true,
            "contradiction_type": "conclusion",
            "severity": 0.7,
            "root_cause": "opposed conclusions"
        }"#;
        let client = ReasoningClient::new(MockProvider::new(verdict_json));

        let sig = |origin: &str| {
            Signature::from_payload(
                origin,
                Category::Decision,
                lineal_domain::ReasoningPayload {
                    steps: vec![],
                    conclusion: "c".to_string(),
                    confidence: 0.8,
                    alternatives: vec![],
                },
                vec![],
                serde_json::Value::Null,
                vec![],
            )
        };
        let a = sig("a");
        let b = sig("b");

        let verdict = client
            .compare(&SignaturePreview::of(&a, 3), &SignaturePreview::of(&b, 3))
            .unwrap();
        assert_eq!(verdict.compared, (a.id, b.id));
    }
}

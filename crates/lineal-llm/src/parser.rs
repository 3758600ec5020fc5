//! Parse reasoning-service output into structured payloads
//!
//! All shape validation happens here, at the boundary: anything that cannot
//! be read into the expected structure is a `MalformedResponse` and never
//! reaches the graph.

use crate::ServiceError;
use lineal_domain::{
    AlternativePath, ArbitrationRationale, ContradictionCategory, ContradictionVerdict,
    ReasoningPayload, ReasoningStep, SignatureId,
};
use serde_json::Value;
use tracing::warn;

/// Parse a reasoning response into a payload
pub fn parse_payload(response: &str) -> Result<ReasoningPayload, ServiceError> {
    let json = parse_value(response)?;
    payload_from_value(&json)
}

/// Parse a contradiction response into a verdict over the compared pair
pub fn parse_verdict(
    response: &str,
    a: SignatureId,
    b: SignatureId,
) -> Result<ContradictionVerdict, ServiceError> {
    let json = parse_value(response)?;
    let obj = json
        .as_object()
        .ok_or_else(|| malformed("verdict is not a JSON object"))?;

    let has_contradiction = obj
        .get("has_contradiction")
        .and_then(Value::as_bool)
        .ok_or_else(|| malformed("missing or invalid 'has_contradiction'"))?;

    let category = match obj.get("contradiction_type").and_then(Value::as_str) {
        Some("conclusion") => ContradictionCategory::Conclusion,
        Some("assumption") => ContradictionCategory::Assumption,
        Some("evidence") => ContradictionCategory::Evidence,
        Some("interpretation") => ContradictionCategory::Interpretation,
        Some("none") => ContradictionCategory::None,
        Some(other) => {
            return Err(malformed(format!("unknown contradiction_type '{}'", other)))
        }
        None => return Err(malformed("missing or invalid 'contradiction_type'")),
    };

    let severity = obj
        .get("severity")
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed("missing or invalid 'severity'"))?;

    Ok(ContradictionVerdict {
        has_contradiction,
        category,
        severity,
        root_cause: string_or_empty(obj.get("root_cause")),
        assumption_a: string_or_empty(obj.get("assumption_a")),
        assumption_b: string_or_empty(obj.get("assumption_b")),
        fundamental_tradeoff: string_or_empty(obj.get("fundamental_tradeoff")),
        resolution_hint: string_or_empty(obj.get("resolution_suggestion")),
        compared: (a, b),
    })
}

/// Parse a synthesis response into a payload plus its arbitration rationale
pub fn parse_synthesis(
    response: &str,
) -> Result<(ReasoningPayload, ArbitrationRationale), ServiceError> {
    let json = parse_value(response)?;
    let payload = payload_from_value(&json)?;

    // The arbitration log is audit material; an absent or partial log does
    // not invalidate an otherwise well-formed synthesis.
    let log = json.get("arbitration_log").and_then(Value::as_object);
    let field = |name: &str| -> String {
        log.and_then(|l| l.get(name))
            .and_then(Value::as_str)
            .unwrap_or("Not specified")
            .to_string()
    };

    let rationale = ArbitrationRationale {
        deprioritized_assumption: field("deprioritized_assumption"),
        hybrid_assumption: field("hybrid_assumption"),
        confidence_justification: field("confidence_justification"),
        risk_resolution: field("risk_resolution"),
    };

    Ok((payload, rationale))
}

fn payload_from_value(json: &Value) -> Result<ReasoningPayload, ServiceError> {
    let obj = json
        .as_object()
        .ok_or_else(|| malformed("payload is not a JSON object"))?;

    let chain = obj
        .get("reasoning_chain")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing or invalid 'reasoning_chain'"))?;

    let mut steps = Vec::with_capacity(chain.len());
    for (idx, step_json) in chain.iter().enumerate() {
        steps.push(parse_step(step_json, idx + 1)?);
    }

    let conclusion = obj
        .get("conclusion")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing or invalid 'conclusion'"))?
        .to_string();

    // Confidence bounds are NOT validated: the reference contract stores
    // whatever the service reported. See the out-of-range test below.
    let confidence = obj
        .get("confidence_score")
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed("missing or invalid 'confidence_score'"))?;

    let mut alternatives = Vec::new();
    if let Some(paths) = obj.get("alternative_paths").and_then(Value::as_array) {
        for (idx, path_json) in paths.iter().enumerate() {
            match parse_alternative(path_json) {
                Ok(path) => alternatives.push(path),
                Err(e) => warn!("Skipping malformed alternative path {}: {}", idx, e),
            }
        }
    }

    Ok(ReasoningPayload {
        steps,
        conclusion,
        confidence,
        alternatives,
    })
}

fn parse_step(json: &Value, position: usize) -> Result<ReasoningStep, ServiceError> {
    let obj = json
        .as_object()
        .ok_or_else(|| malformed(format!("step {} is not a JSON object", position)))?;

    let thought = obj
        .get("thought")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("step {}: missing or invalid 'thought'", position)))?
        .to_string();

    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed(format!("step {}: missing or invalid 'confidence'", position)))?;

    let evidence = obj
        .get("evidence")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    // Step numbers are assigned from position so the chain is always 1-based
    // and dense, whatever numbering the service emitted.
    Ok(ReasoningStep {
        step: position,
        thought,
        confidence,
        evidence,
    })
}

fn parse_alternative(json: &Value) -> Result<AlternativePath, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "alternative is not a JSON object".to_string())?;

    let reasoning = obj
        .get("reasoning")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing or invalid 'reasoning'".to_string())?
        .to_string();

    let why_rejected = obj
        .get("why_rejected")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing or invalid 'why_rejected'".to_string())?
        .to_string();

    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| "missing or invalid 'confidence'".to_string())?;

    Ok(AlternativePath {
        reasoning,
        why_rejected,
        confidence,
    })
}

fn string_or_empty(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or("").to_string()
}

fn parse_value(response: &str) -> Result<Value, ServiceError> {
    let json_str = extract_json(response)?;
    serde_json::from_str(&json_str).map_err(|e| malformed(format!("JSON parse error: {}", e)))
}

/// Extract JSON from a response, handling markdown code blocks
///
/// LLMs sometimes wrap JSON in fenced code blocks despite instructions.
fn extract_json(response: &str) -> Result<String, ServiceError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```json") || trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(malformed("empty code block"));
        }
        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn malformed(msg: impl Into<String>) -> ServiceError {
    ServiceError::MalformedResponse(msg.into())
}

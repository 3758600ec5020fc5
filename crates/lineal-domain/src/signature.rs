//! Signature module - the fundamental unit of the lineage graph

use crate::payload::ReasoningPayload;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a signature based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability, so id order matches registration order
/// - 128-bit uniqueness with no coordination required
/// - RFC 9562-standard string format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignatureId(u128);

impl SignatureId {
    /// Generate a new UUIDv7-based SignatureId
    ///
    /// # Examples
    ///
    /// ```
    /// use lineal_domain::SignatureId;
    ///
    /// let id = SignatureId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a SignatureId from a raw u128 value
    ///
    /// This is primarily for deserialization and tests.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a SignatureId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUID string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for SignatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SignatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

// Serialized as the canonical UUID string so exports stay readable.
impl Serialize for SignatureId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SignatureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SignatureId::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Why a signature exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Problem decomposition
    Analysis,
    /// A committed plan or choice
    Decision,
    /// Concrete execution reasoning
    Evaluation,
    /// Arbitration between conflicting signatures
    Synthesis,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Analysis => "analysis",
            Category::Decision => "decision",
            Category::Evaluation => "evaluation",
            Category::Synthesis => "synthesis",
        };
        write!(f, "{}", s)
    }
}

/// One step in a reasoning chain
///
/// Step numbers are 1-based and dense, matching the step's position in the
/// chain. Order is semantically meaningful and never changed after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// 1-based position in the chain
    pub step: usize,
    /// Free-text reasoning for this step
    pub thought: String,
    /// Confidence in [0.0, 1.0] as reported by the reasoning service
    pub confidence: f64,
    /// Supporting evidence strings
    pub evidence: Vec<String>,
}

/// An approach that was considered and rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativePath {
    /// Description of the alternative approach
    pub reasoning: String,
    /// Why it was not chosen
    pub why_rejected: String,
    /// Confidence the service assigned to the alternative
    pub confidence: f64,
}

/// A signature - one recorded reasoning event with provenance
///
/// Signatures are immutable once created; updates derive new signatures that
/// point back through `parent_ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Unique identifier, assigned at creation
    pub id: SignatureId,

    /// Role/agent label that produced this signature (a tag, not a type)
    pub origin: String,

    /// When this signature was created (milliseconds since Unix epoch)
    pub created_at: u64,

    /// Why this signature exists
    pub category: Category,

    /// Ordered reasoning chain
    pub reasoning_steps: Vec<ReasoningStep>,

    /// Final recommendation
    pub conclusion: String,

    /// Overall confidence in [0.0, 1.0], independent of per-step confidences
    pub confidence: f64,

    /// Signatures this one was derived from; empty for roots
    pub parent_ids: Vec<SignatureId>,

    /// Opaque payload capturing what produced this signature (audit only)
    pub inputs: serde_json::Value,

    /// Constraints supplied at request time
    pub constraints: Vec<String>,

    /// Approaches considered and rejected
    pub alternatives: Vec<AlternativePath>,
}

impl Signature {
    /// Create a signature from a reasoning-service payload plus provenance
    /// metadata. Assigns a fresh id and timestamp.
    pub fn from_payload(
        origin: impl Into<String>,
        category: Category,
        payload: ReasoningPayload,
        parent_ids: Vec<SignatureId>,
        inputs: serde_json::Value,
        constraints: Vec<String>,
    ) -> Self {
        Self {
            id: SignatureId::new(),
            origin: origin.into(),
            created_at: now_millis(),
            category,
            reasoning_steps: payload.steps,
            conclusion: payload.conclusion,
            confidence: payload.confidence,
            parent_ids,
            inputs,
            constraints,
            alternatives: payload.alternatives,
        }
    }

    /// Project this signature down to the summary shape passed to the
    /// reasoning service as prior context.
    pub fn summary(&self) -> SignatureSummary {
        SignatureSummary {
            id: self.id,
            origin: self.origin.clone(),
            conclusion: self.conclusion.clone(),
            confidence: self.confidence,
        }
    }
}

/// Compact view of a signature used as prior context in reasoning requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureSummary {
    /// Id of the summarized signature
    pub id: SignatureId,
    /// Role/agent label
    pub origin: String,
    /// Final recommendation
    pub conclusion: String,
    /// Overall confidence
    pub confidence: f64,
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

//! Trait definitions for external interactions
//!
//! These traits define the boundary between domain logic and infrastructure.
//! Implementations live in other crates (lineal-llm).

/// Trait for the external text-generation capability
///
/// The core depends only on this structured contract - a mock, a real API
/// client, or a local model may stand behind it interchangeably.
pub trait ReasoningProvider {
    /// Error type for provider operations
    type Error;

    /// Generate a text completion for the given prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

//! Lineal Reasoning-Service Layer
//!
//! The boundary to the external text-generation capability. Provides
//! implementations of the `ReasoningProvider` trait from `lineal-domain`,
//! prompt construction for each request kind, and strict parsing of service
//! responses into structured payloads.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini API integration
//!
//! # Examples
//!
//! ```
//! use lineal_llm::MockProvider;
//! use lineal_domain::ReasoningProvider;
//!
//! let provider = MockProvider::new("Hello from the service!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from the service!");
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod gemini;
pub mod parser;
pub mod prompt;

use lineal_domain::ReasoningProvider as ReasoningProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use client::ReasoningClient;
pub use gemini::GeminiProvider;
pub use prompt::{ReasoningRequest, RoleSpec, SignaturePreview};

/// Errors at the reasoning-service boundary
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Transport or auth failure calling the service
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Service returned content that cannot be parsed into the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Mock reasoning provider for deterministic testing
///
/// Returns pre-configured responses without any network calls. Responses can
/// be keyed by exact prompt or by a substring marker, which is how workflow
/// tests script different answers for the analysis, contradiction, and
/// synthesis requests of a single run.
///
/// # Examples
///
/// ```
/// use lineal_llm::MockProvider;
/// use lineal_domain::ReasoningProvider;
///
/// let mut provider = MockProvider::new("default");
/// provider.add_response("exact prompt", "exact answer");
/// provider.add_contains_response("has_contradiction", "verdict json");
///
/// assert_eq!(provider.generate("exact prompt").unwrap(), "exact answer");
/// assert_eq!(provider.generate("...has_contradiction...").unwrap(), "verdict json");
/// assert_eq!(provider.generate("anything else").unwrap(), "default");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    contains_responses: Arc<Mutex<Vec<(String, String)>>>,
    call_count: Arc<Mutex<usize>>,
}

const ERROR_SENTINEL: &str = "\u{0}ERROR";

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            contains_responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for an exact prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Add a response for any prompt containing the given marker
    ///
    /// Markers are checked in reverse insertion order, so the most recently
    /// added match wins and tests can override earlier defaults. Exact
    /// prompt matches take precedence over markers.
    pub fn add_contains_response(
        &mut self,
        marker: impl Into<String>,
        response: impl Into<String>,
    ) {
        self.contains_responses
            .lock()
            .unwrap()
            .push((marker.into(), response.into()));
    }

    /// Configure an error for an exact prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.add_response(prompt, ERROR_SENTINEL);
    }

    /// Configure an error for any prompt containing the given marker
    pub fn add_contains_error(&mut self, marker: impl Into<String>) {
        self.add_contains_response(marker, ERROR_SENTINEL);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl ReasoningProviderTrait for MockProvider {
    type Error = ServiceError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let response = {
            let responses = self.responses.lock().unwrap();
            if let Some(response) = responses.get(prompt) {
                Some(response.clone())
            } else {
                let contains = self.contains_responses.lock().unwrap();
                contains
                    .iter()
                    .rev()
                    .find(|(marker, _)| prompt.contains(marker))
                    .map(|(_, response)| response.clone())
            }
        };

        match response {
            Some(r) if r == ERROR_SENTINEL => {
                Err(ServiceError::Unavailable("Mock error".to_string()))
            }
            Some(r) => Ok(r),
            None => Ok(self.default_response.clone()),
        }
    }
}

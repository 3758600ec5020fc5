//! Gemini Provider Implementation
//!
//! Integration with Google's Gemini generateContent API, which is what the
//! reasoning workflows run against in production.
//!
//! # Features
//!
//! - Async HTTP communication with the Gemini API
//! - Configurable endpoint, model, and temperature
//! - Retry logic with exponential backoff
//! - Timeout handling (a timed-out call surfaces as a service failure)

use crate::ServiceError;
use lineal_domain::ReasoningProvider as ReasoningProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default timeout for reasoning requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Gemini API provider for the reasoning service
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API endpoint (e.g., the public Gemini endpoint)
    /// - `model`: Model to use (e.g., "gemini-3-flash-preview")
    /// - `api_key`: API key for authentication
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: DEFAULT_TEMPERATURE,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider against the public endpoint and default model
    pub fn default_endpoint(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key)
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Generate text using the Gemini API
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unavailable` when the transport or auth fails
    /// (including timeouts), and `ServiceError::MalformedResponse` when the
    /// API body cannot be read.
    pub async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );

        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: self.temperature,
            },
        };

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<GenerateResponse>().await {
                            Ok(body) => body
                                .candidates
                                .into_iter()
                                .next()
                                .and_then(|c| c.content.parts.into_iter().next())
                                .map(|p| p.text)
                                .ok_or_else(|| {
                                    ServiceError::MalformedResponse(
                                        "Response contained no candidates".to_string(),
                                    )
                                }),
                            Err(e) => Err(ServiceError::MalformedResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::UNAUTHORIZED
                        || response.status() == reqwest::StatusCode::FORBIDDEN
                    {
                        // Auth failures will not improve with retries
                        return Err(ServiceError::Unavailable(format!(
                            "Authentication failed (HTTP {})",
                            response.status()
                        )));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(ServiceError::Unavailable(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error =
                        Some(ServiceError::Unavailable(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ServiceError::Unavailable("Max retries exceeded".to_string())))
    }
}

impl ReasoningProviderTrait for GeminiProvider {
    type Error = ServiceError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for the async call
        tokio::runtime::Runtime::new()
            .map_err(|e| ServiceError::Unavailable(format!("Runtime error: {}", e)))?
            .block_on(async { self.generate(prompt).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_provider_creation() {
        let provider = GeminiProvider::new("https://example.com", "gemini-3-flash-preview", "key");
        assert_eq!(provider.endpoint, "https://example.com");
        assert_eq!(provider.model, "gemini-3-flash-preview");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(provider.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_gemini_provider_default_endpoint() {
        let provider = GeminiProvider::default_endpoint("key");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_gemini_provider_builders() {
        let provider = GeminiProvider::default_endpoint("key")
            .with_temperature(0.3)
            .with_max_retries(5);
        assert_eq!(provider.temperature, 0.3);
        assert_eq!(provider.max_retries, 5);
    }

    #[tokio::test]
    async fn test_gemini_error_handling() {
        // Unroutable endpoint to trigger a transport error
        let provider = GeminiProvider::new("http://localhost:1", "model", "key")
            .with_max_retries(1);

        let result = provider.generate("test").await;
        match result {
            Err(ServiceError::Unavailable(_)) => {}
            other => panic!("Expected Unavailable error, got {:?}", other.map(|_| ())),
        }
    }

    // Integration test (requires network and a real API key)
    #[tokio::test]
    #[ignore]
    async fn test_gemini_generate_integration() {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let provider = GeminiProvider::default_endpoint(api_key);
        let result = provider.generate("Say 'hello' and nothing else").await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }
}

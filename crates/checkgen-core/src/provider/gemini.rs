//! Gemini provider adapter.
//!
//! Sends one `generateContent` request per invocation and returns the
//! model's raw text. Every request carries
//! `generationConfig.responseMimeType = "application/json"` so the model
//! is constrained to a single JSON document at generation time -- the
//! validator downstream assumes syntactic JSON is at least *possible*,
//! and a free-text response mode would make that a coin flip.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::trait_def::{GenerateError, Provider};

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gemini-pro";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for [`GeminiClient`], injected once at construction.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key. An empty key fails client construction.
    pub api_key: String,
    /// Model name (e.g. "gemini-pro").
    pub model: String,
    /// API base URL. Overridable for testing against a local stub.
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// HTTP adapter for the Gemini generateContent API.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl GeminiClient {
    /// Create a client from resolved configuration.
    ///
    /// Fails with [`GenerateError::MissingCredentials`] when the API key
    /// is empty -- credentials are checked once here, not per request.
    pub fn new(config: GeminiConfig) -> Result<Self, GenerateError> {
        if config.api_key.trim().is_empty() {
            return Err(GenerateError::MissingCredentials);
        }
        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Request/response helpers
// ---------------------------------------------------------------------------

/// Build the generateContent request body.
///
/// The JSON mime-type constraint is part of every request; it is a
/// correctness control, not an optimization.
fn request_body(prompt: &str) -> Value {
    serde_json::json!({
        "contents": [
            { "parts": [ { "text": prompt } ] }
        ],
        "generationConfig": {
            "responseMimeType": "application/json"
        }
    })
}

/// Extract the generated text from a generateContent response body.
///
/// Walks `candidates[0].content.parts[*].text` and concatenates the
/// text parts. A response with no text parts is a provider failure.
fn extract_text(body: &Value) -> Result<String, GenerateError> {
    let parts = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    let mut text = String::new();
    if let Some(parts) = parts {
        for part in parts {
            if let Some(s) = part.get("text").and_then(|t| t.as_str()) {
                text.push_str(s);
            }
        }
    }

    if text.is_empty() {
        return Err(GenerateError::Provider {
            message: "response contained no text candidates".to_string(),
        });
    }
    Ok(text)
}

/// Pull the upstream error message out of an error response body, falling
/// back to the HTTP status when the body is not the documented
/// `{ "error": { "message": ... } }` shape.
fn upstream_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[async_trait]
impl Provider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        if prompt.trim().is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        debug!(model = %self.config.model, "sending generation request");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|e| GenerateError::Provider {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| GenerateError::Provider {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(GenerateError::Provider {
                message: upstream_error_message(status.as_u16(), &body),
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| GenerateError::Provider {
            message: format!("unreadable response body: {e}"),
        })?;
        let text = extract_text(&value)?;
        debug!(bytes = text.len(), "generation response received");
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

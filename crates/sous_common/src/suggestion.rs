//! Wire types for the suggestion endpoint.

use serde::{Deserialize, Serialize};

/// Inbound request body for POST /v1/suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Free text describing available ingredients or cravings.
    pub prompt: String,
}

/// One structured recipe returned to the caller.
///
/// All fields default when absent: the upstream model is only loosely
/// held to the schema, so a missing key deserializes as empty instead
/// of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Successful response body: a non-empty list of suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<RecipeSuggestion>,
}

/// Failure response body. Every error leaves the daemon as JSON in
/// this shape, never as an empty body or a bare string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Daemon health snapshot for GET /v1/health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Which upstream shape the daemon is configured for.
    pub upstream: String,
}

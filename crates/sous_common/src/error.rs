//! Error types for the suggestion proxy.

use thiserror::Error;

/// Everything that can go wrong while producing suggestions.
///
/// Each variant maps to exactly one HTTP status at the route boundary;
/// none of them is fatal to the daemon.
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Prompt is required")]
    InvalidInput,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream model returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Upstream response is missing the generated text")]
    MalformedResponse,

    #[error("No JSON array found in the model output")]
    NoJsonFound,

    #[error("Model output did not contain a non-empty array of suggestions")]
    InvalidFormat,

    #[error("Failed to parse model output: {0}")]
    Parse(String),
}

impl SuggestError {
    /// HTTP status the route layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            SuggestError::InvalidInput => 400,
            SuggestError::Configuration(_) => 500,
            SuggestError::Upstream { .. } => 500,
            SuggestError::Http(_) => 500,
            SuggestError::MalformedResponse => 500,
            SuggestError::NoJsonFound => 500,
            SuggestError::InvalidFormat => 500,
            SuggestError::Parse(_) => 500,
        }
    }

    /// Diagnostic detail attached to the JSON error body, when there
    /// is more to say than the headline message.
    pub fn details(&self) -> Option<String> {
        match self {
            SuggestError::Upstream { body, .. } if !body.is_empty() => Some(body.clone()),
            SuggestError::Configuration(msg) => Some(msg.clone()),
            SuggestError::Http(msg) => Some(msg.clone()),
            SuggestError::Parse(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

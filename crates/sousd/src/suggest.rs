//! Suggestion engine.
//!
//! Validates the prompt, makes the upstream call, and runs extraction.
//! The optional retry and cache policies wrap the call here, outside
//! the extraction core; both reproduce the plain single-attempt,
//! uncached behavior unless explicitly enabled in config.

use crate::config::{PolicyConfig, UpstreamKind};
use crate::extract;
use crate::prompts::{build_user_prompt, SUGGESTION_SYSTEM_PROMPT};
use crate::upstream::UpstreamClient;
use lru::LruCache;
use sous_common::{RecipeSuggestion, SuggestError, SuggestionResponse};
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct SuggestEngine {
    upstream: UpstreamClient,
    policies: PolicyConfig,
    cache: Option<Mutex<LruCache<String, Vec<RecipeSuggestion>>>>,
}

impl SuggestEngine {
    pub fn new(upstream: UpstreamClient, policies: PolicyConfig) -> Self {
        let cache = if policies.cache.enabled {
            let capacity = NonZeroUsize::new(policies.cache.capacity.max(1))
                .unwrap_or(NonZeroUsize::MIN);
            Some(Mutex::new(LruCache::new(capacity)))
        } else {
            None
        };

        Self {
            upstream,
            policies,
            cache,
        }
    }

    pub fn upstream_kind(&self) -> UpstreamKind {
        self.upstream.kind()
    }

    /// Produce suggestions for a caller prompt.
    ///
    /// On success the response list is non-empty and in upstream
    /// order; on failure a typed error, never a partial result.
    pub async fn generate(&self, prompt: &str) -> Result<SuggestionResponse, SuggestError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SuggestError::InvalidInput);
        }

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.lock().await.get(prompt) {
                debug!("Cache hit for prompt");
                return Ok(SuggestionResponse {
                    suggestions: hit.clone(),
                });
            }
        }

        let user_prompt = build_user_prompt(prompt);
        let text = self.call_upstream(&user_prompt).await?;
        let suggestions = extract::extract_suggestions(&text, self.upstream.extraction_mode())?;
        info!("Extracted {} suggestions", suggestions.len());

        if let Some(cache) = &self.cache {
            cache
                .lock()
                .await
                .put(prompt.to_string(), suggestions.clone());
        }

        Ok(SuggestionResponse { suggestions })
    }

    async fn call_upstream(&self, user_prompt: &str) -> Result<String, SuggestError> {
        let attempts = if self.policies.retry.enabled {
            self.policies.retry.max_attempts.max(1)
        } else {
            1
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self
                .upstream
                .generate(SUGGESTION_SYSTEM_PROMPT, user_prompt)
                .await
            {
                Ok(text) => {
                    debug!("Upstream returned {} chars", text.len());
                    return Ok(text);
                }
                Err(e) if attempt < attempts && is_transient(&e) => {
                    warn!("Upstream attempt {}/{} failed: {}", attempt, attempts, e);
                    tokio::time::sleep(Duration::from_millis(self.policies.retry.backoff_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Only transport failures and upstream 5xx are worth retrying;
/// client errors and parse failures never are.
fn is_transient(err: &SuggestError) -> bool {
    match err {
        SuggestError::Http(_) => true,
        SuggestError::Upstream { status, .. } => *status >= 500,
        _ => false,
    }
}

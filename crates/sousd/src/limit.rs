//! Opt-in per-peer rate limiting for the suggestions route.
//!
//! Sliding window over request timestamps, tracked per peer address.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    peer_requests: RwLock<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
            peer_requests: RwLock::new(HashMap::new()),
        }
    }

    /// Record a request from this peer. Returns false when the peer
    /// has already filled its window.
    pub async fn check(&self, peer: &str) -> bool {
        let mut requests = self.peer_requests.write().await;
        let peer_reqs = requests.entry(peer.to_string()).or_default();
        let now = Instant::now();

        peer_reqs.retain(|&t| now.duration_since(t) < self.window);

        if peer_reqs.len() >= self.max_requests {
            warn!(
                "Rate limit exceeded for peer: {} ({}/{})",
                peer,
                peer_reqs.len(),
                self.max_requests
            );
            return false;
        }

        peer_reqs.push(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_limit() -> RateLimitConfig {
        RateLimitConfig {
            enabled: true,
            max_requests: 3,
            window_secs: 60,
        }
    }

    #[tokio::test]
    async fn test_allows_up_to_limit_then_rejects() {
        let limiter = RateLimiter::new(&small_limit());

        for _ in 0..3 {
            assert!(limiter.check("10.0.0.1").await);
        }
        assert!(!limiter.check("10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_peers_are_tracked_independently() {
        let limiter = RateLimiter::new(&small_limit());

        for _ in 0..3 {
            assert!(limiter.check("10.0.0.1").await);
        }
        assert!(limiter.check("10.0.0.2").await);
    }
}

//! Search configuration.

use std::time::Duration;

/// What to do with a search response that arrived but could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadPolicy {
    /// Treat it as a successful search with no routes.
    #[default]
    Lenient,
    /// Treat it as a failed search.
    Strict,
}

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// How long a submitted search may stay in flight before it fails
    /// with a timeout.
    pub timeout: Duration,

    /// Handling of malformed search responses.
    pub payload_policy: PayloadPolicy,
}

impl SearchConfig {
    /// Set the in-flight timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the malformed-response policy.
    pub fn with_payload_policy(mut self, policy: PayloadPolicy) -> Self {
        self.payload_policy = policy;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            payload_policy: PayloadPolicy::Lenient,
        }
    }
}

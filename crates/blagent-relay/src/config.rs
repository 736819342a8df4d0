use std::time::Duration;

/// Mirror hosts for the upstream completion service. DNS for the primary
/// host resolves unreliably from some regions, so the relay walks all three.
pub const DEFAULT_ENDPOINT_HOSTS: [&str; 3] = [
    "https://dashscope.aliyuncs.com",
    "https://dashscope-api.aliyuncs.com",
    "https://dashscope-cn-beijing.aliyuncs.com",
];

/// Build the ordered candidate endpoint URLs for an application id.
pub fn default_endpoints(app_id: &str) -> Vec<String> {
    DEFAULT_ENDPOINT_HOSTS
        .iter()
        .map(|host| format!("{}/api/v1/apps/{}/completion", host, app_id))
        .collect()
}

/// Retry behavior for a single endpoint.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum attempts against one endpoint, counting the initial request.
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles on each further attempt.
    pub base_delay: Duration,
    /// Wall-clock budget for all attempts against one endpoint.
    pub endpoint_ceiling: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(2000),
            endpoint_ceiling: Duration::from_secs(180),
        }
    }
}

impl RetryConfig {
    /// Backoff after a failed attempt (1-indexed): `base_delay × 2^(attempt-1)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Configuration for the relay client. Built once at startup and passed in
/// at construction so tests can point the client at fakes.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Bearer token for the upstream API.
    pub api_key: String,
    /// Upstream application id; part of the endpoint path.
    pub app_id: String,
    /// Ordered candidate endpoint URLs.
    pub endpoints: Vec<String>,
    pub retry: RetryConfig,
}

impl RelayConfig {
    pub fn new(api_key: impl Into<String>, app_id: impl Into<String>) -> Self {
        let app_id = app_id.into();
        let endpoints = default_endpoints(&app_id);
        Self {
            api_key: api_key.into(),
            app_id,
            endpoints,
            retry: RetryConfig::default(),
        }
    }

    /// Replace the endpoint list (used by tests to target mock servers).
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

use colored::Colorize;
use tokio::time::{sleep, timeout, Instant};

use blagent_models::{CompletionRequest, CompletionResponse};

use crate::config::RelayConfig;
use crate::error::{AttemptError, RelayError};
use crate::logging::{log_request, log_response, safe_truncate};

/// Client for the upstream completion API.
///
/// Walks the configured endpoint list in order; each endpoint gets its own
/// attempt loop bounded by `RetryConfig::endpoint_ceiling`. The deadline is
/// threaded through the attempts as an explicit `Instant` rather than a
/// shared cancellation handle, and it resets per endpoint, so the worst case
/// across all mirrors is `endpoints × ceiling`.
pub struct RelayClient {
    config: RelayConfig,
    client: reqwest::Client,
    verbose: bool,
}

impl RelayClient {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Relay one user message to the completion API and return the reply
    /// text. Validates the message before any network traffic happens.
    pub async fn complete(&self, message: &str) -> Result<String, RelayError> {
        if message.trim().is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        let request = CompletionRequest::new(message);
        let mut last_error: Option<AttemptError> = None;

        for endpoint in &self.config.endpoints {
            println!("{} Trying endpoint: {}", "🌐".blue(), endpoint);
            match self.try_endpoint(endpoint, &request).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    eprintln!("{} Endpoint {} failed: {}", "❌".red(), endpoint, err);
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(AttemptError::MissingReplyText) => Err(RelayError::MalformedResponse),
            Some(err) => Err(RelayError::Upstream(err)),
            None => Err(RelayError::Upstream(AttemptError::NoEndpoints)),
        }
    }

    /// Attempt loop for a single endpoint. Transient failures back off
    /// exponentially and retry; anything else abandons the endpoint so the
    /// caller can move on to the next mirror.
    async fn try_endpoint(
        &self,
        endpoint: &str,
        request: &CompletionRequest,
    ) -> Result<String, AttemptError> {
        let retry = &self.config.retry;
        let deadline = Instant::now() + retry.endpoint_ceiling;
        let mut last_error: Option<AttemptError> = None;

        for attempt in 1..=retry.max_attempts {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            let err = match timeout(remaining, self.send(endpoint, request)).await {
                Ok(Ok(text)) => {
                    println!(
                        "{} Upstream call succeeded on attempt {}/{}",
                        "✅".green(),
                        attempt,
                        retry.max_attempts
                    );
                    return Ok(text);
                }
                Ok(Err(err)) => err,
                Err(_) => AttemptError::DeadlineExceeded(retry.endpoint_ceiling),
            };

            eprintln!(
                "{} Attempt {}/{} failed: {}",
                "⚠️".yellow(),
                attempt,
                retry.max_attempts,
                err
            );

            let transient = err.is_transient();
            last_error = Some(err);
            if !transient {
                break;
            }

            if attempt < retry.max_attempts {
                // Never sleep past the endpoint deadline; the next loop
                // iteration notices it is spent and gives up.
                let wait = retry
                    .delay_for_attempt(attempt)
                    .min(deadline.saturating_duration_since(Instant::now()));
                println!(
                    "{} Waiting {}ms before retry...",
                    "⏳".yellow(),
                    wait.as_millis()
                );
                sleep(wait).await;
            }
        }

        Err(last_error.unwrap_or(AttemptError::DeadlineExceeded(retry.endpoint_ceiling)))
    }

    /// One network call: POST the completion request, check the status,
    /// decode the body, and extract the reply text.
    async fn send(&self, endpoint: &str, request: &CompletionRequest) -> Result<String, AttemptError> {
        log_request(endpoint, request, &self.config.api_key, self.verbose);

        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(AttemptError::Http { status, body });
        }

        let body = response.text().await?;
        log_response(&status, &body, self.verbose);

        let completion: CompletionResponse = serde_json::from_str(&body)?;
        match completion.reply_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                eprintln!(
                    "{} Upstream response had no reply text: {}",
                    "❌".red(),
                    safe_truncate(&body, 500)
                );
                Err(AttemptError::MissingReplyText)
            }
        }
    }
}

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one attempt against one endpoint.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("endpoint budget of {0:?} exhausted")]
    DeadlineExceeded(Duration),

    #[error("upstream returned 200 without output.text")]
    MissingReplyText,

    #[error("no endpoints configured")]
    NoEndpoints,
}

impl AttemptError {
    /// Whether the failure is likely temporary and worth retrying against
    /// the same endpoint. HTTP status errors, undecodable bodies, and
    /// missing reply text all abandon the endpoint immediately; once the
    /// deadline is spent there is nothing left to retry with.
    pub fn is_transient(&self) -> bool {
        match self {
            AttemptError::Transport(err) => {
                if err.is_timeout() || err.is_connect() {
                    return true;
                }
                let chain = error_chain_text(err);
                chain.contains("reset")
                    || chain.contains("refused")
                    || chain.contains("closed")
                    || chain.contains("aborted")
                    || chain.contains("broken pipe")
                    || chain.contains("network")
                    || chain.contains("timed out")
            }
            _ => false,
        }
    }
}

/// Concatenated lowercase display of an error and its sources. reqwest's
/// top-level message hides the interesting part ("connection reset by
/// peer" etc.) behind the source chain.
fn error_chain_text(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text.to_lowercase()
}

/// Failure of a whole relay call, as surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("message must be a non-empty string")]
    EmptyMessage,

    #[error("all completion endpoints failed: {0}")]
    Upstream(#[source] AttemptError),

    #[error("upstream response did not contain a reply")]
    MalformedResponse,
}

impl RelayError {
    /// Stable error kind, used for the `type` field of error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::EmptyMessage => "ValidationError",
            RelayError::Upstream(_) => "UpstreamError",
            RelayError::MalformedResponse => "MalformedResponseError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_are_not_transient() {
        let err = AttemptError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn missing_reply_text_is_not_transient() {
        assert!(!AttemptError::MissingReplyText.is_transient());
    }

    #[test]
    fn deadline_exceeded_is_not_transient() {
        assert!(!AttemptError::DeadlineExceeded(Duration::from_secs(180)).is_transient());
    }

    #[test]
    fn kinds_have_stable_names() {
        assert_eq!(RelayError::EmptyMessage.kind(), "ValidationError");
        assert_eq!(RelayError::MalformedResponse.kind(), "MalformedResponseError");
        assert_eq!(
            RelayError::Upstream(AttemptError::NoEndpoints).kind(),
            "UpstreamError"
        );
    }
}

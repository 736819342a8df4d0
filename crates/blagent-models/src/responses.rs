use serde::{Deserialize, Serialize};

/// Success body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Failure body of `POST /api/chat` (and any other route)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
}

/// Response body of the upstream completion API.
///
/// Only `output.text` matters to the relay; `request_id` and `usage` are kept
/// for verbose logging. All fields are optional because a 200 with a missing
/// reply is a case the relay has to classify, not a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub output: Option<CompletionOutput>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub usage: Option<CompletionUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionOutput {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
}

impl CompletionResponse {
    /// The reply text, if the upstream actually produced one.
    pub fn reply_text(&self) -> Option<&str> {
        self.output.as_ref()?.text.as_deref()
    }
}

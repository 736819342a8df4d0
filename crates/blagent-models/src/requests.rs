use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
///
/// `message` is optional at the serde level so a missing field surfaces as a
/// validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for the upstream completion API
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub input: CompletionInput,
    pub parameters: serde_json::Value,
    pub debug: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionInput {
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            input: CompletionInput {
                prompt: prompt.into(),
            },
            parameters: serde_json::json!({}),
            debug: serde_json::json!({}),
        }
    }
}

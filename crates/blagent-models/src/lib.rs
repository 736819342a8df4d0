// Models module - data structures for API communication
pub mod requests;
pub mod responses;
pub mod types;

// Re-export commonly used types
pub use types::{ChatMessage, Role};
pub use requests::{ChatRequest, CompletionInput, CompletionRequest};
pub use responses::{ChatReply, CompletionOutput, CompletionResponse, CompletionUsage, ErrorBody};

//! HTTP relay to the upstream completion API.
//!
//! This crate owns the one piece of real machinery in the project: taking a
//! single user message and turning it into a single completion reply while
//! masking upstream instability. The upstream provider is reachable through
//! several mirror endpoints; each endpoint gets a bounded attempt loop with
//! exponential backoff, and the first success wins.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;

pub use client::RelayClient;
pub use config::{default_endpoints, RelayConfig, RetryConfig};
pub use error::{AttemptError, RelayError};

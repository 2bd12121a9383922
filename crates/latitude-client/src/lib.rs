//! Latitude Client
//!
//! HTTP client for the Latitude prompt gateway. Exposes the three operations
//! the node runner dispatches (run a prompt, continue a conversation, create a
//! log) behind the [`LatitudeApi`] trait, plus prompt listing for discovery.
//!
//! All error text that can reach logs or record output is passed through
//! [`redact`] first, so key material never leaves the process.

mod api;
mod client;
mod error;
mod models;
mod prompt;
mod redact;
mod transport;

pub use api::LatitudeApi;
pub use client::LatitudeClient;
pub use error::{ClientError, ErrorDetails};
pub use models::{
  LogResult, Message, Prompt, RunOptions, RunResponse, RunResult, TokenUsage, ToolCall,
};
pub use prompt::{extract_parameters, format_parameter_list};
pub use redact::redact;
pub use transport::DEFAULT_GATEWAY;

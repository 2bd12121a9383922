//! The vendor boundary the executor dispatches through.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::models::{LogResult, Message, RunOptions, RunResult};

/// The three gateway operations a node can dispatch.
///
/// The executor is generic over this trait so tests can substitute a scripted
/// implementation; [`crate::LatitudeClient`] is the HTTP one.
#[async_trait]
pub trait LatitudeApi: Send + Sync {
  /// Run the prompt at `path` and start a new conversation.
  async fn run_prompt(&self, path: &str, options: RunOptions) -> Result<RunResult, ClientError>;

  /// Append `messages` to an existing conversation and get the next response.
  async fn chat(
    &self,
    conversation_uuid: &str,
    messages: Vec<Message>,
  ) -> Result<RunResult, ClientError>;

  /// Record an externally-produced conversation against the prompt at `path`.
  async fn create_log(
    &self,
    path: &str,
    messages: Vec<Message>,
    response: Option<String>,
  ) -> Result<LogResult, ClientError>;
}

//! HTTP implementation of the gateway operations.

use async_trait::async_trait;
use tracing::debug;

use latitude_config::Credentials;

use crate::api::LatitudeApi;
use crate::error::ClientError;
use crate::models::{LogResult, Message, Prompt, RunOptions, RunResult};
use crate::transport::Transport;

/// Client for the Latitude gateway API (v2).
///
/// Construct once per run and reuse across records; the underlying connection
/// pool is shared through clones.
#[derive(Debug, Clone)]
pub struct LatitudeClient {
  transport: Transport,
}

impl LatitudeClient {
  /// Build a client from credentials. Fails when the gateway override is not
  /// a valid URL or the HTTP client cannot be set up.
  pub fn new(credentials: &Credentials) -> Result<Self, ClientError> {
    Ok(LatitudeClient {
      transport: Transport::new(credentials)?,
    })
  }

  /// List the prompt documents in the project's live version.
  pub async fn list_prompts(&self) -> Result<Vec<Prompt>, ClientError> {
    let url = format!("{}/documents", self.transport.project_url(None));
    self.transport.get(&url, "list_prompts").await
  }

  /// Fetch a single prompt document by path.
  pub async fn get_prompt(&self, path: &str) -> Result<Prompt, ClientError> {
    let url = format!("{}/documents/{}", self.transport.project_url(None), path);
    self.transport.get(&url, "get_prompt").await
  }
}

#[async_trait]
impl LatitudeApi for LatitudeClient {
  async fn run_prompt(&self, path: &str, options: RunOptions) -> Result<RunResult, ClientError> {
    let url = format!(
      "{}/documents/run",
      self.transport.project_url(options.version_uuid.as_deref())
    );
    debug!(path, parameters = options.parameters.len(), "run_prompt");

    // The gateway streams by default; the node consumes whole responses.
    let mut body = serde_json::json!({
      "path": path,
      "parameters": options.parameters,
      "stream": false,
    });
    if let Some(custom_identifier) = &options.custom_identifier {
      body["customIdentifier"] = serde_json::json!(custom_identifier);
    }

    self.transport.post(&url, &body, "run_prompt").await
  }

  async fn chat(
    &self,
    conversation_uuid: &str,
    messages: Vec<Message>,
  ) -> Result<RunResult, ClientError> {
    let url = self.transport.conversation_url(conversation_uuid);
    debug!(conversation_uuid, messages = messages.len(), "chat");

    let body = serde_json::json!({
      "messages": messages,
      "stream": false,
    });
    self.transport.post(&url, &body, "chat").await
  }

  async fn create_log(
    &self,
    path: &str,
    messages: Vec<Message>,
    response: Option<String>,
  ) -> Result<LogResult, ClientError> {
    let url = format!("{}/documents/logs", self.transport.project_url(None));
    debug!(path, messages = messages.len(), "create_log");

    let mut body = serde_json::json!({
      "path": path,
      "messages": messages,
    });
    if let Some(response) = &response {
      body["response"] = serde_json::json!(response);
    }

    self.transport.post(&url, &body, "create_log").await
  }
}

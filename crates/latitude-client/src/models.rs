//! Wire types for the Latitude gateway API (v2).
//!
//! Field names follow the gateway's camelCase JSON. Responses are re-serialized
//! into record output as-is, so renames here are the output contract too.

use serde::{Deserialize, Serialize};

/// A conversation message in the gateway's wire shape.
///
/// Incoming messages are kept exactly as received (`content` may be a plain
/// string or a list of typed content parts, and the gateway uses roles beyond
/// the configurable three). Outgoing messages are built with [`Message::text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
  pub role: String,
  pub content: serde_json::Value,
}

impl Message {
  /// A message whose content is a single text block, the shape the gateway
  /// expects for chat and log payloads.
  pub fn text(role: &str, text: impl Into<String>) -> Self {
    Message {
      role: role.to_string(),
      content: serde_json::json!([{ "type": "text", "text": text.into() }]),
    }
  }
}

/// Token counts for one model call. Absent counts are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
  #[serde(default)]
  pub prompt_tokens: u64,
  #[serde(default)]
  pub completion_tokens: u64,
  #[serde(default)]
  pub total_tokens: u64,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub arguments: serde_json::Value,
}

/// The model response portion of a run or chat result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stream_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  /// Structured output, present when the prompt declares an object schema.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub object: Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub usage: Option<TokenUsage>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cost: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tool_calls: Option<Vec<ToolCall>>,
}

/// Result of running a prompt or continuing a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
  /// Conversation uuid; chat calls use it to continue this conversation.
  pub uuid: String,
  #[serde(default)]
  pub conversation: Vec<Message>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub response: Option<RunResponse>,
}

/// Result of creating a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResult {
  pub id: i64,
  pub uuid: String,
  pub document_uuid: String,
  pub commit_id: i64,
  #[serde(default)]
  pub resolved_content: String,
  #[serde(default)]
  pub content_hash: String,
  #[serde(default)]
  pub parameters: serde_json::Value,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub custom_identifier: Option<String>,
  /// Duration in milliseconds, when the log came from a timed run.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<i64>,
  #[serde(default)]
  pub source: String,
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub updated_at: String,
}

/// A prompt document in the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
  pub path: String,
  #[serde(default)]
  pub content: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub config: Option<serde_json::Value>,
}

/// Options for a run-prompt call.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
  /// Named parameters, already marshaled (trimmed strings, raw JSON values).
  pub parameters: serde_json::Map<String, serde_json::Value>,
  /// Caller-chosen identifier attached to the resulting log.
  pub custom_identifier: Option<String>,
  /// Project version to run against; `None` means the live version.
  pub version_uuid: Option<String>,
}

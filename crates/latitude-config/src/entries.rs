use serde::{Deserialize, Serialize};

/// A single named parameter for a prompt run.
///
/// Values are arbitrary JSON; string values may contain `{{ ... }}` templates
/// that the executor resolves against the current input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
  pub name: String,
  #[serde(default)]
  pub value: serde_json::Value,
}

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
  System,
  User,
  Assistant,
}

impl MessageRole {
  /// Wire name of the role, as the gateway expects it.
  pub fn as_str(&self) -> &'static str {
    match self {
      MessageRole::System => "system",
      MessageRole::User => "user",
      MessageRole::Assistant => "assistant",
    }
  }
}

/// A single configured conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntry {
  pub role: MessageRole,
  pub content: String,
}

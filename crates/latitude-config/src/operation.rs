use serde::{Deserialize, Serialize};

use crate::entries::{MessageEntry, ParameterEntry};

/// A node definition: one operation plus how failures are handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
  /// Display name, used only for logs.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(flatten)]
  pub operation: OperationDef,
  #[serde(default)]
  pub on_error: FailureMode,
}

/// The Latitude operation a node dispatches for each input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationDef {
  /// Run a prompt by path and start a new conversation.
  RunPrompt {
    prompt_path: String,
    #[serde(default)]
    parameters: Vec<ParameterEntry>,
    /// When true (the default), the response is flattened into the
    /// simplified shape instead of the full gateway payload.
    #[serde(default = "default_simplify")]
    simplify: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_identifier: Option<String>,
    /// Project version to run against. Omitted means the live version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version_uuid: Option<String>,
  },
  /// Continue an existing conversation with follow-up messages.
  Chat {
    conversation_uuid: String,
    #[serde(default)]
    messages: Vec<MessageEntry>,
    #[serde(default = "default_simplify")]
    simplify: bool,
  },
  /// Record an externally-produced conversation against a prompt.
  CreateLog {
    prompt_path: String,
    #[serde(default)]
    messages: Vec<MessageEntry>,
    /// Optional final assistant response to append to the log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<String>,
  },
}

impl OperationDef {
  /// Short name of the operation, used for logs.
  pub fn kind(&self) -> &'static str {
    match self {
      OperationDef::RunPrompt { .. } => "run_prompt",
      OperationDef::Chat { .. } => "chat",
      OperationDef::CreateLog { .. } => "create_log",
    }
  }
}

fn default_simplify() -> bool {
  true
}

/// What happens to the rest of the records when one of them fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
  /// Stop at the first failure. Records completed before it are kept.
  #[default]
  Abort,
  /// Emit a failure record for the failing input and keep going.
  Continue,
}

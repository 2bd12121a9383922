//! Output shaping: simplified projections and per-record outcome records.

use serde::{Deserialize, Serialize};

use latitude_client::{ErrorDetails, RunResult, TokenUsage, ToolCall};

/// Flat projection of a run or chat result.
///
/// Serialized field names mirror the gateway payload the values came from, so
/// simplified and full output stay interchangeable downstream. `text` and
/// `object` are always present (as `null` when the model produced neither);
/// `usage` is zero-filled when the gateway omitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedOutput {
  pub uuid: String,
  pub text: Option<String>,
  pub object: Option<serde_json::Value>,
  pub usage: TokenUsage,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cost: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tool_calls: Option<Vec<ToolCall>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub custom_identifier: Option<String>,
}

/// Project the essentials out of a full gateway result.
///
/// `cost` appears only when the gateway reported one, `tool_calls` only when
/// at least one call was made, and `custom_identifier` only when the request
/// carried one.
pub fn simplify_output(result: &RunResult, custom_identifier: Option<&str>) -> SimplifiedOutput {
  let response = result.response.as_ref();

  SimplifiedOutput {
    uuid: result.uuid.clone(),
    text: response.and_then(|r| r.text.clone()),
    object: response.and_then(|r| r.object.clone()),
    usage: response.and_then(|r| r.usage).unwrap_or_default(),
    cost: response.and_then(|r| r.cost),
    tool_calls: response
      .and_then(|r| r.tool_calls.as_ref())
      .filter(|calls| !calls.is_empty())
      .cloned(),
    custom_identifier: custom_identifier
      .filter(|id| !id.is_empty())
      .map(str::to_string),
  }
}

/// Outcome of one input record, tagged with the record's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemOutcome {
  /// The operation completed. `data` is the simplified projection, the full
  /// gateway result, or the created log entry.
  Success { item: usize, data: serde_json::Value },
  /// The operation failed; present only when the node continues on error.
  Failure {
    item: usize,
    error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
  },
}

impl ItemOutcome {
  pub fn success(item: usize, data: serde_json::Value) -> Self {
    ItemOutcome::Success { item, data }
  }

  pub fn failure(item: usize, details: ErrorDetails) -> Self {
    ItemOutcome::Failure {
      item,
      error: details.message,
      error_code: details.error_code,
      status: details.status,
    }
  }

  /// Position of the input record this outcome belongs to.
  pub fn item(&self) -> usize {
    match self {
      ItemOutcome::Success { item, .. } => *item,
      ItemOutcome::Failure { item, .. } => *item,
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, ItemOutcome::Success { .. })
  }
}

/// The failure that stopped a run early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbortedItem {
  pub item: usize,
  pub error: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error_code: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<u16>,
}

impl AbortedItem {
  pub fn new(item: usize, details: ErrorDetails) -> Self {
    AbortedItem {
      item,
      error: details.message,
      error_code: details.error_code,
      status: details.status,
    }
  }
}

/// Everything one run produced.
///
/// When `aborted` is set, the run stopped at that record; outcomes produced
/// before it are still present in `records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
  /// Unique id for this run, also attached to every log line it emitted.
  pub execution_id: String,
  pub records: Vec<ItemOutcome>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub aborted: Option<AbortedItem>,
}

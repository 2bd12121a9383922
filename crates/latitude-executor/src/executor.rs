//! Node executor implementation.

use tracing::{debug, error, info, instrument};

use latitude_client::{ErrorDetails, LatitudeApi, LatitudeClient, RunOptions, redact};
use latitude_config::{Credentials, FailureMode, NodeDef, OperationDef};

use crate::error::ExecutionError;
use crate::marshal::{parse_messages, parse_parameters};
use crate::output::{AbortedItem, ExecutionReport, ItemOutcome, simplify_output};
use crate::resolve::resolve_operation;

/// Executes a node definition against input records, one record at a time.
///
/// Generic over the gateway so tests can script responses; production code
/// goes through [`NodeExecutor::connect`].
pub struct NodeExecutor<A: LatitudeApi> {
  api: A,
}

impl NodeExecutor<LatitudeClient> {
  /// Build an executor backed by the HTTP client. The client is constructed
  /// once here and reused for every record of every run.
  pub fn connect(credentials: &Credentials) -> Result<Self, ExecutionError> {
    match LatitudeClient::new(credentials) {
      Ok(client) => Ok(NodeExecutor::new(client)),
      Err(source) => {
        error!(error = %redact(&source.to_string()), "client construction failed");
        Err(ExecutionError::Connection)
      }
    }
  }
}

impl<A: LatitudeApi> NodeExecutor<A> {
  pub fn new(api: A) -> Self {
    NodeExecutor { api }
  }

  /// Execute `node` against `items` in order.
  ///
  /// Never returns an error: failures are folded into the report according to
  /// the node's failure mode. With [`FailureMode::Abort`] the loop stops at
  /// the first failure and the report carries it in `aborted`; with
  /// [`FailureMode::Continue`] each failure becomes a failure record and the
  /// remaining items still run.
  #[instrument(
    name = "node_execute",
    skip(self, node, items),
    fields(
      operation = node.operation.kind(),
      node_name = node.name.as_deref().unwrap_or_default(),
    )
  )]
  pub async fn execute(&self, node: &NodeDef, items: &[serde_json::Value]) -> ExecutionReport {
    let execution_id = uuid::Uuid::new_v4().to_string();

    info!(
      execution_id = %execution_id,
      items = items.len(),
      "node_started"
    );

    let mut records = Vec::with_capacity(items.len());
    let mut aborted = None;

    for (index, record) in items.iter().enumerate() {
      match self.execute_item(&execution_id, node, index, record).await {
        Ok(data) => {
          info!(execution_id = %execution_id, item = index, "record_completed");
          records.push(ItemOutcome::success(index, data));
        }
        Err(details) => {
          error!(
            execution_id = %execution_id,
            item = index,
            error = %details.message,
            "record_failed"
          );

          match node.on_error {
            FailureMode::Continue => records.push(ItemOutcome::failure(index, details)),
            FailureMode::Abort => {
              aborted = Some(AbortedItem::new(index, details));
              break;
            }
          }
        }
      }
    }

    match &aborted {
      None => {
        info!(
          execution_id = %execution_id,
          records = records.len(),
          "node_completed"
        );
      }
      Some(failure) => {
        error!(
          execution_id = %execution_id,
          item = failure.item,
          error = %failure.error,
          "node_aborted"
        );
      }
    }

    ExecutionReport {
      execution_id,
      records,
      aborted,
    }
  }

  /// Run one record through resolution, marshaling, dispatch, and shaping.
  async fn execute_item(
    &self,
    execution_id: &str,
    node: &NodeDef,
    index: usize,
    record: &serde_json::Value,
  ) -> Result<serde_json::Value, ErrorDetails> {
    let operation = resolve_operation(&node.operation, record)
      .map_err(|resolve_error| ErrorDetails::from_message(resolve_error.to_string()))?;

    match operation {
      OperationDef::RunPrompt {
        prompt_path,
        parameters,
        simplify,
        custom_identifier,
        version_uuid,
      } => {
        let parameters = parse_parameters(&parameters);
        debug!(
          execution_id,
          item = index,
          path = %prompt_path,
          parameters = parameters.len(),
          "running prompt"
        );

        let options = RunOptions {
          parameters,
          custom_identifier: custom_identifier.clone(),
          version_uuid,
        };
        let result = self
          .api
          .run_prompt(&prompt_path, options)
          .await
          .map_err(ErrorDetails::from_client)?;

        let data = if simplify {
          serde_json::to_value(simplify_output(&result, custom_identifier.as_deref()))
        } else {
          serde_json::to_value(&result)
        };
        Ok(data.unwrap_or(serde_json::Value::Null))
      }

      OperationDef::Chat {
        conversation_uuid,
        messages,
        simplify,
      } => {
        let messages = parse_messages(&messages);
        if messages.is_empty() {
          return Err(ErrorDetails::from_message("At least one message is required"));
        }
        debug!(
          execution_id,
          item = index,
          conversation_uuid = %conversation_uuid,
          messages = messages.len(),
          "continuing conversation"
        );

        let result = self
          .api
          .chat(&conversation_uuid, messages)
          .await
          .map_err(ErrorDetails::from_client)?;

        let data = if simplify {
          serde_json::to_value(simplify_output(&result, None))
        } else {
          serde_json::to_value(&result)
        };
        Ok(data.unwrap_or(serde_json::Value::Null))
      }

      OperationDef::CreateLog {
        prompt_path,
        messages,
        response,
      } => {
        let messages = parse_messages(&messages);
        if messages.is_empty() {
          return Err(ErrorDetails::from_message("At least one message is required"));
        }

        // A blank response means "no response", not an empty one.
        let response = response
          .map(|text| text.trim().to_string())
          .filter(|text| !text.is_empty());
        debug!(
          execution_id,
          item = index,
          path = %prompt_path,
          messages = messages.len(),
          has_response = response.is_some(),
          "creating log"
        );

        let result = self
          .api
          .create_log(&prompt_path, messages, response)
          .await
          .map_err(ErrorDetails::from_client)?;

        Ok(serde_json::to_value(&result).unwrap_or(serde_json::Value::Null))
      }
    }
  }
}

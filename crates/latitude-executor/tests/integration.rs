//! Integration tests for latitude-executor using a scripted gateway.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use latitude_client::{
  ClientError, LatitudeApi, LogResult, Message, RunOptions, RunResponse, RunResult, TokenUsage,
};
use latitude_config::NodeDef;
use latitude_executor::NodeExecutor;

/// Scripted gateway: answers from canned data, fails whenever the prompt path
/// or conversation uuid contains "boom", and records every call it sees.
/// Clones share state, so tests can keep a handle while the executor owns one.
#[derive(Clone, Default)]
struct ScriptedApi {
  calls: Arc<Mutex<Vec<String>>>,
  log_responses: Arc<Mutex<Vec<Option<String>>>>,
}

impl ScriptedApi {
  fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  fn log_responses(&self) -> Vec<Option<String>> {
    self.log_responses.lock().unwrap().clone()
  }

  fn answer(target: &str) -> Result<RunResult, ClientError> {
    if target.contains("boom") {
      Err(ClientError::Api {
        message: "document not found".to_string(),
        error_code: Some("not_found_error".to_string()),
        status: Some(404),
      })
    } else {
      Ok(RunResult {
        uuid: format!("uuid-{}", target),
        conversation: vec![
          Message::text("user", "hi"),
          Message::text("assistant", "hello"),
        ],
        response: Some(RunResponse {
          text: Some(format!("reply for {}", target)),
          usage: Some(TokenUsage {
            prompt_tokens: 7,
            completion_tokens: 3,
            total_tokens: 10,
          }),
          ..RunResponse::default()
        }),
      })
    }
  }
}

#[async_trait]
impl LatitudeApi for ScriptedApi {
  async fn run_prompt(&self, path: &str, _options: RunOptions) -> Result<RunResult, ClientError> {
    self.calls.lock().unwrap().push(format!("run:{}", path));
    Self::answer(path)
  }

  async fn chat(
    &self,
    conversation_uuid: &str,
    messages: Vec<Message>,
  ) -> Result<RunResult, ClientError> {
    self
      .calls
      .lock()
      .unwrap()
      .push(format!("chat:{}:{}", conversation_uuid, messages.len()));
    Self::answer(conversation_uuid)
  }

  async fn create_log(
    &self,
    path: &str,
    messages: Vec<Message>,
    response: Option<String>,
  ) -> Result<LogResult, ClientError> {
    self
      .calls
      .lock()
      .unwrap()
      .push(format!("log:{}:{}", path, messages.len()));
    self.log_responses.lock().unwrap().push(response);

    Ok(LogResult {
      id: 311,
      uuid: "5f7c1c2d-9f6e-4d36-8a9b-3f1a2b4c5d6e".to_string(),
      document_uuid: "f0e1d2c3-b4a5-4678-9abc-def012345678".to_string(),
      commit_id: 12,
      resolved_content: String::new(),
      content_hash: String::new(),
      parameters: json!({}),
      custom_identifier: None,
      duration: None,
      source: "api".to_string(),
      created_at: "2025-01-07T10:00:00.000Z".to_string(),
      updated_at: "2025-01-07T10:00:00.000Z".to_string(),
    })
  }
}

fn node(definition: serde_json::Value) -> NodeDef {
  serde_json::from_value(definition).expect("node definition should parse")
}

#[tokio::test]
async fn test_continue_mode_emits_failure_records_and_keeps_going() {
  let api = ScriptedApi::default();
  let executor = NodeExecutor::new(api.clone());
  let node = node(json!({
    "operation": "run_prompt",
    "prompt_path": "{{ doc }}",
    "on_error": "continue"
  }));
  let items = [
    json!({"doc": "support/ok-1"}),
    json!({"doc": "support/boom"}),
    json!({"doc": "support/ok-2"}),
  ];

  let report = executor.execute(&node, &items).await;

  assert!(report.aborted.is_none());
  assert_eq!(report.records.len(), 3);
  assert!(report.records[0].is_success());
  assert!(!report.records[1].is_success());
  assert!(report.records[2].is_success());
  assert_eq!(api.calls().len(), 3);

  let encoded = serde_json::to_value(&report.records[1]).unwrap();
  assert_eq!(encoded["item"], json!(1));
  assert_eq!(encoded["error"], json!("document not found"));
  assert_eq!(encoded["error_code"], json!("not_found_error"));
  assert_eq!(encoded["status"], json!(404));
}

#[tokio::test]
async fn test_abort_mode_stops_at_first_failure() {
  let executor = NodeExecutor::new(ScriptedApi::default());
  let node = node(json!({
    "operation": "run_prompt",
    "prompt_path": "{{ doc }}"
  }));
  let items = [
    json!({"doc": "support/ok-1"}),
    json!({"doc": "support/boom"}),
    json!({"doc": "support/never-reached"}),
  ];

  let report = executor.execute(&node, &items).await;

  // The successful record before the failure is kept.
  assert_eq!(report.records.len(), 1);
  assert_eq!(report.records[0].item(), 0);

  let aborted = report.aborted.expect("run should have aborted");
  assert_eq!(aborted.item, 1);
  assert_eq!(aborted.error, "document not found");
  assert_eq!(aborted.status, Some(404));
}

#[tokio::test]
async fn test_abort_mode_never_dispatches_later_records() {
  let api = ScriptedApi::default();
  let executor = NodeExecutor::new(api.clone());
  let node = node(json!({
    "operation": "run_prompt",
    "prompt_path": "{{ doc }}"
  }));
  let items = [json!({"doc": "boom"}), json!({"doc": "after"})];

  let report = executor.execute(&node, &items).await;

  assert!(report.aborted.is_some());
  assert_eq!(api.calls(), vec!["run:boom"]);
  assert!(report.records.is_empty());
}

#[tokio::test]
async fn test_chat_requires_a_message_with_content() {
  let api = ScriptedApi::default();
  let executor = NodeExecutor::new(api.clone());
  let node = node(json!({
    "operation": "chat",
    "conversation_uuid": "c0ffee00-0000-4000-8000-000000000000",
    "messages": [
      {"role": "user", "content": "   "},
      {"role": "user", "content": ""}
    ],
    "on_error": "continue"
  }));

  let report = executor.execute(&node, &[json!({})]).await;

  assert_eq!(report.records.len(), 1);
  let encoded = serde_json::to_value(&report.records[0]).unwrap();
  assert_eq!(encoded["error"], json!("At least one message is required"));
  // Validation failures never reach the gateway.
  assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_chat_simplifies_by_default() {
  let executor = NodeExecutor::new(ScriptedApi::default());
  let node = node(json!({
    "operation": "chat",
    "conversation_uuid": "c0ffee00-0000-4000-8000-000000000000",
    "messages": [{"role": "user", "content": "and then?"}]
  }));

  let report = executor.execute(&node, &[json!({})]).await;

  assert_eq!(report.records.len(), 1);
  let encoded = serde_json::to_value(&report.records[0]).unwrap();
  let data = &encoded["data"];
  assert_eq!(
    data["uuid"],
    json!("uuid-c0ffee00-0000-4000-8000-000000000000")
  );
  assert_eq!(data["usage"]["totalTokens"], json!(10));
  // Simplified output has no conversation transcript.
  assert!(data.get("conversation").is_none());
}

#[tokio::test]
async fn test_full_output_when_simplify_is_disabled() {
  let executor = NodeExecutor::new(ScriptedApi::default());
  let node = node(json!({
    "operation": "run_prompt",
    "prompt_path": "support/ok",
    "simplify": false
  }));

  let report = executor.execute(&node, &[json!({})]).await;

  let encoded = serde_json::to_value(&report.records[0]).unwrap();
  let data = &encoded["data"];
  assert_eq!(data["conversation"].as_array().unwrap().len(), 2);
  assert_eq!(data["response"]["text"], json!("reply for support/ok"));
}

#[tokio::test]
async fn test_custom_identifier_appears_in_simplified_output() {
  let executor = NodeExecutor::new(ScriptedApi::default());
  let node = node(json!({
    "operation": "run_prompt",
    "prompt_path": "support/ok",
    "custom_identifier": "batch-{{ batch }}"
  }));

  let report = executor.execute(&node, &[json!({"batch": 7})]).await;

  let encoded = serde_json::to_value(&report.records[0]).unwrap();
  assert_eq!(encoded["data"]["customIdentifier"], json!("batch-7"));
}

#[tokio::test]
async fn test_create_log_trims_response_and_drops_blank() {
  let api = ScriptedApi::default();
  let executor = NodeExecutor::new(api.clone());
  let node = node(json!({
    "operation": "create_log",
    "prompt_path": "support/triage",
    "messages": [{"role": "user", "content": "My invoice is wrong."}],
    "response": "{{ outcome }}"
  }));
  let items = [
    json!({"outcome": "  routed to billing  "}),
    json!({"outcome": "   "}),
  ];

  let report = executor.execute(&node, &items).await;

  assert_eq!(report.records.len(), 2);
  assert!(report.records.iter().all(|record| record.is_success()));
  assert_eq!(
    api.log_responses(),
    vec![Some("routed to billing".to_string()), None]
  );
}

#[tokio::test]
async fn test_template_errors_respect_failure_mode() {
  let api = ScriptedApi::default();
  let executor = NodeExecutor::new(api.clone());
  let node = node(json!({
    "operation": "run_prompt",
    "prompt_path": "{{ doc",
    "on_error": "continue"
  }));

  let report = executor
    .execute(&node, &[json!({"doc": "x"}), json!({"doc": "y"})])
    .await;

  assert_eq!(report.records.len(), 2);
  assert!(report.records.iter().all(|record| !record.is_success()));
  let encoded = serde_json::to_value(&report.records[0]).unwrap();
  assert!(
    encoded["error"]
      .as_str()
      .unwrap()
      .starts_with("failed to resolve prompt_path"),
    "{}",
    encoded["error"]
  );
  assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_empty_input_produces_empty_report() {
  let executor = NodeExecutor::new(ScriptedApi::default());
  let node = node(json!({
    "operation": "run_prompt",
    "prompt_path": "support/ok"
  }));

  let report = executor.execute(&node, &[]).await;

  assert!(report.records.is_empty());
  assert!(report.aborted.is_none());
  assert!(!report.execution_id.is_empty());
}

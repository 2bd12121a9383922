//! Operation resolution using minijinja templates.
//!
//! Every user-facing string field of an operation may contain `{{ ... }}`
//! templates. Before dispatch, each field is rendered against the current
//! input record, so a single node definition can run with per-record values:
//!
//! ```json
//! {
//!   "operation": "run_prompt",
//!   "prompt_path": "onboarding/welcome",
//!   "parameters": [{ "name": "user_name", "value": "{{ name | title }}" }]
//! }
//! ```
//!
//! Fields missing from the record render as empty strings (minijinja's
//! undefined default); template syntax errors fail the record.

use minijinja::{Environment, Value};

use latitude_config::{MessageEntry, OperationDef, ParameterEntry};

use crate::error::ResolveError;

/// Render every template field of `operation` against `record`.
///
/// Non-string parameter values pass through untouched; only strings are
/// treated as templates. A plain string without `{{ }}` markers renders to
/// itself.
pub fn resolve_operation(
  operation: &OperationDef,
  record: &serde_json::Value,
) -> Result<OperationDef, ResolveError> {
  let env = Environment::new();
  let context = Value::from_serialize(record);

  match operation {
    OperationDef::RunPrompt {
      prompt_path,
      parameters,
      simplify,
      custom_identifier,
      version_uuid,
    } => Ok(OperationDef::RunPrompt {
      prompt_path: render(&env, "prompt_path", prompt_path, &context)?,
      parameters: parameters
        .iter()
        .map(|entry| resolve_parameter(&env, entry, &context))
        .collect::<Result<_, _>>()?,
      simplify: *simplify,
      custom_identifier: render_optional(&env, "custom_identifier", custom_identifier, &context)?,
      version_uuid: render_optional(&env, "version_uuid", version_uuid, &context)?,
    }),

    OperationDef::Chat {
      conversation_uuid,
      messages,
      simplify,
    } => Ok(OperationDef::Chat {
      conversation_uuid: render(&env, "conversation_uuid", conversation_uuid, &context)?,
      messages: resolve_messages(&env, messages, &context)?,
      simplify: *simplify,
    }),

    OperationDef::CreateLog {
      prompt_path,
      messages,
      response,
    } => Ok(OperationDef::CreateLog {
      prompt_path: render(&env, "prompt_path", prompt_path, &context)?,
      messages: resolve_messages(&env, messages, &context)?,
      response: render_optional(&env, "response", response, &context)?,
    }),
  }
}

fn render(
  env: &Environment,
  field: &'static str,
  template: &str,
  context: &Value,
) -> Result<String, ResolveError> {
  env
    .render_str(template, context.clone())
    .map_err(|error| ResolveError {
      field,
      message: error.to_string(),
    })
}

fn render_optional(
  env: &Environment,
  field: &'static str,
  template: &Option<String>,
  context: &Value,
) -> Result<Option<String>, ResolveError> {
  match template {
    Some(template) => render(env, field, template, context).map(Some),
    None => Ok(None),
  }
}

fn resolve_parameter(
  env: &Environment,
  entry: &ParameterEntry,
  context: &Value,
) -> Result<ParameterEntry, ResolveError> {
  let value = match &entry.value {
    serde_json::Value::String(template) => {
      let rendered =
        env
          .render_str(template, context.clone())
          .map_err(|error| ResolveError {
            field: "parameters",
            message: format!("parameter '{}': {}", entry.name, error),
          })?;
      serde_json::Value::String(rendered)
    }
    other => other.clone(),
  };

  Ok(ParameterEntry {
    name: entry.name.clone(),
    value,
  })
}

fn resolve_messages(
  env: &Environment,
  messages: &[MessageEntry],
  context: &Value,
) -> Result<Vec<MessageEntry>, ResolveError> {
  messages
    .iter()
    .enumerate()
    .map(|(index, entry)| {
      let content =
        env
          .render_str(&entry.content, context.clone())
          .map_err(|error| ResolveError {
            field: "messages",
            message: format!("message {}: {}", index + 1, error),
          })?;
      Ok(MessageEntry {
        role: entry.role,
        content,
      })
    })
    .collect()
}

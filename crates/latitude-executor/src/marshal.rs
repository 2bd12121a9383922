//! Marshaling of configured entries into gateway wire shapes.

use latitude_client::Message;
use latitude_config::{MessageEntry, ParameterEntry};

/// Convert parameter entries into the named-parameter map a prompt run takes.
///
/// Entries with an empty name are skipped. String values are trimmed;
/// everything else is passed through as-is. Later entries win on duplicate
/// names.
pub fn parse_parameters(entries: &[ParameterEntry]) -> serde_json::Map<String, serde_json::Value> {
  let mut parameters = serde_json::Map::new();

  for entry in entries {
    if entry.name.is_empty() {
      continue;
    }

    let value = match &entry.value {
      serde_json::Value::String(text) => serde_json::Value::String(text.trim().to_string()),
      other => other.clone(),
    };
    parameters.insert(entry.name.clone(), value);
  }

  parameters
}

/// Convert message entries into ordered wire messages.
///
/// Entries whose content is empty after trimming are dropped; the remaining
/// content is kept verbatim and wrapped as a single text block.
pub fn parse_messages(entries: &[MessageEntry]) -> Vec<Message> {
  entries
    .iter()
    .filter(|entry| !entry.content.trim().is_empty())
    .map(|entry| Message::text(entry.role.as_str(), entry.content.clone()))
    .collect()
}

//! Prompt content inspection.
//!
//! Prompts declare their inputs inline as `{{ placeholder }}` markers. These
//! helpers pull the placeholder names out of raw prompt content so callers can
//! see what a prompt expects without running it.

use std::sync::OnceLock;

use regex::Regex;

/// Matches `{{ name }}` placeholders: a letter or underscore, then letters,
/// digits, underscores, or hyphens. Whitespace inside the braces is ignored.
fn placeholder_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"(?i)\{\{\s*([a-z_][a-z0-9_-]*)\s*\}\}")
      .expect("placeholder pattern is a valid regex")
  })
}

/// Extract placeholder names from prompt content, first occurrence first,
/// duplicates removed.
pub fn extract_parameters(content: &str) -> Vec<String> {
  let mut names: Vec<String> = Vec::new();
  for captures in placeholder_pattern().captures_iter(content) {
    if let Some(name) = captures.get(1) {
      let name = name.as_str();
      if !names.iter().any(|existing| existing == name) {
        names.push(name.to_string());
      }
    }
  }
  names
}

/// Human-readable summary of a prompt's placeholders, for listings.
pub fn format_parameter_list(parameters: &[String]) -> String {
  if parameters.is_empty() {
    return "No parameters required".to_string();
  }

  let list = parameters
    .iter()
    .map(|name| format!("{{{{ {} }}}}", name))
    .collect::<Vec<_>>()
    .join(", ");
  format!("Required: {}", list)
}

//! Credential redaction for surfaced text.
//!
//! Gateway error messages occasionally echo request headers or key fragments
//! back at the caller. Anything key-shaped is replaced before a message is
//! logged or attached to a record.

use std::sync::OnceLock;

use regex::Regex;

const REDACTED: &str = "[REDACTED]";

/// Matches Latitude API keys (`lat_` followed by a long token) and generic
/// `api_key: ...` / `api-key=...` assignments.
fn key_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"(?i)(?:lat_[a-z0-9]{20,}|api[-_]?keys?\s*[:=]\s*[a-z0-9_-]{10,})")
      .expect("key pattern is a valid regex")
  })
}

/// Replace anything key-shaped in `text` with a fixed placeholder.
pub fn redact(text: &str) -> String {
  key_pattern().replace_all(text, REDACTED).into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_redacts_lat_keys() {
    let message = "401 unauthorized for key lat_0123456789abcdef0123456789";
    assert_eq!(redact(message), "401 unauthorized for key [REDACTED]");
  }

  #[test]
  fn test_redacts_key_assignments() {
    assert_eq!(redact("api_key: sk-abcdef123456"), "[REDACTED]");
    assert_eq!(redact("Api-Key=tok_0123456789"), "[REDACTED]");
    assert_eq!(
      redact("bad header apiKeys = secret_value_123 rejected"),
      "bad header [REDACTED] rejected"
    );
  }

  #[test]
  fn test_redacts_uppercase_keys() {
    let message = "denied: LAT_ABCDEF0123456789ABCDEF";
    assert_eq!(redact(message), "denied: [REDACTED]");
  }

  #[test]
  fn test_leaves_clean_text_alone() {
    let message = "document not found at path onboarding/welcome";
    assert_eq!(redact(message), message);
  }

  #[test]
  fn test_short_tokens_are_not_redacted() {
    // Too short to be a key; redacting these would mangle ordinary text.
    assert_eq!(redact("lat_abc"), "lat_abc");
    assert_eq!(redact("api_key: short"), "api_key: short");
  }
}

//! Execution errors.

use thiserror::Error;

/// Errors that abort a run before any record-level handling applies.
#[derive(Debug, Error)]
pub enum ExecutionError {
  /// Client construction failed. The underlying detail is logged (redacted);
  /// callers see only this generic message.
  #[error("failed to connect to Latitude: verify your credentials")]
  Connection,
}

/// A template field of the operation failed to resolve against the record.
#[derive(Debug, Error)]
#[error("failed to resolve {field}: {message}")]
pub struct ResolveError {
  /// Which operation field was being rendered.
  pub field: &'static str,
  pub message: String,
}

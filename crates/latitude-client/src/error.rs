//! Client errors and their flat projection for record output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::redact::redact;

/// Errors that can occur while talking to the Latitude gateway.
#[derive(Debug, Error)]
pub enum ClientError {
  /// Client construction failed (bad gateway URL, TLS setup).
  #[error("failed to initialize client: {message}")]
  Initialization { message: String },

  /// Transport-level failure: DNS, connect, or mid-body read.
  #[error("request failed: {source}")]
  Transport {
    #[from]
    source: reqwest::Error,
  },

  /// The gateway answered with a non-success status.
  #[error("gateway error: {message}")]
  Api {
    message: String,
    error_code: Option<String>,
    status: Option<u16>,
  },

  /// A success response did not match the expected shape.
  #[error("invalid {operation} response: {source}")]
  Decode {
    operation: &'static str,
    #[source]
    source: serde_json::Error,
  },
}

/// Flat error form attached to failed records: a message plus whatever the
/// gateway identified about the failure.
///
/// Construction redacts the message, so a shaped error is always safe to
/// serialize into record output or logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error_code: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<u16>,
}

impl ErrorDetails {
  /// Shape a validation or resolution failure. These carry no gateway
  /// metadata, only a message.
  pub fn from_message(message: impl Into<String>) -> Self {
    ErrorDetails {
      message: redact(&message.into()),
      error_code: None,
      status: None,
    }
  }

  /// Shape a client failure, keeping the error code and HTTP status when the
  /// gateway reported them.
  pub fn from_client(error: ClientError) -> Self {
    match error {
      ClientError::Api {
        message,
        error_code,
        status,
      } => ErrorDetails {
        message: redact(&message),
        error_code,
        status,
      },
      other => ErrorDetails {
        message: redact(&other.to_string()),
        error_code: None,
        status: None,
      },
    }
  }
}

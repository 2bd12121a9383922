//! HTTP plumbing for the Latitude gateway.
//!
//! Owns the reqwest client, the resolved gateway base, and the credential
//! header. Operation methods in [`crate::LatitudeClient`] build endpoint paths
//! and bodies on top of this.

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use latitude_config::Credentials;

use crate::error::ClientError;

/// Hosted gateway, used when credentials carry no override.
pub const DEFAULT_GATEWAY: &str = "https://gateway.latitude.so";

/// Version selector for endpoints that act on the published project state.
pub(crate) const LIVE_VERSION: &str = "live";

#[derive(Clone)]
pub(crate) struct Transport {
  http: reqwest::Client,
  /// Gateway origin, validated, without a trailing slash.
  gateway: String,
  api_key: String,
  project_id: i64,
}

// Manual Debug so the key never shows up through client debug output.
impl fmt::Debug for Transport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Transport")
      .field("gateway", &self.gateway)
      .field("project_id", &self.project_id)
      .field("api_key", &"***")
      .finish_non_exhaustive()
  }
}

impl Transport {
  pub(crate) fn new(credentials: &Credentials) -> Result<Self, ClientError> {
    let gateway = credentials
      .gateway_url
      .clone()
      .unwrap_or_else(|| DEFAULT_GATEWAY.to_string());
    let gateway = gateway.trim_end_matches('/').to_string();

    // Parse up front so a bad override fails at construction, not mid-run.
    Url::parse(&gateway).map_err(|error| ClientError::Initialization {
      message: format!("invalid gateway url '{}': {}", gateway, error),
    })?;

    let http = reqwest::Client::builder()
      .build()
      .map_err(|error| ClientError::Initialization {
        message: error.to_string(),
      })?;

    Ok(Transport {
      http,
      gateway,
      api_key: credentials.api_key.clone(),
      project_id: credentials.project_id,
    })
  }

  /// `{gateway}/api/v2/projects/{id}/versions/{version}` — the base every
  /// document endpoint hangs off.
  pub(crate) fn project_url(&self, version: Option<&str>) -> String {
    format!(
      "{}/api/v2/projects/{}/versions/{}",
      self.gateway,
      self.project_id,
      version.unwrap_or(LIVE_VERSION)
    )
  }

  pub(crate) fn conversation_url(&self, conversation_uuid: &str) -> String {
    format!(
      "{}/api/v2/conversations/{}/chat",
      self.gateway, conversation_uuid
    )
  }

  pub(crate) async fn post<T: DeserializeOwned>(
    &self,
    url: &str,
    body: &serde_json::Value,
    operation: &'static str,
  ) -> Result<T, ClientError> {
    debug!(operation, url, "gateway_request");
    let response = self
      .http
      .post(url)
      .bearer_auth(&self.api_key)
      .json(body)
      .send()
      .await?;
    Self::decode(response, operation).await
  }

  pub(crate) async fn get<T: DeserializeOwned>(
    &self,
    url: &str,
    operation: &'static str,
  ) -> Result<T, ClientError> {
    debug!(operation, url, "gateway_request");
    let response = self.http.get(url).bearer_auth(&self.api_key).send().await?;
    Self::decode(response, operation).await
  }

  async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    operation: &'static str,
  ) -> Result<T, ClientError> {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if !status.is_success() {
      return Err(api_error(status.as_u16(), &text));
    }

    serde_json::from_str(&text).map_err(|source| ClientError::Decode { operation, source })
  }
}

/// Error body the gateway sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  #[serde(default)]
  message: Option<String>,
  #[serde(rename = "errorCode", default)]
  error_code: Option<String>,
  #[serde(default)]
  name: Option<String>,
}

/// Turn a non-success response into a structured error, falling back to the
/// raw body (or the bare status) when the body is not the documented shape.
fn api_error(status: u16, body: &str) -> ClientError {
  let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
  let (message, error_code) = match parsed {
    Some(body_fields) => (
      body_fields.message.or(body_fields.name),
      body_fields.error_code,
    ),
    None => (None, None),
  };

  let message = message
    .unwrap_or_else(|| body.trim().to_string())
    .trim()
    .to_string();
  let message = if message.is_empty() {
    format!("gateway returned status {}", status)
  } else {
    message
  };

  ClientError::Api {
    message,
    error_code,
    status: Some(status),
  }
}

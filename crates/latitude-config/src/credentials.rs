use std::fmt;

use serde::Deserialize;

/// Credentials for the Latitude gateway.
///
/// Read from the environment or a local file. There is no `Serialize` impl and
/// `Debug` masks the key, so credential values never travel back out through
/// logs or record output.
#[derive(Clone, Deserialize)]
pub struct Credentials {
  /// Latitude API key (`lat_...`).
  pub api_key: String,
  /// Numeric id of the project the node operates on.
  pub project_id: i64,
  /// Override for the gateway base URL. Self-hosted instances set this;
  /// everyone else gets the hosted gateway.
  #[serde(default)]
  pub gateway_url: Option<String>,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("api_key", &"***")
      .field("project_id", &self.project_id)
      .field("gateway_url", &self.gateway_url)
      .finish()
  }
}

//! Runtime configuration for the remote endpoints and ship semantics.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port the warehouse server listens on unless configured otherwise.
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Endpoint addresses and ship-flow behavior, supplied by the embedder.
///
/// `server_addr` is used verbatim (the operator types it; it is not
/// validated as a well-formed address). `optimistic_status` controls
/// whether a ship flips the stored entry to `Xuất` before the endpoints
/// confirm — on by default, matching how the list screen has always shown
/// an order as shipped the moment the button is pressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Host or IP of the warehouse server on the local network.
    pub server_addr: String,

    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Fixed webhook URL of the spreadsheet service.
    pub spreadsheet_url: String,

    #[serde(default = "default_optimistic")]
    pub optimistic_status: bool,
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

fn default_optimistic() -> bool {
    true
}

impl SyncConfig {
    /// Builds a config with default port and optimistic shipping.
    pub fn new(server_addr: impl Into<String>, spreadsheet_url: impl Into<String>) -> Self {
        Self {
            server_addr: server_addr.into(),
            server_port: DEFAULT_SERVER_PORT,
            spreadsheet_url: spreadsheet_url.into(),
            optimistic_status: true,
        }
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

//! Server settings loaded via OrthoConfig.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings controlling where the server listens and how records persist.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HBNB")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Directory holding `<entity>.json` data files.
    pub data_dir: Option<PathBuf>,
    /// Load existing records from `data_dir` before serving.
    #[ortho_config(default = false)]
    pub seed_on_startup: bool,
    /// Append every created record to its data file.
    #[ortho_config(default = false)]
    pub record_creates: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the address is malformed.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|error| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {error}"),
            )
        })
    }

    /// Data directory required by seeding or recording.
    ///
    /// Returns `Ok(None)` when neither feature is enabled.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when a feature needs the
    /// directory but none is configured.
    pub fn required_data_dir(&self) -> io::Result<Option<&Path>> {
        if !self.seed_on_startup && !self.record_creates {
            return Ok(None);
        }
        self.data_dir.as_deref().map(Some).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "HBNB_DATA_DIR must be set when seeding or recording is enabled",
            )
        })
    }
}

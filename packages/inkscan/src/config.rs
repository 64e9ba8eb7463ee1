//! Service settings resolved from the environment and command line.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::cli::DEFAULT_MODEL_DIR;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub const PORT_VAR: &str = "PORT";
pub const HOST_VAR: &str = "INKSCAN_HOST";
pub const MODEL_DIR_VAR: &str = "INKSCAN_MODEL_DIR";
pub const MAX_UPLOAD_VAR: &str = "INKSCAN_MAX_UPLOAD_BYTES";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid port {0:?}")]
    InvalidPort(String),
    #[error("invalid host {0:?}")]
    InvalidHost(String),
    #[error("invalid upload limit {0:?}")]
    InvalidUploadLimit(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub model_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Languages the service engine is built for.
    pub languages: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            languages: vec!["en".to_string()],
        }
    }
}

impl ServiceConfig {
    /// Resolves settings from the process environment.
    ///
    /// The port comes from `PORT`, then the positional argument, then 8081.
    pub fn from_env(cli_port: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve(cli_port, |key| std::env::var(key).ok())
    }

    pub fn resolve<F>(cli_port: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PORT_VAR).or_else(|| cli_port.map(str::to_string)) {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
        }

        if let Some(raw) = lookup(HOST_VAR) {
            config.host = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(raw.clone()))?;
        }

        if let Some(raw) = lookup(MODEL_DIR_VAR) {
            config.model_dir = PathBuf::from(raw);
        }

        if let Some(raw) = lookup(MAX_UPLOAD_VAR) {
            config.max_upload_bytes = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidUploadLimit(raw.clone()))?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "DermaScan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reported by the health endpoint.
pub const MODEL_TYPE: &str = "Pre-trained CNN";

/// Side length of the square image grid the classifier was trained on.
pub const IMAGE_SIZE: u32 = 150;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_MODEL_PATH: &str = "models/skin_disease_model.onnx";
/// 16 MB, enough for full-resolution phone photos.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

const ENV_HOST: &str = "DERMASCAN_HOST";
const ENV_PORT: &str = "DERMASCAN_PORT";
const ENV_MODEL_PATH: &str = "DERMASCAN_MODEL_PATH";
const ENV_REFERENCE_PATH: &str = "DERMASCAN_REFERENCE_PATH";
const ENV_MAX_UPLOAD_BYTES: &str = "DERMASCAN_MAX_UPLOAD_BYTES";

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "dermascan_lib=info,dermascan=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Classifier artifact loaded before the listener is bound.
    pub model_path: PathBuf,
    /// JSON reference table replacing the bundled one, if set.
    pub reference_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            reference_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset keys keep
    /// their defaults; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_HOST) {
            config.host = parse_var(ENV_HOST, &value)?;
        }
        if let Some(value) = get(ENV_PORT) {
            config.port = parse_var(ENV_PORT, &value)?;
        }
        if let Some(value) = get(ENV_MODEL_PATH) {
            config.model_path = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_REFERENCE_PATH) {
            config.reference_path = Some(PathBuf::from(value));
        }
        if let Some(value) = get(ENV_MAX_UPLOAD_BYTES) {
            config.max_upload_bytes = parse_var(ENV_MAX_UPLOAD_BYTES, &value)?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATA_FILE: &str = "data/applications.json";
const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_file: PathBuf,
    /// `*` allows any origin.
    pub cors_allowed_origin: String,
    pub max_request_body_mb: usize,
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            cors_allowed_origin: "*".to_string(),
            max_request_body_mb: 1,
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "port number",
                value,
            })?,
            None => defaults.port,
        };

        let max_request_body_mb = match lookup("MAX_REQUEST_BODY_MB") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|mb| mb.checked_mul(BYTES_PER_MB).is_some())
                .ok_or(ConfigError::Invalid {
                    name: "MAX_REQUEST_BODY_MB",
                    expected: "size in megabytes",
                    value,
                })?,
            None => defaults.max_request_body_mb,
        };

        Ok(Self {
            port,
            data_file: lookup("DATA_FILE")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN")
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.cors_allowed_origin),
            max_request_body_mb,
            static_dir: lookup("STATIC_DIR")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.max_request_body_mb.saturating_mul(BYTES_PER_MB)
    }
}

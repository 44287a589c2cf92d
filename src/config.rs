use std::path::PathBuf;
use std::str::FromStr;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingRequired { field: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the model and scaler artifacts
    pub artifact_dir: PathBuf,
    /// Directory served under `/static`, must contain `index.html`
    pub static_dir: PathBuf,
    /// Number of HTTP workers; `None` lets actix pick one per CPU
    pub workers: Option<usize>,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            artifact_dir: PathBuf::from("artifacts"),
            static_dir: PathBuf::from("static"),
            workers: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "host".to_string(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: self.port.to_string(),
                reason: "must be between 1 and 65535".to_string(),
            });
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "workers".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> ConfigResult<log::LevelFilter> {
        log::LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::InvalidValue {
            field: "log_level".to_string(),
            value: self.log_level.clone(),
            reason: "expected one of off, error, warn, info, debug, trace".to_string(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

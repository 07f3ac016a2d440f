use std::path::PathBuf;
use std::str::FromStr;

use crate::{env_opt, env_or};

/// Console output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Logging setup.
///
/// - `LOG_LEVEL`: default filter for this service's crates (default `info`);
///   `RUST_LOG` still overrides everything when set
/// - `LOG_FORMAT`: `compact` or `json`
/// - `LOG_DIR`: when set, structured JSON logs are also written to a daily-rotated file there
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: env_or("LOG_FORMAT", LogFormat::Compact),
            log_dir: env_opt("LOG_DIR").map(PathBuf::from),
        }
    }
}

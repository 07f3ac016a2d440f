//! # Sentinel Config
//!
//! Configuration types for the Sentinel token service.
//!
//! Every structure here is loaded from environment variables with sensible
//! development defaults. Binaries call `dotenvy::dotenv()` first so a local
//! `.env` file is honoured.
//!
//! - [`jwt`]: signing algorithm, key material and token lifetimes
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: credential gate throttling
//! - [`logging`]: log level, format and optional file output
//! - [`server`]: bind address and database URL
//!
//! # Example
//!
//! ```ignore
//! use sentinel_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod logging;
pub mod rate_limit;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

use std::str::FromStr;

/// Reads `key` from the environment and parses it, falling back to `default`
/// when the variable is unset or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads `key` from the environment, treating blank values as unset.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

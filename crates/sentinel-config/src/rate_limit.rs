//! Throttling for the credential gate.
//!
//! The login route is the only place a caller can test passwords, so it is
//! guarded by a keyed token bucket (one bucket per client address).
//!
//! - `RATE_LIMIT_AUTH_PER_SECOND`: tokens replenished per second (default 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket capacity (default 5)
//! - `RATE_LIMIT_TRUST_PROXY`: key on `x-forwarded-for` / `x-real-ip` before the
//!   peer address (default `false`). Only enable behind a proxy that overwrites
//!   those headers; clients can set them freely.

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests per second replenished for each client on auth endpoints.
    pub auth_per_second: u32,
    /// Maximum burst a single client can spend at once.
    pub auth_burst_size: u32,
    /// Trust client-address headers set by a reverse proxy.
    pub trust_proxy_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_per_second: 10,
            auth_burst_size: 5,
            trust_proxy_headers: false,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
            trust_proxy_headers: env_or("RATE_LIMIT_TRUST_PROXY", defaults.trust_proxy_headers),
        }
    }
}

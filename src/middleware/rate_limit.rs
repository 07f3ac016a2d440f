use std::net::SocketAddr;
use std::num::NonZeroU32;

use anyhow::anyhow;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use sentinel_config::RateLimitConfig;
use tracing::warn;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Tracked clients before idle buckets are swept.
const SWEEP_THRESHOLD: usize = 10_000;

/// Per-client token bucket guarding the login route.
pub struct LoginRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    trust_proxy_headers: bool,
}

impl LoginRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let per_second = NonZeroU32::new(config.auth_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.auth_burst_size).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(per_second).allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            trust_proxy_headers: config.trust_proxy_headers,
        }
    }

    pub fn trusts_proxy_headers(&self) -> bool {
        self.trust_proxy_headers
    }

    /// Spends one cell from `client`'s bucket. `false` means over the limit.
    pub fn check(&self, client: &str) -> bool {
        if self.limiter.len() > SWEEP_THRESHOLD {
            self.limiter.retain_recent();
        }
        self.limiter.check_key(&client.to_string()).is_ok()
    }

    /// Bucket key for a request. See [`client_key`].
    pub fn key_for(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        client_key(headers, peer, self.trust_proxy_headers)
    }
}

/// First `x-forwarded-for` hop, then `x-real-ip`.
fn forwarded_client(headers: &HeaderMap) -> Option<&str> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for").or_else(|| header("x-real-ip"))
}

/// Client key for the login bucket.
///
/// The peer IP is used unless `trust_proxy_headers` is set, in which case the
/// proxy headers win and the peer is the fallback. `"unknown"` only appears
/// when the server runs without connect info.
pub fn client_key(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_proxy_headers: bool,
) -> String {
    if let Some(client) = trust_proxy_headers.then(|| forwarded_client(headers)).flatten() {
        return client.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn limit_login_attempts(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = state.login_limiter.key_for(req.headers(), peer);

    if !state.login_limiter.check(&client) {
        warn!(client = %client, "login rate limit exceeded");
        return Err(AppError::too_many_requests(anyhow!(
            "Too many login attempts, please try again later"
        )));
    }

    Ok(next.run(req).await)
}

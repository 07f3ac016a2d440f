use std::sync::Arc;

use sentinel_auth::{
    AuthError, BcryptHasher, ClaimsCodec, ExpiryPolicy, PasswordHasher, TokenFactory,
    TokenKind, TokenValidator,
};
use sentinel_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
use sentinel_db::{InMemoryUserStore, PgUserStore, UserRepository, init_pool, run_migrations};
use tracing::{info, warn};

use crate::middleware::rate_limit::LoginRateLimiter;

/// Shared handles passed to every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: TokenFactory,
    pub validator: TokenValidator,
    pub cors_config: CorsConfig,
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    /// Wires the token layer from configuration around the given backends.
    ///
    /// Fails on unusable key material or token lifetimes, so a bad
    /// configuration stops the server at startup instead of at first login.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        jwt_config: &JwtConfig,
        cors_config: CorsConfig,
        rate_limit_config: &RateLimitConfig,
    ) -> Result<Self, AuthError> {
        let codec = Arc::new(ClaimsCodec::from_config(jwt_config)?);
        let policy = ExpiryPolicy::from_config(jwt_config)?;

        Ok(Self {
            users,
            hasher,
            tokens: TokenFactory::new(codec.clone(), policy),
            validator: TokenValidator::new(codec),
            cors_config,
            login_limiter: Arc::new(LoginRateLimiter::new(rate_limit_config)),
        })
    }
}

/// Builds the state from the environment, connecting to Postgres when
/// `DATABASE_URL` is set and falling back to an in-memory store otherwise.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_shared_secret() && jwt_config.is_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let users: Arc<dyn UserRepository> = match &server_config.database_url {
        Some(url) => {
            let pool = init_pool(url).await?;
            run_migrations(&pool).await?;
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set; users are kept in memory and lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let state = AppState::new(
        users,
        Arc::new(BcryptHasher::default()),
        &jwt_config,
        CorsConfig::from_env(),
        &RateLimitConfig::from_env(),
    )?;

    let policy = state.tokens.policy();
    info!(
        algorithm = %jwt_config.algorithm,
        access_minutes = policy.lifetime(TokenKind::Access).num_minutes(),
        refresh_days = policy.lifetime(TokenKind::Refresh).num_days(),
        trust_proxy_headers = state.login_limiter.trusts_proxy_headers(),
        "token service configured"
    );

    Ok(state)
}

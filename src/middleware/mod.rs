//! Request extractors and middleware.
//!
//! - [`auth`]: bearer token extractors bound to a token kind
//! - [`rate_limit`]: per-client throttling of the login route
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AccessUser` / `RefreshUser` extracts the token and runs the validation
//!    pipeline for its kind
//! 3. The handler receives the resolved identity and the token's claims
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AccessUser;
//!
//! async fn whoami(user: AccessUser) -> String {
//!     user.identity().username.clone()
//! }
//! ```

pub mod auth;
pub mod rate_limit;

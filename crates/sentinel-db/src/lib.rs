//! # Sentinel DB
//!
//! User storage for the Sentinel API.
//!
//! - [`PgUserStore`]: PostgreSQL via SQLx, with an embedded migration
//! - [`InMemoryUserStore`]: process-local store for development and tests
//!
//! Both implement [`UserRepository`], which extends the read-only
//! [`UserStore`](sentinel_auth::UserStore) the token layer consumes with the
//! write operations registration and the CLI need.
//!
//! # Example
//!
//! ```ignore
//! use sentinel_db::{init_pool, run_migrations, PgUserStore};
//!
//! let pool = init_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! let users = PgUserStore::new(pool);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::DbError;
pub use memory::InMemoryUserStore;
pub use postgres::{PgUserStore, init_pool, run_migrations};
pub use repository::{NewUser, UserRepository};

//! Shared utilities.
//!
//! - [`errors`]: the HTTP error type and its mapping from auth and storage failures

pub mod errors;

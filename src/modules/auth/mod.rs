//! Credential login, token refresh and registration.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

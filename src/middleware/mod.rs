//! Request middleware: token authentication for the protected route group.

pub mod auth;

pub use auth::{require_auth, AuthUser, Identity};

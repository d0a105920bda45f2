//! # Gatherly Shared Library
//!
//! This crate contains shared types, utilities, and business logic used across
//! the Gatherly API server: database models, authentication primitives, and
//! the two decision-logic engines of the platform.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Authentication and authorization utilities
//! - `db`: Connection pool management
//! - `rsvp`: RSVP set manager (attendee membership toggling)
//! - `recommend`: Recommendation scorer (pure ranking function)

pub mod auth;
pub mod db;
pub mod models;
pub mod recommend;
pub mod rsvp;

/// Current version of the Gatherly shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

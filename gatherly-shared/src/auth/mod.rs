/// Authentication and authorization utilities
///
/// This module provides the secure primitives Gatherly's HTTP layer builds on:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Axum middleware that turns a bearer token into an
///   [`middleware::AuthContext`]
/// - [`policy`]: Resource-level mutation checks (who may edit an event)
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with configurable expiration
/// - **Constant-time Comparison**: Password verification uses constant-time
///   operations

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;

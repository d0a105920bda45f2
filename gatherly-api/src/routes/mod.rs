/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, refresh)
/// - `users`: Profile endpoints
/// - `events`: Event CRUD, RSVP toggling, and recommendations

pub mod auth;
pub mod events;
pub mod health;
pub mod users;

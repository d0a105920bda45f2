/// Database models for Gatherly
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts with interest/skill profiles
/// - `event`: Event listings with tags and attendee sets
///
/// # Example
///
/// ```no_run
/// use gatherly_shared::models::user::{User, CreateUser};
/// use gatherly_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     name: Some("Ada".to_string()),
///     interests: vec!["ai".to_string()],
///     skills: vec!["rust".to_string()],
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod event;
pub mod user;

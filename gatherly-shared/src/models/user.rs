/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing user
/// accounts. Besides credentials, a user carries two tag lists, `interests`
/// and `skills`, which feed the recommendation scorer.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     name VARCHAR(255),
///     interests TEXT[] NOT NULL DEFAULT '{}',
///     skills TEXT[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User model representing a user account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
/// Users are never deleted; accounts only accumulate.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,

    /// Interest tags used for event recommendations
    pub interests: Vec<String>,

    /// Skill tags used for event recommendations
    pub skills: Vec<String>,

    /// When the user account was created
    pub created_at: DateTime<Utc>,

    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,

    /// When the user last logged in (None if never logged in)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,

    /// Interest tags
    pub interests: Vec<String>,

    /// Skill tags
    pub skills: Vec<String>,
}

/// Input for updating an existing user profile
///
/// All fields are optional; only non-None fields are written. This is a
/// fixed allow-list; a request body cannot inject columns that are not
/// named here (notably `password_hash` and `email`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name
    pub name: Option<String>,

    /// Replacement interest tags
    pub interests: Option<Vec<String>>,

    /// Replacement skill tags
    pub skills: Option<Vec<String>>,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, interests, skills)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, password_hash, name, interests, skills,
                      created_at, updated_at, last_login_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.name)
        .bind(data.interests)
        .bind(data.skills)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns the user if found, None otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, interests, skills,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Returns the user if found, None otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, interests, skills,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates an existing user profile
    ///
    /// Only non-None fields in `data` are written. The `updated_at` timestamp
    /// is always refreshed.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the update statement from the allow-listed fields only
        let mut query = String::from("UPDATE users SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.interests.is_some() {
            bind_count += 1;
            query.push_str(&format!(", interests = ${}", bind_count));
        }
        if data.skills.is_some() {
            bind_count += 1;
            query.push_str(&format!(", skills = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, email, password_hash, name, interests, skills, \
             created_at, updated_at, last_login_at",
        );

        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(interests) = data.interests {
            q = q.bind(interests);
        }
        if let Some(skills) = data.skills {
            q = q.bind(skills);
        }

        let user = q.fetch_optional(pool).await?;

        Ok(user)
    }

    /// Updates the last login timestamp for a user
    ///
    /// Called after successful authentication.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            name: Some("Test User".to_string()),
            interests: vec!["ai".to_string(), "music".to_string()],
            skills: vec!["python".to_string()],
        };

        assert_eq!(create_user.email, "test@example.com");
        assert_eq!(create_user.interests.len(), 2);
    }

    #[test]
    fn test_update_user_default_is_empty() {
        let update = UpdateUser::default();
        assert!(update.name.is_none());
        assert!(update.interests.is_none());
        assert!(update.skills.is_none());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: None,
            interests: vec![],
            skills: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }
}

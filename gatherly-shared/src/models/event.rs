/// Event model and database operations
///
/// An event has a single `category` tag, an opaque `mode` string
/// (in-person/online/hybrid), and a free-form list of `tags`. Tags are
/// lower-cased on the way in; duplicates are not rejected. Attendee
/// membership lives in the `rsvps` table and is managed by the
/// [`crate::rsvp`] module.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE events (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     category TEXT NOT NULL,
///     mode TEXT NOT NULL,
///     tags TEXT[] NOT NULL DEFAULT '{}',
///     starts_at TIMESTAMPTZ NOT NULL,
///     organizer_id UUID REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Event listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    /// Unique event ID (UUID v4)
    pub id: Uuid,

    /// Event title
    pub title: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Single category tag, stored verbatim
    pub category: String,

    /// Event mode (e.g. "in-person", "online", "hybrid"), treated as opaque
    pub mode: String,

    /// Free-form tags, lower-cased at write time
    pub tags: Vec<String>,

    /// When the event takes place
    pub starts_at: DateTime<Utc>,

    /// Organizing user; weak reference, events outlive their organizer
    pub organizer_id: Option<Uuid>,

    /// When the event was created
    pub created_at: DateTime<Utc>,

    /// When the event was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub mode: String,
    pub tags: Vec<String>,
    pub starts_at: DateTime<Utc>,
    pub organizer_id: Option<Uuid>,
}

/// Input for updating an existing event
///
/// Fixed allow-list of updatable fields; only non-None fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub mode: Option<String>,
    pub tags: Option<Vec<String>>,
    pub starts_at: Option<DateTime<Utc>>,
}

/// Exact-match filters for listing events
///
/// Values are passed through to storage verbatim; no case normalization
/// is applied here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    /// Match events with exactly this category
    pub category: Option<String>,

    /// Match events with exactly this mode
    pub mode: Option<String>,

    /// Match events whose tag list contains exactly this tag
    pub tag: Option<String>,
}

/// Lower-cases a tag list, preserving order and duplicates.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().map(|t| t.to_lowercase()).collect()
}

impl Event {
    /// Creates a new event. Tags are lower-cased before storage.
    pub async fn create(pool: &PgPool, data: CreateEvent) -> Result<Self, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, category, mode, tags, starts_at, organizer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, category, mode, tags, starts_at,
                      organizer_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.category)
        .bind(data.mode)
        .bind(normalize_tags(data.tags))
        .bind(data.starts_at)
        .bind(data.organizer_id)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    /// Finds an event by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, category, mode, tags, starts_at,
                   organizer_id, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(event)
    }

    /// Lists events matching the filter, soonest first
    ///
    /// Absent filter fields match everything; present fields are exact,
    /// case-sensitive matches.
    pub async fn list(pool: &PgPool, filter: &EventFilter) -> Result<Vec<Self>, sqlx::Error> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, category, mode, tags, starts_at,
                   organizer_id, created_at, updated_at
            FROM events
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR mode = $2)
              AND ($3::text IS NULL OR $3 = ANY(tags))
            ORDER BY starts_at ASC
            "#,
        )
        .bind(filter.category.as_deref())
        .bind(filter.mode.as_deref())
        .bind(filter.tag.as_deref())
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Updates an event from the allow-listed fields
    ///
    /// Returns the updated event, or None if no event has this ID.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateEvent,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE events SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.category.is_some() {
            bind_count += 1;
            query.push_str(&format!(", category = ${}", bind_count));
        }
        if data.mode.is_some() {
            bind_count += 1;
            query.push_str(&format!(", mode = ${}", bind_count));
        }
        if data.tags.is_some() {
            bind_count += 1;
            query.push_str(&format!(", tags = ${}", bind_count));
        }
        if data.starts_at.is_some() {
            bind_count += 1;
            query.push_str(&format!(", starts_at = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, category, mode, tags, \
             starts_at, organizer_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Event>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(category) = data.category {
            q = q.bind(category);
        }
        if let Some(mode) = data.mode {
            q = q.bind(mode);
        }
        if let Some(tags) = data.tags {
            q = q.bind(normalize_tags(tags));
        }
        if let Some(starts_at) = data.starts_at {
            q = q.bind(starts_at);
        }

        let event = q.fetch_optional(pool).await?;

        Ok(event)
    }

    /// Deletes an event by ID
    ///
    /// RSVP rows are removed by the `ON DELETE CASCADE` on the rsvps table.
    /// Returns true if an event was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
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
    fn test_normalize_tags_lowercases() {
        let tags = normalize_tags(vec!["AI".to_string(), "Music".to_string()]);
        assert_eq!(tags, vec!["ai", "music"]);
    }

    #[test]
    fn test_normalize_tags_keeps_duplicates() {
        // Dedup is intentionally not enforced at write time
        let tags = normalize_tags(vec!["rust".to_string(), "Rust".to_string()]);
        assert_eq!(tags, vec!["rust", "rust"]);
    }

    #[test]
    fn test_update_event_default_is_empty() {
        let update = UpdateEvent::default();
        assert!(update.title.is_none());
        assert!(update.tags.is_none());
        assert!(update.starts_at.is_none());
    }
}

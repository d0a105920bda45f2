/// RSVP set manager
///
/// Maintains, per event, the set of attending user identities. A single
/// operation, [`toggle`], flips membership: present becomes absent, absent
/// becomes present. Toggling is idempotent per call; calling it twice returns
/// the set to its original state.
///
/// # Storage model
///
/// Attendee membership is a row in the `rsvps` table with primary key
/// `(event_id, user_id)`. The composite key makes duplicate membership
/// impossible regardless of how many toggles race, and row-level
/// delete/insert means two concurrent toggles by different users on the same
/// event cannot overwrite each other's membership, which is the failure mode
/// of a read-then-overwrite attendee array.
///
/// # Example
///
/// ```no_run
/// use gatherly_shared::rsvp;
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, event_id: Uuid, user_id: Uuid) -> Result<(), rsvp::RsvpError> {
/// let outcome = rsvp::toggle(&pool, event_id, user_id).await?;
/// println!("{}: {} attending", outcome.action.as_str(), outcome.count);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Error type for RSVP operations
#[derive(Debug, thiserror::Error)]
pub enum RsvpError {
    /// The event being toggled does not exist
    #[error("Event {0} not found")]
    EventNotFound(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What a toggle did to the attendee set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpAction {
    /// The user was not attending and is now added
    Added,

    /// The user was attending and is now removed
    Removed,
}

impl RsvpAction {
    /// Gets the action as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpAction::Added => "added",
            RsvpAction::Removed => "removed",
        }
    }
}

/// Result of an RSVP toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpOutcome {
    /// Whether the toggle added or removed the user
    pub action: RsvpAction,

    /// Size of the attendee set after the toggle
    pub count: i64,
}

/// Membership flip decision: present -> removed, absent -> added.
fn flip(was_member: bool) -> RsvpAction {
    if was_member {
        RsvpAction::Removed
    } else {
        RsvpAction::Added
    }
}

/// Toggles RSVP membership for a user on an event
///
/// The read-modify-write runs inside a single transaction. The DELETE both
/// removes the row and reports whether it existed, so membership is observed
/// and mutated in one statement rather than checked first and written later.
///
/// # Errors
///
/// - [`RsvpError::EventNotFound`] if no event has this ID
/// - [`RsvpError::Database`] on storage failure
pub async fn toggle(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<RsvpOutcome, RsvpError> {
    let mut tx = pool.begin().await?;

    let (event_exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;

    if !event_exists {
        return Err(RsvpError::EventNotFound(event_id));
    }

    let deleted = sqlx::query("DELETE FROM rsvps WHERE event_id = $1 AND user_id = $2")
        .bind(event_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let action = flip(deleted > 0);

    if action == RsvpAction::Added {
        // ON CONFLICT keeps a racing duplicate insert harmless; the
        // composite primary key guarantees at most one row per user.
        sqlx::query(
            "INSERT INTO rsvps (event_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rsvps WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(
        event_id = %event_id,
        user_id = %user_id,
        action = action.as_str(),
        count,
        "RSVP toggled"
    );

    Ok(RsvpOutcome { action, count })
}

/// Lists the attendee set of an event, oldest RSVP first
///
/// # Errors
///
/// Returns an error if database connection fails
pub async fn attendees(pool: &PgPool, event_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows: Vec<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT user_id
        FROM rsvps
        WHERE event_id = $1
        ORDER BY created_at ASC, user_id ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_flip_alternates() {
        assert_eq!(flip(false), RsvpAction::Added);
        assert_eq!(flip(true), RsvpAction::Removed);
    }

    #[test]
    fn test_flip_is_involutive_over_a_set() {
        // Two sequential toggles return the set to its original state and
        // the reported actions alternate added, removed.
        let user = Uuid::new_v4();
        let mut set: HashSet<Uuid> = HashSet::new();

        let first = flip(set.contains(&user));
        assert_eq!(first, RsvpAction::Added);
        set.insert(user);
        assert_eq!(set.len(), 1);

        let second = flip(set.contains(&user));
        assert_eq!(second, RsvpAction::Removed);
        set.remove(&user);
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_never_holds_duplicates() {
        let user = Uuid::new_v4();
        let mut set: HashSet<Uuid> = HashSet::new();

        for _ in 0..7 {
            if flip(set.contains(&user)) == RsvpAction::Added {
                set.insert(user);
            } else {
                set.remove(&user);
            }
            assert!(set.len() <= 1);
        }
        // Odd number of toggles leaves the user attending exactly once
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_action_wire_format() {
        assert_eq!(
            serde_json::to_string(&RsvpAction::Added).unwrap(),
            "\"added\""
        );
        assert_eq!(
            serde_json::to_string(&RsvpAction::Removed).unwrap(),
            "\"removed\""
        );
        assert_eq!(RsvpAction::Added.as_str(), "added");
        assert_eq!(RsvpAction::Removed.as_str(), "removed");
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = RsvpOutcome {
            action: RsvpAction::Added,
            count: 1,
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["action"], "added");
        assert_eq!(json["count"], 1);
    }
}

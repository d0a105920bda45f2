/// Authorization policy for event mutation
///
/// Event updates and deletes go through a single policy check rather than
/// ad-hoc comparisons in handlers. The current policy is organizer-only: the
/// actor must be the user who created the event. An event whose organizer
/// reference has been cleared has no editor.

use uuid::Uuid;

use crate::models::event::Event;

/// Error type for policy checks
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Actor is not allowed to modify this resource
    #[error("Not authorized to modify this event")]
    NotAuthorized,
}

/// Checks whether an actor may modify an event
///
/// Organizer-only: returns true when the event's organizer reference equals
/// the actor's ID.
pub fn can_modify(actor_id: Uuid, event: &Event) -> bool {
    event.organizer_id == Some(actor_id)
}

/// Policy check that fails with [`PolicyError::NotAuthorized`]
///
/// Convenience wrapper for the event-mutation path.
pub fn require_can_modify(actor_id: Uuid, event: &Event) -> Result<(), PolicyError> {
    if can_modify(actor_id, event) {
        Ok(())
    } else {
        Err(PolicyError::NotAuthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event_owned_by(organizer_id: Option<Uuid>) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "meetup".to_string(),
            description: None,
            category: "tech".to_string(),
            mode: "in-person".to_string(),
            tags: vec![],
            starts_at: Utc::now(),
            organizer_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_organizer_can_modify() {
        let organizer = Uuid::new_v4();
        let event = event_owned_by(Some(organizer));

        assert!(can_modify(organizer, &event));
        assert!(require_can_modify(organizer, &event).is_ok());
    }

    #[test]
    fn test_other_user_cannot_modify() {
        let event = event_owned_by(Some(Uuid::new_v4()));
        let stranger = Uuid::new_v4();

        assert!(!can_modify(stranger, &event));
        assert!(require_can_modify(stranger, &event).is_err());
    }

    #[test]
    fn test_orphaned_event_has_no_editor() {
        let event = event_owned_by(None);
        assert!(!can_modify(Uuid::new_v4(), &event));
    }
}

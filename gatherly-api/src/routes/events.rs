/// Event endpoints
///
/// Event CRUD plus the two decision-logic operations of the platform:
/// RSVP toggling and recommendations. Handlers stay thin: they resolve
/// identity and records, then call into `gatherly_shared::rsvp` and
/// `gatherly_shared::recommend`.
///
/// # Endpoints
///
/// - `GET    /v1/events` - List events (filterable by category/mode/tag)
/// - `POST   /v1/events` - Create event (authenticated)
/// - `GET    /v1/events/:id` - Fetch one event with its attendee set
/// - `PUT    /v1/events/:id` - Update event (organizer only)
/// - `DELETE /v1/events/:id` - Delete event (organizer only)
/// - `POST   /v1/events/:id/rsvp` - Toggle RSVP for the caller
/// - `GET    /v1/events/recommendations/:user_id` - Ranked recommendations

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use gatherly_shared::{
    auth::{middleware::AuthContext, policy},
    models::event::{CreateEvent, Event, EventFilter, UpdateEvent},
    models::user::User,
    recommend::{self, ScoredEvent},
    rsvp::{self, RsvpOutcome},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Event creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Event title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Single category tag
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: String,

    /// Event mode (in-person/online/hybrid), stored verbatim
    #[validate(length(min = 1, message = "Mode must not be empty"))]
    pub mode: String,

    /// Free-form tags; lower-cased at storage
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the event takes place
    pub starts_at: DateTime<Utc>,
}

/// Event update request (allow-listed fields only)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,

    #[validate(length(min = 1, message = "Mode must not be empty"))]
    pub mode: Option<String>,

    pub tags: Option<Vec<String>>,

    pub starts_at: Option<DateTime<Utc>>,
}

/// Single event response with its attendee set
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// The event record
    #[serde(flatten)]
    pub event: Event,

    /// User IDs currently attending
    pub attendees: Vec<Uuid>,
}

/// List events, optionally filtered
///
/// Filter values (`category`, `mode`, `tag`) are exact, case-sensitive
/// matches passed through to storage.
pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> ApiResult<Json<Vec<Event>>> {
    let events = Event::list(&state.db, &filter).await?;

    Ok(Json(events))
}

/// Create a new event
///
/// The verified caller becomes the organizer.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    req.validate()?;

    let event = Event::create(
        &state.db,
        CreateEvent {
            title: req.title,
            description: req.description,
            category: req.category,
            mode: req.mode,
            tags: req.tags,
            starts_at: req.starts_at,
            organizer_id: Some(auth.user_id),
        },
    )
    .await?;

    tracing::info!(event_id = %event.id, organizer_id = %auth.user_id, "Event created");

    Ok((StatusCode::CREATED, Json(event)))
}

/// Fetch a single event with its attendee set
///
/// # Errors
///
/// - `404 Not Found`: No event has this ID
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<EventResponse>> {
    let event = Event::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let attendees = rsvp::attendees(&state.db, id).await?;

    Ok(Json(EventResponse { event, attendees }))
}

/// Update an event (organizer only)
///
/// # Errors
///
/// - `404 Not Found`: No event has this ID
/// - `403 Forbidden`: Caller is not the organizer
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> ApiResult<Json<Event>> {
    req.validate()?;

    let existing = Event::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    policy::require_can_modify(auth.user_id, &existing)?;

    let update = UpdateEvent {
        title: req.title,
        description: req.description,
        category: req.category,
        mode: req.mode,
        tags: req.tags,
        starts_at: req.starts_at,
    };

    let event = Event::update(&state.db, id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}

/// Delete an event (organizer only)
///
/// # Errors
///
/// - `404 Not Found`: No event has this ID
/// - `403 Forbidden`: Caller is not the organizer
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let existing = Event::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    policy::require_can_modify(auth.user_id, &existing)?;

    Event::delete(&state.db, id).await?;

    tracing::info!(event_id = %id, "Event deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle RSVP for the verified caller
///
/// Flips the caller's membership in the event's attendee set and returns
/// what happened plus the new attendee count:
///
/// ```json
/// { "action": "added", "count": 12 }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No event has this ID
pub async fn toggle_rsvp(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RsvpOutcome>> {
    let outcome = rsvp::toggle(&state.db, id, auth.user_id).await?;

    Ok(Json(outcome))
}

/// Ranked event recommendations for a user
///
/// Loads the user's interest/skill profile and the event catalog, then runs
/// the pure scorer: score descending, earlier start time breaking ties,
/// at most 20 results, each annotated with its score.
///
/// # Errors
///
/// - `404 Not Found`: No user has this ID
pub async fn recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ScoredEvent>>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let events = Event::list(&state.db, &EventFilter::default()).await?;

    let ranked = recommend::recommend(&user.interests, &user.skills, events);

    Ok(Json(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_default_is_empty() {
        let req = UpdateEventRequest::default();
        assert!(req.title.is_none());
        assert!(req.tags.is_none());
    }

    #[test]
    fn test_create_request_rejects_empty_title() {
        let req = CreateEventRequest {
            title: "".to_string(),
            description: None,
            category: "tech".to_string(),
            mode: "online".to_string(),
            tags: vec![],
            starts_at: Utc::now(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_event_response_flattens_event_fields() {
        let event = Event {
            id: Uuid::new_v4(),
            title: "rustconf watch party".to_string(),
            description: None,
            category: "tech".to_string(),
            mode: "hybrid".to_string(),
            tags: vec!["rust".to_string()],
            starts_at: Utc::now(),
            organizer_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let attendee = Uuid::new_v4();

        let json = serde_json::to_value(&EventResponse {
            event,
            attendees: vec![attendee],
        })
        .unwrap();

        assert_eq!(json["title"], "rustconf watch party");
        assert_eq!(json["attendees"][0], attendee.to_string());
    }
}

/// Recommendation scorer
///
/// Ranks the event catalog against a user's declared interests and skills.
/// This is a pure function of (user profile, event catalog): no state, no
/// I/O, and the same inputs always yield the same ordered output. The HTTP
/// layer resolves the user and loads the catalog before calling in.
///
/// # Scoring
///
/// All terms are compared lower-cased. An event's tags form a set, so a tag
/// repeated on the event counts once; a term repeated in the user's profile
/// counts each time it matches.
///
/// ```text
/// score(event) = 2 * |interests ∩ tags| + 1 * |skills ∩ tags|
/// ```
///
/// Results are sorted by descending score, ties broken by ascending event
/// start time (earliest first), and truncated to [`MAX_RESULTS`].

use std::collections::HashSet;

use serde::Serialize;

use crate::models::event::Event;

/// Maximum number of recommendations returned
pub const MAX_RESULTS: usize = 20;

/// An event annotated with its ephemeral relevance score
///
/// The score exists only in the response; it is never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredEvent {
    /// The candidate event
    #[serde(flatten)]
    pub event: Event,

    /// Relevance score for the requesting user
    pub score: i64,
}

/// Scores a single event against lower-cased interest and skill terms.
fn score_event(interests: &[String], skills: &[String], event: &Event) -> i64 {
    let tags: HashSet<String> = event.tags.iter().map(|t| t.to_lowercase()).collect();

    let interest_hits = interests.iter().filter(|t| tags.contains(*t)).count() as i64;
    let skill_hits = skills.iter().filter(|t| tags.contains(*t)).count() as i64;

    2 * interest_hits + skill_hits
}

/// Ranks events for a user profile
///
/// Returns at most [`MAX_RESULTS`] events, highest score first; equal scores
/// are ordered by start time, earliest first. The sort is stable, so the
/// output is fully determined by the inputs. An empty catalog yields an
/// empty result.
///
/// # Example
///
/// ```
/// use gatherly_shared::recommend::recommend;
///
/// let ranked = recommend(&["ai".to_string()], &[], vec![]);
/// assert!(ranked.is_empty());
/// ```
pub fn recommend(interests: &[String], skills: &[String], events: Vec<Event>) -> Vec<ScoredEvent> {
    let interests: Vec<String> = interests.iter().map(|t| t.to_lowercase()).collect();
    let skills: Vec<String> = skills.iter().map(|t| t.to_lowercase()).collect();

    let mut scored: Vec<ScoredEvent> = events
        .into_iter()
        .map(|event| {
            let score = score_event(&interests, &skills, &event);
            ScoredEvent { event, score }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.event.starts_at.cmp(&b.event.starts_at))
    });
    scored.truncate(MAX_RESULTS);

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn event_with_tags(tags: &[&str], offset_hours: i64) -> Event {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();
        Event {
            id: Uuid::new_v4(),
            title: "test event".to_string(),
            description: None,
            category: "general".to_string(),
            mode: "online".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            starts_at: base + Duration::hours(offset_hours),
            organizer_id: None,
            created_at: base,
            updated_at: base,
        }
    }

    fn terms(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_score_weights_interests_twice_skills() {
        let event = event_with_tags(&["ai", "python"], 0);
        let score = score_event(&terms(&["ai"]), &terms(&["python"]), &event);
        assert_eq!(score, 3);
    }

    #[test]
    fn test_score_is_case_insensitive_over_event_tags() {
        let event = event_with_tags(&["AI", "Python"], 0);
        // Terms arrive already lower-cased from recommend()
        let score = score_event(&terms(&["ai"]), &terms(&["python"]), &event);
        assert_eq!(score, 3);
    }

    #[test]
    fn test_repeated_event_tags_count_once() {
        let event = event_with_tags(&["ai", "ai", "ai"], 0);
        let score = score_event(&terms(&["ai"]), &[], &event);
        assert_eq!(score, 2);
    }

    #[test]
    fn test_repeated_profile_terms_each_count() {
        let event = event_with_tags(&["ai"], 0);
        let score = score_event(&terms(&["ai", "ai"]), &[], &event);
        assert_eq!(score, 4);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let event = event_with_tags(&["cooking"], 0);
        let score = score_event(&terms(&["ai"]), &terms(&["python"]), &event);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let ranked = recommend(&terms(&["ai"]), &terms(&["python"]), vec![]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_score_serialized_alongside_event_fields() {
        let ranked = recommend(&terms(&["ai"]), &[], vec![event_with_tags(&["ai"], 0)]);
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["score"], 2);
        assert_eq!(json["title"], "test event");
    }
}

/// Property tests for the recommendation scorer
///
/// The scorer is a pure function, so these tests run without any
/// infrastructure: build a catalog, rank it, assert on the order.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gatherly_shared::models::event::Event;
use gatherly_shared::recommend::{recommend, MAX_RESULTS};
use uuid::Uuid;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 19, 0, 0).unwrap()
}

fn event(title: &str, tags: &[&str], starts_at: DateTime<Utc>) -> Event {
    Event {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        category: "general".to_string(),
        mode: "online".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        starts_at,
        organizer_id: None,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

fn terms(ts: &[&str]) -> Vec<String> {
    ts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn ranking_is_deterministic() {
    let catalog: Vec<Event> = (0..10)
        .map(|i| {
            event(
                &format!("event-{}", i),
                if i % 2 == 0 { &["ai"] } else { &["music"] },
                base_time() + Duration::hours(i),
            )
        })
        .collect();

    let first = recommend(&terms(&["ai", "music"]), &terms(&["python"]), catalog.clone());
    let second = recommend(&terms(&["ai", "music"]), &terms(&["python"]), catalog);

    let first_ids: Vec<Uuid> = first.iter().map(|s| s.event.id).collect();
    let second_ids: Vec<Uuid> = second.iter().map(|s| s.event.id).collect();
    assert_eq!(first_ids, second_ids);

    let first_scores: Vec<i64> = first.iter().map(|s| s.score).collect();
    let second_scores: Vec<i64> = second.iter().map(|s| s.score).collect();
    assert_eq!(first_scores, second_scores);
}

#[test]
fn equal_scores_tie_break_on_earlier_start() {
    let later = event("later", &["ai"], base_time() + Duration::hours(5));
    let earlier = event("earlier", &["ai"], base_time());

    // Deliberately pass the later event first
    let ranked = recommend(&terms(&["ai"]), &[], vec![later, earlier]);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].event.title, "earlier");
    assert_eq!(ranked[1].event.title, "later");
    assert_eq!(ranked[0].score, ranked[1].score);
}

#[test]
fn results_truncate_at_twenty() {
    let catalog: Vec<Event> = (0..30)
        .map(|i| event(&format!("event-{}", i), &["ai"], base_time() + Duration::hours(i)))
        .collect();

    let ranked = recommend(&terms(&["ai"]), &[], catalog);

    assert_eq!(ranked.len(), MAX_RESULTS);
    assert_eq!(ranked.len(), 20);
    assert!(ranked.iter().all(|s| s.score > 0));
    // Within a constant score band, earliest events survive the cut
    assert_eq!(ranked[0].event.title, "event-0");
    assert_eq!(ranked[19].event.title, "event-19");
}

#[test]
fn interest_and_skill_overlap_order_events() {
    // interests=["ai","music"], skills=["python"]:
    //   A(tags=["ai","python"]) -> 2 + 1 = 3
    //   B(tags=["music"])       -> 2
    //   C(tags=[])              -> 0
    // B starts before A; score order still wins.
    let t1 = base_time() + Duration::days(2);
    let t2 = base_time() + Duration::days(1);
    let t3 = base_time() + Duration::days(3);

    let a = event("a", &["ai", "python"], t1);
    let b = event("b", &["music"], t2);
    let c = event("c", &[], t3);

    let ranked = recommend(&terms(&["ai", "music"]), &terms(&["python"]), vec![c, b, a]);

    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].event.title, "a");
    assert_eq!(ranked[0].score, 3);
    assert_eq!(ranked[1].event.title, "b");
    assert_eq!(ranked[1].score, 2);
    assert_eq!(ranked[2].event.title, "c");
    assert_eq!(ranked[2].score, 0);
}

#[test]
fn profile_terms_match_mixed_case_event_tags() {
    let e = event("caps", &["Rust", "WebDev"], base_time());

    let ranked = recommend(&terms(&["RUST"]), &terms(&["webdev"]), vec![e]);

    assert_eq!(ranked[0].score, 3);
}

#[test]
fn empty_profile_scores_everything_zero_but_still_ranks() {
    let first = event("first", &["ai"], base_time());
    let second = event("second", &["music"], base_time() + Duration::hours(1));

    let ranked = recommend(&[], &[], vec![second, first]);

    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|s| s.score == 0));
    // Zero-score events still come back ordered by start time
    assert_eq!(ranked[0].event.title, "first");
}

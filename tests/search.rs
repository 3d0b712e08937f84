mod common;

use chrono::{DateTime, TimeZone, Utc};

use matchday_live::provider::RawTeamSearchEntry;
use matchday_live::search::{SearchOptions, merge_listings, search_at};

use common::{FakeApi, fixture};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn team_entry(id: u64, name: &str) -> RawTeamSearchEntry {
    serde_json::from_value(serde_json::json!({ "team": { "id": id, "name": name } }))
        .expect("valid team entry")
}

#[test]
fn includes_scheduled_fixture_within_default_window() {
    let api = FakeApi {
        day: Some(vec![fixture(
            100,
            "2026-10-19T17:00:00+00:00",
            "NS",
            "Arsenal",
            "Chelsea",
        )]),
        ..FakeApi::default()
    };

    let results = search_at(&api, "Arsenal", &SearchOptions::default(), now());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 100);
    assert_eq!(results[0].status, "NS");
    assert_eq!(results[0].league, "Premier League");
    assert!(api.calls().contains(&"date=2026-10-19".to_string()));
}

#[test]
fn live_listing_overrides_day_entry_for_same_id() {
    let api = FakeApi {
        day: Some(vec![
            fixture(1, "2026-10-19T11:30:00+00:00", "NS", "Arsenal", "Chelsea"),
            fixture(2, "2026-10-19T13:00:00+00:00", "NS", "Leeds", "Arsenal"),
        ]),
        live: Some(vec![
            fixture(1, "2026-10-19T11:30:00+00:00", "1H", "Arsenal", "Chelsea"),
            fixture(3, "2026-10-19T10:00:00+00:00", "2H", "Arsenal U21", "Spurs U21"),
        ]),
        ..FakeApi::default()
    };

    let results = search_at(&api, "arsenal", &SearchOptions::default(), now());

    let ids = results.iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(results[0].status, "1H");
}

#[test]
fn merge_keeps_first_position_and_appends_new_ids() {
    let day = vec![
        fixture(5, "2026-10-19T11:00:00+00:00", "NS", "A", "B"),
        fixture(6, "2026-10-19T11:00:00+00:00", "NS", "C", "D"),
    ];
    let live = vec![
        fixture(7, "2026-10-19T11:00:00+00:00", "1H", "E", "F"),
        fixture(5, "2026-10-19T11:00:00+00:00", "2H", "A", "B"),
    ];

    let merged = merge_listings(day, live);

    let ids = merged.iter().map(|f| f.id()).collect::<Vec<_>>();
    assert_eq!(ids, [5, 6, 7]);
    assert_eq!(merged[0].status(), "2H");
}

#[test]
fn in_progress_fixture_ignores_time_window() {
    let api = FakeApi {
        day: Some(vec![
            // kicked off long ago but still being played
            fixture(10, "2026-10-19T02:00:00+00:00", "ET", "Boca Juniors", "River Plate"),
            // same age, already finished
            fixture(11, "2026-10-19T02:00:00+00:00", "FT", "Boca Juniors II", "Velez"),
            // far in the future
            fixture(12, "2026-10-20T11:00:00+00:00", "NS", "Boca Juniors", "Racing"),
        ]),
        ..FakeApi::default()
    };

    let results = search_at(&api, "boca", &SearchOptions::default(), now());

    let ids = results.iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids, [10]);
}

#[test]
fn window_hours_and_skip_window_widen_results() {
    let api = FakeApi {
        day: Some(vec![
            fixture(20, "2026-10-19T21:00:00+00:00", "NS", "Ajax", "PSV"),
            fixture(21, "2026-10-19T06:00:00+00:00", "FT", "Ajax", "AZ"),
        ]),
        ..FakeApi::default()
    };

    let default = search_at(&api, "ajax", &SearchOptions::default(), now());
    assert!(default.is_empty());

    let wider = SearchOptions {
        window_hours: Some(12),
        ..SearchOptions::default()
    };
    let results = search_at(&api, "ajax", &wider, now());
    assert_eq!(results.iter().map(|r| r.id).collect::<Vec<_>>(), [20]);

    let skip = SearchOptions {
        skip_window: true,
        ..SearchOptions::default()
    };
    let results = search_at(&api, "ajax", &skip, now());
    assert_eq!(results.iter().map(|r| r.id).collect::<Vec<_>>(), [20, 21]);
}

#[test]
fn matches_league_name_case_insensitively() {
    let api = FakeApi {
        day: Some(vec![fixture(
            30,
            "2026-10-19T13:00:00+00:00",
            "NS",
            "Everton",
            "Fulham",
        )]),
        ..FakeApi::default()
    };

    let results = search_at(&api, "PREMIER", &SearchOptions::default(), now());

    assert_eq!(results.len(), 1);
}

#[test]
fn failing_source_degrades_to_the_other() {
    let api = FakeApi {
        day: None,
        live: Some(vec![fixture(
            40,
            "2026-10-19T11:00:00+00:00",
            "1H",
            "Arsenal",
            "Chelsea",
        )]),
        ..FakeApi::default()
    };

    let results = search_at(&api, "Arsenal", &SearchOptions::default(), now());

    assert_eq!(results.iter().map(|r| r.id).collect::<Vec<_>>(), [40]);
}

#[test]
fn include_live_false_skips_live_listing() {
    let api = FakeApi {
        live: Some(vec![fixture(
            41,
            "2026-10-19T11:00:00+00:00",
            "1H",
            "Arsenal",
            "Chelsea",
        )]),
        ..FakeApi::default()
    };
    let opts = SearchOptions {
        include_live: false,
        ..SearchOptions::default()
    };

    let _ = search_at(&api, "Arsenal", &opts, now());

    assert!(!api.calls().contains(&"live=all".to_string()));
}

#[test]
fn falls_back_to_next_fixture_of_matching_team() {
    let api = FakeApi {
        teams: Some(vec![team_entry(42, "Arsenal")]),
        next: Some(vec![fixture(
            205,
            "2026-10-25T15:00:00+00:00",
            "NS",
            "Arsenal",
            "Liverpool",
        )]),
        ..FakeApi::default()
    };

    let results = search_at(&api, "  Arsenal ", &SearchOptions::default(), now());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 205);
    let calls = api.calls();
    assert!(calls.contains(&"teams=Arsenal".to_string()));
    assert!(calls.contains(&"team=42&next=1".to_string()));
}

#[test]
fn fallback_failures_yield_no_results() {
    let api = FakeApi {
        teams: None,
        ..FakeApi::default()
    };
    assert!(search_at(&api, "Nowhere FC", &SearchOptions::default(), now()).is_empty());

    let api = FakeApi {
        teams: Some(vec![team_entry(9, "Nowhere FC")]),
        next: Some(Vec::new()),
        ..FakeApi::default()
    };
    assert!(search_at(&api, "Nowhere FC", &SearchOptions::default(), now()).is_empty());
}

#[test]
fn short_queries_make_no_upstream_calls() {
    let api = FakeApi::default();

    assert!(search_at(&api, " a ", &SearchOptions::default(), now()).is_empty());
    assert!(api.calls().is_empty());
}

#[test]
fn aliases_are_resolved_before_matching() {
    let api = FakeApi {
        day: Some(vec![fixture(
            50,
            "2026-10-19T13:00:00+00:00",
            "NS",
            "St. Louis City",
            "Austin",
        )]),
        ..FakeApi::default()
    };

    let results = search_at(&api, "St Louis", &SearchOptions::default(), now());

    assert_eq!(results.iter().map(|r| r.id).collect::<Vec<_>>(), [50]);
}

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use matchday_live::error::FetchError;
use matchday_live::fixtures_fetch::{decode_records_strict, parse_envelope};
use matchday_live::provider::{
    FixturesApi, RawEvent, RawFixture, RawLineup, RawTeamSearchEntry, RawTeamStats,
};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

pub fn load_records<T: DeserializeOwned>(name: &str) -> Vec<T> {
    let raw = read_fixture(name);
    let items = parse_envelope(200, &raw).expect("fixture envelope should parse");
    decode_records_strict(items, name).expect("fixture records should decode")
}

pub fn raw_fixture(value: Value) -> RawFixture {
    serde_json::from_value(value).expect("valid raw fixture")
}

/// Minimal provider fixture record.
pub fn fixture(id: u64, kickoff: &str, status: &str, home: &str, away: &str) -> RawFixture {
    raw_fixture(serde_json::json!({
        "fixture": {
            "id": id,
            "date": kickoff,
            "status": { "short": status, "elapsed": null }
        },
        "league": { "name": "Premier League" },
        "teams": { "home": { "id": 1, "name": home }, "away": { "id": 2, "name": away } },
        "goals": { "home": null, "away": null }
    }))
}

/// In-memory provider. A `None` source fails with a transport error.
///
/// `by_id_body`, when set, is a raw provider body that the fixture lookup decodes
/// the way the HTTP client does.
pub struct FakeApi {
    pub day: Option<Vec<RawFixture>>,
    pub live: Option<Vec<RawFixture>>,
    pub by_id: Option<Vec<RawFixture>>,
    pub by_id_body: Option<String>,
    pub events: Option<Vec<RawEvent>>,
    pub statistics: Option<Vec<RawTeamStats>>,
    pub lineups: Option<Vec<RawLineup>>,
    pub teams: Option<Vec<RawTeamSearchEntry>>,
    pub next: Option<Vec<RawFixture>>,
    pub calls: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            day: Some(Vec::new()),
            live: Some(Vec::new()),
            by_id: Some(Vec::new()),
            by_id_body: None,
            events: Some(Vec::new()),
            statistics: Some(Vec::new()),
            lineups: Some(Vec::new()),
            teams: Some(Vec::new()),
            next: Some(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

fn answer<T: Clone>(source: &Option<Vec<T>>) -> Result<Vec<T>, FetchError> {
    source
        .clone()
        .ok_or_else(|| FetchError::Transport("connection refused".to_string()))
}

impl FixturesApi for FakeApi {
    fn fixtures_by_date(&self, date: NaiveDate) -> Result<Vec<RawFixture>, FetchError> {
        self.record(format!("date={date}"));
        answer(&self.day)
    }

    fn live_fixtures(&self) -> Result<Vec<RawFixture>, FetchError> {
        self.record("live=all".to_string());
        answer(&self.live)
    }

    fn fixtures_by_id(&self, id: u64) -> Result<Vec<RawFixture>, FetchError> {
        self.record(format!("id={id}"));
        match &self.by_id_body {
            Some(body) => decode_records_strict(parse_envelope(200, body)?, "fixtures"),
            None => answer(&self.by_id),
        }
    }

    fn fixture_events(&self, id: u64) -> Result<Vec<RawEvent>, FetchError> {
        self.record(format!("events={id}"));
        answer(&self.events)
    }

    fn fixture_statistics(&self, id: u64) -> Result<Vec<RawTeamStats>, FetchError> {
        self.record(format!("statistics={id}"));
        answer(&self.statistics)
    }

    fn fixture_lineups(&self, id: u64) -> Result<Vec<RawLineup>, FetchError> {
        self.record(format!("lineups={id}"));
        answer(&self.lineups)
    }

    fn search_teams(&self, name: &str) -> Result<Vec<RawTeamSearchEntry>, FetchError> {
        self.record(format!("teams={name}"));
        answer(&self.teams)
    }

    fn next_fixtures_for_team(
        &self,
        team_id: u64,
        count: u32,
    ) -> Result<Vec<RawFixture>, FetchError> {
        self.record(format!("team={team_id}&next={count}"));
        answer(&self.next)
    }
}

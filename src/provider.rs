//! Upstream record shapes and the seam the core fetches through.
//!
//! The structs mirror the provider's JSON closely (nested `{player: {...}}` wrappers,
//! teams referenced by id and name). Only [`crate::normalize`] reads them.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;

#[derive(Debug, Clone, Deserialize)]
pub struct RawFixture {
    pub fixture: RawFixtureInfo,
    #[serde(default)]
    pub league: RawLeague,
    #[serde(default)]
    pub teams: RawTeams,
    #[serde(default)]
    pub goals: RawGoals,
    pub events: Option<Vec<RawEvent>>,
    pub lineups: Option<Vec<RawLineup>>,
    pub statistics: Option<Vec<RawTeamStats>>,
}

impl RawFixture {
    pub fn id(&self) -> u64 {
        self.fixture.id
    }

    pub fn status(&self) -> &str {
        self.fixture.status.short.as_deref().unwrap_or_default()
    }

    pub fn kickoff(&self) -> &str {
        self.fixture.date.as_deref().unwrap_or_default()
    }

    pub fn league_name(&self) -> &str {
        self.league.name.as_deref().unwrap_or_default()
    }

    pub fn home_name(&self) -> &str {
        self.teams.home.name.as_deref().unwrap_or_default()
    }

    pub fn away_name(&self) -> &str {
        self.teams.away.name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFixtureInfo {
    pub id: u64,
    pub date: Option<String>,
    #[serde(default)]
    pub status: RawStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatus {
    pub short: Option<String>,
    pub elapsed: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLeague {
    pub id: Option<u64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeams {
    #[serde(default)]
    pub home: RawTeamRef,
    #[serde(default)]
    pub away: RawTeamRef,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeamRef {
    pub id: Option<u64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGoals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEventTime {
    pub elapsed: Option<i32>,
    pub extra: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPersonRef {
    pub id: Option<u64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub time: RawEventTime,
    #[serde(default)]
    pub team: RawTeamRef,
    pub player: Option<RawPersonRef>,
    pub assist: Option<RawPersonRef>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub detail: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineup {
    #[serde(default)]
    pub team: RawTeamRef,
    pub formation: Option<String>,
    pub coach: Option<RawPersonRef>,
    #[serde(rename = "startXI")]
    pub start_xi: Option<Vec<RawPlayerEntry>>,
    pub substitutes: Option<Vec<RawPlayerEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayerEntry {
    pub player: RawPlayer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayer {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub number: Option<u32>,
    pub pos: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeamStats {
    #[serde(default)]
    pub team: RawTeamRef,
    pub statistics: Option<Vec<RawStatEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStatEntry {
    #[serde(rename = "type", default)]
    pub stat_type: Option<String>,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeamSearchEntry {
    #[serde(default)]
    pub team: RawTeamRef,
}

/// Read-only view of the fixtures provider.
///
/// Every call returns the provider's result array (possibly empty) or a [`FetchError`].
/// Implementations must be shareable across threads: search and details fan out.
pub trait FixturesApi: Sync {
    fn fixtures_by_date(&self, date: NaiveDate) -> Result<Vec<RawFixture>, FetchError>;

    fn live_fixtures(&self) -> Result<Vec<RawFixture>, FetchError>;

    fn fixtures_by_id(&self, id: u64) -> Result<Vec<RawFixture>, FetchError>;

    fn fixture_events(&self, id: u64) -> Result<Vec<RawEvent>, FetchError>;

    fn fixture_statistics(&self, id: u64) -> Result<Vec<RawTeamStats>, FetchError>;

    fn fixture_lineups(&self, id: u64) -> Result<Vec<RawLineup>, FetchError>;

    fn search_teams(&self, name: &str) -> Result<Vec<RawTeamSearchEntry>, FetchError>;

    fn next_fixtures_for_team(&self, team_id: u64, count: u32)
    -> Result<Vec<RawFixture>, FetchError>;
}

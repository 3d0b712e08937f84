use std::collections::HashMap;

use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, Local, TimeZone};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_WINDOW_HOURS, clamp_window_hours};
use crate::error::FetchError;
use crate::model::MatchSummary;
use crate::normalize::summarize_fixture;
use crate::provider::{FixturesApi, RawFixture};

const LIVE_LOOKBACK_HOURS: i64 = 3;
const MIN_QUERY_LEN: usize = 2;

pub const PRE_MATCH_STATUSES: [&str; 5] = ["NS", "TBD", "PST", "CANC", "SUSP"];
pub const FINISHED_STATUSES: [&str; 3] = ["FT", "AET", "PEN"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Hours ahead of now to include; defaults to 6, clamped to 1..=72.
    pub window_hours: Option<u32>,
    pub include_live: bool,
    /// Ignore kickoff time entirely; only the name filter and live override apply.
    pub skip_window: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            window_hours: None,
            include_live: true,
            skip_window: false,
        }
    }
}

pub fn search<A>(api: &A, query: &str, opts: &SearchOptions) -> Vec<MatchSummary>
where
    A: FixturesApi + ?Sized,
{
    search_at(api, query, opts, Local::now())
}

/// Fixtures matching `query` by league or team name, from today's schedule merged
/// with the live listing. Falls back to the best-matching team's next fixture.
///
/// Source failures degrade to "no fixtures from that source"; this never errors.
pub fn search_at<A, Tz>(
    api: &A,
    query: &str,
    opts: &SearchOptions,
    now: DateTime<Tz>,
) -> Vec<MatchSummary>
where
    A: FixturesApi + ?Sized,
    Tz: TimeZone,
{
    let q = normalize_search_query(query);
    if q.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let date = now.date_naive();
    let (day, live) = rayon::join(
        || api.fixtures_by_date(date),
        || {
            if opts.include_live {
                api.live_fixtures()
            } else {
                Ok(Vec::new())
            }
        },
    );
    let day = or_empty(day, "day listing");
    let live = or_empty(live, "live listing");
    let merged = merge_listings(day, live);

    let now = now.fixed_offset();
    let window_hours = clamp_window_hours(opts.window_hours.unwrap_or(DEFAULT_WINDOW_HOURS));
    let results: Vec<MatchSummary> = merged
        .iter()
        .filter(|f| is_eligible(f, &q, now, window_hours, opts.skip_window))
        .map(summarize_fixture)
        .collect();

    info!(query = %q, candidates = merged.len(), matched = results.len(), "search");
    if !results.is_empty() {
        return results;
    }

    match next_fixture_fallback(api, query.trim()) {
        Ok(Some(summary)) => vec![summary],
        Ok(None) => Vec::new(),
        Err(err) => {
            debug!(query = %q, error = %err, "team fallback failed");
            Vec::new()
        }
    }
}

/// Lower-cases and trims a query, mapping known aliases to the name the provider uses.
pub fn normalize_search_query(query: &str) -> String {
    let q = query.trim().to_lowercase();
    match q.as_str() {
        "st. louis city" | "st louis city" | "st. louis" | "st louis" => "louis city".to_string(),
        _ => q,
    }
}

/// Merges by fixture id. Later listings replace earlier entries in place; ids not seen
/// before are appended.
pub fn merge_listings(day: Vec<RawFixture>, live: Vec<RawFixture>) -> Vec<RawFixture> {
    let mut out: Vec<RawFixture> = Vec::with_capacity(day.len() + live.len());
    let mut index: HashMap<u64, usize> = HashMap::new();
    for fixture in day.into_iter().chain(live) {
        match index.get(&fixture.id()) {
            Some(&pos) => out[pos] = fixture,
            None => {
                index.insert(fixture.id(), out.len());
                out.push(fixture);
            }
        }
    }
    out
}

/// Kicked off and not yet finished, whatever the kickoff time says.
pub fn is_in_progress(status: &str) -> bool {
    !(PRE_MATCH_STATUSES.contains(&status) || FINISHED_STATUSES.contains(&status))
}

fn is_eligible(
    fixture: &RawFixture,
    q: &str,
    now: DateTime<FixedOffset>,
    window_hours: u32,
    skip_window: bool,
) -> bool {
    let kickoff = fixture.kickoff();
    if kickoff.is_empty() {
        return false;
    }
    if !matches_query(fixture, q) {
        return false;
    }
    let within_window = skip_window || within_window(kickoff, now, window_hours);
    within_window || is_in_progress(fixture.status())
}

fn matches_query(fixture: &RawFixture, q: &str) -> bool {
    [fixture.league_name(), fixture.home_name(), fixture.away_name()]
        .iter()
        .any(|name| name.to_lowercase().contains(q))
}

fn within_window(kickoff: &str, now: DateTime<FixedOffset>, window_hours: u32) -> bool {
    let Ok(kick) = DateTime::parse_from_rfc3339(kickoff) else {
        return false;
    };
    let from = now - ChronoDuration::hours(LIVE_LOOKBACK_HOURS);
    let until = now + ChronoDuration::hours(i64::from(window_hours));
    kick >= from && kick <= until
}

// The provider's team search gets the query as the user typed it.
fn next_fixture_fallback<A>(api: &A, query: &str) -> Result<Option<MatchSummary>, FetchError>
where
    A: FixturesApi + ?Sized,
{
    let teams = api.search_teams(query)?;
    let Some(team_id) = teams.first().and_then(|entry| entry.team.id) else {
        return Ok(None);
    };
    let next = api.next_fixtures_for_team(team_id, 1)?;
    Ok(next.first().map(summarize_fixture))
}

fn or_empty(result: Result<Vec<RawFixture>, FetchError>, source: &str) -> Vec<RawFixture> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(source, kind = err.kind(), error = %err, "fixture source unavailable");
            Vec::new()
        }
    }
}

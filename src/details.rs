use tracing::{debug, info};

use crate::backfill::backfill_stats;
use crate::error::FetchError;
use crate::model::Match;
use crate::normalize::{normalize_fixture, normalize_match};
use crate::provider::FixturesApi;

/// Full match view: the fixture plus its events, statistics and lineups, fetched
/// concurrently. Any of the four calls failing fails the whole fetch.
///
/// `Ok(None)` means the provider has no fixture with this id.
pub fn fetch_match_details<A>(api: &A, id: u64) -> Result<Option<Match>, FetchError>
where
    A: FixturesApi + ?Sized,
{
    let ((fixtures, events), (stats, lineups)) = rayon::join(
        || rayon::join(|| api.fixtures_by_id(id), || api.fixture_events(id)),
        || rayon::join(|| api.fixture_statistics(id), || api.fixture_lineups(id)),
    );
    let fixtures = fixtures?;
    let events = events?;
    let stats = stats?;
    let lineups = lineups?;

    let Some(fixture) = fixtures.first() else {
        debug!(id, "fixture not found");
        return Ok(None);
    };

    let mut detail = normalize_match(fixture, &events, &stats, &lineups);
    detail.stats = backfill_stats(&detail.stats, &detail.events, &detail.home, &detail.away);
    info!(
        id,
        status = %detail.status,
        events = detail.events.len(),
        lineups = detail.lineups.len(),
        "match details"
    );
    Ok(Some(detail))
}

/// Single-call refresh from the fixture record and whatever arrays it embeds.
/// Cheaper than [`fetch_match_details`] for polling a match already on screen.
pub fn fetch_live_snapshot<A>(api: &A, id: u64) -> Result<Option<Match>, FetchError>
where
    A: FixturesApi + ?Sized,
{
    let fixtures = api.fixtures_by_id(id)?;
    let Some(fixture) = fixtures.first() else {
        return Ok(None);
    };
    let mut snapshot = normalize_fixture(fixture);
    snapshot.stats = backfill_stats(
        &snapshot.stats,
        &snapshot.events,
        &snapshot.home,
        &snapshot.away,
    );
    Ok(Some(snapshot))
}

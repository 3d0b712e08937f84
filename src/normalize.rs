//! Adapter from provider records to the internal [`Match`] model.
//!
//! Everything that knows about the provider's nesting lives here.

use serde_json::Value;

use crate::model::{
    Lineup, Match, MatchEvent, MatchStats, MatchSummary, PlayerSlot, Score, ShootoutKick,
    StatKey, StatPair, StatValue, empty_stats,
};
use crate::provider::{RawEvent, RawFixture, RawLineup, RawPlayerEntry, RawTeamStats};

const SHOOTOUT_COMMENT: &str = "Penalty Shootout";

pub fn summarize_fixture(raw: &RawFixture) -> MatchSummary {
    MatchSummary {
        id: raw.id(),
        kickoff: raw.kickoff().to_string(),
        status: raw.status().to_string(),
        league: raw.league_name().to_string(),
        home: raw.home_name().to_string(),
        away: raw.away_name().to_string(),
        score: Score {
            home: raw.goals.home,
            away: raw.goals.away,
        },
    }
}

/// Builds a match from a fixture record alone, using whatever event, lineup and
/// statistics arrays it embeds.
pub fn normalize_fixture(raw: &RawFixture) -> Match {
    normalize_match(
        raw,
        raw.events.as_deref().unwrap_or_default(),
        raw.statistics.as_deref().unwrap_or_default(),
        raw.lineups.as_deref().unwrap_or_default(),
    )
}

/// Builds a match from a fixture plus separately fetched events, statistics and
/// lineups. Stats are not backfilled here; see [`crate::backfill`].
pub fn normalize_match(
    raw: &RawFixture,
    events: &[RawEvent],
    stats: &[RawTeamStats],
    lineups: &[RawLineup],
) -> Match {
    let home = raw.home_name().to_string();
    let away = raw.away_name().to_string();
    let events: Vec<MatchEvent> = events.iter().map(normalize_event).collect();
    let shootout = shootout_sequence(&events);

    Match {
        id: raw.id(),
        league: raw.league_name().to_string(),
        kickoff: raw.kickoff().to_string(),
        status: raw.status().to_string(),
        elapsed: raw.fixture.status.elapsed,
        stats: normalize_stats(stats, &home, &away),
        lineups: lineups.iter().map(normalize_lineup).collect(),
        events,
        shootout,
        score: Score {
            home: raw.goals.home,
            away: raw.goals.away,
        },
        home,
        away,
    }
}

pub fn normalize_event(raw: &RawEvent) -> MatchEvent {
    MatchEvent {
        minute: raw.time.elapsed,
        extra: raw.time.extra,
        team: raw.team.name.clone().unwrap_or_default(),
        event_type: raw.event_type.clone().unwrap_or_default(),
        detail: raw.detail.clone().unwrap_or_default(),
        player: raw.player.as_ref().and_then(|p| p.name.clone()),
        assist: raw.assist.as_ref().and_then(|p| p.name.clone()),
        comments: raw.comments.clone(),
    }
}

pub fn normalize_lineup(raw: &RawLineup) -> Lineup {
    Lineup {
        team: raw.team.name.clone().unwrap_or_default(),
        formation: raw.formation.clone().unwrap_or_default(),
        coach: raw.coach.as_ref().and_then(|c| c.name.clone()),
        start_xi: flatten_players(raw.start_xi.as_deref()),
        subs: flatten_players(raw.substitutes.as_deref()),
    }
}

fn flatten_players(entries: Option<&[RawPlayerEntry]>) -> Vec<PlayerSlot> {
    entries
        .unwrap_or_default()
        .iter()
        .map(|entry| PlayerSlot {
            id: entry.player.id,
            name: entry.player.name.clone().unwrap_or_default(),
            number: entry.player.number,
            pos: entry.player.pos.clone(),
        })
        .collect()
}

/// Picks every known statistic for both sides. Keys the provider did not report stay
/// [`StatValue::Unknown`].
pub fn normalize_stats(blocks: &[RawTeamStats], home: &str, away: &str) -> MatchStats {
    let home_block = find_team_block(blocks, home);
    let away_block = find_team_block(blocks, away);

    let mut stats = empty_stats();
    for key in StatKey::ALL {
        let Some(label) = key.upstream_label() else {
            continue;
        };
        stats.insert(
            key,
            StatPair {
                home: pick_stat(home_block, label),
                away: pick_stat(away_block, label),
            },
        );
    }
    stats
}

fn find_team_block<'a>(blocks: &'a [RawTeamStats], team: &str) -> Option<&'a RawTeamStats> {
    blocks
        .iter()
        .find(|block| block.team.name.as_deref() == Some(team))
}

fn pick_stat(block: Option<&RawTeamStats>, label: &str) -> StatValue {
    block
        .and_then(|b| b.statistics.as_deref())
        .and_then(|entries| {
            entries
                .iter()
                .find(|entry| entry.stat_type.as_deref() == Some(label))
        })
        .map(|entry| stat_value(entry.value.as_ref()))
        .unwrap_or_default()
}

pub fn stat_value(value: Option<&Value>) -> StatValue {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(count) => StatValue::Count(count),
            None => StatValue::Text(n.to_string()),
        },
        Some(Value::String(s)) => StatValue::Text(s.trim().to_string()),
        Some(Value::Bool(b)) => StatValue::Text(b.to_string()),
        Some(Value::Null) | None => StatValue::Unknown,
        Some(other) => StatValue::Text(other.to_string()),
    }
}

/// Whether an event is a kick taken in a penalty shootout.
///
/// The provider has no phase field, so this keys off the free-text comment. Keep the
/// heuristic here and nowhere else.
pub fn is_shootout_kick(event: &MatchEvent) -> bool {
    (event.detail == "Penalty" || event.detail == "Missed Penalty")
        && event.comments.as_deref() == Some(SHOOTOUT_COMMENT)
}

/// Shootout kicks in the order they appear in the event feed. The provider does not
/// number kicks, so `order` is the position among shootout events, starting at 1.
pub fn shootout_sequence(events: &[MatchEvent]) -> Vec<ShootoutKick> {
    events
        .iter()
        .filter(|ev| is_shootout_kick(ev))
        .zip(1u32..)
        .map(|(ev, order)| ShootoutKick {
            team: ev.team.clone(),
            player: ev.player.clone(),
            scored: ev.detail == "Penalty",
            order,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(detail: &str, comments: Option<&str>) -> MatchEvent {
        MatchEvent {
            minute: Some(120),
            extra: None,
            team: "Home".to_string(),
            event_type: "Goal".to_string(),
            detail: detail.to_string(),
            player: Some("Taker".to_string()),
            assist: None,
            comments: comments.map(|c| c.to_string()),
        }
    }

    #[test]
    fn shootout_predicate_needs_both_detail_and_comment() {
        assert!(is_shootout_kick(&event("Penalty", Some("Penalty Shootout"))));
        assert!(is_shootout_kick(&event("Missed Penalty", Some("Penalty Shootout"))));
        assert!(!is_shootout_kick(&event("Penalty", None)));
        assert!(!is_shootout_kick(&event("Normal Goal", Some("Penalty Shootout"))));
        assert!(!is_shootout_kick(&event("Penalty", Some("penalty shootout"))));
    }

    #[test]
    fn stat_values_keep_provider_shape() {
        assert_eq!(stat_value(Some(&Value::from(7))), StatValue::Count(7));
        assert_eq!(
            stat_value(Some(&Value::from("55%"))),
            StatValue::Text("55%".to_string())
        );
        assert_eq!(stat_value(Some(&Value::Null)), StatValue::Unknown);
        assert_eq!(stat_value(None), StatValue::Unknown);
    }
}

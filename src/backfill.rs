use crate::model::{MatchEvent, MatchStats, StatKey, StatPair, StatValue};

/// Fills in statistics the provider leaves out.
///
/// - Card tallies are counted from `Card` events, but only when the provider reported
///   neither side for that colour. A partially reported pair is left alone.
/// - Pass accuracy is derived from total and accurate passes.
/// - Every known key ends up present.
///
/// Pure: the same input always gives the same output, and running it on its own
/// output changes nothing.
pub fn backfill_stats(
    stats: &MatchStats,
    events: &[MatchEvent],
    home: &str,
    away: &str,
) -> MatchStats {
    let mut out = stats.clone();
    for key in StatKey::ALL {
        out.entry(key).or_default();
    }

    backfill_cards(&mut out, StatKey::Yellow, "yellow", events, home, away);
    backfill_cards(&mut out, StatKey::Red, "red", events, home, away);

    let total = out[&StatKey::PassesTotal].clone();
    let accurate = out[&StatKey::PassesAccurate].clone();
    out.insert(
        StatKey::PassAccuracy,
        StatPair {
            home: pass_accuracy(&accurate.home, &total.home),
            away: pass_accuracy(&accurate.away, &total.away),
        },
    );

    out
}

fn backfill_cards(
    stats: &mut MatchStats,
    key: StatKey,
    colour: &str,
    events: &[MatchEvent],
    home: &str,
    away: &str,
) {
    let pair = stats.entry(key).or_default();
    if !pair.is_unknown() {
        return;
    }
    *pair = StatPair {
        home: StatValue::Count(count_cards(events, colour, home)),
        away: StatValue::Count(count_cards(events, colour, away)),
    };
}

/// Card events for `team` whose detail mentions `colour`, ignoring case.
pub fn count_cards(events: &[MatchEvent], colour: &str, team: &str) -> i64 {
    events
        .iter()
        .filter(|ev| ev.event_type == "Card" && ev.team == team && is_card_colour(ev, colour))
        .count() as i64
}

pub fn is_card_colour(event: &MatchEvent, colour: &str) -> bool {
    event
        .detail
        .to_ascii_lowercase()
        .contains(&colour.to_ascii_lowercase())
}

/// `"83%"` from accurate and total pass counts, or unknown when either is missing,
/// non-numeric, or inconsistent (no passes, negative, more accurate than total).
pub fn pass_accuracy(accurate: &StatValue, total: &StatValue) -> StatValue {
    let (Some(accurate), Some(total)) = (accurate.as_number(), total.as_number()) else {
        return StatValue::Unknown;
    };
    if total <= 0.0 || accurate < 0.0 || accurate > total {
        return StatValue::Unknown;
    }
    let pct = (accurate / total * 100.0).round() as i64;
    StatValue::Text(format!("{pct}%"))
}

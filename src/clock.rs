//! Match clock shown between refreshes.
//!
//! The provider only reports whole elapsed minutes, and only when polled. While a match
//! is in play we remember when we last saw that minute and count seconds forward from
//! there locally; the next snapshot replaces the reference.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::MIN_POLL_SECS;

/// Statuses in which the clock runs.
pub const ACTIVE_STATUSES: [&str; 6] = ["1H", "2H", "ET", "1ET", "2ET", "P"];

/// Statuses worth re-fetching on a timer. Includes the breaks, which end on their own.
pub const POLLING_STATUSES: [&str; 6] = ["1H", "2H", "HT", "ET", "P", "BT"];

pub fn is_active_status(status: &str) -> bool {
    ACTIVE_STATUSES.contains(&status)
}

/// The last snapshot seen while the clock was running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReference {
    pub observed_at: DateTime<Utc>,
    pub elapsed: u32,
    pub status: String,
}

/// Per-viewing-session clock state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchClock {
    reference: Option<ClockReference>,
}

impl MatchClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference(&self) -> Option<&ClockReference> {
        self.reference.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.reference.is_some()
    }

    /// Feeds a freshly fetched snapshot.
    ///
    /// An in-play status with a known minute replaces the reference; any status outside
    /// play drops it. A snapshot without a status, or in play without a minute, leaves
    /// the current reference as it is.
    pub fn observe(&mut self, status: Option<&str>, elapsed: Option<u32>, now: DateTime<Utc>) {
        let Some(status) = status else {
            return;
        };
        if !is_active_status(status) {
            self.reference = None;
            return;
        }
        if let Some(elapsed) = elapsed {
            self.reference = Some(ClockReference {
                observed_at: now,
                elapsed,
                status: status.to_string(),
            });
        }
    }

    pub fn display(
        &self,
        status: Option<&str>,
        elapsed: Option<u32>,
        now: DateTime<Utc>,
    ) -> Option<String> {
        format_clock(status, elapsed, self.reference.as_ref(), now)
    }
}

/// Regulation length of the period a status belongs to, in minutes.
pub fn nominal_period_minutes(status: &str) -> Option<u32> {
    match status {
        "1H" => Some(45),
        "2H" => Some(90),
        "ET" | "1ET" => Some(105),
        "2ET" => Some(120),
        _ => None,
    }
}

/// Seconds of match time at `now`, counted on from the reference. Never runs backwards
/// past the reference itself, even if `now` precedes it.
pub fn projected_seconds(reference: &ClockReference, now: DateTime<Utc>) -> u64 {
    let delta_ms = (now - reference.observed_at).num_milliseconds();
    let delta_secs = delta_ms.div_euclid(1000).max(0) as u64;
    u64::from(reference.elapsed) * 60 + delta_secs
}

/// Clock text for the current tick, or `None` when there is nothing to show.
///
/// Running clocks read `"67'05"`, or `"90+3'12"` once past the period's regulation
/// length. Without a reference the status or last known minute is shown as is.
pub fn format_clock(
    status: Option<&str>,
    elapsed: Option<u32>,
    reference: Option<&ClockReference>,
    now: DateTime<Utc>,
) -> Option<String> {
    let status = status?;

    let reference = match reference {
        Some(reference) if is_active_status(status) => reference,
        _ => return static_label(status, elapsed),
    };
    if status == "P" {
        return Some("PEN".to_string());
    }

    let total = projected_seconds(reference, now);
    let minutes = total / 60;
    let seconds = total % 60;
    match nominal_period_minutes(status) {
        Some(nominal) if minutes > u64::from(nominal) => Some(format!(
            "{nominal}+{}'{seconds:02}",
            minutes - u64::from(nominal)
        )),
        _ => Some(format!("{minutes}'{seconds:02}")),
    }
}

fn static_label(status: &str, elapsed: Option<u32>) -> Option<String> {
    match status {
        "HT" => Some("HT".to_string()),
        "FT" => Some("FT".to_string()),
        "P" => Some("PEN".to_string()),
        _ => elapsed.map(|e| format!("{e}'")),
    }
}

/// How often to re-fetch a match in `status`; `None` when it should not be polled.
pub fn refresh_interval(status: &str, configured: Duration) -> Option<Duration> {
    if !POLLING_STATUSES.contains(&status) {
        return None;
    }
    Some(configured.max(Duration::from_secs(MIN_POLL_SECS)))
}

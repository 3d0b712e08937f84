use std::collections::BTreeMap;

use serde::Serialize;

/// Statistics tracked for every match. The set is fixed so display code can index any
/// key without checking for presence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    Possession,
    ShotsOn,
    ShotsOff,
    ShotsBlocked,
    ShotsInsideBox,
    ShotsOutsideBox,
    ShotsTotal,
    Saves,
    Corners,
    Offsides,
    Fouls,
    Yellow,
    Red,
    PassesTotal,
    PassesAccurate,
    PassAccuracy,
    Tackles,
    Attacks,
    DangerousAttacks,
    ThrowIns,
    FreeKicks,
}

impl StatKey {
    pub const ALL: [StatKey; 21] = [
        StatKey::Possession,
        StatKey::ShotsOn,
        StatKey::ShotsOff,
        StatKey::ShotsBlocked,
        StatKey::ShotsInsideBox,
        StatKey::ShotsOutsideBox,
        StatKey::ShotsTotal,
        StatKey::Saves,
        StatKey::Corners,
        StatKey::Offsides,
        StatKey::Fouls,
        StatKey::Yellow,
        StatKey::Red,
        StatKey::PassesTotal,
        StatKey::PassesAccurate,
        StatKey::PassAccuracy,
        StatKey::Tackles,
        StatKey::Attacks,
        StatKey::DangerousAttacks,
        StatKey::ThrowIns,
        StatKey::FreeKicks,
    ];

    /// Label used by the provider's statistics block. `None` for keys that are only
    /// ever derived locally.
    pub fn upstream_label(self) -> Option<&'static str> {
        let label = match self {
            StatKey::Possession => "Ball Possession",
            StatKey::ShotsOn => "Shots on Goal",
            StatKey::ShotsOff => "Shots off Goal",
            StatKey::ShotsBlocked => "Blocked Shots",
            StatKey::ShotsInsideBox => "Shots insidebox",
            StatKey::ShotsOutsideBox => "Shots outsidebox",
            StatKey::ShotsTotal => "Total Shots",
            StatKey::Saves => "Goalkeeper Saves",
            StatKey::Corners => "Corner Kicks",
            StatKey::Offsides => "Offsides",
            StatKey::Fouls => "Fouls",
            StatKey::Yellow => "Yellow Cards",
            StatKey::Red => "Red Cards",
            StatKey::PassesTotal => "Total passes",
            StatKey::PassesAccurate => "Accurate passes",
            StatKey::PassAccuracy => return None,
            StatKey::Tackles => "Tackles",
            StatKey::Attacks => "Attacks",
            StatKey::DangerousAttacks => "Dangerous Attacks",
            StatKey::ThrowIns => "Throw Ins",
            StatKey::FreeKicks => "Free Kicks",
        };
        Some(label)
    }

    pub fn display_label(self) -> &'static str {
        match self {
            StatKey::Possession => "Possession",
            StatKey::ShotsOn => "On Target",
            StatKey::ShotsOff => "Shots Off",
            StatKey::ShotsBlocked => "Blocked",
            StatKey::ShotsInsideBox => "In Box",
            StatKey::ShotsOutsideBox => "Out Box",
            StatKey::ShotsTotal => "Total Shots",
            StatKey::Saves => "Saves",
            StatKey::Corners => "Corners",
            StatKey::Offsides => "Offsides",
            StatKey::Fouls => "Fouls",
            StatKey::Yellow => "Yellow",
            StatKey::Red => "Red",
            StatKey::PassesTotal => "Total Passes",
            StatKey::PassesAccurate => "Acc Passes",
            StatKey::PassAccuracy => "Pass Acc",
            StatKey::Tackles => "Tackles",
            StatKey::Attacks => "Attacks",
            StatKey::DangerousAttacks => "Dangerous",
            StatKey::ThrowIns => "Throw Ins",
            StatKey::FreeKicks => "Free Kicks",
        }
    }
}

/// A single side's statistic. `Unknown` serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(i64),
    Text(String),
    #[default]
    Unknown,
}

impl StatValue {
    pub fn is_unknown(&self) -> bool {
        matches!(self, StatValue::Unknown)
    }

    /// Numeric reading of the value, tolerating a trailing `%`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatValue::Count(n) => Some(*n as f64),
            StatValue::Text(s) => {
                let trimmed = s.trim();
                let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            StatValue::Unknown => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            StatValue::Count(n) => n.to_string(),
            StatValue::Text(s) => s.clone(),
            StatValue::Unknown => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatPair {
    pub home: StatValue,
    pub away: StatValue,
}

impl StatPair {
    pub fn is_unknown(&self) -> bool {
        self.home.is_unknown() && self.away.is_unknown()
    }
}

pub type MatchStats = BTreeMap<StatKey, StatPair>;

/// A stats mapping holding every known key, all unknown.
pub fn empty_stats() -> MatchStats {
    StatKey::ALL
        .iter()
        .map(|key| (*key, StatPair::default()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub minute: Option<i32>,
    pub extra: Option<i32>,
    pub team: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub detail: String,
    pub player: Option<String>,
    pub assist: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    Goal,
    OwnGoal,
    PenaltyGoal,
    MissedPenalty,
    YellowCard,
    RedCard,
    Substitution,
    Var,
    Other,
}

impl MatchEvent {
    pub fn kind(&self) -> EventKind {
        let detail = self.detail.to_ascii_lowercase();
        let event_type = self.event_type.to_ascii_lowercase();
        if event_type == "goal" {
            if detail.contains("missed penalty") || detail.contains("penalty missed") {
                return EventKind::MissedPenalty;
            }
            if detail.contains("penalty") {
                return EventKind::PenaltyGoal;
            }
            if detail.contains("own goal") {
                return EventKind::OwnGoal;
            }
            return EventKind::Goal;
        }
        if event_type.contains("subst") {
            return EventKind::Substitution;
        }
        if event_type.contains("card") {
            if detail.contains("red") {
                return EventKind::RedCard;
            }
            if detail.contains("yellow") {
                return EventKind::YellowCard;
            }
        }
        if event_type == "var" || detail.contains("var") {
            return EventKind::Var;
        }
        EventKind::Other
    }

    /// `"45+2'"`, `"12'"`, or `"-'"` when the provider sent no minute.
    pub fn minute_label(&self) -> String {
        let minute = self
            .minute
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        match self.extra {
            Some(extra) if extra != 0 => format!("{minute}+{extra}'"),
            _ => format!("{minute}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSlot {
    pub id: Option<u64>,
    pub name: String,
    pub number: Option<u32>,
    pub pos: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    pub team: String,
    pub formation: String,
    pub coach: Option<String>,
    #[serde(rename = "startXI")]
    pub start_xi: Vec<PlayerSlot>,
    pub subs: Vec<PlayerSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShootoutKick {
    pub team: String,
    pub player: Option<String>,
    pub scored: bool,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub id: u64,
    pub kickoff: String,
    pub status: String,
    pub league: String,
    pub home: String,
    pub away: String,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub id: u64,
    pub league: String,
    pub kickoff: String,
    pub status: String,
    pub elapsed: Option<u32>,
    pub home: String,
    pub away: String,
    pub score: Score,
    pub stats: MatchStats,
    pub lineups: Vec<Lineup>,
    pub events: Vec<MatchEvent>,
    pub shootout: Vec<ShootoutKick>,
}

impl Match {
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            id: self.id,
            kickoff: self.kickoff.clone(),
            status: self.status.clone(),
            league: self.league.clone(),
            home: self.home.clone(),
            away: self.away.clone(),
            score: self.score,
        }
    }

    pub fn stat(&self, key: StatKey) -> &StatPair {
        static UNKNOWN: StatPair = StatPair {
            home: StatValue::Unknown,
            away: StatValue::Unknown,
        };
        self.stats.get(&key).unwrap_or(&UNKNOWN)
    }

    /// Events shown on the match timeline; shootout kicks are listed separately.
    pub fn in_game_events(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events
            .iter()
            .filter(|ev| !crate::normalize::is_shootout_kick(ev))
    }

    /// Converted kicks per side, `(home, away)`.
    pub fn shootout_score(&self) -> (u32, u32) {
        self.shootout
            .iter()
            .filter(|kick| kick.scored)
            .fold((0, 0), |(home, away), kick| {
                if kick.team == self.home {
                    (home + 1, away)
                } else if kick.team == self.away {
                    (home, away + 1)
                } else {
                    (home, away)
                }
            })
    }
}

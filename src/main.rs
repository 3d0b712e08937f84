use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use matchday_live::clock::{MatchClock, refresh_interval};
use matchday_live::config::ApiConfig;
use matchday_live::details::{fetch_live_snapshot, fetch_match_details};
use matchday_live::fixtures_fetch::ApiFootballClient;
use matchday_live::model::{Match, MatchSummary, StatKey};
use matchday_live::search::{SearchOptions, search};

const USAGE: &str = "usage:
  matchday search <query> [--window-hours N] [--no-live] [--skip-window]
  matchday details <fixture-id> [--json]
  matchday watch <fixture-id>";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let cfg = ApiConfig::from_env();
    if cfg.api_key.is_none() {
        return Err(anyhow!("APIFOOTBALL_KEY not set (see .env)"));
    }
    let api = ApiFootballClient::new(cfg);

    match command.as_str() {
        "search" => run_search(&api, &args[1..]),
        "details" => run_details(&api, &args[1..]),
        "watch" => run_watch(&api, &args[1..]),
        other => Err(anyhow!("unknown command `{other}`\n{USAGE}")),
    }
}

fn run_search(api: &ApiFootballClient, args: &[String]) -> Result<()> {
    let query = args
        .iter()
        .take_while(|a| !a.starts_with("--"))
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if query.trim().is_empty() {
        return Err(anyhow!("missing search query\n{USAGE}"));
    }

    let window_hours = match flag_value(args, "--window-hours") {
        Some(raw) => Some(raw.parse::<u32>().context("invalid --window-hours")?),
        None => Some(api.config().window_hours),
    };
    let opts = SearchOptions {
        window_hours,
        include_live: !has_flag(args, "--no-live"),
        skip_window: has_flag(args, "--skip-window"),
    };

    let matches = search(api, &query, &opts);
    if matches.is_empty() {
        println!("No matches found for \"{}\".", query.trim());
        return Ok(());
    }
    for summary in &matches {
        println!("{}", summary_line(summary));
    }
    Ok(())
}

fn run_details(api: &ApiFootballClient, args: &[String]) -> Result<()> {
    let id = parse_fixture_id(args)?;
    let detail = fetch_match_details(api, id).context("match details fetch failed")?;
    let Some(detail) = detail else {
        println!("No match with id {id}.");
        return Ok(());
    };

    if has_flag(args, "--json") {
        let json = serde_json::to_string_pretty(&detail).context("serialize match")?;
        println!("{json}");
    } else {
        let mut clock = MatchClock::new();
        clock.observe(Some(detail.status.as_str()), detail.elapsed, Utc::now());
        print_match(&detail, &clock);
    }
    Ok(())
}

/// Keeps a match on screen: the clock redraws every second, the data refreshes on the
/// status-dependent poll interval, and the loop ends once the match stops polling.
fn run_watch(api: &ApiFootballClient, args: &[String]) -> Result<()> {
    let id = parse_fixture_id(args)?;
    let mut current = fetch_match_details(api, id)
        .context("match details fetch failed")?
        .ok_or_else(|| anyhow!("no match with id {id}"))?;

    let mut clock = MatchClock::new();
    clock.observe(Some(current.status.as_str()), current.elapsed, Utc::now());
    print_match(&current, &clock);

    let poll = api.config().poll_interval;
    let tick = Duration::from_secs(1);
    let mut last_refresh = Instant::now();

    while let Some(interval) = refresh_interval(&current.status, poll) {
        thread::sleep(tick);

        if last_refresh.elapsed() >= interval {
            last_refresh = Instant::now();
            match fetch_live_snapshot(api, id) {
                Ok(Some(next)) => {
                    clock.observe(Some(next.status.as_str()), next.elapsed, Utc::now());
                    if next.score != current.score || next.status != current.status {
                        println!();
                        println!("{}", summary_line(&next.summary()));
                    }
                    current = next;
                }
                Ok(None) => warn!(id, "match disappeared from provider"),
                Err(err) => warn!(id, error = %err, "refresh failed"),
            }
        }

        let label = clock
            .display(Some(current.status.as_str()), current.elapsed, Utc::now())
            .unwrap_or_default();
        print!("\r{} {} ", current.status, label);
        io::stdout().flush().ok();
    }
    println!();
    println!("{}", summary_line(&current.summary()));
    Ok(())
}

fn print_match(detail: &Match, clock: &MatchClock) {
    let clock_label = clock
        .display(Some(detail.status.as_str()), detail.elapsed, Utc::now())
        .unwrap_or_default();
    println!("{} | {} {}", detail.league, detail.status, clock_label);
    println!(
        "{} {} : {} {}",
        detail.home,
        score_label(detail.score.home),
        score_label(detail.score.away),
        detail.away
    );

    println!();
    println!("Stats");
    for key in StatKey::ALL {
        let pair = detail.stat(key);
        if pair.is_unknown() {
            continue;
        }
        println!(
            "  {:<14} {:>6} / {:<6}",
            key.display_label(),
            pair.home.label(),
            pair.away.label()
        );
    }

    println!();
    let events = detail.in_game_events().collect::<Vec<_>>();
    println!("Events ({})", events.len());
    if events.is_empty() {
        println!("  No events yet.");
    }
    for ev in events {
        let mut line = format!(
            "  {:>7} {:?} {} {}",
            ev.minute_label(),
            ev.kind(),
            ev.team,
            ev.detail
        );
        if let Some(player) = ev.player.as_deref() {
            line.push_str(&format!(" {player}"));
        }
        if let Some(assist) = ev.assist.as_deref() {
            line.push_str(&format!(" ({assist})"));
        }
        println!("{line}");
    }

    if !detail.shootout.is_empty() {
        let (home, away) = detail.shootout_score();
        println!();
        println!("Penalty shootout {home} - {away}");
        for kick in &detail.shootout {
            println!(
                "  {:>2}. {} {} {}",
                kick.order,
                kick.team,
                kick.player.as_deref().unwrap_or("?"),
                if kick.scored { "scored" } else { "missed" }
            );
        }
    }

    for lineup in &detail.lineups {
        println!();
        match lineup.coach.as_deref() {
            Some(coach) => println!("{} {} (coach {coach})", lineup.team, lineup.formation),
            None => println!("{} {}", lineup.team, lineup.formation),
        }
        for player in &lineup.start_xi {
            println!(
                "  {:>2} {:<3} {}",
                player.number.map(|n| n.to_string()).unwrap_or_default(),
                player.pos.as_deref().unwrap_or(""),
                player.name
            );
        }
    }
}

fn summary_line(summary: &MatchSummary) -> String {
    format!(
        "[{}] {} {} {} {}-{} {} ({})",
        summary.id,
        summary.kickoff,
        summary.status,
        summary.home,
        score_label(summary.score.home),
        score_label(summary.score.away),
        summary.away,
        summary.league
    )
}

fn score_label(goals: Option<u32>) -> String {
    goals.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string())
}

fn parse_fixture_id(args: &[String]) -> Result<u64> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow!("missing fixture id\n{USAGE}"))?;
    raw.parse::<u64>()
        .with_context(|| format!("invalid fixture id `{raw}`"))
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(|s| s.as_str())
}

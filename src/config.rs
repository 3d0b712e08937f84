use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://v3.football.api-sports.io";
pub const DEFAULT_WINDOW_HOURS: u32 = 6;
pub const MAX_WINDOW_HOURS: u32 = 72;
pub const MIN_POLL_SECS: u64 = 15;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for talking to the fixtures provider, read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// RapidAPI host; when set, auth goes through the RapidAPI headers.
    pub rapid_host: Option<String>,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub window_hours: u32,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let api_key = opt_env("APIFOOTBALL_KEY");
        let base_url = opt_env("APIFOOTBALL_BASE")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let rapid_host = opt_env("APIFOOTBALL_HOST");
        let timeout_secs = env_u64("FETCH_TIMEOUT_SECS")
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(2, 60);
        let poll_secs = env_u64("DETAILS_POLL_SECS")
            .unwrap_or(MIN_POLL_SECS)
            .max(MIN_POLL_SECS);
        let window_hours = env_u64("SEARCH_WINDOW_HOURS")
            .map(window_hours_from)
            .unwrap_or(DEFAULT_WINDOW_HOURS);

        Self {
            api_key,
            base_url,
            rapid_host,
            timeout: Duration::from_secs(timeout_secs),
            poll_interval: Duration::from_secs(poll_secs),
            window_hours,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_BASE.to_string(),
            rapid_host: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(MIN_POLL_SECS),
            window_hours: DEFAULT_WINDOW_HOURS,
        }
    }
}

pub fn clamp_window_hours(hours: u32) -> u32 {
    hours.clamp(1, MAX_WINDOW_HOURS)
}

fn window_hours_from(raw: u64) -> u32 {
    clamp_window_hours(u32::try_from(raw).unwrap_or(MAX_WINDOW_HOURS))
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    opt_env(key).and_then(|v| v.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_hours_are_clamped() {
        assert_eq!(clamp_window_hours(0), 1);
        assert_eq!(clamp_window_hours(6), 6);
        assert_eq!(clamp_window_hours(500), MAX_WINDOW_HOURS);
    }

    #[test]
    fn oversized_window_env_value_saturates() {
        assert_eq!(window_hours_from(0), 1);
        assert_eq!(window_hours_from(24), 24);
        assert_eq!(window_hours_from(u64::from(u32::MAX) + 1), MAX_WINDOW_HOURS);
    }

    #[test]
    fn default_config_polls_no_faster_than_floor() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.poll_interval, Duration::from_secs(MIN_POLL_SECS));
        assert_eq!(cfg.base_url, DEFAULT_API_BASE);
    }
}

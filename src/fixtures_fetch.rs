use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::http_client::http_client;
use crate::provider::{
    FixturesApi, RawEvent, RawFixture, RawLineup, RawTeamSearchEntry, RawTeamStats,
};

/// [`FixturesApi`] backed by the API-Football v3 REST endpoints.
#[derive(Debug, Clone)]
pub struct ApiFootballClient {
    cfg: ApiConfig,
}

impl ApiFootballClient {
    pub fn new(cfg: ApiConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.cfg
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Value>, FetchError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey)?;
        let client = http_client(self.cfg.timeout)?;
        let url = format!("{}/{}", self.cfg.base_url, path.trim_start_matches('/'));

        let mut req = client
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json");
        req = match self.cfg.rapid_host.as_deref() {
            Some(host) => req
                .header("x-rapidapi-key", api_key)
                .header("x-rapidapi-host", host),
            None => req.header("x-apisports-key", api_key),
        };

        debug!(path, ?query, "upstream request");
        let resp = req
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|err| FetchError::Transport(format!("failed reading body: {err}")))?;
        parse_envelope(status, &body)
    }

    // Listings feeding search tolerate odd entries.
    fn get_listing(&self, query: &[(&str, String)]) -> Result<Vec<RawFixture>, FetchError> {
        let items = self.get("fixtures", query)?;
        Ok(decode_records(items, "fixtures"))
    }

    fn get_records<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, FetchError> {
        let items = self.get(path, query)?;
        decode_records_strict(items, path)
    }
}

impl FixturesApi for ApiFootballClient {
    fn fixtures_by_date(&self, date: NaiveDate) -> Result<Vec<RawFixture>, FetchError> {
        self.get_listing(&[("date", date.format("%Y-%m-%d").to_string())])
    }

    fn live_fixtures(&self) -> Result<Vec<RawFixture>, FetchError> {
        self.get_listing(&[("live", "all".to_string())])
    }

    fn fixtures_by_id(&self, id: u64) -> Result<Vec<RawFixture>, FetchError> {
        self.get_records("fixtures", &[("id", id.to_string())])
    }

    fn fixture_events(&self, id: u64) -> Result<Vec<RawEvent>, FetchError> {
        self.get_records("fixtures/events", &[("fixture", id.to_string())])
    }

    fn fixture_statistics(&self, id: u64) -> Result<Vec<RawTeamStats>, FetchError> {
        self.get_records("fixtures/statistics", &[("fixture", id.to_string())])
    }

    fn fixture_lineups(&self, id: u64) -> Result<Vec<RawLineup>, FetchError> {
        self.get_records("fixtures/lineups", &[("fixture", id.to_string())])
    }

    fn search_teams(&self, name: &str) -> Result<Vec<RawTeamSearchEntry>, FetchError> {
        self.get_records("teams", &[("search", name.to_string())])
    }

    fn next_fixtures_for_team(
        &self,
        team_id: u64,
        count: u32,
    ) -> Result<Vec<RawFixture>, FetchError> {
        self.get_records(
            "fixtures",
            &[("team", team_id.to_string()), ("next", count.to_string())],
        )
    }
}

/// Validates the provider's `{response, errors, message}` envelope and returns the
/// `response` array.
///
/// The provider can answer 200 with a plan or quota complaint instead of results, so
/// the status code alone does not decide success.
pub fn parse_envelope(status: u16, body: &str) -> Result<Vec<Value>, FetchError> {
    let parsed = serde_json::from_str::<Value>(body.trim());

    if !(200..300).contains(&status) {
        let message = match &parsed {
            Ok(json) => json
                .get("message")
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
                .unwrap_or_else(|| truncate(&json.to_string(), 300)),
            Err(_) => truncate(body.trim(), 300),
        };
        return Err(FetchError::Upstream {
            status: Some(status),
            message: format!("API {status}: {message}"),
        });
    }

    let json =
        parsed.map_err(|err| FetchError::Protocol(format!("invalid JSON from API: {err}")))?;

    let response = json.get("response");
    let has_array = response.is_some_and(|r| r.is_array());
    if !has_array && let Some(message) = json.get("message").and_then(|m| m.as_str()) {
        return Err(FetchError::Upstream {
            status: Some(status),
            message: format!("API logical: {message}"),
        });
    }

    let errors = populated_errors(json.get("errors"));
    if !errors.is_empty() {
        return Err(FetchError::Upstream {
            status: Some(status),
            message: format!("API errors: {}", errors.join(", ")),
        });
    }

    match response {
        Some(Value::Array(items)) => Ok(items.clone()),
        _ => Err(FetchError::Protocol("response is not an array".to_string())),
    }
}

// `errors` is `[]` when clean and either an object or an array of strings otherwise.
fn populated_errors(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Object(map)) => map
            .iter()
            .filter(|(_, v)| is_truthy(v))
            .map(|(k, v)| format!("{k}:{}", value_text(v)))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter(|v| is_truthy(v))
            .map(value_text)
            .collect(),
        _ => Vec::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(raw: &str, max: usize) -> String {
    raw.chars().take(max).collect()
}

/// Decodes each record on its own so one odd entry does not sink a whole listing.
pub fn decode_records<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<T> {
    let total = items.len();
    let out: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if out.len() < total {
        warn!(what, skipped = total - out.len(), "dropped undecodable records");
    }
    out
}

/// Decodes every record or fails the call: a record the provider sent but we cannot
/// read is a protocol error, not an absent result.
pub fn decode_records_strict<T: DeserializeOwned>(
    items: Vec<Value>,
    what: &str,
) -> Result<Vec<T>, FetchError> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item).map_err(|err| {
                FetchError::Protocol(format!("undecodable {what} record #{idx}: {err}"))
            })
        })
        .collect()
}

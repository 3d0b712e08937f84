/// Failure of a single upstream call.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("APIFOOTBALL_KEY not set")]
    MissingApiKey,

    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("network error: {0}")]
    Transport(String),

    /// The response body was not the structured payload we expect.
    #[error("invalid payload: {0}")]
    Protocol(String),

    /// The provider answered but reported a failure: any non-2xx status, a logical
    /// message in place of results, or a populated `errors` block.
    #[error("upstream error: {message}")]
    Upstream { status: Option<u16>, message: String },
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::MissingApiKey => "config",
            FetchError::Transport(_) => "transport",
            FetchError::Protocol(_) => "protocol",
            FetchError::Upstream { .. } => "upstream",
        }
    }
}

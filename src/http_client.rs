use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

use crate::error::FetchError;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide blocking client. The timeout of the first caller wins.
pub fn http_client(timeout: Duration) -> Result<&'static Client, FetchError> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Transport(format!("failed to build http client: {err}")))
    })
}

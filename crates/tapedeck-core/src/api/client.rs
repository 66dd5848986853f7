//! Shared HTTP client.

use once_cell::sync::OnceCell;

use crate::error::Result;

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Process-wide reqwest client (connection pooling across console actions).
///
/// The client carries no timeout of its own. Each [`HttpBackend`] sets its
/// configured timeout on every request it sends.
///
/// [`HttpBackend`]: super::HttpBackend
pub fn get_http_client() -> Result<&'static reqwest::Client> {
    HTTP_CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .user_agent(concat!("tapedeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Into::into)
    })
}

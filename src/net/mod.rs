//! Remote data source for the user directory.
//!
//! Defines the `UserRecord` wire type, the `UserSource` seam the view fetches
//! through, and the reqwest-backed `HttpUserSource`.
//!
pub mod task;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, simple_error};

pub use task::{FetchOutcome, FetchTask};

/// Endpoint queried when no `--url` override is given.
pub const DEFAULT_ENDPOINT: &str = "https://testapi.com/users";

/// Message shown for any non-2xx response; the server's status text is not surfaced.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong!";

/// One entry of the directory as served by the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
}

impl UserRecord {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Anything that can produce the directory's records.
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>>;
}

pub struct HttpUserSource {
    client: reqwest::Client,
    url: String,
}

impl HttpUserSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpUserSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    async fn fetch_users(&self) -> Result<Vec<UserRecord>> {
        let response = self.client.get(self.url.as_str()).send().await?;
        let status = response.status();
        debug!(%status, "user directory responded");
        if !status.is_success() {
            warn!(%status, "user directory returned a non-success status");
            return Err(simple_error(GENERIC_FAILURE_MESSAGE));
        }
        let body = response.bytes().await?;
        let users = parse_users(&body)?;
        info!(count = users.len(), "user directory loaded");
        Ok(users)
    }
}

/// Decode a response body. The serde_json error text is kept as-is for display.
pub fn parse_users(body: &[u8]) -> Result<Vec<UserRecord>> {
    Ok(serde_json::from_slice(body)?)
}

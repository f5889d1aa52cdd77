//! Remote data source client.

use derive_more::{Display, Error, From};

use intern_portal_model::{Participant, UserSummary};

use serde::de::DeserializeOwned;

use tracing::instrument;

use std::sync::Arc;

use crate::config::RemoteConfig;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Client for the remote data source.
///
/// Cheaply cloneable.
#[derive(Clone, Debug)]
pub struct RemoteClient {
    /// The http reqwest client used to make requests.
    pub http_client: reqwest::Client,
    user_url: Arc<str>,
    leaderboard_url: Arc<str>,
}

impl RemoteClient {
    /// Creates a new `RemoteClient` from a config.
    pub fn new(config: &RemoteConfig) -> Result<RemoteClient, RemoteError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(RemoteClient {
            http_client,
            user_url: Arc::from(config.user_url.as_str()),
            leaderboard_url: Arc::from(config.leaderboard_url.as_str()),
        })
    }

    /// Fetches the summary of the current user.
    #[instrument(skip(self))]
    pub async fn fetch_user_summary(&self) -> Result<UserSummary, RemoteError> {
        self.get_json(&self.user_url).await
    }

    /// Fetches every participant on the leaderboard.
    ///
    /// These are in whatever order the data source returns them.
    #[instrument(skip(self))]
    pub async fn fetch_leaderboard(&self) -> Result<Vec<Participant>, RemoteError> {
        self.get_json(&self.leaderboard_url).await
    }

    async fn get_json<T>(&self, url: &str) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(%url, "fetching from remote");

        let res = self.http_client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        res.json::<T>().await.map_err(RemoteError::Decode)
    }
}

/// An error fetching from the remote data source.
#[derive(Debug, Display, Error, From)]
pub enum RemoteError {
    /// The request could not be completed.
    #[display("request failed: {_0}")]
    #[from]
    Request(reqwest::Error),
    /// The data source answered with a non-success status.
    #[display("remote responded with {_0}")]
    Status(#[error(not(source))] reqwest::StatusCode),
    /// The body was not in the expected shape.
    #[display("malformed response: {_0}")]
    Decode(reqwest::Error),
}

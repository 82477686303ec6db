//! Remote quote source
//!
//! The `RemoteSource` trait is what the sync engine talks to; `HttpRemote`
//! implements it against a JSON collection endpoint with reqwest.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::storage::settings::AppSettings;
use crate::types::Quote;

/// Transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// A record of the remote collection. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRecord {
    pub id: u64,
    pub title: String,
}

/// Body posted for a newly added quote
#[derive(Debug, Serialize)]
struct PushBody<'a> {
    text: &'a str,
    category: &'a str,
}

/// Remote collaborator for sync
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch a bounded set of remote records
    async fn fetch(&self) -> Result<Vec<RemoteRecord>, TransportError>;
    /// Post a quote to the remote collection
    async fn push(&self, quote: &Quote) -> Result<(), TransportError>;
}

/// HTTP implementation of [`RemoteSource`]
pub struct HttpRemote {
    client: reqwest::Client,
    endpoint: String,
    fetch_limit: usize,
}

impl HttpRemote {
    pub fn new(
        endpoint: impl Into<String>,
        fetch_limit: usize,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("QuoteBoard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            fetch_limit,
        })
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, TransportError> {
        Self::new(
            settings.remote_endpoint.clone(),
            settings.fetch_limit,
            settings.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch(&self) -> Result<Vec<RemoteRecord>, TransportError> {
        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        let records: Vec<RemoteRecord> = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        tracing::debug!(total = records.len(), limit = self.fetch_limit, "Fetched remote records");
        Ok(records.into_iter().take(self.fetch_limit).collect())
    }

    async fn push(&self, quote: &Quote) -> Result<(), TransportError> {
        let body = PushBody {
            text: &quote.text,
            category: &quote.category,
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        // The response may or may not echo an id; it is not needed
        tracing::debug!(status = response.status().as_u16(), "Posted quote to remote");
        Ok(())
    }
}

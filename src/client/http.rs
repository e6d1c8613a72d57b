use crate::client::traits::DestinationApi;
use crate::error::SubmissionError;
use crate::models::{DestinationListing, DestinationRecord, ListingEnvelope, PersistedRecord};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

/// reqwest-backed client for `{base_url}/destinations`.
///
/// No timeout is set on the client; requests run until the transport gives up.
pub struct HttpDestinationClient {
    client: Client,
    base_url: String,
}

impl HttpDestinationClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SubmissionError> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn destinations_url(&self) -> String {
        format!("{}/destinations", self.base_url)
    }
}

#[async_trait]
impl DestinationApi for HttpDestinationClient {
    async fn create(&self, record: &DestinationRecord) -> Result<PersistedRecord, SubmissionError> {
        let url = self.destinations_url();
        debug!(url = %url, name = %record.name, "Posting destination");

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Destination create rejected");
            return Err(SubmissionError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SubmissionError::Decode(e.to_string()))?;

        let persisted = PersistedRecord::from_body(body);
        info!(
            name = %record.name,
            id = %persisted.id.as_deref().unwrap_or("-"),
            "Destination created"
        );

        Ok(persisted)
    }

    async fn list(&self) -> Result<Vec<DestinationListing>, SubmissionError> {
        let url = self.destinations_url();
        debug!(url = %url, "Fetching destinations");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Destination listing failed");
            return Err(SubmissionError::Status(status.as_u16()));
        }

        let envelope: ListingEnvelope = response
            .json()
            .await
            .map_err(|e| SubmissionError::Decode(e.to_string()))?;

        info!("Fetched {} destinations", envelope.data.len());
        Ok(envelope.data)
    }
}

use crate::error::SubmissionError;
use crate::models::{DestinationListing, DestinationRecord, PersistedRecord};
use async_trait::async_trait;

/// The destinations backend as seen by the pipeline
#[async_trait]
pub trait DestinationApi: Send + Sync {
    /// Persist a record with a single request. No retry.
    async fn create(&self, record: &DestinationRecord) -> Result<PersistedRecord, SubmissionError>;

    /// Fetch every stored destination
    async fn list(&self) -> Result<Vec<DestinationListing>, SubmissionError>;
}

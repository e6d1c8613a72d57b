use crate::error::ImageUploadError;
use crate::images::types::{EncodedImage, ImageFile};
use async_trait::async_trait;

/// Turns a chosen image file into a reference the backend can store.
/// Implementations may call out to an image host.
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    async fn encode(&self, file: &ImageFile) -> Result<EncodedImage, ImageUploadError>;

    /// Name used in logs
    fn encoder_name(&self) -> &'static str;
}

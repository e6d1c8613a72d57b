use crate::error::ImageUploadError;
use crate::images::traits::ImageEncoder;
use crate::images::types::{EncodedImage, ImageFile};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

/// Embeds the image in the record as a base64 data URI
#[derive(Debug, Clone, Default)]
pub struct DataUriEncoder;

impl DataUriEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn to_data_uri(file: &ImageFile) -> String {
        format!(
            "data:{};base64,{}",
            file.mime_type,
            general_purpose::STANDARD.encode(&file.bytes)
        )
    }
}

#[async_trait]
impl ImageEncoder for DataUriEncoder {
    async fn encode(&self, file: &ImageFile) -> Result<EncodedImage, ImageUploadError> {
        let uri = Self::to_data_uri(file);
        debug!(file = %file.file_name, bytes = file.bytes.len(), "Encoded image as data URI");

        Ok(EncodedImage {
            reference: uri.clone(),
            preview: uri,
        })
    }

    fn encoder_name(&self) -> &'static str {
        "data-uri"
    }
}

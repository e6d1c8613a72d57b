use crate::error::ImageUploadError;
use crate::images::traits::ImageEncoder;
use crate::images::types::{EncodedImage, ImageFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct UploadReply {
    data: Option<UploadedImage>,
}

#[derive(Debug, Deserialize)]
struct UploadedImage {
    url: Option<String>,
    display_url: Option<String>,
}

/// Uploads the image to an image host and keeps the hosted URL.
///
/// The host takes a multipart `image` field with the API key as a `key`
/// query parameter and answers `{"data": {"url": ..., "display_url": ...}}`.
pub struct HostedImageUploader {
    client: Client,
    upload_url: String,
    api_key: String,
}

impl HostedImageUploader {
    pub fn new(upload_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ImageUploadError> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| ImageUploadError::Upload(e.to_string()))?;

        Ok(Self::with_client(client, upload_url, api_key))
    }

    pub fn with_client(client: Client, upload_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            upload_url: upload_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ImageEncoder for HostedImageUploader {
    async fn encode(&self, file: &ImageFile) -> Result<EncodedImage, ImageUploadError> {
        debug!(file = %file.file_name, url = %self.upload_url, "Uploading image");

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| ImageUploadError::Upload(e.to_string()))?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageUploadError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Image host rejected upload");
            return Err(ImageUploadError::Status(status.as_u16()));
        }

        let reply: UploadReply = response
            .json()
            .await
            .map_err(|e| ImageUploadError::Upload(e.to_string()))?;

        let uploaded = reply
            .data
            .ok_or_else(|| ImageUploadError::MissingUrl("reply has no data".to_string()))?;
        let url = uploaded
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ImageUploadError::MissingUrl("data.url is empty".to_string()))?;
        let preview = uploaded
            .display_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| url.clone());

        info!(file = %file.file_name, url = %url, "Image uploaded");

        Ok(EncodedImage {
            reference: url,
            preview,
        })
    }

    fn encoder_name(&self) -> &'static str {
        "hosted"
    }
}

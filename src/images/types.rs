use crate::error::ImageUploadError;
use std::path::Path;

/// An image picked by the user, held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Build from bytes; the MIME type comes from the file extension and
    /// anything that is not an image is refused
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ImageUploadError> {
        let file_name = file_name.into();
        let mime_type = image_mime_type(&file_name)
            .ok_or_else(|| ImageUploadError::UnsupportedType(file_name.clone()))?;

        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub async fn read(path: impl AsRef<Path>) -> Result<Self, ImageUploadError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Check the type before reading a possibly large non-image file
        if image_mime_type(&file_name).is_none() {
            return Err(ImageUploadError::UnsupportedType(file_name));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ImageUploadError::Read(format!("{}: {}", path.display(), e)))?;

        Self::new(file_name, bytes)
    }
}

/// Reference the backend stores, plus something a UI can show right away
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedImage {
    pub reference: String,
    pub preview: String,
}

impl EncodedImage {
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }
}

fn image_mime_type(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

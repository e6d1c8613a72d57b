use thiserror::Error;

/// Failure of the create/list call against the destinations API.
///
/// The controller treats every variant the same way; the variants only exist
/// so the cause shows up in logs.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("request failed: unreadable response ({0})")]
    Decode(String),
}

/// Failure of the image side channel
#[derive(Debug, Error)]
pub enum ImageUploadError {
    #[error("could not read image file: {0}")]
    Read(String),

    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("image upload failed: {0}")]
    Upload(String),

    #[error("image host returned status {0}")]
    Status(u16),

    #[error("image host reply had no url: {0}")]
    MissingUrl(String),
}

/// Reasons a submit attempt did not produce a persisted record
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    Busy,

    #[error("a destination image is required")]
    ImageMissing,

    #[error("required fields missing: {}", missing.join(", "))]
    ValidationGap { missing: Vec<String> },

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod identity;
pub mod images;
pub mod models;
pub mod normalizer;

pub use client::{DestinationApi, HttpDestinationClient};
pub use controller::{Notifier, SubmissionController, SubmissionState};
pub use error::{ImageUploadError, SubmissionError, SubmitError};
pub use form::{FieldValue, FormState, RawFields};
pub use identity::{IdentityContext, PlaceholderIdentity, SessionIdentity};
pub use images::{DataUriEncoder, EncodedImage, HostedImageUploader, ImageEncoder, ImageFile};
pub use models::{DestinationListing, DestinationRecord, PersistedRecord};
pub use normalizer::Normalizer;

pub const USER_AGENT: &str = concat!("nomad-directory/", env!("CARGO_PKG_VERSION"));

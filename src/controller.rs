use crate::client::DestinationApi;
use crate::error::{ImageUploadError, SubmitError};
use crate::form::{FieldValue, FormState, RawFields};
use crate::images::{EncodedImage, ImageEncoder, ImageFile};
use crate::models::PersistedRecord;
use crate::normalizer::Normalizer;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

pub const SUCCESS_MESSAGE: &str = "Destination created successfully!";
pub const FAILURE_MESSAGE: &str = "Something went wrong!";
pub const IMAGE_FAILURE_MESSAGE: &str = "Image upload failed!";

/// One-shot user notifications (toasts in a UI, lines in a terminal)
pub trait Notifier: Send + Sync {
    fn on_success(&self, message: &str);
    fn on_failure(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// Holds the in-flight flag for the duration of one submit call
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Drives one create-destination form: image selection, guard checks,
/// normalization, the create call and the resulting notification.
///
/// At most one create request is in flight per controller.
pub struct SubmissionController {
    api: Arc<dyn DestinationApi>,
    encoder: Arc<dyn ImageEncoder>,
    normalizer: Normalizer,
    notifier: Arc<dyn Notifier>,
    form: Mutex<FormState>,
    image: Mutex<EncodedImage>,
    /// Bumped on every selection; only the latest one may fill the image slot
    selection: AtomicU64,
    submitting: AtomicBool,
}

impl SubmissionController {
    pub fn new(
        api: Arc<dyn DestinationApi>,
        encoder: Arc<dyn ImageEncoder>,
        normalizer: Normalizer,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_form(api, encoder, normalizer, notifier, FormState::destination())
    }

    pub fn with_form(
        api: Arc<dyn DestinationApi>,
        encoder: Arc<dyn ImageEncoder>,
        normalizer: Normalizer,
        notifier: Arc<dyn Notifier>,
        form: FormState,
    ) -> Self {
        Self {
            api,
            encoder,
            normalizer,
            notifier,
            form: Mutex::new(form),
            image: Mutex::new(EncodedImage::default()),
            selection: AtomicU64::new(0),
            submitting: AtomicBool::new(false),
        }
    }

    fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn image_slot(&self) -> MutexGuard<'_, EncodedImage> {
        self.image.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.form().set(key, value);
    }

    pub fn fill(&self, fields: &RawFields) {
        self.form().fill(fields);
    }

    pub fn field(&self, key: &str) -> Option<FieldValue> {
        self.form().get(key).cloned()
    }

    /// Snapshot of the current raw values
    pub fn values(&self) -> RawFields {
        self.form().values().clone()
    }

    pub fn missing_required(&self) -> Vec<String> {
        self.form().missing_required()
    }

    /// Current image; empty until a file has been encoded
    pub fn image(&self) -> EncodedImage {
        self.image_slot().clone()
    }

    pub fn state(&self) -> SubmissionState {
        if self.submitting.load(Ordering::Acquire) {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        self.state() == SubmissionState::Idle && !self.image_slot().is_empty()
    }

    /// Encode a newly chosen file. `None` clears the image.
    ///
    /// On failure the previous image stays in place and the failure
    /// notification fires. When selections overlap, the most recent one
    /// wins even if an older encode finishes later.
    pub async fn select_image(
        &self,
        file: Option<ImageFile>,
    ) -> Result<EncodedImage, ImageUploadError> {
        let ticket = self.selection.fetch_add(1, Ordering::AcqRel) + 1;

        let Some(file) = file else {
            *self.image_slot() = EncodedImage::default();
            debug!("Image selection cleared");
            return Ok(EncodedImage::default());
        };

        match self.encoder.encode(&file).await {
            Ok(encoded) => {
                debug!(
                    encoder = self.encoder.encoder_name(),
                    file = %file.file_name,
                    "Image ready"
                );
                let mut slot = self.image_slot();
                if self.selection.load(Ordering::Acquire) == ticket {
                    *slot = encoded.clone();
                } else {
                    debug!(file = %file.file_name, "Superseded by a newer selection");
                }
                Ok(encoded)
            }
            Err(e) => {
                warn!(encoder = self.encoder.encoder_name(), error = %e, "Image encoding failed");
                self.notifier.on_failure(IMAGE_FAILURE_MESSAGE);
                Err(e)
            }
        }
    }

    /// Normalize the current fields and send them as one create request.
    ///
    /// Rejected without any request when a submission is already running,
    /// when no image has been chosen, or when required fields are blank or
    /// unusable for their kind.
    /// On success the form is reset; on failure the entered values are kept.
    pub async fn submit(&self) -> Result<PersistedRecord, SubmitError> {
        let _in_flight = match InFlight::acquire(&self.submitting) {
            Some(guard) => guard,
            None => {
                debug!("Submit ignored, request already in flight");
                return Err(SubmitError::Busy);
            }
        };

        let image = self.image_slot().reference.clone();
        if image.is_empty() {
            return Err(SubmitError::ImageMissing);
        }

        let raw = {
            let form = self.form();
            let missing = form.missing_required();
            if !missing.is_empty() {
                return Err(SubmitError::ValidationGap { missing });
            }
            form.values().clone()
        };

        let record = self.normalizer.normalize(&raw, &image);

        match self.api.create(&record).await {
            Ok(persisted) => {
                self.form().reset();
                self.notifier.on_success(SUCCESS_MESSAGE);
                Ok(persisted)
            }
            Err(e) => {
                warn!(error = %e, name = %record.name, "Destination submission failed");
                self.notifier.on_failure(FAILURE_MESSAGE);
                Err(e.into())
            }
        }
    }
}

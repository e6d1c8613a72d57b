#![allow(dead_code)]

use async_trait::async_trait;
use nomad_directory::controller::Notifier;
use nomad_directory::{
    DataUriEncoder, DestinationApi, DestinationListing, DestinationRecord, EncodedImage,
    ImageEncoder, ImageFile, ImageUploadError, Normalizer, PersistedRecord, PlaceholderIdentity,
    RawFields, SubmissionController, SubmissionError,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory backend that records every create call
#[derive(Default)]
pub struct FakeApi {
    pub calls: AtomicUsize,
    pub records: Mutex<Vec<DestinationRecord>>,
    pub fail: AtomicBool,
    pub delay: Mutex<Option<Duration>>,
}

impl FakeApi {
    pub fn failing() -> Self {
        let api = Self::default();
        api.fail.store(true, Ordering::SeqCst);
        api
    }

    pub fn slow(delay: Duration) -> Self {
        let api = Self::default();
        *api.delay.lock().unwrap() = Some(delay);
        api
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_record(&self) -> Option<DestinationRecord> {
        self.records.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DestinationApi for FakeApi {
    async fn create(&self, record: &DestinationRecord) -> Result<PersistedRecord, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().push(record.clone());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(SubmissionError::Status(500));
        }

        Ok(PersistedRecord::from_body(json!({"acknowledged": true, "insertedId": "abc123"})))
    }

    async fn list(&self) -> Result<Vec<DestinationListing>, SubmissionError> {
        Ok(Vec::new())
    }
}

/// Data URI encoder that can be switched into failing, standing in for a
/// flaky image host. Files named in `slow` take that long to encode.
#[derive(Default)]
pub struct SwitchableEncoder {
    pub broken: AtomicBool,
    pub slow: Mutex<Option<(String, Duration)>>,
}

impl SwitchableEncoder {
    pub fn slow_for(file_name: &str, delay: Duration) -> Self {
        let encoder = Self::default();
        *encoder.slow.lock().unwrap() = Some((file_name.to_string(), delay));
        encoder
    }
}

#[async_trait]
impl ImageEncoder for SwitchableEncoder {
    async fn encode(&self, file: &ImageFile) -> Result<EncodedImage, ImageUploadError> {
        let delay = self
            .slow
            .lock()
            .unwrap()
            .as_ref()
            .filter(|(name, _)| *name == file.file_name)
            .map(|(_, delay)| *delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.broken.load(Ordering::SeqCst) {
            return Err(ImageUploadError::Status(502));
        }
        DataUriEncoder::new().encode(file).await
    }

    fn encoder_name(&self) -> &'static str {
        "switchable"
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: Mutex<Vec<String>>,
    pub failures: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn success_count(&self) -> usize {
        self.successes.lock().unwrap().len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn on_success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn on_failure(&self, message: &str) {
        self.failures.lock().unwrap().push(message.to_string());
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub controller: SubmissionController,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        Self::with_encoder(api, Arc::new(DataUriEncoder::new()))
    }

    pub fn with_encoder(api: FakeApi, encoder: Arc<dyn ImageEncoder>) -> Self {
        let api = Arc::new(api);
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = SubmissionController::new(
            api.clone(),
            encoder,
            Normalizer::new(Arc::new(PlaceholderIdentity)),
            notifier.clone(),
        );

        Self {
            api,
            notifier,
            controller,
        }
    }
}

pub fn bali_hub() -> RawFields {
    RawFields::from_json(&json!({
        "name": "Bali Hub",
        "country": "Indonesia",
        "continent": "Asia",
        "description": "x",
        "avgLivingCost": 900,
        "currency": "USD",
        "wifiSpeed": 50,
        "location": { "latitude": -8.4095, "longitude": 115.1889 }
    }))
}

pub fn png() -> ImageFile {
    ImageFile::new("bali.png", vec![0x89, b'P', b'N', b'G']).unwrap()
}

pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw==";

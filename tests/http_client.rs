mod common;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{bali_hub, png, RecordingNotifier, PNG_DATA_URI};
use nomad_directory::{
    DataUriEncoder, DestinationApi, DestinationRecord, HostedImageUploader, HttpDestinationClient,
    ImageEncoder, ImageUploadError, Normalizer, PlaceholderIdentity, SubmissionController,
    SubmissionError, SubmitError,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Captured = Arc<Mutex<Vec<Value>>>;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Stub backend: stores posted bodies, lists a fixed pair of destinations
async fn backend(captured: Captured, create_status: StatusCode) -> String {
    let app = Router::new()
        .route(
            "/api/destinations",
            post(
                move |State(captured): State<Captured>, Json(body): Json<Value>| async move {
                    captured.lock().unwrap().push(body);
                    (
                        create_status,
                        Json(json!({"acknowledged": true, "insertedId": "6650aa"})),
                    )
                },
            )
            .get(|| async {
                Json(json!({
                    "data": [
                        {"_id": "1", "title": "Cozy 1BD Apartment in Canggu", "name": "Bali", "country": "Indonesia"},
                        {"_id": "2", "name": "Lisbon", "country": "Portugal", "amenities": {"wifi": true}}
                    ]
                }))
            }),
        )
        .with_state(captured);

    format!("{}/api", spawn(app).await)
}

fn record() -> DestinationRecord {
    Normalizer::new(Arc::new(PlaceholderIdentity)).normalize(&bali_hub(), PNG_DATA_URI)
}

#[tokio::test]
async fn create_posts_record_as_json() {
    let captured = Captured::default();
    let base = backend(captured.clone(), StatusCode::CREATED).await;
    let client = HttpDestinationClient::new(base).unwrap();

    let persisted = client.create(&record()).await.unwrap();

    assert_eq!(persisted.id.as_deref(), Some("6650aa"));
    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["name"], json!("Bali Hub"));
    assert_eq!(bodies[0]["continent"], json!("Asia"));
    assert_eq!(bodies[0]["images"], json!([PNG_DATA_URI]));
    assert_eq!(bodies[0]["location"]["longitude"], json!(115.1889));
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let captured = Captured::default();
    let base = backend(captured.clone(), StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = HttpDestinationClient::new(base).unwrap();

    let err = client.create(&record()).await.unwrap_err();

    assert!(matches!(err, SubmissionError::Status(500)));
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpDestinationClient::new(format!("http://{addr}/api")).unwrap();
    let err = client.create(&record()).await.unwrap_err();

    assert!(matches!(err, SubmissionError::Transport(_)));
}

#[tokio::test]
async fn list_reads_data_envelope() {
    let base = backend(Captured::default(), StatusCode::OK).await;
    let client = HttpDestinationClient::new(base).unwrap();

    let listings = client.list().await.unwrap();

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].heading(), "Cozy 1BD Apartment in Canggu");
    assert_eq!(listings[1].heading(), "Lisbon");
    assert_eq!(listings[1].id.as_deref(), Some("2"));
    assert!(listings[1].record.amenities.wifi);
    assert!(!listings[1].record.amenities.kitchen);
}

#[tokio::test]
async fn pipeline_end_to_end_over_http() {
    let captured = Captured::default();
    let base = backend(captured.clone(), StatusCode::OK).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = SubmissionController::new(
        Arc::new(HttpDestinationClient::new(base).unwrap()),
        Arc::new(DataUriEncoder::new()),
        Normalizer::new(Arc::new(PlaceholderIdentity)),
        notifier.clone(),
    );

    controller.fill(&bali_hub());
    controller.select_image(Some(png())).await.unwrap();
    controller.submit().await.unwrap();

    let bodies = captured.lock().unwrap();
    assert_eq!(
        bodies[0]["amenities"],
        json!({"wifi": false, "kitchen": false, "ac": false, "workspace": false})
    );
    assert_eq!(bodies[0]["userEmail"], json!("demoUser@gmail.com"));
    assert_eq!(notifier.success_count(), 1);
}

#[tokio::test]
async fn pipeline_failure_over_http_keeps_fields() {
    let base = backend(Captured::default(), StatusCode::BAD_GATEWAY).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = SubmissionController::new(
        Arc::new(HttpDestinationClient::new(base).unwrap()),
        Arc::new(DataUriEncoder::new()),
        Normalizer::new(Arc::new(PlaceholderIdentity)),
        notifier.clone(),
    );

    controller.fill(&bali_hub());
    controller.select_image(Some(png())).await.unwrap();
    let before = controller.values();

    let err = controller.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Submission(SubmissionError::Status(502))));
    assert_eq!(controller.values(), before);
    assert_eq!(notifier.failure_count(), 1);
}

/// Stub image host answering every upload with `reply` and `status`
async fn image_host(status: StatusCode, reply: Value, seen: Captured) -> String {
    let app = Router::new().route(
        "/upload",
        post(
            move |Query(query): Query<HashMap<String, String>>, body: Bytes| async move {
                seen.lock().unwrap().push(json!({
                    "key": query.get("key"),
                    "has_file": String::from_utf8_lossy(&body).contains("bali.png"),
                }));
                (status, Json(reply))
            },
        ),
    );

    format!("{}/upload", spawn(app).await)
}

#[tokio::test]
async fn hosted_upload_returns_hosted_url() {
    let seen = Captured::default();
    let url = image_host(
        StatusCode::OK,
        json!({"data": {"url": "https://i.ibb.co/abc/bali.png", "display_url": "https://i.ibb.co/abc/bali-thumb.png"}}),
        seen.clone(),
    )
    .await;
    let uploader = HostedImageUploader::new(url, "test-key").unwrap();

    let encoded = uploader.encode(&png()).await.unwrap();

    assert_eq!(encoded.reference, "https://i.ibb.co/abc/bali.png");
    assert_eq!(encoded.preview, "https://i.ibb.co/abc/bali-thumb.png");
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0]["key"], json!("test-key"));
    assert_eq!(seen[0]["has_file"], json!(true));
}

#[tokio::test]
async fn hosted_upload_rejection_is_an_error() {
    let url = image_host(
        StatusCode::BAD_REQUEST,
        json!({"error": "bad key"}),
        Captured::default(),
    )
    .await;
    let uploader = HostedImageUploader::new(url, "wrong").unwrap();

    let err = uploader.encode(&png()).await.unwrap_err();
    assert!(matches!(err, ImageUploadError::Status(400)));
}

#[tokio::test]
async fn hosted_upload_without_url_is_an_error() {
    let url = image_host(StatusCode::OK, json!({"data": {}}), Captured::default()).await;
    let uploader = HostedImageUploader::new(url, "k").unwrap();

    let err = uploader.encode(&png()).await.unwrap_err();
    assert!(matches!(err, ImageUploadError::MissingUrl(_)));
}

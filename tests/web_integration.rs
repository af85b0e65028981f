//! Web API integration tests
//!
//! Tests for the REST API endpoints.

#![cfg(feature = "web")]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::path::Path;
use tower::ServiceExt;

use scroll_locator::recognition::{CompressOptions, RecognizedText};
use scroll_locator::{
    CorpusStore, ImageCompressor, Normalizer, ProgressCallback, Recognizer, Section, ServerConfig,
    Session, SessionOptions, WebServer,
};

struct TextRecognizer;

impl Recognizer for TextRecognizer {
    async fn recognize(&self, image: Vec<u8>) -> scroll_locator::recognition::Result<RecognizedText> {
        Ok(RecognizedText::new(String::from_utf8_lossy(&image)))
    }
}

/// Recognizer that reports an engine installed outside `PATH`
struct CustomEngine;

impl Recognizer for CustomEngine {
    async fn recognize(&self, image: Vec<u8>) -> scroll_locator::recognition::Result<RecognizedText> {
        Ok(RecognizedText::new(String::from_utf8_lossy(&image)))
    }

    fn engine_path(&self) -> Option<&Path> {
        Some(Path::new("/opt/ocr/bin/tesseract-5"))
    }
}

struct Passthrough;

impl ImageCompressor for Passthrough {
    fn compress(
        &self,
        image: &[u8],
        _options: &CompressOptions,
        _progress: &dyn ProgressCallback,
    ) -> scroll_locator::recognition::Result<Vec<u8>> {
        Ok(image.to_vec())
    }
}

const BOUNDARY: &str = "scroll-locator-test-boundary";

fn corpus() -> CorpusStore {
    CorpusStore::from_parts(
        vec![
            Section::new("בראשית", "Bereshit", 1),
            Section::new("נח", "Noach", 3),
        ],
        vec![
            "בראשית ברא אלהים".to_string(),
            "ויאמר אלהים יהי אור".to_string(),
            "אלה תולדת נח".to_string(),
        ],
        &Normalizer::hebrew(),
    )
    .unwrap()
}

fn router() -> Router {
    let session = Session::new(corpus(), TextRecognizer, Passthrough, SessionOptions::default());
    WebServer::new(session, ServerConfig::default()).build_router()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_photo(field: &str, text: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n{t}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = field,
        t = text
    );
    Request::post("/api/photo")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = router()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["sections"], 2);
    assert_eq!(json["columns"], 3);
    assert_eq!(json["tesseract"], false);
    assert!(json.get("engine").is_none());
}

#[tokio::test]
async fn test_health_reports_configured_engine() {
    let session = Session::new(corpus(), CustomEngine, Passthrough, SessionOptions::default());
    let response = WebServer::new(session, ServerConfig::default())
        .build_router()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["tesseract"], true);
    assert_eq!(json["engine"], "/opt/ocr/bin/tesseract-5");
}

#[tokio::test]
async fn test_sections() {
    let response = router()
        .oneshot(Request::get("/api/sections").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json[1]["index"], 1);
    assert_eq!(json[1]["name_foreign"], "Noach");
    assert_eq!(json[1]["start_column"], 3);
}

#[tokio::test]
async fn test_initial_state() {
    let response = router()
        .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["step"], "awaiting_section");
    assert!(json["section"].is_null());
}

#[tokio::test]
async fn test_select_section_then_photo() {
    let app = router();

    let response = app
        .clone()
        .oneshot(post_json("/api/section", json!({ "index": 1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"]["step"], "awaiting_photo");
    assert_eq!(json["views"][0]["render"]["payload"]["kind"], "take_photo");

    let response = app
        .clone()
        .oneshot(post_photo("image", "ויאמר אלהים יהי אור"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"]["step"], "showing_result");
    assert_eq!(json["matched"]["column"], 2);
    assert_eq!(json["superseded"], false);
    assert_eq!(json["views"][0]["view"], "analyzing");

    let outcome = &json["views"][1]["render"]["payload"]["outcome"];
    assert_eq!(outcome["kind"], "move");
    assert_eq!(outcome["direction"], "forward");
    assert_eq!(outcome["magnitude"], 1);
}

#[tokio::test]
async fn test_unknown_section() {
    let response = router()
        .oneshot(post_json("/api/section", json!({ "index": 9 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Unknown section"));
}

#[tokio::test]
async fn test_photo_without_letters_asks_retake() {
    let response = router()
        .oneshot(post_photo("image", "12345"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"]["step"], "awaiting_section");
    assert_eq!(json["views"][1]["view"], "retake");
    assert_eq!(json["views"][1]["reason"]["kind"], "no_text");
    assert!(json.get("matched").is_none());
}

#[tokio::test]
async fn test_photo_missing_field() {
    let response = router()
        .oneshot(post_photo("file", "ויאמר"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

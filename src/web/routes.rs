//! REST API routes for the web server
//!
//! Provides endpoints for section selection, photo submission, session
//! state and health checks.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::corpus::{CorpusStore, Section};
use crate::matching::ColumnMatch;
use crate::navigation::NavigationState;
use crate::progress::{NoopProgress, ProgressCallback};
use crate::recognition::{ImageCompressor, Recognizer};
use crate::session::{PhotoOutcome, RecordingPresenter, Session, SessionError, View};

/// Multipart field carrying the photo
pub const PHOTO_FIELD: &str = "image";

/// Application state shared across handlers
pub struct AppState<R, C> {
    pub session: Mutex<Session<R, C>>,
    pub corpus: Arc<CorpusStore>,
    pub engine: Option<PathBuf>,
    pub version: String,
}

impl<R, C> AppState<R, C>
where
    R: Recognizer + 'static,
    C: ImageCompressor + 'static,
{
    pub fn new(session: Session<R, C>) -> Self {
        Self {
            corpus: session.corpus_handle(),
            engine: session.engine_path(),
            session: Mutex::new(session),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Build the API router
pub fn api_routes<R, C>() -> Router<Arc<AppState<R, C>>>
where
    R: Recognizer + 'static,
    C: ImageCompressor + 'static,
{
    Router::new()
        .route("/health", get(health_check::<R, C>))
        .route("/sections", get(list_sections::<R, C>))
        .route("/state", get(get_state::<R, C>))
        .route("/section", post(select_section::<R, C>))
        .route("/photo", post(submit_photo::<R, C>))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub tesseract: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    pub sections: usize,
    pub columns: usize,
}

/// Health check endpoint
async fn health_check<R, C>(State(state): State<Arc<AppState<R, C>>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        tesseract: state.engine.is_some(),
        engine: state.engine.as_ref().map(|path| path.display().to_string()),
        sections: state.corpus.section_count(),
        columns: state.corpus.column_count(),
    })
}

/// One entry of the section list
#[derive(Debug, Serialize)]
pub struct SectionEntry {
    pub index: usize,
    #[serde(flatten)]
    pub section: Section,
}

async fn list_sections<R, C>(State(state): State<Arc<AppState<R, C>>>) -> Json<Vec<SectionEntry>> {
    let entries = state
        .corpus
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| SectionEntry {
            index,
            section: section.clone(),
        })
        .collect();
    Json(entries)
}

async fn get_state<R, C>(State(state): State<Arc<AppState<R, C>>>) -> Json<NavigationState>
where
    R: Recognizer + 'static,
    C: ImageCompressor + 'static,
{
    Json(state.session.lock().await.state())
}

/// Section selection request; `null` selects the placeholder
#[derive(Debug, Deserialize)]
pub struct SelectSectionRequest {
    pub index: Option<usize>,
}

/// State after an event plus the views it rendered
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub state: NavigationState,
    pub views: Vec<View>,
    /// Column matched from the photo, when one was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<ColumnMatch>,
    /// A newer photo was submitted while this one was analyzed
    pub superseded: bool,
}

async fn select_section<R, C>(
    State(state): State<Arc<AppState<R, C>>>,
    Json(request): Json<SelectSectionRequest>,
) -> Result<Json<SessionResponse>, AppError>
where
    R: Recognizer + 'static,
    C: ImageCompressor + 'static,
{
    let mut presenter = RecordingPresenter::new();
    let mut session = state.session.lock().await;
    let navigation = session.select_section(request.index, &mut presenter)?;

    Ok(Json(SessionResponse {
        state: navigation,
        views: presenter.take(),
        matched: None,
        superseded: false,
    }))
}

async fn submit_photo<R, C>(
    State(state): State<Arc<AppState<R, C>>>,
    mut multipart: Multipart,
) -> Result<Json<SessionResponse>, AppError>
where
    R: Recognizer + 'static,
    C: ImageCompressor + 'static,
{
    let mut image: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(PHOTO_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            image = Some(data.to_vec());
        }
    }
    let image = image
        .filter(|data| !data.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing '{}' field", PHOTO_FIELD)))?;
    debug!(bytes = image.len(), "Photo received");

    // The lock is released while the photo is analyzed so a newer
    // submission can supersede this one
    let mut presenter = RecordingPresenter::new();
    let job = state.session.lock().await.begin_photo(&mut presenter);
    let progress: Arc<dyn ProgressCallback> = Arc::new(NoopProgress);
    let result = job.run(image, progress).await;

    let mut session = state.session.lock().await;
    let outcome = session.finish_photo(result, &mut presenter);
    let (matched, superseded) = match outcome {
        PhotoOutcome::Applied { matched, .. } => (Some(matched), false),
        PhotoOutcome::Retake(_) => (None, false),
        PhotoOutcome::Stale => (None, true),
    };

    Ok(Json(SessionResponse {
        state: session.state(),
        views: presenter.take(),
        matched,
        superseded,
    }))
}

/// API error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownSection { .. } => AppError::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            tesseract: false,
            engine: None,
            sections: 54,
            columns: 245,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"sections\":54"));
        assert!(!json.contains("engine"));
    }

    #[test]
    fn test_section_entry_flattened() {
        let entry = SectionEntry {
            index: 1,
            section: Section::new("נח", "Noach", 7),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"index\":1"));
        assert!(json.contains("\"name_foreign\":\"Noach\""));
        assert!(json.contains("\"start_column\":7"));
    }

    #[test]
    fn test_select_request_null_index() {
        let request: SelectSectionRequest = serde_json::from_str(r#"{"index": null}"#).unwrap();
        assert!(request.index.is_none());
        let request: SelectSectionRequest = serde_json::from_str(r#"{"index": 2}"#).unwrap();
        assert_eq!(request.index, Some(2));
    }

    #[test]
    fn test_session_error_maps_to_not_found() {
        let err: AppError = SessionError::UnknownSection { index: 3, count: 1 }.into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}

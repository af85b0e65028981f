//! Session Controller
//!
//! Owns the navigation state and runs the photo pipeline:
//! compression, recognition, normalization and matching.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::presenter::Presenter;
use super::types::{
    PhotoOutcome, PhotoResult, Result, RetakeReason, SessionError, SessionOptions, StartupError,
};
use crate::corpus::{CorpusPaths, CorpusStore};
use crate::matching::{ColumnMatch, ColumnMatcher};
use crate::navigation::{NavigationEvent, NavigationMachine, NavigationState, Transition};
use crate::progress::{LocateStage, ProgressCallback};
use crate::recognition::{
    ImageCompressor, JpegCompressor, RecognitionError, Recognizer, TesseractOptions,
    TesseractRecognizer,
};

/// One user's navigation session
pub struct Session<R, C = JpegCompressor> {
    corpus: Arc<CorpusStore>,
    matcher: Arc<ColumnMatcher>,
    recognizer: Arc<R>,
    compressor: Arc<C>,
    options: SessionOptions,
    state: NavigationState,
    generation: u64,
}

impl Session<TesseractRecognizer, JpegCompressor> {
    /// Load the corpus and start the OCR engine concurrently
    pub async fn start(
        paths: CorpusPaths,
        tesseract: TesseractOptions,
        options: SessionOptions,
    ) -> std::result::Result<Self, StartupError> {
        Self::start_with(paths, TesseractRecognizer::initialize(tesseract), options).await
    }
}

impl<R> Session<R, JpegCompressor>
where
    R: Recognizer + 'static,
{
    /// Load the corpus while `engine` initializes; either failure aborts startup
    pub async fn start_with<F>(
        paths: CorpusPaths,
        engine: F,
        options: SessionOptions,
    ) -> std::result::Result<Self, StartupError>
    where
        F: Future<Output = std::result::Result<R, RecognitionError>>,
    {
        let normalizer = options.normalizer;
        let corpus = async move {
            tokio::task::spawn_blocking(move || CorpusStore::load(&paths, &normalizer))
                .await
                .map_err(|e| StartupError::Task(e.to_string()))
                .and_then(|loaded| loaded.map_err(StartupError::from))
        };
        let engine = async move { engine.await.map_err(StartupError::from) };

        let (corpus, recognizer) = tokio::try_join!(corpus, engine)?;
        Ok(Self::new(corpus, recognizer, JpegCompressor, options))
    }
}

impl<R, C> Session<R, C>
where
    R: Recognizer + 'static,
    C: ImageCompressor + 'static,
{
    /// Create a session over a loaded corpus
    pub fn new(corpus: CorpusStore, recognizer: R, compressor: C, options: SessionOptions) -> Self {
        let matcher = ColumnMatcher::from_corpus(&corpus);
        Self {
            corpus: Arc::new(corpus),
            matcher: Arc::new(matcher),
            recognizer: Arc::new(recognizer),
            compressor: Arc::new(compressor),
            options,
            state: NavigationState::new(),
            generation: 0,
        }
    }

    /// Current navigation state
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Loaded corpus
    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    /// Shared handle to the corpus
    pub fn corpus_handle(&self) -> Arc<CorpusStore> {
        Arc::clone(&self.corpus)
    }

    /// Session options
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Resolved path of the OCR engine, if the recognizer runs one
    pub fn engine_path(&self) -> Option<PathBuf> {
        self.recognizer.engine_path().map(|path| path.to_path_buf())
    }

    /// Latest issued photo generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Select a section (0-based), or the placeholder with `None`
    pub fn select_section(
        &mut self,
        index: Option<usize>,
        presenter: &mut dyn Presenter,
    ) -> Result<NavigationState> {
        if let Some(index) = index {
            let count = self.corpus.section_count();
            if index >= count {
                return Err(SessionError::UnknownSection { index, count });
            }
        }

        let transition = NavigationMachine::transition(
            &self.state,
            NavigationEvent::SectionSelected(index),
            self.corpus.sections(),
        );
        debug!(?index, step = %transition.state.step, "Section selected");
        self.apply(transition, presenter);
        Ok(self.state)
    }

    /// Issue a new generation and prepare the pipeline for one photo.
    ///
    /// Any job issued earlier becomes stale.
    pub fn begin_photo(&mut self, presenter: &mut dyn Presenter) -> PhotoJob<R, C> {
        self.generation += 1;
        presenter.render_analyzing();
        self.job(self.generation)
    }

    /// Apply a pipeline result if it belongs to the latest generation
    pub fn finish_photo(&mut self, result: PhotoResult, presenter: &mut dyn Presenter) -> PhotoOutcome {
        if result.generation != self.generation {
            info!(
                generation = result.generation,
                latest = self.generation,
                "Discarding superseded photo result"
            );
            return PhotoOutcome::Stale;
        }

        match result.outcome {
            Ok(matched) => {
                let transition = NavigationMachine::transition(
                    &self.state,
                    NavigationEvent::PhotoRecognized(matched.column),
                    self.corpus.sections(),
                );
                self.apply(transition, presenter);
                info!(column = matched.column, score = matched.score, "Column recognized");
                PhotoOutcome::Applied {
                    state: self.state,
                    matched,
                }
            }
            Err(reason) => {
                warn!(?reason, "Photo needs a retake");
                presenter.render_retake(&reason);
                PhotoOutcome::Retake(reason)
            }
        }
    }

    /// Run the whole photo flow for one image
    pub async fn submit_photo(
        &mut self,
        image: Vec<u8>,
        progress: Arc<dyn ProgressCallback>,
        presenter: &mut dyn Presenter,
    ) -> PhotoOutcome {
        let job = self.begin_photo(presenter);
        let result = job.run(image, progress).await;
        self.finish_photo(result, presenter)
    }

    /// Recognize and normalize a photo without touching the state
    pub async fn read_photo(
        &self,
        image: Vec<u8>,
        progress: Arc<dyn ProgressCallback>,
    ) -> std::result::Result<String, RetakeReason> {
        let job = self.job(self.generation);
        let timeout = job.options.recognition_timeout;
        match tokio::time::timeout(timeout, job.read_text(image, progress)).await {
            Ok(text) => text,
            Err(_) => Err(PhotoJob::<R, C>::timed_out(timeout)),
        }
    }

    /// Rank reference columns against raw text, best first
    pub fn rank(&self, text: &str, limit: usize) -> Vec<ColumnMatch> {
        self.matcher
            .rank(&self.options.normalizer.normalize(text), limit)
    }

    fn job(&self, generation: u64) -> PhotoJob<R, C> {
        PhotoJob {
            generation,
            matcher: Arc::clone(&self.matcher),
            recognizer: Arc::clone(&self.recognizer),
            compressor: Arc::clone(&self.compressor),
            options: self.options.clone(),
        }
    }

    fn apply(&mut self, transition: Transition, presenter: &mut dyn Presenter) {
        self.state = transition.state;
        if let Some(render) = transition.render {
            presenter.render_step(&render);
        }
    }
}

/// Photo pipeline detached from the session, so a newer submission can
/// be issued while it runs
pub struct PhotoJob<R, C> {
    generation: u64,
    matcher: Arc<ColumnMatcher>,
    recognizer: Arc<R>,
    compressor: Arc<C>,
    options: SessionOptions,
}

impl<R, C> PhotoJob<R, C>
where
    R: Recognizer + 'static,
    C: ImageCompressor + 'static,
{
    /// Generation this job was issued
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run compression, recognition and matching under the timeout
    pub async fn run(self, image: Vec<u8>, progress: Arc<dyn ProgressCallback>) -> PhotoResult {
        let timeout = self.options.recognition_timeout;
        progress.on_stage_start(LocateStage::Initializing);
        progress.on_stage_complete(
            LocateStage::Initializing,
            &format!("generation {}", self.generation),
        );

        let located = self.locate(image, Arc::clone(&progress));
        let outcome = match tokio::time::timeout(timeout, located).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Self::timed_out(timeout)),
        };

        let summary = match &outcome {
            Ok(matched) => format!("column {}", matched.column),
            Err(reason) => reason.to_string(),
        };
        progress.on_stage_complete(LocateStage::Completed, &summary);

        PhotoResult {
            generation: self.generation,
            outcome,
        }
    }

    async fn locate(
        &self,
        image: Vec<u8>,
        progress: Arc<dyn ProgressCallback>,
    ) -> std::result::Result<ColumnMatch, RetakeReason> {
        let text = self.read_text(image, Arc::clone(&progress)).await?;

        progress.on_stage_start(LocateStage::Matching);
        let matcher = Arc::clone(&self.matcher);
        let matched = tokio::task::spawn_blocking(move || matcher.best_match(&text))
            .await
            .map_err(|e| RetakeReason::RecognitionFailed {
                message: e.to_string(),
            })?;

        if matched.score < self.options.min_similarity {
            progress.on_stage_complete(LocateStage::Matching, "no confident match");
            return Err(RetakeReason::Inconclusive {
                best_column: matched.column,
                score: matched.score,
            });
        }

        progress.on_stage_complete(
            LocateStage::Matching,
            &format!("column {} (score {:.3})", matched.column, matched.score),
        );
        Ok(matched)
    }

    async fn read_text(
        &self,
        image: Vec<u8>,
        progress: Arc<dyn ProgressCallback>,
    ) -> std::result::Result<String, RetakeReason> {
        progress.on_stage_start(LocateStage::Compressing);
        let compressor = Arc::clone(&self.compressor);
        let compression = self.options.compression;
        let stage_progress = Arc::clone(&progress);
        let original_len = image.len();
        let compressed = tokio::task::spawn_blocking(move || {
            compressor.compress(&image, &compression, &*stage_progress)
        })
        .await
        .map_err(|e| RetakeReason::RecognitionFailed {
            message: e.to_string(),
        })?
        .map_err(Self::failed)?;
        progress.on_stage_complete(
            LocateStage::Compressing,
            &format!("{} -> {} bytes", original_len, compressed.len()),
        );

        progress.on_stage_start(LocateStage::Recognizing);
        let recognized = self
            .recognizer
            .recognize(compressed)
            .await
            .map_err(Self::failed)?;
        let text = self.options.normalizer.normalize(&recognized.text);
        progress.on_stage_complete(
            LocateStage::Recognizing,
            &format!("{} letters", text.chars().count()),
        );
        progress.on_debug(&format!("normalized text: {}", text));

        if text.is_empty() {
            return Err(RetakeReason::NoText);
        }
        Ok(text)
    }

    fn failed(error: RecognitionError) -> RetakeReason {
        RetakeReason::RecognitionFailed {
            message: error.to_string(),
        }
    }

    fn timed_out(timeout: std::time::Duration) -> RetakeReason {
        warn!(?timeout, "Photo pipeline timed out");
        RetakeReason::TimedOut {
            timeout_ms: timeout.as_millis() as u64,
        }
    }
}

//! Text extraction for a single form page
//!
//! [`TextExtractor::extract`] never fails: load, decode, preprocessing and
//! engine errors (including an engine that could not be provisioned) all come
//! back as [`Transcription::Failed`] carrying the cause.

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::engines;
use crate::error::OcrError;
use crate::preprocess::Preset;
use crate::provision::Provisioner;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

/// OCR outcome for one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcription {
    /// Recognized text exactly as the engine returned it (may be empty)
    Text(String),
    /// Why no text could be produced
    Failed(String),
}

impl Transcription {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Failed(cause) => write!(f, "Error: {}", cause),
        }
    }
}

pub struct TextExtractor {
    engine: Result<Box<dyn OcrEngine>, OcrError>,
    preset: Preset,
}

impl TextExtractor {
    pub fn new(engine: Box<dyn OcrEngine>, preset: Preset) -> Self {
        Self {
            engine: Ok(engine),
            preset,
        }
    }

    /// An extractor whose every page fails with `cause`
    pub fn unavailable(cause: OcrError) -> Self {
        Self {
            engine: Err(cause),
            preset: Preset::None,
        }
    }

    /// Pre-flight: provision assets and initialize the configured engine.
    ///
    /// Initialization failures are logged and kept; they surface as the
    /// failure of each page extracted afterwards.
    pub fn prepare(config: &Config) -> Self {
        let provisioner = Provisioner::new(config);

        match engines::build(config.engine.as_deref(), config, &provisioner) {
            Ok(engine) => {
                tracing::info!(
                    "Using {} engine ({}), preprocessing: {}",
                    engine.name(),
                    engine.description(),
                    config.preprocess.as_str()
                );
                Self::new(engine, config.preprocess)
            }
            Err(e) => {
                tracing::warn!("OCR engine not available: {}", e);
                Self::unavailable(e)
            }
        }
    }

    /// Transcribe the image at `path`
    pub fn extract(&self, path: &Path) -> Transcription {
        match self.try_extract(path) {
            Ok(text) => Transcription::Text(text),
            Err(e) => {
                tracing::warn!("Extraction failed for {:?}: {}", path, e);
                Transcription::Failed(e.to_string())
            }
        }
    }

    fn try_extract(&self, path: &Path) -> Result<String, OcrError> {
        let engine = self
            .engine
            .as_ref()
            .map_err(|e| OcrError::EngineUnavailable(e.to_string()))?;

        let image = image::open(path).map_err(|source| OcrError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            "Loaded {:?}: {}x{}",
            path,
            image.width(),
            image.height()
        );

        let image = self.preset.apply(image);

        let start = Instant::now();
        let text = panic::catch_unwind(AssertUnwindSafe(|| engine.recognize(&image)))
            .map_err(|payload| {
                OcrError::ProcessingError(format!(
                    "{} engine panicked: {}",
                    engine.name(),
                    panic_message(payload.as_ref())
                ))
            })??;

        tracing::debug!(
            "Recognized {} chars in {}ms",
            text.chars().count(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

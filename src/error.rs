use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("{} is not cached and downloads are disabled", .0.display())]
    AssetNotCached(PathBuf),

    #[error("Unknown OCR engine '{name}' (available: {available})")]
    UnknownEngine { name: String, available: String },

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to process image: {0}")]
    ProcessingError(String),
}

use crate::error::OcrError;
use image::DynamicImage;

/// Trait that all OCR engines must implement
pub trait OcrEngine {
    /// Returns the engine identifier (e.g., "ocrs", "leptess")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize the text in a decoded image, returned exactly as the engine
    /// produced it
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

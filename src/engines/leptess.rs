//! Leptess/Tesseract engine implementation
//!
//! Tesseract-based OCR engine, the same recognizer the form scans were first
//! transcribed with. Uses tesseract-static for static linking (no system
//! dependencies). Trained data comes from `--tessdata-path` or is provisioned
//! into the cache from tessdata_fast.

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::provision::Provisioner;
use image::DynamicImage;
use std::path::Path;
use tesseract_static::tesseract::Tesseract;

/// Tesseract OCR Engine
pub struct LeptessEngine {
    /// Path to tessdata directory
    tessdata_path: String,
    /// Recognition language
    language: String,
}

impl LeptessEngine {
    pub fn new(config: &Config, provisioner: &Provisioner) -> Result<Self, OcrError> {
        let language = config.language.clone();
        let traineddata_file = format!("{}.traineddata", language);

        let traineddata_path = match &config.tessdata_path {
            Some(dir) => {
                let path = dir.join(&traineddata_file);
                if !path.exists() {
                    return Err(OcrError::InitializationError(format!(
                        "{} not found in tessdata directory {:?}",
                        traineddata_file, dir
                    )));
                }
                path
            }
            None => provisioner.ensure(
                &Path::new("tessdata").join(&traineddata_file),
                &tessdata_url(&language),
            )?,
        };

        // Tesseract expects the directory, not the file
        let tessdata_path = traineddata_path
            .parent()
            .and_then(Path::to_str)
            .map(str::to_string)
            .ok_or_else(|| OcrError::InitializationError("Invalid tessdata path".to_string()))?;

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess = Tesseract::new(Some(&tessdata_path), Some(&language)).map_err(|e| {
            OcrError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Leptess engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            language
        );

        Ok(Self {
            tessdata_path,
            language,
        })
    }
}

impl OcrEngine for LeptessEngine {
    fn name(&self) -> &'static str {
        "leptess"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine - better for noisy/messy images like phone photos"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let rgb_img = image.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        // BMP is always supported by leptonica
        let mut bmp_data = Vec::new();
        rgb_img
            .write_to(
                &mut std::io::Cursor::new(&mut bmp_data),
                image::ImageFormat::Bmp,
            )
            .map_err(|e| OcrError::ProcessingError(format!("Failed to convert to BMP: {}", e)))?;

        tracing::debug!(
            "Processing image: {}x{}, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.language))
            .map_err(|e| OcrError::ProcessingError(format!("Failed to create Tesseract: {}", e)))?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            OcrError::ProcessingError(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess
            .recognize()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to recognize text: {}", e)))?;

        tess.get_text()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to get text: {}", e)))
    }
}

/// tessdata_fast keeps downloads small
fn tessdata_url(language: &str) -> String {
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

//! OCR engine implementations
//!
//! This module contains implementations of the OcrEngine trait for different
//! OCR backends. Engines are conditionally compiled based on feature flags and
//! only the selected one is initialized.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::provision::Provisioner;

/// Names of the engines compiled into this binary, in preference order
pub fn available() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut names = Vec::new();

    #[cfg(feature = "engine-ocrs")]
    names.push("ocrs");

    #[cfg(feature = "engine-leptess")]
    names.push("leptess");

    names
}

/// Initialize the engine called `name`, or the first available one when no
/// name is given. Assets the engine needs are fetched through `provisioner`.
#[cfg_attr(
    not(any(feature = "engine-ocrs", feature = "engine-leptess")),
    allow(unused_variables)
)]
pub fn build(
    name: Option<&str>,
    config: &Config,
    provisioner: &Provisioner,
) -> Result<Box<dyn OcrEngine>, OcrError> {
    let available = available();

    let name = match name {
        Some(name) => name,
        None => available.first().copied().ok_or_else(|| {
            OcrError::InitializationError(
                "No OCR engines available. Build with --features engine-ocrs or --features engine-leptess".to_string(),
            )
        })?,
    };

    tracing::info!("Initializing {} engine...", name);

    match name {
        #[cfg(feature = "engine-ocrs")]
        "ocrs" => Ok(Box::new(ocrs::OcrsEngine::new(config, provisioner)?)),

        #[cfg(feature = "engine-leptess")]
        "leptess" => Ok(Box::new(leptess::LeptessEngine::new(config, provisioner)?)),

        other => Err(OcrError::UnknownEngine {
            name: other.to_string(),
            available: available.join(", "),
        }),
    }
}

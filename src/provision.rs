//! OCR asset provisioning
//!
//! Engines need model files (ocrs) or trained data (Tesseract) on disk before
//! they can be created. The provisioner resolves those files inside a cache
//! directory and downloads whatever is missing, unless running offline.

use crate::config::Config;
use crate::error::OcrError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Resolves OCR assets in the local cache, downloading them on demand
#[derive(Debug, Clone)]
pub struct Provisioner {
    cache_dir: PathBuf,
    offline: bool,
}

impl Provisioner {
    pub fn new(config: &Config) -> Self {
        Self {
            cache_dir: config.cache_dir.clone(),
            offline: config.offline,
        }
    }

    /// Ensure `relative` exists under the cache directory and return its path.
    /// A missing file is fetched from `url`, or reported as
    /// [`OcrError::AssetNotCached`] when downloads are disabled.
    pub fn ensure(&self, relative: &Path, url: &str) -> Result<PathBuf, OcrError> {
        let target = self.cache_dir.join(relative);

        if target.exists() {
            tracing::info!("Using cached asset {:?}", target);
            return Ok(target);
        }

        if self.offline {
            return Err(OcrError::AssetNotCached(target));
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                OcrError::InitializationError(format!("Failed to create cache directory: {}", e))
            })?;
        }

        tracing::info!("Downloading {} (this may take a moment)...", url);
        download_file(url, &target)?;
        tracing::info!("Downloaded {:?}", target);

        Ok(target)
    }
}

/// Download a file from URL to path using ureq.
///
/// The body lands in a `.part` sibling and is renamed into place once fully
/// written.
fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::InitializationError(format!("Failed to download {}: {}", url, e)))?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        OcrError::InitializationError(format!("Failed to read response body: {}", e))
    })?;

    let partial = path.with_extension("part");
    let mut file = File::create(&partial).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create {:?}: {}", partial, e))
    })?;

    file.write_all(&buffer).map_err(|e| {
        OcrError::InitializationError(format!("Failed to write {:?}: {}", partial, e))
    })?;

    std::fs::rename(&partial, path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to move {:?} into place: {}", partial, e))
    })?;

    Ok(())
}

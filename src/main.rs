use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod driver;
mod engine;
mod engines;
mod error;
mod extractor;
mod preprocess;
mod provision;
mod questions;

use preprocess::Preset;

#[derive(Parser, Debug)]
#[command(name = "hts-form-extract")]
#[command(about = "Extract text and numbered questions from the scanned HTS form pages")]
#[command(version)]
pub struct Args {
    /// Directory holding the form page images (defaults to hts-templetes/ next to the executable)
    #[arg(long, env = "HTS_FORM_DIR")]
    pub base_dir: Option<PathBuf>,

    /// File name of the front page image
    #[arg(long, default_value = config::DEFAULT_FRONT_IMAGE)]
    pub front: String,

    /// File name of the back page image
    #[arg(long, default_value = config::DEFAULT_BACK_IMAGE)]
    pub back: String,

    /// OCR engine to use ("ocrs", "leptess"); defaults to the first compiled-in engine
    #[arg(long, env = "OCR_ENGINE")]
    pub engine: Option<String>,

    /// Recognition language for Tesseract (e.g., "eng")
    #[arg(long, env = "OCR_DEFAULT_LANGUAGE", default_value = "eng")]
    pub language: String,

    /// Image preprocessing applied before recognition
    #[arg(long, env = "OCR_PREPROCESS", value_enum, default_value_t = Preset::None)]
    pub preprocess: Preset,

    /// Directory for downloaded OCR models and tessdata
    #[arg(long, env = "OCR_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Path to an existing tessdata directory (skips the tessdata download)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<PathBuf>,

    /// Never download OCR assets, use only what is already cached
    #[arg(long, env = "OCR_OFFLINE")]
    pub offline: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the report on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from(args);

    tracing::info!("Starting hts-form-extract v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Reading form pages from {:?}", config.base_dir);

    let extractor = extractor::TextExtractor::prepare(&config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let pages = driver::run(
        &config.front_path(),
        &config.back_path(),
        &extractor,
        &mut out,
    )?;

    for page in &pages {
        match page {
            driver::PageReport::Missing { side } => {
                tracing::info!("{:?} page skipped: image not found", side)
            }
            driver::PageReport::Extracted {
                side,
                transcription,
                questions,
            } => tracing::info!(
                "{:?} page: {} numbered questions{}",
                side,
                questions.len(),
                if transcription.is_failure() {
                    " (extraction failed)"
                } else {
                    ""
                }
            ),
        }
    }

    Ok(())
}

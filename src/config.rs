use crate::preprocess::Preset;
use crate::Args;
use std::path::{Path, PathBuf};

/// Directory next to the executable that holds the blank form scans
pub const DEFAULT_TEMPLATE_DIR: &str = "hts-templetes";
pub const DEFAULT_FRONT_IMAGE: &str = "blank-hts-form-front.jpg";
pub const DEFAULT_BACK_IMAGE: &str = "blank-hts-form-back.jpg";

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub front_image: String,
    pub back_image: String,
    pub engine: Option<String>,
    #[allow(dead_code)]
    pub language: String,
    pub preprocess: Preset,
    pub cache_dir: PathBuf,
    #[allow(dead_code)]
    pub tessdata_path: Option<PathBuf>,
    pub offline: bool,
}

impl Config {
    pub fn front_path(&self) -> PathBuf {
        self.base_dir.join(&self.front_image)
    }

    pub fn back_path(&self) -> PathBuf {
        self.base_dir.join(&self.back_image)
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            base_dir: args.base_dir.unwrap_or_else(default_base_dir),
            front_image: args.front,
            back_image: args.back,
            engine: args.engine,
            language: args.language,
            preprocess: args.preprocess,
            cache_dir: args.cache_dir.unwrap_or_else(default_cache_dir),
            tessdata_path: args.tessdata_path,
            offline: args.offline,
        }
    }
}

/// `hts-templetes/` beside the running executable, or relative to the working
/// directory when the executable path cannot be resolved
fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DEFAULT_TEMPLATE_DIR)
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("hts-form-extract")
}

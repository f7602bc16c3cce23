use crate::model::AppError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const PRODUCT_FILE: &str = "products.txt";
pub const LISTING_FILE: &str = "listings.txt";
pub const RESULT_FILE: &str = "results.txt";

/// What to do with a listing line that cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedListingPolicy {
    /// Log it and move on to the next line.
    #[default]
    Skip,
    /// Fail the whole run.
    Abort,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub product_file: PathBuf,
    pub listing_file: PathBuf,
    pub result_file: PathBuf,
    pub on_malformed_listing: MalformedListingPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            product_file: PathBuf::from(PRODUCT_FILE),
            listing_file: PathBuf::from(LISTING_FILE),
            result_file: PathBuf::from(RESULT_FILE),
            on_malformed_listing: MalformedListingPolicy::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    let content = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
}

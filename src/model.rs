// Core structs: Product, Listing, their normalized views, error types
use chrono::{DateTime, Utc};
use serde_json::value::RawValue;
use std::path::PathBuf;
use thiserror::Error;

/// A catalog entry as it appeared in the product file.
#[derive(Debug, Clone)]
pub struct Product {
    pub name: String,
    pub manufacturer: String,
    pub family: Option<String>,
    pub model: String,
    pub announced_date: Option<DateTime<Utc>>,
}

/// Comparison copy of a product. `name` keeps its original spelling,
/// everything else is case-folded and trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProduct {
    pub name: String,
    pub manufacturer: String,
    pub family: Option<String>,
    pub model: String,
}

/// A marketplace listing. `raw` is the exact JSON text of the input line and
/// is what ends up in the results.
#[derive(Debug, Clone)]
pub struct Listing {
    pub title: String,
    pub manufacturer: String,
    pub raw: Box<RawValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListing {
    pub title: String,
    pub manufacturer: String,
}

/// Summary of one matching pass.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub products: usize,
    pub manufacturer_groups: usize,
    pub listings_read: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub skipped: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl MatchReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("line {line}: not valid UTF-8")]
    InvalidEncoding { line: usize },
    #[error("line {line}: invalid JSON: {reason}")]
    InvalidJson { line: usize, reason: String },
    #[error("line {line}: missing or non-string field `{field}`")]
    MissingField { line: usize, field: String },
    #[error("line {line}: field `{field}` must be a string")]
    InvalidField { line: usize, field: String },
}

impl RecordError {
    pub fn line(&self) -> usize {
        match self {
            RecordError::InvalidEncoding { line }
            | RecordError::InvalidJson { line, .. }
            | RecordError::MissingField { line, .. }
            | RecordError::InvalidField { line, .. } => *line,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error on {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed product record: {0}")]
    MalformedProduct(#[source] RecordError),
    #[error("malformed listing record: {0}")]
    MalformedListing(#[source] RecordError),
    #[error("duplicate product name `{0}`")]
    DuplicateProduct(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io { path: path.into(), source }
    }
}

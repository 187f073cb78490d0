// ⚠️ Error types for the sales analytics pipeline
//
// Library code returns `Result<T, SalesError>`; the binary and the pipeline
// orchestration wrap these in `anyhow` with context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unable to read '{}' with supported encodings.", .0.display())]
    UnsupportedEncoding(PathBuf),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SalesError>;

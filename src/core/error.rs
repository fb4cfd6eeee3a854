use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarnetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Catalog write failed: {0}")]
    Mirror(String),
    #[error("Config error: {0}")]
    Config(String),
}

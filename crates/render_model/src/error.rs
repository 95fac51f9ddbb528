//! Error types for render model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown style sheet: {0}")]
    UnknownStyleSheet(u64),

    #[error("Invalid region geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

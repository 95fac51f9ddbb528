//! Error types for guideline content

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuidelineError {
    #[error("Unknown diagram field: {0}")]
    UnknownField(String),

    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Layout failed: {0}")]
    Layout(#[from] render_model::RenderError),
}

pub type Result<T> = std::result::Result<T, GuidelineError>;

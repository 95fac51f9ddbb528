//! Error types for DOCX output

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Document model that cannot be expressed as WordprocessingML
    #[error("Invalid DOCX structure: {0}")]
    InvalidStructure(String),

    #[error("Image error: {0}")]
    Image(String),
}

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;

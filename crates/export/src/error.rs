//! Error types for export operations

use crate::docx::DocxError;
use crate::pdf::PdfError;
use crate::raster::RasterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Capture failed: {0}")]
    Raster(#[from] RasterError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("DOCX assembly failed: {0}")]
    Docx(#[from] DocxError),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;

//! DOCX output
//!
//! A DOCX file is a ZIP archive of XML parts:
//! - `[Content_Types].xml` - content type of every part
//! - `_rels/.rels` - root relationships
//! - `word/document.xml` - main document content
//! - `word/styles.xml`, `word/settings.xml`
//! - `word/_rels/document.xml.rels` - document relationships
//! - `word/media/` - embedded pictures

mod builder;
mod content_types;
mod document_writer;
mod error;
mod media_writer;
mod model;
mod relationships;
mod styles_writer;
mod tables_writer;
mod writer;

pub use builder::{image_document, table_document, TableColumn, TableSection, TableSource};
pub use error::{DocxError, DocxResult};
pub use media_writer::EMU_PER_PIXEL;
pub use model::*;
pub use writer::{export_docx_bytes, DocxWriter};

/// XML namespaces used in DOCX files
pub mod namespaces {
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// DrawingML
    pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    /// WordprocessingML drawing
    pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
    pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
}

/// Relationship types used in DOCX
pub mod relationship_types {
    pub const DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SETTINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    pub const IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
}

/// Content types for DOCX parts
pub mod content_type_values {
    pub const DOCUMENT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const SETTINGS: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}

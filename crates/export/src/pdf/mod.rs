//! PDF output
//!
//! Page-image documents: each page carries one raster band placed with a
//! single `cm`/`Do` pair.
//!
//! - `objects`: object model and serialization
//! - `document`: catalog, page tree and info dictionary
//! - `content`: content stream operators
//! - `images`: image XObjects
//! - `writer`: file structure and the document writer
//! - `options`: export configuration

mod content;
mod document;
mod images;
mod objects;
mod options;
mod writer;

pub use document::{DocumentInfo, MediaBox};
pub use options::*;
pub use writer::{PageImage, PdfDocumentWriter, PdfError, PdfWriter};

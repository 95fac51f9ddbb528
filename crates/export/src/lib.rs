//! Export - paginated raster-to-document export
//!
//! Captures a mounted region as a bitmap, slices it into page bands and
//! assembles PDF, JPEG or Word artifacts, which are handed to a sink under
//! fixed file names.

mod artifact;
mod band;
mod capture;
mod encode;
mod error;
mod page;
mod paginate;
mod pipeline;
mod settings;
pub mod docx;
pub mod pdf;
pub mod raster;

pub use artifact::*;
pub use band::{crop_band, render_pages};
pub use capture::{PrintStyleScope, TransformResetScope};
pub use encode::{encode_jpeg, encode_png, flatten};
pub use error::*;
pub use page::*;
pub use paginate::*;
pub use pipeline::*;
pub use settings::*;

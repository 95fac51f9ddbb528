//! Render Model - capture surface and display lists
//!
//! A capture region is a laid-out element described by a flat display
//! list of render items in CSS pixels. The [`Surface`] owns the mounted
//! region together with the document-level style sheets and the
//! transform applied by the region's parent container, which is what a
//! rasterizer observes when it captures the region.

mod render_item;
mod style;
mod surface;
mod error;

pub use render_item::*;
pub use style::*;
pub use surface::*;
pub use error::*;

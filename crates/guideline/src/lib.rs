//! CHART guideline content
//!
//! Static checklist data, the user's page-number responses, the
//! methodological diagram form, and the views that lay both out as
//! capture regions for the export pipeline.

mod checklist;
mod diagram;
mod error;
pub mod view;

pub use checklist::*;
pub use diagram::*;
pub use error::*;

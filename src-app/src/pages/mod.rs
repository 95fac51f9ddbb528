//! Export pages
//!
//! Each page owns its capture surface. Before a capture it checks that
//! the region is mounted, applies any temporary styling or transform
//! reset through a scope that restores on drop, and waits the settle
//! delay.

pub mod checklist;
pub mod diagram;

pub use checklist::{checklist_table_source, AbstractChecklistPage};
pub use diagram::DiagramPage;

//! CHART guideline export shell
//!
//! Page controllers that follow the capture contract (mounted check,
//! scoped style and transform changes, settle delay), plus the command
//! handlers behind the `chart-export` binary.

pub mod commands;
pub mod pages;
pub mod state;

//! weldsheet: Cutlist-Driven Drawing Generation
//!
//! Turns a multi-body weldment part into production drawings: one part configuration and
//! one drawing sheet per non-empty cutlist item, each sheet carrying front, right and top
//! views of that item's representative body. A rule-based note composer produces the
//! manufacturing and compliance notes placed on a sheet.

pub mod cli;
pub mod composition;
pub mod config;
pub mod drawing;
pub mod error;
pub mod export;
pub mod host;
pub mod logging;
pub mod notes;
pub mod orchestrator;
pub mod part;
pub mod partition;
pub mod store;
pub mod synthesis;
pub mod types;

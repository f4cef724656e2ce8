//! CLI command implementations

pub mod process_event;
pub mod validate;

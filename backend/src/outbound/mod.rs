//! Outbound adapters implementing domain ports.
//!
//! - [`memory`]: in-memory stores, one per entity kind.
//! - [`json_file`]: the JSON data-file collaborator, which appends created
//!   records and seeds stores at startup.

pub mod json_file;
pub mod memory;

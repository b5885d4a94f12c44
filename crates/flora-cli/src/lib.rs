//! CLI library components for the plant record harvester.

pub mod logging;
pub mod summary;

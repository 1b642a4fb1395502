//! CLI command implementations.

pub mod overview;
pub mod report;
pub mod serve;

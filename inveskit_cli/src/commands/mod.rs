//! CLI subcommand implementations.

pub mod align;
pub mod analysis;
pub mod chart;
pub mod summary;

//! CLI subcommand implementations.

pub mod mounted;
pub mod report;
pub mod util;

//! CLI subcommand implementations.

pub mod code;
pub mod results;
pub mod time;

//! Regatta results CLI library.
//!
//! This crate provides the CLI interface for the results engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, TimeAction};
pub use config::Config;

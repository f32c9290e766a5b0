//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use regatta_core::{Gender, WeightClass};

/// Regatta results engine.
///
/// Normalizes entered race times, ranks lanes, assigns points and derives the
/// race codes printed on official documents.
#[derive(Debug, Parser)]
#[command(name = "regatta", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse, format or correct race times.
    #[command(subcommand)]
    Time(TimeAction),

    /// Generate the race code for a category and boat class.
    Code {
        /// Category abbreviation (e.g., SM, JW, U23).
        #[arg(long, default_value = "")]
        abbreviation: String,

        /// Category gender: men, women or mixed.
        #[arg(long, default_value = "men", value_parser = parse_gender)]
        gender: Gender,

        /// English category title, used to recognise senior categories.
        #[arg(long)]
        title: Option<String>,

        /// Boat class code (e.g., 1X, 2-, C4X+). Defaults to the configured boat code.
        #[arg(long)]
        boat: Option<String>,

        /// Boat weight class: open or lightweight.
        #[arg(long, default_value = "open", value_parser = parse_weight_class)]
        weight: WeightClass,
    },

    /// Evaluate a race file and print standings.
    Results {
        /// Path to the race JSON file.
        race: PathBuf,

        /// Output the evaluation as JSON.
        #[arg(long, conflicts_with = "submission")]
        json: bool,

        /// Output the results submission body.
        #[arg(long)]
        submission: bool,
    },
}

/// Time codec actions.
#[derive(Debug, Subcommand)]
pub enum TimeAction {
    /// Print elapsed milliseconds for an entered time, or `-` when untimed.
    Parse {
        /// Entered time (e.g., 6:58.40).
        text: String,
    },

    /// Print the display form of a time in milliseconds.
    Format {
        /// Elapsed milliseconds.
        ms: u64,
    },

    /// Print the corrected form of shorthand entry (e.g., 22360 -> 02:23.60).
    Auto {
        /// Raw operator input.
        raw: String,
    },
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_weight_class(s: &str) -> Result<WeightClass, String> {
    s.parse().map_err(|e| format!("{e}"))
}

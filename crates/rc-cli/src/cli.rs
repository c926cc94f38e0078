//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::keys::Key;

/// Retro time and date calculator.
///
/// Feeds keypresses to a calculator whose display can hold a number, a
/// duration, a clock time, or a date. The memory register survives between
/// runs.
#[derive(Debug, Parser)]
#[command(name = "retrocalc", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Press keys and show the display.
    ///
    /// Keys: 0-9 . : / + - * x ÷ div = % +/- chs t ampm now today dow swap
    /// c reset sto rcl h>d d>h
    Press {
        /// Keys to press, in order.
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        keys: Vec<Key>,

        /// Print the display after every key.
        #[arg(long, conflicts_with = "json")]
        trace: bool,

        /// Print the final state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Inspect or clear the memory register.
    Memory {
        #[command(subcommand)]
        action: Option<MemoryAction>,
    },

    /// Print the effective configuration.
    Config,
}

/// Memory register actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum MemoryAction {
    /// Show the stored value.
    Show,
    /// Forget the stored value.
    Clear,
}

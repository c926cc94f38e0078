//! CLI subcommand implementations.

pub mod config;
pub mod memory;
pub mod press;

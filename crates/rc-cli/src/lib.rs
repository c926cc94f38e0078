//! Retro calculator CLI library.
//!
//! This crate provides the keypad driver around the `rc-core` engine:
//! argument parsing, configuration, and the persisted memory register.

mod cli;
pub mod commands;
mod config;
pub mod keys;
pub mod memory;

pub use cli::{Cli, Commands, MemoryAction};
pub use config::Config;
pub use keys::{Key, UnknownKey};

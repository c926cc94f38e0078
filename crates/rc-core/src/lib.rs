//! Value and state engine for a retro time/date calculator.
//!
//! This crate contains:
//! - Value: one display register that morphs between number, duration,
//!   clock time, and date as separators and mode keys are pressed
//! - Arithmetic: the table of operand combinations each operator accepts
//! - Command and Session: pending operators, repeat-equals, percent, swap,
//!   and the memory register
//!
//! Everything is synchronous and locale-neutral; separators, date order,
//! and clock convention come in through [`CalcConfig`].

pub mod arithmetic;
pub mod clock;
mod command;
pub mod config;
mod error;
mod memory;
mod session;
pub mod value;

pub use arithmetic::Operator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::Command;
pub use config::{CalcConfig, ConfigError, DateField, DateOrder};
pub use error::{CalcError, ErrorKind};
pub use memory::MemoryRecord;
pub use session::Session;
pub use value::{Value, ValueKind};

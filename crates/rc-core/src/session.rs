//! The keypad-facing calculator state.
//!
//! A [`Session`] owns the display register, the pending operator, the
//! memory register, and the reset snapshot. Each key method either commits
//! its whole effect or returns an error with nothing changed.

use std::fmt;
use std::mem;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::arithmetic::Operator;
use crate::clock::{Clock, SystemClock};
use crate::command::Command;
use crate::config::CalcConfig;
use crate::error::CalcError;
use crate::memory::MemoryRecord;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
struct State {
    current: Value,
    pending: Option<Command>,
    /// The value replaced by the last result or by the today key.
    reset_snapshot: Value,
    memory: Value,
    /// `=` has fired; the next digit starts a fresh value.
    calculation_executed: bool,
    /// Day-of-week label shown until the next key.
    display_override: Option<String>,
    showing_current_time: bool,
}

/// A calculator session driven one key at a time.
pub struct Session {
    config: CalcConfig,
    clock: Box<dyn Clock>,
    state: State,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A session reading the local system clock.
    pub fn new(config: CalcConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: CalcConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            state: State::default(),
        }
    }

    pub const fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Runs one key against a copy of the state and keeps the copy only if
    /// the key succeeded.
    fn press<F>(&mut self, key: &'static str, f: F) -> Result<(), CalcError>
    where
        F: FnOnce(&mut State, &CalcConfig, NaiveDateTime) -> Result<(), CalcError>,
    {
        let mut next = self.state.clone();
        next.display_override = None;
        next.showing_current_time = false;
        match f(&mut next, &self.config, self.clock.now()) {
            Ok(()) => {
                self.state = next;
                Ok(())
            }
            Err(err) => {
                debug!(key, error = %err, kind = ?err.kind(), "key rejected");
                Err(err)
            }
        }
    }

    // Entry keys

    /// A digit. After a result, starts a new value and drops the operator.
    pub fn number_pressed(&mut self, digit: u8) -> Result<(), CalcError> {
        self.press("digit", |s, config, _| {
            if s.calculation_executed {
                s.pending = None;
                s.calculation_executed = false;
                s.current = Value::new();
            }
            s.current.number_pressed(digit, config)
        })
    }

    pub fn decimal_pressed(&mut self) -> Result<(), CalcError> {
        self.press("decimal", |s, config, _| s.current.decimal_pressed(config))
    }

    pub fn colon_pressed(&mut self) -> Result<(), CalcError> {
        self.press("colon", |s, config, _| s.current.colon_pressed(config))
    }

    pub fn slash_pressed(&mut self) -> Result<(), CalcError> {
        self.press("slash", |s, config, _| s.current.slash_pressed(config))
    }

    pub fn plus_minus_pressed(&mut self) -> Result<(), CalcError> {
        self.press("plus_minus", |s, config, _| {
            s.current.plus_minus_pressed(config)
        })
    }

    pub fn am_pm_pressed(&mut self) -> Result<(), CalcError> {
        self.press("am_pm", |s, config, now| {
            s.current.am_pm_pressed(now.time(), config)
        })
    }

    /// The time mode key.
    pub fn time_pressed(&mut self) -> Result<(), CalcError> {
        self.press("time", |s, config, now| {
            s.current.time_pressed(now.time(), config)
        })
    }

    // Operators

    /// Opens a command with the current value as its left operand.
    ///
    /// With a command still waiting and nothing typed, the operator is
    /// replaced. With a typed right operand, the waiting command runs
    /// first and its result becomes the new left operand.
    pub fn operator_pressed(&mut self, op: Operator) -> Result<(), CalcError> {
        self.press("operator", |s, config, _| {
            s.current.validate(config)?;
            s.current.validate_command(op)?;
            if !s.calculation_executed {
                if let Some(cmd) = s.pending.as_mut() {
                    if !s.current.contains_value() {
                        cmd.left().validate_command(op)?;
                        cmd.retarget(op);
                        return Ok(());
                    }
                    s.execute_pending(config)?;
                    s.current.validate_command(op)?;
                }
            }
            s.pending = Some(Command::new(op, mem::take(&mut s.current)));
            s.calculation_executed = false;
            Ok(())
        })
    }

    /// `=`: runs the pending command, or just tidies the display.
    pub fn equals_pressed(&mut self) -> Result<(), CalcError> {
        self.press("equals", |s, config, _| {
            s.current.validate(config)?;
            if s.pending.is_some() {
                s.execute_pending(config)
            } else {
                s.current.canonicalize(config);
                Ok(())
            }
        })
    }

    /// Percent of the pending left operand: `left * current / 100`.
    pub fn percent_pressed(&mut self) -> Result<(), CalcError> {
        self.press("percent", |s, config, _| {
            let cmd = s.pending.as_ref().ok_or(CalcError::NothingPending)?;
            if !s.current.contains_value() {
                return Err(CalcError::rejected("percent needs a value"));
            }
            s.current = cmd.left().apply_percent(&s.current, config)?;
            Ok(())
        })
    }

    /// Exchanges the pending left operand and the current value.
    pub fn swap(&mut self) -> Result<(), CalcError> {
        self.press("swap", |s, _, _| {
            let cmd = s.pending.take().ok_or(CalcError::NothingPending)?;
            if !s.current.contains_value() {
                return Err(CalcError::rejected("nothing to swap with"));
            }
            let left = cmd.left().clone();
            s.pending = Some(Command::new(cmd.operator(), mem::replace(&mut s.current, left)));
            Ok(())
        })
    }

    // Clearing

    /// Clears a typed right operand, or everything if there is none.
    pub fn clear(&mut self) -> Result<(), CalcError> {
        self.press("clear", |s, _, _| {
            if s.pending.is_some() {
                if s.current.contains_value() {
                    s.current = Value::new();
                    return Ok(());
                }
                s.pending = None;
            }
            s.current = Value::new();
            Ok(())
        })
    }

    /// Brings back the value replaced by the last result.
    pub fn reset(&mut self) -> Result<(), CalcError> {
        self.press("reset", |s, _, _| {
            s.current = s.reset_snapshot.clone();
            Ok(())
        })
    }

    // Clock keys

    /// Shows the current time and keeps it live until another key.
    pub fn time_key(&mut self) -> Result<(), CalcError> {
        self.press("now", |s, config, now| {
            s.current = Value::time_of_day(now.time(), config);
            s.end_calculation();
            s.showing_current_time = true;
            Ok(())
        })
    }

    /// Re-reads the clock while the current time is shown. Returns whether
    /// the display changed.
    pub fn refresh_current_time(&mut self) -> bool {
        if !self.state.showing_current_time {
            return false;
        }
        let fresh = Value::time_of_day(self.clock.now().time(), &self.config);
        if fresh == self.state.current {
            return false;
        }
        self.state.current = fresh;
        true
    }

    /// Shows today's date.
    pub fn date_key(&mut self) -> Result<(), CalcError> {
        self.press("today", |s, config, now| {
            let today = Value::date(now.date(), config)?;
            s.reset_snapshot = mem::replace(&mut s.current, today);
            s.end_calculation();
            Ok(())
        })
    }

    /// Replaces a date with its weekday index and shows the weekday name.
    pub fn day_of_week_pressed(&mut self) -> Result<(), CalcError> {
        self.press("day_of_week", |s, config, _| {
            let (label, index) = s.current.day_of_week(config)?;
            s.current = index;
            s.display_override = Some(label);
            s.calculation_executed = true;
            Ok(())
        })
    }

    // Conversions

    /// Replaces a duration or clock time with its decimal hours.
    pub fn time_to_decimal(&mut self) -> Result<(), CalcError> {
        self.press("time_to_decimal", |s, config, _| {
            s.current = s.current.time_to_decimal(config)?;
            Ok(())
        })
    }

    pub fn decimal_to_time(&mut self) -> Result<(), CalcError> {
        self.press("decimal_to_time", |s, config, _| {
            s.current = s.current.decimal_to_time(config)?;
            Ok(())
        })
    }

    // Memory

    /// Stores the current value, finishing a waiting command first.
    pub fn memory_store(&mut self) -> Result<(), CalcError> {
        self.press("store", |s, config, _| {
            s.current.validate(config)?;
            if s.pending.is_some() && !s.calculation_executed {
                s.execute_pending(config)?;
            }
            s.memory = s.current.clone();
            Ok(())
        })
    }

    pub fn memory_recall(&mut self) -> Result<(), CalcError> {
        self.press("recall", |s, _, _| {
            s.current = s.memory.clone();
            Ok(())
        })
    }

    /// The memory register in persisted form, if it holds anything.
    pub fn memory_record(&self) -> Option<MemoryRecord> {
        if !self.state.memory.contains_value() {
            return None;
        }
        self.state.memory.to_record(&self.config)
    }

    /// Loads the memory register from its persisted form.
    pub fn set_memory_from_record(&mut self, record: &MemoryRecord) -> Result<(), CalcError> {
        self.state.memory = Value::from_record(record, &self.config)?;
        Ok(())
    }

    // Display

    /// The value on screen: the typed value, or the left operand while
    /// nothing has been typed after an operator.
    fn shown(&self) -> &Value {
        match &self.state.pending {
            Some(cmd) if !self.state.current.contains_value() => cmd.left(),
            _ => &self.state.current,
        }
    }

    pub fn display_string(&self) -> &str {
        self.state
            .display_override
            .as_deref()
            .unwrap_or_else(|| self.shown().display())
    }

    pub fn current(&self) -> &Value {
        &self.state.current
    }

    pub fn is_time_of_day(&self) -> bool {
        self.shown().is_time_of_day()
    }

    pub fn is_pm(&self) -> bool {
        self.shown().is_pm()
    }

    pub const fn contains_value(&self) -> bool {
        self.state.current.contains_value()
    }

    pub const fn has_pending(&self) -> bool {
        self.state.pending.is_some()
    }

    pub fn operator_symbol(&self) -> Option<char> {
        self.state.pending.as_ref().map(Command::symbol)
    }

    pub const fn is_current_time(&self) -> bool {
        self.state.showing_current_time
    }
}

impl State {
    /// Runs the waiting command against the current value.
    fn execute_pending(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        let cmd = self.pending.as_mut().ok_or(CalcError::NothingPending)?;
        let Some(answer) = cmd.execute(&self.current, self.calculation_executed, config)? else {
            return Ok(());
        };
        let repeating = cmd.is_repeating();
        self.reset_snapshot = mem::replace(&mut self.current, answer);
        self.calculation_executed = true;
        if !repeating {
            self.pending = None;
        }
        Ok(())
    }

    /// A clock key after a result starts over.
    fn end_calculation(&mut self) {
        if self.calculation_executed {
            self.pending = None;
            self.calculation_executed = false;
        }
    }
}

//! The single display register and its four modes.
//!
//! A [`Value`] starts as a [`Decimal`] placeholder and changes mode as
//! separators or mode keys are pressed:
//!
//! - Decimal → ElapsedTime (`:`), TimeOfDay (time/AM-PM key), Date (`/`)
//! - ElapsedTime → TimeOfDay (time/AM-PM key)
//!
//! Transitions only run forward. A value goes back to Decimal only by being
//! replaced, e.g. on clear or as the result of arithmetic.
//!
//! Every key operation either succeeds or returns an error and leaves the
//! value untouched.

mod date;
mod decimal;
mod elapsed;
mod segments;
mod time_of_day;

use std::fmt;

use chrono::NaiveTime;

use crate::arithmetic::Operator;
use crate::config::CalcConfig;
use crate::error::CalcError;
use crate::memory::MemoryRecord;

pub use date::Date;
pub use decimal::Decimal;
pub use elapsed::ElapsedTime;
pub use time_of_day::TimeOfDay;

/// The text being composed plus flags common to every mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// What the user sees; re-parsed on demand.
    pub(crate) text: String,
    /// Holds user-entered or computed content rather than the placeholder.
    pub(crate) contains_value: bool,
    /// Something was typed since this value was created.
    pub(crate) modified: bool,
}

impl Entry {
    pub(crate) fn placeholder() -> Self {
        Self {
            text: "0".to_string(),
            contains_value: false,
            modified: false,
        }
    }

    pub(crate) const fn computed(text: String) -> Self {
        Self {
            text,
            contains_value: true,
            modified: false,
        }
    }

    pub(crate) const fn mark_typed(&mut self) {
        self.contains_value = true;
        self.modified = true;
    }
}

/// Which mode a value is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Decimal,
    ElapsedTime,
    TimeOfDay,
    Date,
}

impl ValueKind {
    pub const ALL: [Self; 4] = [Self::Decimal, Self::ElapsedTime, Self::TimeOfDay, Self::Date];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::ElapsedTime => "elapsed time",
            Self::TimeOfDay => "time of day",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The calculator's display register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Decimal(Decimal),
    ElapsedTime(ElapsedTime),
    TimeOfDay(TimeOfDay),
    Date(Date),
}

impl Default for Value {
    fn default() -> Self {
        Self::Decimal(Decimal::new())
    }
}

impl Value {
    /// The `"0"` placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A computed number.
    pub fn number(value: f64, config: &CalcConfig) -> Result<Self, CalcError> {
        Decimal::from_number(value, config).map(Self::Decimal)
    }

    /// A computed duration.
    pub fn duration(seconds: f64, config: &CalcConfig) -> Result<Self, CalcError> {
        ElapsedTime::from_seconds(seconds, config).map(Self::ElapsedTime)
    }

    /// A clock time.
    pub fn time_of_day(time: NaiveTime, config: &CalcConfig) -> Self {
        Self::TimeOfDay(TimeOfDay::from_time(time, config))
    }

    /// A calendar date.
    pub fn date(date: chrono::NaiveDate, config: &CalcConfig) -> Result<Self, CalcError> {
        Date::from_date(date, config).map(Self::Date)
    }

    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Decimal(_) => ValueKind::Decimal,
            Self::ElapsedTime(_) => ValueKind::ElapsedTime,
            Self::TimeOfDay(_) => ValueKind::TimeOfDay,
            Self::Date(_) => ValueKind::Date,
        }
    }

    const fn entry(&self) -> &Entry {
        match self {
            Self::Decimal(v) => &v.entry,
            Self::ElapsedTime(v) => &v.entry,
            Self::TimeOfDay(v) => &v.entry,
            Self::Date(v) => &v.entry,
        }
    }

    /// The buffer as shown on the display.
    pub fn display(&self) -> &str {
        &self.entry().text
    }

    pub const fn contains_value(&self) -> bool {
        self.entry().contains_value
    }

    pub const fn is_modified(&self) -> bool {
        self.entry().modified
    }

    pub const fn is_time_of_day(&self) -> bool {
        matches!(self, Self::TimeOfDay(_))
    }

    pub const fn is_pm(&self) -> bool {
        matches!(self, Self::TimeOfDay(t) if t.is_pm)
    }

    /// Only plain numbers support `+=`/`*=` repetition.
    pub const fn can_repeat_commands(&self) -> bool {
        matches!(self, Self::Decimal(_))
    }

    /// The value in seconds, for modes that have one.
    pub fn seconds(&self, config: &CalcConfig) -> Option<f64> {
        match self {
            Self::Decimal(d) => Some(d.seconds(config)),
            Self::ElapsedTime(e) => Some(e.seconds(config)),
            Self::TimeOfDay(_) | Self::Date(_) => None,
        }
    }

    /// Hours for durations, the literal value for numbers.
    pub fn hours(&self, config: &CalcConfig) -> Option<f64> {
        match self {
            Self::Decimal(d) => Some(d.number(config)),
            Self::ElapsedTime(e) => Some(e.hours(config)),
            Self::TimeOfDay(_) | Self::Date(_) => None,
        }
    }

    /// Appends a digit to the segment being typed.
    pub fn number_pressed(&mut self, digit: u8, config: &CalcConfig) -> Result<(), CalcError> {
        let digit = char::from_digit(u32::from(digit), 10)
            .ok_or(CalcError::rejected("not a decimal digit"))?;
        match self {
            Self::Decimal(d) => d.push_digit(digit, config),
            Self::ElapsedTime(e) => e.push_digit(digit, config),
            Self::TimeOfDay(t) => {
                t.push_digit(digit, config);
                Ok(())
            }
            Self::Date(d) => {
                d.push_digit(digit, config);
                Ok(())
            }
        }
    }

    /// Decimal point, or hundredths of a second for durations.
    pub fn decimal_pressed(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        match self {
            Self::Decimal(d) => d.push_point(config),
            Self::ElapsedTime(e) => e.push_point(config),
            Self::TimeOfDay(_) | Self::Date(_) => {
                Err(CalcError::rejected("no decimal point in clock times or dates"))
            }
        }
    }

    /// Time separator. Turns a number into a duration.
    pub fn colon_pressed(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        match self {
            Self::Decimal(d) => {
                if !d.can_become_elapsed(config) {
                    return Err(self.refused(ValueKind::ElapsedTime));
                }
                let elapsed = if d.integer(config).is_some() && !d.has_point {
                    let mut e = ElapsedTime::from_decimal(d, config)?;
                    e.push_colon(config)?;
                    e
                } else {
                    // The fraction already implies minutes; no colon is added.
                    ElapsedTime::from_seconds(d.seconds(config), config)?
                };
                *self = Self::ElapsedTime(elapsed);
                Ok(())
            }
            Self::ElapsedTime(e) => e.push_colon(config),
            Self::TimeOfDay(t) => t.push_colon(config),
            Self::Date(_) => Err(self.refused(ValueKind::ElapsedTime)),
        }
    }

    /// Date separator. Turns a number into a date.
    pub fn slash_pressed(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        match self {
            Self::Decimal(d) => {
                let mut date = Date::from_decimal(d, config)
                    .ok_or_else(|| self.refused(ValueKind::Date))?;
                date.push_slash(config)?;
                *self = Self::Date(date);
                Ok(())
            }
            Self::Date(d) => d.push_slash(config),
            Self::ElapsedTime(_) | Self::TimeOfDay(_) => Err(self.refused(ValueKind::Date)),
        }
    }

    /// Time mode key: whole numbers become an hour with a colon ready for
    /// minutes, durations become clock times, an empty display shows `now`.
    pub fn time_pressed(&mut self, now: NaiveTime, config: &CalcConfig) -> Result<(), CalcError> {
        let typed_hour = matches!(self, Self::Decimal(d) if d.entry.contains_value);
        let mut next = self.clone();
        next.make_time_of_day(now, config)?;
        if typed_hour {
            if let Self::TimeOfDay(t) = &mut next {
                t.push_colon(config)?;
            }
        }
        *self = next;
        Ok(())
    }

    /// Toggles AM/PM, converting to a clock time first if needed.
    pub fn am_pm_pressed(&mut self, now: NaiveTime, config: &CalcConfig) -> Result<(), CalcError> {
        if config.uses_24_hour_clock {
            return Err(CalcError::rejected("24-hour clock has no AM/PM"));
        }
        let mut next = self.clone();
        next.make_time_of_day(now, config)?;
        if let Self::TimeOfDay(t) = &mut next {
            t.toggle_am_pm(config)?;
        }
        *self = next;
        Ok(())
    }

    fn make_time_of_day(&mut self, now: NaiveTime, config: &CalcConfig) -> Result<(), CalcError> {
        let tod = match self {
            Self::TimeOfDay(_) => return Ok(()),
            Self::Decimal(d) if !d.entry.contains_value => TimeOfDay::from_time(now, config),
            Self::Decimal(d) if d.clock_hour(config).is_some() => {
                TimeOfDay::from_decimal(d, config)
            }
            Self::ElapsedTime(e) if !e.fractional => TimeOfDay::from_elapsed(e, config),
            _ => return Err(self.refused(ValueKind::TimeOfDay)),
        };
        *self = Self::TimeOfDay(tod);
        Ok(())
    }

    /// Negates a number.
    pub fn plus_minus_pressed(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        match self {
            Self::Decimal(d) => d.negate(config),
            _ => Err(CalcError::rejected("only numbers have a sign")),
        }
    }

    /// Weekday label and index for a date.
    pub fn day_of_week(&self, config: &CalcConfig) -> Result<(String, Self), CalcError> {
        let Self::Date(d) = self else {
            return Err(CalcError::rejected("day of week needs a date"));
        };
        let (label, index) = d
            .weekday(config)
            .ok_or(CalcError::rejected("incomplete date"))?;
        Ok((label, Self::number(f64::from(index), config)?))
    }

    /// `self * pct / 100`, defined for numbers only.
    pub fn apply_percent(&self, pct: &Self, config: &CalcConfig) -> Result<Self, CalcError> {
        match (self, pct) {
            (Self::Decimal(base), Self::Decimal(pct)) => {
                base.percent_of(pct, config).map(Self::Decimal)
            }
            _ => Err(CalcError::rejected("percent needs two numbers")),
        }
    }

    /// Decimal hours for a duration or clock time, as a new value.
    pub fn time_to_decimal(&self, config: &CalcConfig) -> Result<Self, CalcError> {
        let hours = match self {
            Self::ElapsedTime(e) => e.hours(config),
            Self::TimeOfDay(t) => {
                let seconds = t
                    .seconds_since_midnight(config)
                    .ok_or(CalcError::rejected("incomplete time"))?;
                f64::from(seconds) / 3600.0
            }
            Self::Decimal(_) | Self::Date(_) => return Err(self.refused(ValueKind::Decimal)),
        };
        Self::number(hours, config)
    }

    /// A duration of the decimal hours, as a new value.
    pub fn decimal_to_time(&self, config: &CalcConfig) -> Result<Self, CalcError> {
        let Self::Decimal(d) = self else {
            return Err(self.refused(ValueKind::ElapsedTime));
        };
        Self::duration(d.seconds(config), config)
    }

    /// Rewrites the buffer in fully formatted form. Idempotent.
    pub fn canonicalize(&mut self, config: &CalcConfig) {
        match self {
            Self::Decimal(_) => {}
            Self::ElapsedTime(e) => e.canonicalize(config),
            Self::TimeOfDay(t) => t.canonicalize(config),
            Self::Date(d) => d.canonicalize(config),
        }
    }

    /// Checks the value is complete enough to commit.
    ///
    /// Times only check the last segment; earlier ones were checked when
    /// their separator was pressed. Dates must name a real day.
    pub fn validate(&self, config: &CalcConfig) -> Result<(), CalcError> {
        let ok = match self {
            Self::Decimal(_) => true,
            Self::ElapsedTime(e) => e.validate_last_segment(config),
            Self::TimeOfDay(t) => t.validate_last_segment(config),
            Self::Date(d) => d.date(config).is_some(),
        };
        if ok {
            Ok(())
        } else {
            Err(CalcError::rejected("value is incomplete or out of range"))
        }
    }

    /// Whether this value may be the left operand of `op`.
    pub fn validate_command(&self, op: Operator) -> Result<(), CalcError> {
        let scaling = matches!(op, Operator::Multiply | Operator::Divide);
        if scaling && matches!(self, Self::TimeOfDay(_) | Self::Date(_)) {
            return Err(CalcError::rejected("clock times and dates cannot be scaled"));
        }
        Ok(())
    }

    /// Snapshot for the memory register.
    pub fn to_record(&self, config: &CalcConfig) -> Option<MemoryRecord> {
        match self {
            Self::Decimal(d) => Some(MemoryRecord::Decimal(d.number(config))),
            Self::ElapsedTime(e) => Some(MemoryRecord::ElapsedTime(e.hours(config))),
            Self::TimeOfDay(t) => t.time(config).map(MemoryRecord::TimeOfDay),
            Self::Date(d) => d.date(config).map(MemoryRecord::Date),
        }
    }

    /// Rebuilds a value from the memory register.
    pub fn from_record(record: &MemoryRecord, config: &CalcConfig) -> Result<Self, CalcError> {
        match *record {
            MemoryRecord::Decimal(n) => Self::number(n, config),
            MemoryRecord::ElapsedTime(hours) => Self::duration(hours * 3600.0, config),
            MemoryRecord::TimeOfDay(time) => Ok(Self::time_of_day(time, config)),
            MemoryRecord::Date(date) => Self::date(date, config),
        }
    }

    const fn refused(&self, to: ValueKind) -> CalcError {
        CalcError::ModeTransitionRefused {
            from: self.kind(),
            to,
        }
    }
}

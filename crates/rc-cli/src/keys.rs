//! Keypad tokens and their session calls.

use std::fmt;
use std::str::FromStr;

use rc_core::{CalcError, Operator, Session};

/// One calculator key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Colon,
    Slash,
    Operator(Operator),
    Equals,
    Percent,
    PlusMinus,
    /// Time mode: typed hour or duration becomes a clock time.
    Time,
    AmPm,
    /// Current time.
    Now,
    Today,
    DayOfWeek,
    Swap,
    Clear,
    Reset,
    Store,
    Recall,
    TimeToDecimal,
    DecimalToTime,
}

impl Key {
    /// Presses this key on `session`.
    pub fn apply(self, session: &mut Session) -> Result<(), CalcError> {
        match self {
            Self::Digit(d) => session.number_pressed(d),
            Self::Decimal => session.decimal_pressed(),
            Self::Colon => session.colon_pressed(),
            Self::Slash => session.slash_pressed(),
            Self::Operator(op) => session.operator_pressed(op),
            Self::Equals => session.equals_pressed(),
            Self::Percent => session.percent_pressed(),
            Self::PlusMinus => session.plus_minus_pressed(),
            Self::Time => session.time_pressed(),
            Self::AmPm => session.am_pm_pressed(),
            Self::Now => session.time_key(),
            Self::Today => session.date_key(),
            Self::DayOfWeek => session.day_of_week_pressed(),
            Self::Swap => session.swap(),
            Self::Clear => session.clear(),
            Self::Reset => session.reset(),
            Self::Store => session.memory_store(),
            Self::Recall => session.memory_recall(),
            Self::TimeToDecimal => session.time_to_decimal(),
            Self::DecimalToTime => session.decimal_to_time(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Digit(d) => return f.pad(&d.to_string()),
            Self::Operator(op) => return f.pad(&op.to_string()),
            Self::Decimal => ".",
            Self::Colon => ":",
            Self::Slash => "/",
            Self::Equals => "=",
            Self::Percent => "%",
            Self::PlusMinus => "+/-",
            Self::Time => "t",
            Self::AmPm => "ampm",
            Self::Now => "now",
            Self::Today => "today",
            Self::DayOfWeek => "dow",
            Self::Swap => "swap",
            Self::Clear => "c",
            Self::Reset => "reset",
            Self::Store => "sto",
            Self::Recall => "rcl",
            Self::TimeToDecimal => "h>d",
            Self::DecimalToTime => "d>h",
        };
        f.pad(s)
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(d) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                return Ok(Self::Digit(d));
            }
        }
        match s.to_ascii_lowercase().as_str() {
            "." => Ok(Self::Decimal),
            ":" => Ok(Self::Colon),
            "/" => Ok(Self::Slash),
            "+" => Ok(Self::Operator(Operator::Add)),
            "-" => Ok(Self::Operator(Operator::Subtract)),
            "*" | "x" | "×" => Ok(Self::Operator(Operator::Multiply)),
            "÷" | "div" => Ok(Self::Operator(Operator::Divide)),
            "=" => Ok(Self::Equals),
            "%" => Ok(Self::Percent),
            "+/-" | "chs" => Ok(Self::PlusMinus),
            "t" => Ok(Self::Time),
            "ampm" => Ok(Self::AmPm),
            "now" => Ok(Self::Now),
            "today" => Ok(Self::Today),
            "dow" => Ok(Self::DayOfWeek),
            "swap" => Ok(Self::Swap),
            "c" | "clear" => Ok(Self::Clear),
            "reset" => Ok(Self::Reset),
            "sto" => Ok(Self::Store),
            "rcl" => Ok(Self::Recall),
            "h>d" => Ok(Self::TimeToDecimal),
            "d>h" => Ok(Self::DecimalToTime),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// Error type for unknown key tokens.
#[derive(Debug, Clone)]
pub struct UnknownKey(String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key: {}", self.0)
    }
}

impl std::error::Error for UnknownKey {}

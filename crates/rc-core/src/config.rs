//! Locale-derived settings threaded through every parse and format call.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A date order letter was not M, D, or Y.
    #[error("unknown date field: {0}")]
    UnknownDateField(char),

    /// The date order was not a permutation of M, D, and Y.
    #[error("date order must name M, D and Y exactly once, got {0:?}")]
    InvalidDateOrder(String),

    /// Two roles share one separator, or a separator is a digit.
    #[error("separators must be distinct non-digit characters")]
    AmbiguousSeparators,

    /// A display limit was zero.
    #[error("{field} must be positive")]
    ZeroLimit { field: &'static str },
}

/// The meaning of one date segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Month,
    Day,
    Year,
}

impl DateField {
    /// Maximum number of digits a segment in this role holds.
    pub const fn width(self) -> usize {
        match self {
            Self::Month | Self::Day => 2,
            Self::Year => 4,
        }
    }

    /// Whether a fully typed segment value is in range for this role.
    pub const fn accepts(self, value: i64) -> bool {
        match self {
            Self::Month => value >= 1 && value <= 12,
            Self::Day => value >= 1 && value <= 31,
            Self::Year => value >= 1 && value < 10_000,
        }
    }

    pub const fn code(self) -> char {
        match self {
            Self::Month => 'M',
            Self::Day => 'D',
            Self::Year => 'Y',
        }
    }
}

impl TryFrom<char> for DateField {
    type Error = ConfigError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'M' => Ok(Self::Month),
            'D' => Ok(Self::Day),
            'Y' => Ok(Self::Year),
            _ => Err(ConfigError::UnknownDateField(c)),
        }
    }
}

/// Order of the three date segments, e.g. month/day/year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOrder([DateField; 3]);

impl DateOrder {
    pub const MDY: Self = Self([DateField::Month, DateField::Day, DateField::Year]);
    pub const DMY: Self = Self([DateField::Day, DateField::Month, DateField::Year]);
    pub const YMD: Self = Self([DateField::Year, DateField::Month, DateField::Day]);

    /// Role of the segment at `index`, if there is one.
    pub fn field(&self, index: usize) -> Option<DateField> {
        self.0.get(index).copied()
    }

    pub const fn fields(&self) -> [DateField; 3] {
        self.0
    }
}

impl Default for DateOrder {
    fn default() -> Self {
        Self::MDY
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in self.0 {
            write!(f, "{}", field.code())?;
        }
        Ok(())
    }
}

impl FromStr for DateOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '-' | '.' | ','))
            .map(DateField::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let [a, b, c] = fields[..] else {
            return Err(ConfigError::InvalidDateOrder(s.to_string()));
        };
        if a == b || b == c || a == c {
            return Err(ConfigError::InvalidDateOrder(s.to_string()));
        }
        Ok(Self([a, b, c]))
    }
}

impl Serialize for DateOrder {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Calculator configuration supplied by the locale layer at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Separator between hours, minutes and seconds.
    pub time_separator: char,
    /// Separator between date fields.
    pub date_separator: char,
    /// Decimal point, also used before hundredths of a second.
    pub decimal_separator: char,
    /// Meaning of each date segment.
    pub date_order: DateOrder,
    /// 24-hour clock: hours are zero-padded and AM/PM is not offered.
    pub uses_24_hour_clock: bool,
    /// Locale week start, used by the day-of-week key.
    pub first_weekday: Weekday,
    /// Decimal display width.
    /// Default: 10.
    pub max_digits: usize,
    /// Elapsed time must stay below this many hours.
    /// Default: 10000.
    pub max_hours: i64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            time_separator: ':',
            date_separator: '/',
            decimal_separator: '.',
            date_order: DateOrder::MDY,
            uses_24_hour_clock: false,
            first_weekday: Weekday::Sun,
            max_digits: 10,
            max_hours: 10_000,
        }
    }
}

impl CalcConfig {
    /// Checks that separators and limits can be told apart while parsing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let seps = [
            self.time_separator,
            self.date_separator,
            self.decimal_separator,
        ];
        if seps.iter().any(char::is_ascii_digit)
            || seps[0] == seps[1]
            || seps[1] == seps[2]
            || seps[0] == seps[2]
        {
            return Err(ConfigError::AmbiguousSeparators);
        }
        if self.max_digits == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_digits",
            });
        }
        if self.max_hours <= 0 {
            return Err(ConfigError::ZeroLimit { field: "max_hours" });
        }
        Ok(())
    }

    /// Whether `c` separates segments of a time or the hundredths.
    pub(crate) fn is_time_separator(&self, c: char) -> bool {
        c == self.time_separator || c == self.decimal_separator
    }
}

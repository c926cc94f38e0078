//! Plain numbers.

use crate::config::CalcConfig;
use crate::error::CalcError;

use super::Entry;

/// Fraction digits kept when formatting a computed number.
const MAX_FRACTION_DIGITS: usize = 5;

/// A plain number, typed or computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    pub(crate) entry: Entry,
    pub(crate) has_point: bool,
}

impl Default for Decimal {
    fn default() -> Self {
        Self::new()
    }
}

impl Decimal {
    /// The untouched `"0"` placeholder.
    pub fn new() -> Self {
        Self {
            entry: Entry::placeholder(),
            has_point: false,
        }
    }

    /// Builds a computed number, failing if it does not fit the display.
    pub fn from_number(value: f64, config: &CalcConfig) -> Result<Self, CalcError> {
        let (text, has_point) = format_number(value, config)?;
        Ok(Self {
            entry: Entry::computed(text),
            has_point,
        })
    }

    /// The numeric value of the buffer; an unparsable buffer reads as zero.
    pub fn number(&self, config: &CalcConfig) -> f64 {
        let text: String = self
            .entry
            .text
            .chars()
            .map(|c| if c == config.decimal_separator { '.' } else { c })
            .collect();
        text.parse().unwrap_or(0.0)
    }

    /// The value as a whole number, if it has no fractional part.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "display width keeps values far inside i64"
    )]
    pub fn integer(&self, config: &CalcConfig) -> Option<i64> {
        let value = self.number(config);
        (value.fract() == 0.0).then_some(value as i64)
    }

    /// Hours interpreted as seconds, for mixing with durations.
    pub fn seconds(&self, config: &CalcConfig) -> f64 {
        self.number(config) * 3600.0
    }

    pub(crate) fn push_digit(&mut self, digit: char, config: &CalcConfig) -> Result<(), CalcError> {
        if self.entry.text == "0" {
            self.entry.text = digit.to_string();
        } else {
            // The decimal point takes no display cell.
            let digits = self.entry.text.chars().filter(char::is_ascii_digit).count();
            if digits >= config.max_digits {
                return Err(CalcError::rejected("display is full"));
            }
            self.entry.text.push(digit);
        }
        self.entry.mark_typed();
        Ok(())
    }

    pub(crate) fn push_point(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        if self.has_point || self.entry.text.contains(config.decimal_separator) {
            return Err(CalcError::rejected("number already has a decimal point"));
        }
        self.entry.text.push(config.decimal_separator);
        self.has_point = true;
        self.entry.mark_typed();
        Ok(())
    }

    pub(crate) fn negate(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        let (text, has_point) = format_number(-self.number(config), config)?;
        self.entry.text = text;
        self.has_point = has_point;
        self.entry.contains_value = true;
        self.entry.modified = true;
        Ok(())
    }

    /// `self * pct / 100`.
    pub fn percent_of(&self, pct: &Self, config: &CalcConfig) -> Result<Self, CalcError> {
        Self::from_number(self.number(config) * pct.number(config) / 100.0, config)
    }

    /// A whole, non-negative number small enough to be an elapsed-time hour.
    pub(crate) fn can_become_elapsed(&self, config: &CalcConfig) -> bool {
        let value = self.number(config);
        value >= 0.0 && value.trunc() < config.max_hours as f64
    }

    /// A whole number that reads as a clock hour.
    pub(crate) fn clock_hour(&self, config: &CalcConfig) -> Option<i64> {
        if self.has_point {
            return None;
        }
        self.integer(config).filter(|h| (0..24).contains(h))
    }
}

/// Renders a computed number the way the display shows it.
///
/// Integers print without a point. Fractions keep at most five digits and
/// never widen the display beyond `max_digits`.
pub(crate) fn format_number(value: f64, config: &CalcConfig) -> Result<(String, bool), CalcError> {
    if !value.is_finite() {
        return Err(CalcError::overflow("result is not a number"));
    }
    let limit = 10f64.powi(i32::try_from(config.max_digits).unwrap_or(i32::MAX));
    if value.trunc().abs() >= limit {
        return Err(CalcError::overflow("too many digits"));
    }

    let int_digits = integer_digits(value);
    let fraction_digits = MAX_FRACTION_DIGITS.min(config.max_digits.saturating_sub(int_digits));
    let mut text = format!("{value:.fraction_digits$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    // Rounding can carry into a new integer digit.
    if text.trim_start_matches('-').split('.').next().map_or(0, str::len) > config.max_digits {
        return Err(CalcError::overflow("too many digits"));
    }

    let has_point = text.contains('.');
    if has_point && config.decimal_separator != '.' {
        text = text.replace('.', &config.decimal_separator.to_string());
    }
    Ok((text, has_point))
}

fn integer_digits(value: f64) -> usize {
    let mut n = value.trunc().abs();
    let mut digits = 1;
    while n >= 10.0 {
        n /= 10.0;
        digits += 1;
    }
    digits
}

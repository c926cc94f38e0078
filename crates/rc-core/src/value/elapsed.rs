//! Durations: `H`, `H:MM`, `H:MM:SS`, or `M:SS.CC` once hundredths are used.

use crate::config::CalcConfig;
use crate::error::CalcError;

use super::segments::{self, segment_int};
use super::{Decimal, Entry};

const CENTIS_PER_HOUR: i64 = 360_000;

/// A duration with no absolute anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElapsedTime {
    pub(crate) entry: Entry,
    /// Minutes:seconds.hundredths format. Once set it stays set.
    pub(crate) fractional: bool,
}

impl ElapsedTime {
    /// Reuses a whole decimal's text as the hours segment.
    pub(crate) fn from_decimal(value: &Decimal, config: &CalcConfig) -> Result<Self, CalcError> {
        if !value.can_become_elapsed(config) {
            return Err(CalcError::overflow("too many hours"));
        }
        let mut entry = value.entry.clone();
        entry.contains_value = true;
        Ok(Self {
            entry,
            fractional: false,
        })
    }

    /// Builds a duration from seconds.
    ///
    /// Fails when the whole hours reach `max_hours` or the duration is
    /// negative. Hundredths are only kept for durations under an hour.
    pub fn from_seconds(seconds: f64, config: &CalcConfig) -> Result<Self, CalcError> {
        if !seconds.is_finite() {
            return Err(CalcError::overflow("duration is not a number"));
        }
        let centis = round_centis(seconds);
        if centis < 0 {
            return Err(CalcError::NegativeInterval);
        }
        let h = centis / CENTIS_PER_HOUR;
        if h >= config.max_hours {
            return Err(CalcError::overflow("too many hours"));
        }
        let m = (centis / 6000) % 60;
        let s = (centis / 100) % 60;
        let c = centis % 100;
        let fractional = h == 0 && c > 0;
        Ok(Self {
            entry: Entry::computed(format(h, m, s, c, fractional, config)),
            fractional,
        })
    }

    fn is_sep(config: &CalcConfig) -> impl Fn(char) -> bool + Copy + '_ {
        move |c| config.is_time_separator(c)
    }

    pub(crate) fn segments<'a>(&'a self, config: &CalcConfig) -> Vec<&'a str> {
        segments::split(&self.entry.text, Self::is_sep(config))
    }

    /// The three numeric segments, missing ones as zero.
    fn components(&self, config: &CalcConfig) -> [i64; 3] {
        let segs = self.segments(config);
        let at = |i: usize| segs.get(i).map_or(0, |s| segment_int(s));
        [at(0), at(1), at(2)]
    }

    /// Total length in seconds.
    #[expect(
        clippy::cast_precision_loss,
        reason = "segment values are bounded by max_hours"
    )]
    pub fn seconds(&self, config: &CalcConfig) -> f64 {
        let [a, b, c] = self.components(config);
        if self.fractional {
            (a * 60 + b) as f64 + c as f64 / 100.0
        } else {
            (a * 3600 + b * 60 + c) as f64
        }
    }

    /// Length in hours, the calculator's internal unit for durations.
    pub fn hours(&self, config: &CalcConfig) -> f64 {
        self.seconds(config) / 3600.0
    }

    pub(crate) fn validate_last_segment(&self, config: &CalcConfig) -> bool {
        let segs = self.segments(config);
        let last = segs.last().map_or(0, |s| segment_int(s));
        match segs.len() {
            1 => last < config.max_hours,
            // Hundredths run to 99; minutes and seconds to 59.
            3 if self.fractional => last < 100,
            _ => last < 60,
        }
    }

    pub(crate) fn push_digit(&mut self, digit: char, config: &CalcConfig) -> Result<(), CalcError> {
        if self.segments(config).len() == 1 {
            let hours = if self.entry.text == "0" {
                digit.to_string()
            } else {
                format!("{}{digit}", self.entry.text)
            };
            if segment_int(&hours) >= config.max_hours {
                return Err(CalcError::rejected("too many hours"));
            }
            self.entry.text = hours;
        } else {
            segments::append_to_last(&mut self.entry.text, digit, 2, Self::is_sep(config));
        }
        self.entry.mark_typed();
        Ok(())
    }

    /// Switches to minutes:seconds.hundredths.
    pub(crate) fn push_point(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        if self.fractional || self.entry.text.contains(config.decimal_separator) {
            return Err(CalcError::rejected("duration already has hundredths"));
        }
        if self.segments(config).len() >= 3 {
            return Err(CalcError::rejected("hundredths need minutes:seconds"));
        }
        if !self.validate_last_segment(config) {
            return Err(CalcError::rejected("segment out of range"));
        }
        self.entry.text.push(config.decimal_separator);
        self.fractional = true;
        self.entry.mark_typed();
        Ok(())
    }

    pub(crate) fn push_colon(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        if self.fractional {
            return Err(CalcError::rejected("hundredths end the duration"));
        }
        let last_ok = self.validate_last_segment(config);
        segments::append_separator(
            &mut self.entry.text,
            config.time_separator,
            Self::is_sep(config),
            last_ok,
        )?;
        self.entry.mark_typed();
        Ok(())
    }

    /// Rewrites the buffer in shortest canonical form, e.g. `5:3` → `5:03`
    /// and `5:00:00` → `5`.
    pub(crate) fn canonicalize(&mut self, config: &CalcConfig) {
        if self.segments(config).len() == 1 {
            return;
        }
        let [a, b, c] = self.components(config);
        self.entry.text = if self.fractional {
            format(0, a, b, c, true, config)
        } else {
            format(a, b, c, 0, false, config)
        };
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "callers bound the duration by max_hours first"
)]
fn round_centis(seconds: f64) -> i64 {
    (seconds * 100.0).round() as i64
}

fn format(h: i64, m: i64, s: i64, c: i64, fractional: bool, config: &CalcConfig) -> String {
    let sep = config.time_separator;
    if fractional {
        // Minutes have no upper bound here; hours are folded in.
        let dec = config.decimal_separator;
        format!("{}{sep}{s:02}{dec}{c:02}", h * 60 + m)
    } else if s > 0 {
        format!("{h}{sep}{m:02}{sep}{s:02}")
    } else if m > 0 {
        format!("{h}{sep}{m:02}")
    } else {
        h.to_string()
    }
}

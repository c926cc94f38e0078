//! Clock times with an AM/PM flag.

use chrono::{NaiveTime, Timelike};

use crate::config::CalcConfig;
use crate::error::CalcError;

use super::segments::{self, segment_int};
use super::{Decimal, ElapsedTime, Entry};

/// An absolute clock-face time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDay {
    pub(crate) entry: Entry,
    pub(crate) is_pm: bool,
}

impl TimeOfDay {
    /// Formats `time` as `h:mm:ss` for the configured clock.
    pub fn from_time(time: NaiveTime, config: &CalcConfig) -> Self {
        let hour = display_hour(time.hour(), config);
        let sep = config.time_separator;
        Self {
            entry: Entry::computed(format!(
                "{hour}{sep}{:02}{sep}{:02}",
                time.minute(),
                time.second()
            )),
            is_pm: time.hour() >= 12,
        }
    }

    /// A whole decimal becomes the hour; 12 and above read as afternoon.
    pub(crate) fn from_decimal(value: &Decimal, config: &CalcConfig) -> Self {
        let mut entry = value.entry.clone();
        entry.contains_value = true;
        let is_pm = value.integer(config).is_some_and(|h| h >= 12);
        let mut tod = Self { entry, is_pm };
        tod.canonicalize(config);
        tod
    }

    /// Hours past 24 wrap around the clock.
    pub(crate) fn from_elapsed(value: &ElapsedTime, config: &CalcConfig) -> Self {
        let mut entry = value.entry.clone();
        entry.contains_value = true;
        let is_pm = value
            .segments(config)
            .first()
            .is_some_and(|h| segment_int(h) >= 12);
        let mut tod = Self { entry, is_pm };
        tod.canonicalize(config);
        tod
    }

    fn is_sep(config: &CalcConfig) -> impl Fn(char) -> bool + Copy + '_ {
        move |c| c == config.time_separator
    }

    fn segments<'a>(&'a self, config: &CalcConfig) -> Vec<&'a str> {
        segments::split(&self.entry.text, Self::is_sep(config))
    }

    /// The clock time the buffer names, if its segments are in range.
    pub fn time(&self, config: &CalcConfig) -> Option<NaiveTime> {
        let segs = self.segments(config);
        let at = |i: usize| segs.get(i).map_or(0, |s| segment_int(s));
        let (h, m, s) = (at(0), at(1), at(2));
        if m >= 60 || s >= 60 {
            return None;
        }
        let hour = if config.uses_24_hour_clock {
            h
        } else {
            match (h, self.is_pm) {
                (12, false) => 0,
                (h, true) if h < 12 => h + 12,
                (h, _) => h,
            }
        };
        NaiveTime::from_hms_opt(
            u32::try_from(hour.rem_euclid(24)).ok()?,
            u32::try_from(m).ok()?,
            u32::try_from(s).ok()?,
        )
    }

    /// Seconds since midnight.
    pub fn seconds_since_midnight(&self, config: &CalcConfig) -> Option<u32> {
        self.time(config).map(|t| t.num_seconds_from_midnight())
    }

    pub(crate) fn validate_last_segment(&self, config: &CalcConfig) -> bool {
        let segs = self.segments(config);
        let last = segs.last().map_or(0, |s| segment_int(s));
        match segs.len() {
            1 => last < 24,
            _ => last < 60,
        }
    }

    /// The hour grows without losing digits so a mistyped hour fails
    /// validation. Later segments keep their last two digits.
    pub(crate) fn push_digit(&mut self, digit: char, config: &CalcConfig) {
        if self.segments(config).len() == 1 {
            self.entry.text.push(digit);
        } else {
            segments::append_to_last(&mut self.entry.text, digit, 2, Self::is_sep(config));
        }
        self.entry.mark_typed();
    }

    pub(crate) fn push_colon(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
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

    pub(crate) fn toggle_am_pm(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        if config.uses_24_hour_clock {
            return Err(CalcError::rejected("24-hour clock has no AM/PM"));
        }
        self.is_pm = !self.is_pm;
        self.entry.modified = true;
        Ok(())
    }

    /// Re-renders with as many segments as were entered, hour formatted
    /// for the configured clock.
    pub(crate) fn canonicalize(&mut self, config: &CalcConfig) {
        let Some(time) = self.time(config) else {
            return;
        };
        let sep = config.time_separator;
        let hour = display_hour(time.hour(), config);
        self.entry.text = match self.segments(config).len() {
            1 => hour,
            2 => format!("{hour}{sep}{:02}", time.minute()),
            _ => format!("{hour}{sep}{:02}{sep}{:02}", time.minute(), time.second()),
        };
        self.is_pm = time.hour() >= 12;
    }
}

fn display_hour(hour: u32, config: &CalcConfig) -> String {
    if config.uses_24_hour_clock {
        format!("{hour:02}")
    } else {
        match hour % 12 {
            0 => "12".to_string(),
            h => h.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(text: &str, is_pm: bool) -> TimeOfDay {
        TimeOfDay {
            entry: Entry::computed(text.to_string()),
            is_pm,
        }
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn from_time_formats_for_clock() {
        let twelve = CalcConfig::default();
        let t = TimeOfDay::from_time(hms(15, 4, 5), &twelve);
        assert_eq!(t.entry.text, "3:04:05");
        assert!(t.is_pm);

        let twenty_four = CalcConfig {
            uses_24_hour_clock: true,
            ..CalcConfig::default()
        };
        let t = TimeOfDay::from_time(hms(8, 0, 0), &twenty_four);
        assert_eq!(t.entry.text, "08:00:00");
        assert!(!t.is_pm);
    }

    #[test]
    fn twelve_hour_mapping() {
        let config = CalcConfig::default();
        assert_eq!(tod("12:00", false).time(&config), Some(hms(0, 0, 0)));
        assert_eq!(tod("12:00", true).time(&config), Some(hms(12, 0, 0)));
        assert_eq!(tod("3:15", true).time(&config), Some(hms(15, 15, 0)));
        assert_eq!(tod("15:15", false).time(&config), Some(hms(15, 15, 0)));
        assert_eq!(tod("3:75", false).time(&config), None);
    }

    #[test]
    fn canonicalize_keeps_segment_count() {
        let config = CalcConfig::default();
        let mut t = tod("8:5", false);
        t.canonicalize(&config);
        assert_eq!(t.entry.text, "8:05");
        t.canonicalize(&config);
        assert_eq!(t.entry.text, "8:05");

        let mut t = tod("13", true);
        t.canonicalize(&config);
        assert_eq!(t.entry.text, "1");
        assert!(t.is_pm);
    }

    #[test]
    fn from_decimal_reads_afternoon_hours() {
        let config = CalcConfig::default();
        let mut d = Decimal::new();
        d.push_digit('1', &config).unwrap();
        d.push_digit('4', &config).unwrap();
        let t = TimeOfDay::from_decimal(&d, &config);
        assert_eq!(t.entry.text, "2");
        assert!(t.is_pm);
    }

    #[test]
    fn from_elapsed_wraps_past_midnight() {
        let config = CalcConfig::default();
        let e = ElapsedTime::from_seconds(25.5 * 3600.0, &config).unwrap();
        let t = TimeOfDay::from_elapsed(&e, &config);
        assert_eq!(t.entry.text, "1:30");
        assert!(!t.is_pm);
    }

    #[test]
    fn am_pm_toggle_depends_on_clock() {
        let mut t = tod("8:00", false);
        t.toggle_am_pm(&CalcConfig::default()).unwrap();
        assert!(t.is_pm);

        let twenty_four = CalcConfig {
            uses_24_hour_clock: true,
            ..CalcConfig::default()
        };
        assert!(t.toggle_am_pm(&twenty_four).is_err());
        assert!(t.is_pm);
    }

    #[test]
    fn hour_digits_are_never_dropped() {
        let config = CalcConfig::default();
        let mut t = tod("12", false);
        t.push_digit('3', &config);
        assert_eq!(t.entry.text, "123");
        assert!(!t.validate_last_segment(&config));

        let mut t = tod("8:3", false);
        t.push_digit('0', &config);
        t.push_digit('5', &config);
        assert_eq!(t.entry.text, "8:05");
    }

    #[test]
    fn colon_validates_hour_and_minutes() {
        let config = CalcConfig::default();
        let mut t = tod("25", false);
        assert!(t.push_colon(&config).is_err());

        let mut t = tod("8:7", false);
        t.push_colon(&config).unwrap();
        assert_eq!(t.entry.text, "8:07:");
    }
}

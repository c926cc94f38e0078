//! Calendar dates in the configured field order.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::config::{CalcConfig, DateField};
use crate::error::CalcError;

use super::segments::{self, segment_int};
use super::{Decimal, Entry};

/// A calendar date such as `01/10/2024`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    pub(crate) entry: Entry,
}

impl Date {
    /// Formats `date` in canonical form, failing outside years 1–9999.
    pub fn from_date(date: NaiveDate, config: &CalcConfig) -> Result<Self, CalcError> {
        if !DateField::Year.accepts(i64::from(date.year())) {
            return Err(CalcError::overflow("year out of range"));
        }
        Ok(Self {
            entry: Entry::computed(format(date, config)),
        })
    }

    /// Starts a date from a whole decimal typed as the first field.
    pub(crate) fn from_decimal(value: &Decimal, config: &CalcConfig) -> Option<Self> {
        if value.has_point {
            return None;
        }
        let first = config.date_order.field(0)?;
        let n = value.integer(config)?;
        if !first.accepts(n) {
            return None;
        }
        let mut entry = value.entry.clone();
        entry.contains_value = true;
        Some(Self { entry })
    }

    fn is_sep(config: &CalcConfig) -> impl Fn(char) -> bool + Copy + '_ {
        move |c| c == config.date_separator
    }

    fn segments<'a>(&'a self, config: &CalcConfig) -> Vec<&'a str> {
        segments::split(&self.entry.text, Self::is_sep(config))
    }

    /// The calendar date the buffer names, once all three fields exist.
    pub fn date(&self, config: &CalcConfig) -> Option<NaiveDate> {
        let segs = self.segments(config);
        if segs.len() != 3 {
            return None;
        }
        let mut year = None;
        let mut month = None;
        let mut day = None;
        for (field, seg) in config.date_order.fields().into_iter().zip(&segs) {
            let n = segment_int(seg);
            if seg.is_empty() || !field.accepts(n) {
                return None;
            }
            match field {
                DateField::Year => year = Some(if seg.len() <= 2 { 2000 + n } else { n }),
                DateField::Month => month = Some(n),
                DateField::Day => day = Some(n),
            }
        }
        NaiveDate::from_ymd_opt(
            i32::try_from(year?).ok()?,
            u32::try_from(month?).ok()?,
            u32::try_from(day?).ok()?,
        )
    }

    pub(crate) fn validate_last_segment(&self, config: &CalcConfig) -> bool {
        let segs = self.segments(config);
        let index = segs.len() - 1;
        let Some(field) = config.date_order.field(index) else {
            return false;
        };
        field.accepts(segs.last().map_or(0, |s| segment_int(s)))
    }

    pub(crate) fn push_digit(&mut self, digit: char, config: &CalcConfig) {
        let index = self.segments(config).len() - 1;
        let width = config.date_order.field(index).map_or(2, DateField::width);
        segments::append_to_last(&mut self.entry.text, digit, width, Self::is_sep(config));
        self.entry.mark_typed();
    }

    pub(crate) fn push_slash(&mut self, config: &CalcConfig) -> Result<(), CalcError> {
        let last_ok = self.validate_last_segment(config);
        segments::append_separator(
            &mut self.entry.text,
            config.date_separator,
            Self::is_sep(config),
            last_ok,
        )?;
        self.entry.mark_typed();
        Ok(())
    }

    pub(crate) fn canonicalize(&mut self, config: &CalcConfig) {
        if let Some(date) = self.date(config) {
            self.entry.text = format(date, config);
        }
    }

    /// Shifts the date by whole days.
    pub(crate) fn add_days(&self, days: i64, config: &CalcConfig) -> Result<Self, CalcError> {
        let date = self
            .date(config)
            .ok_or(CalcError::rejected("incomplete date"))?;
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            date.checked_add_days(magnitude)
        } else {
            date.checked_sub_days(magnitude)
        };
        Self::from_date(shifted.ok_or(CalcError::overflow("date out of range"))?, config)
    }

    /// Upper-case weekday label and the weekday's index counted from the
    /// configured first day of the week.
    pub fn weekday(&self, config: &CalcConfig) -> Option<(String, u32)> {
        let weekday = self.date(config)?.weekday();
        Some((
            weekday.to_string().to_uppercase(),
            days_since(weekday, config.first_weekday),
        ))
    }
}

fn days_since(day: Weekday, start: Weekday) -> u32 {
    (day.num_days_from_sunday() + 7 - start.num_days_from_sunday()) % 7
}

fn format(date: NaiveDate, config: &CalcConfig) -> String {
    let sep = config.date_separator.to_string();
    config
        .date_order
        .fields()
        .iter()
        .map(|field| match field {
            DateField::Month => format!("{:02}", date.month()),
            DateField::Day => format!("{:02}", date.day()),
            DateField::Year => format!("{:04}", date.year()),
        })
        .collect::<Vec<_>>()
        .join(&sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::DateOrder;

    fn date(text: &str) -> Date {
        Date {
            entry: Entry::computed(text.to_string()),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_in_configured_order() {
        let mdy = CalcConfig::default();
        assert_eq!(date("1/10/2024").date(&mdy), Some(ymd(2024, 1, 10)));
        assert_eq!(date("1/10/24").date(&mdy), Some(ymd(2024, 1, 10)));
        assert_eq!(date("13/10/2024").date(&mdy), None);
        assert_eq!(date("1/10").date(&mdy), None);

        let dmy = CalcConfig {
            date_order: DateOrder::DMY,
            ..CalcConfig::default()
        };
        assert_eq!(date("13/10/2024").date(&dmy), Some(ymd(2024, 10, 13)));
        assert_eq!(date("31/02/2024").date(&dmy), None);
    }

    #[test]
    fn canonical_form_pads_fields() {
        let config = CalcConfig::default();
        let mut d = date("1/5/24");
        d.canonicalize(&config);
        assert_eq!(d.entry.text, "01/05/2024");
        d.canonicalize(&config);
        assert_eq!(d.entry.text, "01/05/2024");

        let ymd_config = CalcConfig {
            date_order: DateOrder::YMD,
            date_separator: '-',
            ..CalcConfig::default()
        };
        let d = Date::from_date(ymd(2024, 3, 9), &ymd_config).unwrap();
        assert_eq!(d.entry.text, "2024-03-09");
    }

    #[test]
    fn field_widths_follow_roles() {
        let config = CalcConfig::default();
        let mut d = date("01/");
        for c in "105".chars() {
            d.push_digit(c, &config);
        }
        assert_eq!(d.entry.text, "01/05");

        let mut d = date("01/05/");
        for c in "202456".chars() {
            d.push_digit(c, &config);
        }
        assert_eq!(d.entry.text, "01/05/2456");
    }

    #[test]
    fn slash_validates_field_role() {
        let config = CalcConfig::default();
        let mut d = date("13");
        assert!(d.push_slash(&config).is_err());
        assert_eq!(d.entry.text, "13");

        let mut d = date("1/5");
        d.push_slash(&config).unwrap();
        assert_eq!(d.entry.text, "1/05/");

        let mut d = date("1/05/2024");
        assert!(d.push_slash(&config).is_err());
    }

    #[test]
    fn add_days_crosses_months() {
        let config = CalcConfig::default();
        let d = date("01/30/2024").add_days(5, &config).unwrap();
        assert_eq!(d.entry.text, "02/04/2024");
        let d = date("01/10/2024").add_days(-10, &config).unwrap();
        assert_eq!(d.entry.text, "12/31/2023");
    }

    #[test]
    fn weekday_counts_from_week_start() {
        // 2024-01-10 was a Wednesday.
        let sunday_start = CalcConfig::default();
        assert_eq!(
            date("01/10/2024").weekday(&sunday_start),
            Some(("WED".to_string(), 3))
        );

        let monday_start = CalcConfig {
            first_weekday: Weekday::Mon,
            ..CalcConfig::default()
        };
        assert_eq!(
            date("01/10/2024").weekday(&monday_start),
            Some(("WED".to_string(), 2))
        );
    }
}

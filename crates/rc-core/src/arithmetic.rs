//! Binary operators across value modes.
//!
//! Two numbers combine as numbers. A duration on either side pulls a number
//! into duration math (numbers count as hours). Clock times and dates only
//! move by an offset or subtract into an interval; they never scale.
//!
//! | left \ right | Decimal        | ElapsedTime     | TimeOfDay    | Date        |
//! |--------------|----------------|-----------------|--------------|-------------|
//! | Decimal      | + − × ÷ → dec  | + − × ÷ → elap  | + → tod      | –           |
//! | ElapsedTime  | + − × ÷ → elap | + − → elap      | –            | –           |
//! | TimeOfDay    | –              | + − → tod       | − → elap     | –           |
//! | Date         | + − → date     | –               | –            | − → dec     |
//!
//! Anything not in the table is [`CalcError::OperationUndefined`].

use std::fmt;

use chrono::{NaiveTime, TimeDelta};

use crate::config::CalcConfig;
use crate::error::CalcError;
use crate::value::{Date, Decimal, TimeOfDay, Value};

/// The four operator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Symbol for the operator indicator.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// `+=` and `*=` may be repeated with bare `=` presses.
    pub const fn is_repeatable(self) -> bool {
        matches!(self, Self::Add | Self::Multiply)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Applies `left op right`, or fails if the combination is undefined.
pub fn apply(
    op: Operator,
    left: &Value,
    right: &Value,
    config: &CalcConfig,
) -> Result<Value, CalcError> {
    use Operator::{Add, Divide, Multiply, Subtract};

    let undefined = || CalcError::OperationUndefined {
        op,
        left: left.kind(),
        right: right.kind(),
    };

    match (left, right) {
        (Value::Decimal(l), Value::Decimal(r)) => {
            let (l, r) = (l.number(config), r.number(config));
            let n = match op {
                Add => l + r,
                Subtract => l - r,
                Multiply => l * r,
                Divide => l / r,
            };
            Value::number(n, config)
        }

        (Value::Decimal(l), Value::ElapsedTime(r)) => match op {
            Add => Value::duration(l.seconds(config) + r.seconds(config), config),
            Subtract => Value::duration(l.seconds(config) - r.seconds(config), config),
            Multiply => duration_from_hours(l.number(config) * r.hours(config), config),
            Divide => duration_from_hours(l.number(config) / r.hours(config), config),
        },
        (Value::ElapsedTime(l), Value::Decimal(r)) => match op {
            Add => Value::duration(l.seconds(config) + r.seconds(config), config),
            Subtract => Value::duration(l.seconds(config) - r.seconds(config), config),
            Multiply => duration_from_hours(l.hours(config) * r.number(config), config),
            Divide => duration_from_hours(l.hours(config) / r.number(config), config),
        },
        (Value::ElapsedTime(l), Value::ElapsedTime(r)) => match op {
            Add => Value::duration(l.seconds(config) + r.seconds(config), config),
            Subtract => Value::duration(l.seconds(config) - r.seconds(config), config),
            Multiply | Divide => Err(undefined()),
        },

        (Value::Decimal(l), Value::TimeOfDay(r)) if op == Add => {
            shift_time(r, l.seconds(config), config)
        }
        (Value::TimeOfDay(l), Value::ElapsedTime(r)) => match op {
            Add => shift_time(l, r.seconds(config), config),
            Subtract => shift_time(l, -r.seconds(config), config),
            Multiply | Divide => Err(undefined()),
        },
        (Value::TimeOfDay(end), Value::TimeOfDay(start)) if op == Subtract => {
            time_interval(end, start, config)
        }

        (Value::Date(l), Value::Decimal(r)) => match op {
            Add => shift_date(l, r, 1, config),
            Subtract => shift_date(l, r, -1, config),
            Multiply | Divide => Err(undefined()),
        },
        (Value::Date(end), Value::Date(start)) if op == Subtract => {
            date_interval(end, start, config)
        }

        _ => Err(undefined()),
    }
}

fn duration_from_hours(hours: f64, config: &CalcConfig) -> Result<Value, CalcError> {
    Value::duration(hours * 3600.0, config)
}

/// Moves a clock time by `seconds`, wrapping around midnight.
fn shift_time(time: &TimeOfDay, seconds: f64, config: &CalcConfig) -> Result<Value, CalcError> {
    let start = clock_time(time, config)?;
    let delta = millis(seconds).ok_or(CalcError::overflow("offset too large"))?;
    let (shifted, _) = start.overflowing_add_signed(delta);
    Ok(Value::time_of_day(shifted, config))
}

/// `end - start` as a duration; the end must not precede the start.
fn time_interval(
    end: &TimeOfDay,
    start: &TimeOfDay,
    config: &CalcConfig,
) -> Result<Value, CalcError> {
    let (end, start) = (clock_time(end, config)?, clock_time(start, config)?);
    if end < start {
        return Err(CalcError::NegativeInterval);
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "an interval within one day is at most 86400 seconds"
    )]
    let seconds = (end - start).num_seconds() as f64;
    Value::duration(seconds, config)
}

fn shift_date(
    date: &Date,
    days: &Decimal,
    sign: i64,
    config: &CalcConfig,
) -> Result<Value, CalcError> {
    let days = days
        .integer(config)
        .ok_or(CalcError::rejected("days must be a whole number"))?;
    date.add_days(sign * days, config).map(Value::Date)
}

/// Whole days from `start` to `end`.
fn date_interval(end: &Date, start: &Date, config: &CalcConfig) -> Result<Value, CalcError> {
    let incomplete = || CalcError::rejected("incomplete date");
    let end = end.date(config).ok_or_else(incomplete)?;
    let start = start.date(config).ok_or_else(incomplete)?;
    if end < start {
        return Err(CalcError::NegativeInterval);
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "years are bounded to 1..=9999"
    )]
    let days = (end - start).num_days() as f64;
    Value::number(days, config)
}

fn clock_time(time: &TimeOfDay, config: &CalcConfig) -> Result<NaiveTime, CalcError> {
    time.time(config)
        .ok_or(CalcError::rejected("incomplete time"))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "non-finite and huge offsets are filtered first"
)]
fn millis(seconds: f64) -> Option<TimeDelta> {
    let ms = (seconds * 1000.0).round();
    if !ms.is_finite() || ms.abs() >= 1e15 {
        return None;
    }
    TimeDelta::try_milliseconds(ms as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::value::ValueKind;

    fn config() -> CalcConfig {
        CalcConfig::default()
    }

    fn num(n: f64) -> Value {
        Value::number(n, &config()).unwrap()
    }

    fn dur(seconds: f64) -> Value {
        Value::duration(seconds, &config()).unwrap()
    }

    fn tod(h: u32, m: u32) -> Value {
        Value::time_of_day(NaiveTime::from_hms_opt(h, m, 0).unwrap(), &config())
    }

    fn day(y: i32, m: u32, d: u32) -> Value {
        Value::date(NaiveDate::from_ymd_opt(y, m, d).unwrap(), &config()).unwrap()
    }

    fn sample(kind: ValueKind) -> Value {
        match kind {
            ValueKind::Decimal => num(2.0),
            ValueKind::ElapsedTime => dur(5400.0),
            ValueKind::TimeOfDay => tod(8, 0),
            ValueKind::Date => day(2024, 1, 10),
        }
    }

    fn defined(op: Operator, left: ValueKind, right: ValueKind) -> bool {
        use Operator::{Add, Subtract};
        use ValueKind::{Date, Decimal, ElapsedTime, TimeOfDay};
        match (left, right) {
            (Decimal | ElapsedTime, Decimal) | (Decimal, ElapsedTime) => true,
            (ElapsedTime, ElapsedTime) | (TimeOfDay, ElapsedTime) | (Date, Decimal) => {
                matches!(op, Add | Subtract)
            }
            (Decimal, TimeOfDay) => op == Add,
            (TimeOfDay, TimeOfDay) | (Date, Date) => op == Subtract,
            _ => false,
        }
    }

    #[test]
    fn table_is_complete() {
        let config = config();
        for op in Operator::ALL {
            for left in ValueKind::ALL {
                for right in ValueKind::ALL {
                    let result = apply(op, &sample(left), &sample(right), &config);
                    if defined(op, left, right) {
                        assert!(
                            !matches!(result, Err(CalcError::OperationUndefined { .. })),
                            "{left} {op} {right} should be defined"
                        );
                    } else {
                        assert_eq!(
                            result,
                            Err(CalcError::OperationUndefined { op, left, right }),
                            "{left} {op} {right} should be undefined"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn decimals_stay_decimal() {
        let config = config();
        let result = apply(Operator::Add, &num(3.0), &num(4.0), &config).unwrap();
        assert_eq!(result.kind(), ValueKind::Decimal);
        assert_eq!(result.display(), "7");
        let result = apply(Operator::Divide, &num(1.0), &num(8.0), &config).unwrap();
        assert_eq!(result.display(), "0.125");
    }

    #[test]
    fn division_by_zero_overflows() {
        let result = apply(Operator::Divide, &num(1.0), &num(0.0), &config());
        assert!(matches!(result, Err(CalcError::Overflow { .. })));
    }

    #[test]
    fn decimal_counts_as_hours_next_to_duration() {
        let config = config();
        let result = apply(Operator::Add, &dur(5400.0), &num(2.0), &config).unwrap();
        assert_eq!(result.display(), "3:30");
        let result = apply(Operator::Subtract, &num(2.0), &dur(5400.0), &config).unwrap();
        assert_eq!(result.display(), "0:30");
    }

    #[test]
    fn durations_scale_by_numbers() {
        let config = config();
        let result = apply(Operator::Multiply, &dur(5400.0), &num(3.0), &config).unwrap();
        assert_eq!(result.kind(), ValueKind::ElapsedTime);
        assert_eq!(result.display(), "4:30");
        let result = apply(Operator::Divide, &dur(5400.0), &num(2.0), &config).unwrap();
        assert_eq!(result.display(), "0:45");
        let result = apply(Operator::Multiply, &num(2.0), &dur(5400.0), &config).unwrap();
        assert_eq!(result.display(), "3");
    }

    #[test]
    fn negative_duration_is_refused() {
        let result = apply(Operator::Subtract, &dur(60.0), &dur(120.0), &config());
        assert_eq!(result, Err(CalcError::NegativeInterval));
    }

    #[test]
    fn duration_overflow_is_refused() {
        let config = config();
        let big = dur(9_000.0 * 3600.0);
        let result = apply(Operator::Add, &big, &big, &config);
        assert!(matches!(result, Err(CalcError::Overflow { .. })));
    }

    #[test]
    fn time_of_day_difference() {
        let config = config();
        let result = apply(Operator::Subtract, &tod(8, 0), &tod(5, 0), &config).unwrap();
        assert_eq!(result.kind(), ValueKind::ElapsedTime);
        assert_eq!(result.seconds(&config), Some(3.0 * 3600.0));
        assert_eq!(result.display(), "3");

        let reversed = apply(Operator::Subtract, &tod(5, 0), &tod(8, 0), &config);
        assert_eq!(reversed, Err(CalcError::NegativeInterval));
    }

    #[test]
    fn time_of_day_moves_and_wraps() {
        let config = config();
        let result = apply(Operator::Add, &tod(23, 0), &dur(7200.0), &config).unwrap();
        assert_eq!(result.display(), "1:00:00");
        assert!(!result.is_pm());

        let result = apply(Operator::Subtract, &tod(8, 0), &dur(5400.0), &config).unwrap();
        assert_eq!(result.display(), "6:30:00");

        let result = apply(Operator::Add, &num(1.5), &tod(11, 0), &config).unwrap();
        assert_eq!(result.display(), "12:30:00");
        assert!(result.is_pm());
    }

    #[test]
    fn date_offsets_and_intervals() {
        let config = config();
        let result = apply(Operator::Add, &day(2024, 1, 10), &num(5.0), &config).unwrap();
        assert_eq!(result.display(), "01/15/2024");

        let result = apply(Operator::Subtract, &day(2024, 3, 1), &num(1.0), &config).unwrap();
        assert_eq!(result.display(), "02/29/2024");

        let result =
            apply(Operator::Subtract, &day(2024, 1, 15), &day(2024, 1, 10), &config).unwrap();
        assert_eq!(result.kind(), ValueKind::Decimal);
        assert_eq!(result.display(), "5");

        let reversed = apply(Operator::Subtract, &day(2024, 1, 10), &day(2024, 1, 15), &config);
        assert_eq!(reversed, Err(CalcError::NegativeInterval));
    }

    #[test]
    fn date_offset_needs_whole_days() {
        let result = apply(Operator::Add, &day(2024, 1, 10), &num(1.5), &config());
        assert!(matches!(result, Err(CalcError::InputRejected { .. })));
    }
}

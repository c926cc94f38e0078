//! Memory command: show or clear the stored register.

use std::io::Write;

use anyhow::{Context, Result};

use rc_core::{MemoryRecord, Value};

use crate::Config;
use crate::memory;

/// Prints the stored value and its kind.
pub fn show<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let Some(record) = memory::load(&config.memory_path)? else {
        writeln!(writer, "Memory is empty.")?;
        return Ok(());
    };
    writeln!(writer, "{}", render(&record, config)?)?;
    Ok(())
}

/// Forgets the stored value.
pub fn clear<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    memory::clear(&config.memory_path)?;
    writeln!(writer, "Memory cleared.")?;
    Ok(())
}

fn render(record: &MemoryRecord, config: &Config) -> Result<String> {
    let value = Value::from_record(record, &config.calculator)
        .context("stored memory does not fit the display")?;
    let mut line = format!("{} ({})", value.display(), value.kind());
    if value.is_time_of_day() && !config.calculator.uses_24_hour_clock {
        line.push_str(if value.is_pm() { " PM" } else { " AM" });
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use insta::assert_snapshot;
    use rc_core::CalcConfig;

    fn config(dir: &tempfile::TempDir) -> Config {
        Config {
            memory_path: dir.path().join("memory.json"),
            calculator: CalcConfig::default(),
        }
    }

    #[test]
    fn show_empty_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        show(&mut out, &config(&dir)).unwrap();
        assert_snapshot!(String::from_utf8(out).unwrap(), @"Memory is empty.");
    }

    #[test]
    fn show_stored_date() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        memory::save(&config.memory_path, Some(&MemoryRecord::Date(date))).unwrap();

        let mut out = Vec::new();
        show(&mut out, &config).unwrap();
        assert_snapshot!(String::from_utf8(out).unwrap(), @"01/10/2024 (date)");
    }

    #[test]
    fn show_stored_time_of_day() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let time = chrono::NaiveTime::from_hms_opt(21, 15, 0).unwrap();
        memory::save(&config.memory_path, Some(&MemoryRecord::TimeOfDay(time))).unwrap();

        let mut out = Vec::new();
        show(&mut out, &config).unwrap();
        assert_snapshot!(String::from_utf8(out).unwrap(), @"9:15:00 (time of day) PM");
    }

    #[test]
    fn clear_removes_stored_value() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        memory::save(&config.memory_path, Some(&MemoryRecord::Decimal(4.0))).unwrap();

        let mut out = Vec::new();
        clear(&mut out, &config).unwrap();
        assert!(memory::load(&config.memory_path).unwrap().is_none());
        assert_snapshot!(String::from_utf8(out).unwrap(), @"Memory cleared.");
    }
}

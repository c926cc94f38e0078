//! Config command: print the effective configuration.

use std::io::Write;

use anyhow::Result;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let calc = &config.calculator;
    writeln!(
        writer,
        "memory_path = {:?}",
        config.memory_path.display().to_string()
    )?;
    writeln!(writer)?;
    writeln!(writer, "[calculator]")?;
    writeln!(writer, "time_separator = {:?}", calc.time_separator.to_string())?;
    writeln!(writer, "date_separator = {:?}", calc.date_separator.to_string())?;
    writeln!(
        writer,
        "decimal_separator = {:?}",
        calc.decimal_separator.to_string()
    )?;
    writeln!(writer, "date_order = \"{}\"", calc.date_order)?;
    writeln!(writer, "uses_24_hour_clock = {}", calc.uses_24_hour_clock)?;
    writeln!(writer, "first_weekday = \"{}\"", calc.first_weekday)?;
    writeln!(writer, "max_digits = {}", calc.max_digits)?;
    writeln!(writer, "max_hours = {}", calc.max_hours)?;
    Ok(())
}

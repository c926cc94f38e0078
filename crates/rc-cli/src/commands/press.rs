//! Press command: feed keys to a session and show the display.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use rc_core::{MemoryRecord, Session};

use crate::Config;
use crate::keys::Key;
use crate::memory;

/// How the result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Final display line only.
    Line,
    /// One line per key.
    Trace,
    /// Final state as JSON.
    Json,
}

/// Final session state for `--json`.
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    display: &'a str,
    kind: &'static str,
    is_time_of_day: bool,
    is_pm: bool,
    operator: Option<char>,
    has_pending: bool,
    memory: Option<MemoryRecord>,
    rejected: usize,
}

/// Runs keys against a fresh session, restoring and saving the memory
/// register around the run. Returns the number of rejected keys.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    keys: &[Key],
    mode: OutputMode,
) -> Result<usize> {
    let mut session = Session::new(config.calculator.clone());
    restore_memory(&mut session, config);

    let rejected = feed(writer, &mut session, keys, mode)?;

    memory::save(&config.memory_path, session.memory_record().as_ref())?;
    Ok(rejected)
}

/// A missing or unreadable memory file starts with an empty register.
fn restore_memory(session: &mut Session, config: &Config) {
    match memory::load(&config.memory_path) {
        Ok(Some(record)) => {
            if let Err(e) = session.set_memory_from_record(&record) {
                tracing::warn!(error = %e, ?record, "stored memory does not fit the display");
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %config.memory_path.display(),
                "ignoring memory file"
            );
        }
    }
}

/// Presses each key in turn, continuing past rejected keys.
pub fn feed<W: Write>(
    writer: &mut W,
    session: &mut Session,
    keys: &[Key],
    mode: OutputMode,
) -> Result<usize> {
    let mut rejected = 0;
    for key in keys {
        tracing::trace!(%key, "pressing");
        let result = key.apply(session);
        if result.is_err() {
            rejected += 1;
        }
        if mode == OutputMode::Trace {
            match result {
                Ok(()) => writeln!(writer, "{key:<5} {}", display_line(session))?,
                Err(e) => writeln!(writer, "{key:<5} ERR {e}")?,
            }
        }
    }

    match mode {
        OutputMode::Line => writeln!(writer, "{}", display_line(session))?,
        OutputMode::Trace => {}
        OutputMode::Json => {
            let snapshot = Snapshot {
                display: session.display_string(),
                kind: session.current().kind().as_str(),
                is_time_of_day: session.is_time_of_day(),
                is_pm: session.is_pm(),
                operator: session.operator_symbol(),
                has_pending: session.has_pending(),
                memory: session.memory_record(),
                rejected,
            };
            writeln!(writer, "{}", serde_json::to_string_pretty(&snapshot)?)?;
        }
    }
    Ok(rejected)
}

/// The display as a single line: value, AM/PM marker, pending operator.
pub fn display_line(session: &Session) -> String {
    let mut line = session.display_string().to_string();
    if session.is_time_of_day() && !session.config().uses_24_hour_clock {
        line.push_str(if session.is_pm() { " PM" } else { " AM" });
    }
    if let Some(op) = session.operator_symbol() {
        line.push(' ');
        line.push(op);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use insta::assert_snapshot;
    use rc_core::{CalcConfig, FixedClock};

    fn session() -> Session {
        let at = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        Session::with_clock(CalcConfig::default(), Box::new(FixedClock(at)))
    }

    fn keys(input: &str) -> Vec<Key> {
        input.split_whitespace().map(|k| k.parse().unwrap()).collect()
    }

    fn output(input: &str, mode: OutputMode) -> (String, usize) {
        let mut session = session();
        let mut out = Vec::new();
        let rejected = feed(&mut out, &mut session, &keys(input), mode).unwrap();
        (String::from_utf8(out).unwrap(), rejected)
    }

    #[test]
    fn line_shows_final_display() {
        let (out, rejected) = output("1 2 + 3 =", OutputMode::Line);
        assert_eq!(rejected, 0);
        assert_snapshot!(out, @"15");
    }

    #[test]
    fn line_shows_pending_operator_and_am_pm() {
        let (out, _) = output("8 t 3 0 -", OutputMode::Line);
        assert_snapshot!(out, @"8:30 AM -");
    }

    #[test]
    fn trace_marks_rejected_keys() {
        let (out, rejected) = output("5 : 3 0 : 1 5 : =", OutputMode::Trace);
        assert_eq!(rejected, 1);
        assert_snapshot!(out, @r"
        5     5
        :     5:
        3     5:3
        0     5:30
        :     5:30:
        1     5:30:1
        5     5:30:15
        :     ERR input rejected: all segments entered
        =     5:30:15
        ");
    }

    #[test]
    fn json_snapshot_of_date_math() {
        let (out, _) = output("today + 5 =", OutputMode::Json);
        assert_snapshot!(out, @r#"
        {
          "display": "01/15/2024",
          "kind": "date",
          "is_time_of_day": false,
          "is_pm": false,
          "operator": null,
          "has_pending": false,
          "memory": null,
          "rejected": 0
        }
        "#);
    }

    #[test]
    fn run_persists_memory_between_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            memory_path: dir.path().join("memory.json"),
            calculator: CalcConfig::default(),
        };

        let mut out = Vec::new();
        run(&mut out, &config, &keys("1 : 3 0 sto"), OutputMode::Line).unwrap();
        assert_eq!(
            memory::load(&config.memory_path).unwrap(),
            Some(MemoryRecord::ElapsedTime(1.5))
        );

        let mut out = Vec::new();
        run(&mut out, &config, &keys("rcl + 1 ="), OutputMode::Line).unwrap();
        assert_snapshot!(String::from_utf8(out).unwrap(), @"2:30");
    }

    #[test]
    fn run_ignores_unreadable_memory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            memory_path: dir.path().join("memory.json"),
            calculator: CalcConfig::default(),
        };
        std::fs::write(&config.memory_path, "{").unwrap();

        let mut out = Vec::new();
        let rejected = run(&mut out, &config, &keys("rcl"), OutputMode::Line).unwrap();
        assert_eq!(rejected, 0);
        assert_snapshot!(String::from_utf8(out).unwrap(), @"0");
    }
}

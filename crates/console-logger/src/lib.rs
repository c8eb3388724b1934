//! Console Logger
//!
//! `log` backend for browser builds. Every record is formatted with a
//! local timestamp and its target, then handed to the matching
//! `console.*` method so the devtools level filter still works.

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use wasm_bindgen::JsValue;

/// Logger that writes to the browser devtools console
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_line(record, Local::now()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Format a record as `[HH:MM:SS.mmm LEVEL target] message`
pub fn format_line(record: &Record, at: DateTime<Local>) -> String {
    format!(
        "[{} {:<5} {}] {}",
        at.format("%H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Parse a level name, falling back to `Info` for anything unrecognised
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the console logger as the global `log` backend.
///
/// Only meaningful inside a browser; call it once from `main`.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap();
        let line = format_line(
            &Record::builder()
                .args(format_args!("socket closed"))
                .level(Level::Warn)
                .target("resolveit_ui::notifications")
                .build(),
            at,
        );
        assert_eq!(line, "[09:30:15.000 WARN  resolveit_ui::notifications] socket closed");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ConsoleLogger::new(LevelFilter::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }
}

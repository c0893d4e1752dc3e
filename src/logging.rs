//! Log levels and the activity-panel logger.
//!
//! Diagnostics go through the `log` facade. While the TUI owns the terminal,
//! `ChannelLogger` turns each record into an activity event so it shows up in
//! the dashboard instead of being printed over the screen.

use crate::events::{AppEvent, Event};
use log::{LevelFilter, Metadata, Record};
use std::env;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}

pub fn get_rust_log_level() -> LogLevel {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    parse_rust_log_level(&rust_log)
}

pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    // Handle common RUST_LOG formats
    let level_str = rust_log
        .split(',')
        .next()
        .unwrap_or(rust_log)
        .split('=')
        .next_back()
        .unwrap_or(rust_log)
        .to_lowercase();

    match level_str.as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info, // Default to info if parsing fails
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    let threshold = get_rust_log_level();
    should_log(event_level, threshold)
}

/// `log::Log` backend feeding the dashboard's activity panel.
pub struct ChannelLogger {
    sender: mpsc::Sender<AppEvent>,
    threshold: LogLevel,
}

impl ChannelLogger {
    pub fn new(sender: mpsc::Sender<AppEvent>, threshold: LogLevel) -> Self {
        Self { sender, threshold }
    }

    /// Install as the global logger with the `RUST_LOG` threshold.
    pub fn install(sender: mpsc::Sender<AppEvent>) -> Result<(), log::SetLoggerError> {
        let threshold = get_rust_log_level();
        log::set_boxed_logger(Box::new(Self::new(sender, threshold)))?;
        log::set_max_level(threshold.into());
        Ok(())
    }
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        should_log(metadata.level().into(), self.threshold)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let event = Event::system(record.args().to_string(), record.level().into());
        // A full queue drops the record rather than blocking the UI thread.
        let _ = self.sender.try_send(AppEvent::Activity(event));
    }

    fn flush(&self) {}
}

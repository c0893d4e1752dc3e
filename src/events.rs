//! Event System
//!
//! Activity events (notifications and log records shown in the dashboard)
//! and the messages background tasks post to the UI loop.

use crate::chat_mirror::ChatMessage;
use crate::layout::FrameId;
use crate::logging::{LogLevel, should_log_with_env};
use chrono::{DateTime, Local};
use std::fmt::Display;
use uuid::Uuid;

/// Where an activity event originated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Source {
    /// The dashboard controller (layout, targeting, module assignment).
    Dashboard,
    /// A module view hosted in a frame.
    Frame(FrameId),
    /// Diagnostic log records.
    System,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn dashboard(msg: impl Into<String>, event_type: EventType) -> Self {
        let log_level = Self::level_for(event_type);
        Self::new(Source::Dashboard, msg.into(), event_type, log_level)
    }

    pub fn frame(frame: FrameId, msg: impl Into<String>, event_type: EventType) -> Self {
        let log_level = Self::level_for(event_type);
        Self::new(Source::Frame(frame), msg.into(), event_type, log_level)
    }

    pub fn system(msg: String, log_level: LogLevel) -> Self {
        let event_type = match log_level {
            LogLevel::Error => EventType::Error,
            LogLevel::Warn => EventType::Warning,
            _ => EventType::Info,
        };
        Self::new(Source::System, msg, event_type, log_level)
    }

    fn level_for(event_type: EventType) -> LogLevel {
        match event_type {
            EventType::Success | EventType::Info => LogLevel::Info,
            EventType::Warning => LogLevel::Warn,
            EventType::Error => LogLevel::Error,
        }
    }

    pub fn should_display(&self) -> bool {
        // Notifications are always shown; log records follow RUST_LOG
        if self.source != Source::System || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// Messages delivered to the UI loop through the application channel.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Console clock tick.
    Tick(DateTime<Local>),
    /// Deferred reply for the chat view `instance` hosted in `frame`.
    AssistantReply {
        frame: FrameId,
        instance: Uuid,
        message: ChatMessage,
    },
    /// Notification or log record for the activity panel.
    Activity(Event),
}

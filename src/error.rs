//! Error types for the dashboard.
//!
//! Every error here is recovered close to where it happens: validation
//! failures become warning notifications, mirror and config failures are
//! logged and replaced by defaults.

use crate::layout::{FrameId, LayoutMode};
use thiserror::Error;

/// Rejected user or config input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unknown frame: {0}")]
    UnknownFrame(String),

    #[error("Unknown module type: {0}")]
    UnknownModuleType(String),

    #[error("Unknown layout mode: {0}")]
    UnknownLayout(String),

    #[error("Unknown API provider: {0}")]
    UnknownApi(String),

    /// The frame exists but is not rendered under the active layout.
    #[error("{frame} is not visible in {layout} layout")]
    FrameNotVisible { frame: FrameId, layout: LayoutMode },

    #[error("Command '{0}' needs an argument")]
    MissingArgument(String),

    #[error("Unknown dashboard command: {0}")]
    UnknownCommand(String),
}

/// Failures reading or writing the chat mirror slot.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Chat mirror I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted log is not a valid message list.
    #[error("Chat mirror is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures loading or saving the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine the home directory")]
    NoHomeDir,
}

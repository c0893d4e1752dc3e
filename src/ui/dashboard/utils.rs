//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use crate::layout::FrameId;
use ratatui::prelude::Color;

/// Get a ratatui color for an event based on where it came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Dashboard => Color::Cyan,
        Source::Frame(FrameId::Frame1) => Color::Yellow,
        Source::Frame(FrameId::Frame2) => Color::LightGreen,
        Source::Frame(FrameId::Frame3) => Color::LightMagenta,
        Source::Frame(FrameId::Frame4) => Color::LightBlue,
        Source::System => Color::Gray,
    }
}

/// Short label shown in front of an activity line
pub fn source_label(source: &Source) -> String {
    match source {
        Source::Dashboard => "dashboard".to_string(),
        Source::Frame(frame) => frame.to_string(),
        Source::System => "log".to_string(),
    }
}

/// Format compact timestamp from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // "YYYY-MM-DD HH:MM:SS" -> "HH:MM:SS"
    match timestamp.split_once(' ') {
        Some((_, time)) if time.len() >= 8 => time[..8].to_string(),
        _ => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2024-03-14 09:05:07"), "09:05:07");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(source_label(&Source::Frame(FrameId::Frame3)), "frame3");
        assert_eq!(source_label(&Source::System), "log");
    }
}

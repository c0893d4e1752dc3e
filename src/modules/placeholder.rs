//! Panels for integrations that are not wired up yet.

use super::{Notice, ViewContext, heading, muted, target_hint};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

pub struct PlaceholderModule {
    heading: &'static str,
    description: &'static str,
    instructions: &'static str,
}

impl PlaceholderModule {
    pub fn trading() -> Self {
        Self {
            heading: "Trading Module",
            description: "Connect with Bitvavo API to monitor and trade cryptocurrency.",
            instructions: "To activate, please enter your API credentials in the command line.",
        }
    }

    pub fn home_assistant() -> Self {
        Self {
            heading: "Home Assistant Module",
            description: "Control your smart home devices and automation.",
            instructions: "To connect, enter your Home Assistant server details in the command line.",
        }
    }

    pub fn blockchain() -> Self {
        Self {
            heading: "Blockchain Module",
            description: "Secure backup and logging using blockchain technology.",
            instructions: "This module provides immutable storage for important data and logs.",
        }
    }

    pub fn scanner() -> Self {
        Self {
            heading: "Blockchain Scanner",
            description: "Search, analyze and monitor blockchain transactions and data.",
            instructions: "Connect to specific blockchains using the command line.",
        }
    }

    pub fn heading(&self) -> &str {
        self.heading
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Notice::warning(format!("{} is not connected", self.heading)))
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let lines = vec![
            Line::from(""),
            heading(self.heading).alignment(Alignment::Center),
            Line::from(self.description).alignment(Alignment::Center),
            Line::from(muted(self.instructions)).alignment(Alignment::Center),
            Line::from(""),
            target_hint(cx, "connect").alignment(Alignment::Center),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_answer_not_connected() {
        let mut scanner = PlaceholderModule::scanner();
        let notice = scanner.process_command("eth 0xabc").unwrap();
        assert_eq!(notice.msg, "Blockchain Scanner is not connected");
        assert!(scanner.process_command("").is_none());
    }
}

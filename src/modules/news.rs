//! News view with a fixed set of headlines.

use super::{Notice, ViewContext, muted, parse_position, split_command, target_hint};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: &'static str,
    pub source: &'static str,
    pub time: &'static str,
    pub summary: &'static str,
}

pub const HEADLINES: [NewsItem; 3] = [
    NewsItem {
        title: "New AI Breakthrough in Natural Language Processing",
        source: "Tech Today",
        time: "1 hour ago",
        summary: "Researchers announce a major advancement in language models that could revolutionize how we interact with AI systems.",
    },
    NewsItem {
        title: "Global Climate Summit Reaches New Agreement",
        source: "World News",
        time: "3 hours ago",
        summary: "World leaders have agreed on new emissions targets during the latest climate change conference.",
    },
    NewsItem {
        title: "Stock Markets Hit Record High",
        source: "Finance Daily",
        time: "5 hours ago",
        summary: "Major indices closed at all-time highs as investor confidence grows in economic recovery.",
    },
];

pub struct NewsModule {
    items: &'static [NewsItem],
}

impl NewsModule {
    pub fn new() -> Self {
        Self { items: &HEADLINES }
    }

    pub fn items(&self) -> &[NewsItem] {
        self.items
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        match split_command(text) {
            Some(("open", arg)) => {
                let item = &self.items[parse_position(arg, self.items.len())?];
                Some(Notice::info(format!("{}: {}", item.source, item.summary)))
            }
            _ if text.trim().is_empty() => None,
            _ => Some(Notice::info("Live news feeds are not connected yet")),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let mut lines = Vec::new();
        for item in self.items {
            lines.push(Line::from(Span::styled(
                item.title,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(muted(format!("{} · {}", item.source, item.time))));
            lines.push(Line::from(item.summary));
            lines.push(Line::from(""));
        }
        lines.push(target_hint(cx, "open a story"));

        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }
}

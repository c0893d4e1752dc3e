//! Browser view. URLs are recorded, never fetched.

use super::{Notice, ViewContext, heading, muted, split_command, target_hint};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub struct BrowserModule {
    history: Vec<String>,
}

/// Prefix bare hosts with https.
fn normalize_url(input: &str) -> String {
    if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

impl BrowserModule {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        let url = match split_command(text) {
            Some(("back", _)) => {
                self.history.pop()?;
                return None;
            }
            Some(("open", url)) => url,
            Some((name, _)) => {
                return Some(Notice::warning(format!("Unknown browser command /{}", name)));
            }
            None => text.trim(),
        };
        if url.is_empty() {
            return None;
        }
        let url = normalize_url(url);
        let notice = Notice::info(format!("Browsing is not available yet, saved {}", url));
        self.history.push(url);
        Some(notice)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let address = self.current().unwrap_or("Enter URL...");
        let mut lines = vec![
            Line::from(vec![
                muted("URL "),
                Span::styled(address.to_string(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
            heading("Web Browser").alignment(Alignment::Center),
            Line::from(muted("Enter a URL above to browse the web within ART."))
                .alignment(Alignment::Center),
        ];
        if self.history.len() > 1 {
            lines.push(Line::from(""));
            lines.push(Line::from(muted("Earlier")));
            for url in self.history.iter().rev().skip(1).take(5) {
                lines.push(Line::from(format!("  {}", url)));
            }
        }
        lines.push(target_hint(cx, "enter a URL"));

        f.render_widget(Paragraph::new(lines), area);
    }
}

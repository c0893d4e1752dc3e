//! Dashboard footer component
//!
//! Renders key hints and version info

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub const KEY_HINTS: &str = "[Esc] Quit | [Tab] Target | [F2] Layout | [F3] Module | [F4] API | [F5] Apply | [F8] Remove";

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect) {
    let footer_text = format!("{} | ART v{}", KEY_HINTS, env!("CARGO_PKG_VERSION"));

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}

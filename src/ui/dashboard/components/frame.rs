//! Dashboard module frame component
//!
//! Draws one frame border with its title, the targeting badge and the
//! remove control, then lets the hosted view fill the inside.

use crate::layout::{FrameId, remove_control_area};
use crate::modules::ModuleInstance;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Render a frame and the view it hosts.
pub fn render_module_frame(
    f: &mut Frame,
    area: Rect,
    frame: FrameId,
    instance: &ModuleInstance,
    is_targeted: bool,
) {
    let border_color = if is_targeted {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let mut title = vec![Span::styled(
        format!(" {} ", instance.module_type().title()),
        Style::default()
            .fg(border_color)
            .add_modifier(Modifier::BOLD),
    )];
    title.push(Span::styled(
        format!("{} ", frame),
        Style::default().fg(Color::DarkGray),
    ));
    if is_targeted {
        title.push(Span::styled(
            " ACTIVE ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(if is_targeted {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(border_color))
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if area.width > 8 {
        f.render_widget(
            Paragraph::new("[x]").style(Style::default().fg(Color::LightRed)),
            remove_control_area(area),
        );
    }

    instance.render(f, inner, is_targeted);
}

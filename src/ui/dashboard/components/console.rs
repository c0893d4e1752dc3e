//! Dashboard console bar component
//!
//! Renders the command input with the clock, weather, selectors and the
//! layout indicator.

use super::super::state::DashboardState;
use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Date and time as shown next to the ART badge, e.g. `Mon, Oct 19  14:03:22`.
fn clock_text(now: DateTime<Local>) -> String {
    now.format("%a, %b %-d  %H:%M:%S").to_string()
}

/// Render the console bar.
pub fn render_console(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [status_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .areas(inner);

    let console = &state.console;
    let controller = &state.controller;
    let weather = console.weather();
    let target = controller
        .target()
        .map(|frame| frame.to_string())
        .unwrap_or_else(|| "none".to_string());

    let status = Line::from(vec![
        Span::styled(
            " ART ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            clock_text(console.now()),
            Style::default().fg(Color::LightGreen),
        ),
        Span::styled(
            format!("  {} {}", weather.temperature, weather.condition),
            Style::default().fg(Color::LightBlue),
        ),
        Span::styled("  Module: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            console.selected_module().title(),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("  API: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            console.api().to_string(),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled("  Target: ", Style::default().fg(Color::DarkGray)),
        Span::raw(target),
        Span::styled(
            format!("  {} {}", controller.layout().indicator(), controller.layout()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    f.render_widget(Paragraph::new(status), status_area);

    let command = controller.command();
    let input = if command.is_empty() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::styled(
                "Type a command for the active frame, :help for dashboard commands",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(command.to_string()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    };
    f.render_widget(Paragraph::new(input), input_area);
}

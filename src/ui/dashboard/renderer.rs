//! Dashboard main renderer

use super::components::{console, footer, frame, logs};
use super::state::DashboardState;
use crate::layout::frame_areas;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub grid: Rect,
    pub logs: Rect,
    pub console: Rect,
    pub footer: Rect,
}

/// Split the terminal area. Rendering and mouse hit-testing both use this.
pub fn dashboard_areas(area: Rect) -> DashboardAreas {
    let [grid, logs, console, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(4),
            Constraint::Length(2),
        ])
        .margin(1)
        .areas(area);
    DashboardAreas {
        grid,
        logs,
        console,
        footer,
    }
}

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let areas = dashboard_areas(f.area());
    let layout = state.controller.layout();

    for (frame_id, rect) in frame_areas(areas.grid, layout) {
        if let Some(instance) = state.frame(frame_id) {
            let is_targeted = state.controller.is_targeted(frame_id);
            frame::render_module_frame(f, rect, frame_id, instance, is_targeted);
        }
    }

    logs::render_logs_panel(f, areas.logs, state);
    console::render_console(f, areas.console, state);
    footer::render_footer(f, areas.footer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FrameId;
    use crate::modules::test_support::{buffer_text, services};
    use crate::ui::app::UIConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn draw(state: &DashboardState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_areas_fill_the_screen_top_to_bottom() {
        let areas = dashboard_areas(Rect::new(0, 0, 100, 40));
        assert_eq!(areas.grid.y, 1);
        assert_eq!(areas.logs.y, areas.grid.bottom());
        assert_eq!(areas.console.y, areas.logs.bottom());
        assert_eq!(areas.footer.bottom(), 39);
    }

    #[tokio::test]
    async fn test_split_layout_renders_two_frames() {
        let (services, _rx) = services();
        let state = DashboardState::new(services, Instant::now(), UIConfig::default());
        let screen = draw(&state, 140, 40);

        assert!(screen.contains("Chat"));
        assert!(screen.contains("Agenda"));
        // frame3 is hidden in split layout
        assert!(!screen.contains("frame3"));
        assert!(screen.contains("ACTIVE"));
        assert!(screen.contains("[x]"));
        assert!(screen.contains("ACTIVITY"));
    }

    #[tokio::test]
    async fn test_quad_layout_renders_all_frames() {
        let (services, _rx) = services();
        let mut state = DashboardState::new(services, Instant::now(), UIConfig::default());
        state.controller.cycle_layout();
        let screen = draw(&state, 160, 50);

        for frame in FrameId::ALL {
            assert!(screen.contains(&frame.to_string()), "{} missing", frame);
        }
        assert!(screen.contains("Routeplanner"));
    }

    #[tokio::test]
    async fn test_tiny_terminal_does_not_panic() {
        let (services, _rx) = services();
        let state = DashboardState::new(services, Instant::now(), UIConfig::default());
        draw(&state, 10, 5);
    }
}

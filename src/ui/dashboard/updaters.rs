//! Dashboard state update logic
//!
//! Applies application events, keyboard and mouse input to the dashboard,
//! and keeps the frame views in step with the controller's assignment.

use super::renderer::dashboard_areas;
use super::state::DashboardState;

use crate::controller::{CommandDispatch, Submission};
use crate::events::{AppEvent, EventType};
use crate::layout::{frame_areas, remove_control_area};
use crate::modules::ModuleInstance;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// What the UI loop should do after a key press.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

impl DashboardState {
    /// Process queued events and chat bus traffic.
    pub fn update(&mut self) {
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(event);
        }

        // Views subscribed to the chat bus pick up what was published above
        let feed_events: Vec<_> = self
            .frames
            .values_mut()
            .flat_map(|instance| instance.poll())
            .collect();
        for event in feed_events {
            self.add_to_activity_log(event);
        }

        self.flush_notifications();
    }

    fn process_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick(now) => {
                self.console.set_time(now);
                let counters = self.counters();
                for instance in self.frames.values_mut() {
                    instance.on_tick(counters);
                }
            }
            AppEvent::AssistantReply {
                frame,
                instance,
                message,
            } => {
                if let Some(view) = self.frames.get_mut(&frame) {
                    view.receive_reply(instance, message);
                }
            }
            AppEvent::Activity(event) => self.add_to_activity_log(event),
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyOutcome::Quit;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.controller.pop_command_char(),
            KeyCode::Tab => self.controller.cycle_target(!shift),
            KeyCode::BackTab => self.controller.cycle_target(false),
            KeyCode::F(2) => self.controller.cycle_layout(),
            KeyCode::F(3) if shift => self.console.select_previous_module(),
            // Some terminals report Shift+F3 as F15
            KeyCode::F(15) => self.console.select_previous_module(),
            KeyCode::F(3) => self.console.select_next_module(),
            KeyCode::F(4) => {
                self.console.cycle_api();
                self.controller
                    .notify(format!("API set to {}", self.console.api()), EventType::Info);
            }
            KeyCode::F(5) => self.apply_selected_module(),
            KeyCode::F(8) => self.remove_target_module(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.push_command_char(c);
            }
            _ => {}
        }
        self.sync_frames();
        self.flush_notifications();
        KeyOutcome::Continue
    }

    /// Handle a mouse event on a screen of size `screen`.
    pub fn handle_mouse(&mut self, event: MouseEvent, screen: Rect) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(event.column, event.row);
        let grid = dashboard_areas(screen).grid;

        for (frame, rect) in frame_areas(grid, self.controller.layout()) {
            if !rect.contains(position) {
                continue;
            }
            let result = if rect.width > 8 && remove_control_area(rect).contains(position) {
                self.controller.remove_module(frame)
            } else {
                self.controller.set_target_frame(frame)
            };
            if let Err(e) = result {
                self.controller.notify(e.to_string(), EventType::Warning);
            }
            break;
        }
        self.sync_frames();
        self.flush_notifications();
    }

    fn submit(&mut self) {
        if let Submission::Dispatch(dispatch) = self.controller.submit_buffer() {
            self.dispatch(dispatch);
        }
    }

    /// Deliver a console command to the view of its frame.
    fn dispatch(&mut self, dispatch: CommandDispatch) {
        let Some(instance) = self.frames.get_mut(&dispatch.frame) else {
            log::warn!("No view in {} for command", dispatch.frame);
            return;
        };
        if instance.module_type() != dispatch.module_type {
            log::debug!(
                "{} changed to {} before dispatch",
                dispatch.frame,
                instance.module_type()
            );
        }
        if let Some(event) = instance.process_command(&dispatch.text) {
            self.add_to_activity_log(event);
        }
    }

    fn apply_selected_module(&mut self) {
        let selected = self.console.selected_module();
        let result = match self.controller.target() {
            Some(frame) => self.controller.change_module(frame, selected),
            None => {
                self.controller
                    .notify("Select a frame first", EventType::Warning);
                Ok(())
            }
        };
        if let Err(e) = result {
            self.controller.notify(e.to_string(), EventType::Warning);
        }
    }

    fn remove_target_module(&mut self) {
        if let Some(frame) = self.controller.target() {
            if let Err(e) = self.controller.remove_module(frame) {
                self.controller.notify(e.to_string(), EventType::Warning);
            }
        }
    }

    /// Rebuild views whose frame now holds a different module type.
    /// Views keep their state while their type is unchanged.
    pub fn sync_frames(&mut self) {
        for (frame, module) in self.controller.modules() {
            let current = self.frames.get(frame).map(ModuleInstance::module_type);
            if current != Some(module.module_type) {
                log::debug!("Creating {} view for {}", module.module_type, frame);
                self.frames.insert(
                    *frame,
                    ModuleInstance::new(*frame, module.module_type, &self.services),
                );
            }
        }
    }

    fn flush_notifications(&mut self) {
        for event in self.controller.take_notifications() {
            self.add_to_activity_log(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_mirror::{ChatMessage, Sender};
    use crate::events::Source;
    use crate::layout::{FrameId, LayoutMode};
    use crate::modules::ModuleView;
    use crate::modules::test_support::services;
    use crate::registry::ModuleType;
    use crate::ui::app::UIConfig;
    use std::time::Instant;

    fn screen() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    fn dashboard() -> DashboardState {
        let (services, _rx) = services();
        DashboardState::new(services, Instant::now(), UIConfig::default())
    }

    fn press(state: &mut DashboardState, code: KeyCode) -> KeyOutcome {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut DashboardState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn click(state: &mut DashboardState, column: u16, row: u16) {
        state.handle_mouse(
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
            screen(),
        );
    }

    fn frame_rect(state: &DashboardState, frame: FrameId) -> Rect {
        frame_areas(dashboard_areas(screen()).grid, state.controller.layout())
            .into_iter()
            .find(|(f, _)| *f == frame)
            .map(|(_, rect)| rect)
            .unwrap()
    }

    fn chat_len(state: &DashboardState, frame: FrameId) -> usize {
        match state.frame(frame).unwrap().view() {
            ModuleView::Chat(chat) => chat.messages().len(),
            _ => panic!("{} is not a chat", frame),
        }
    }

    #[tokio::test]
    async fn test_views_match_controller_assignment() {
        let state = dashboard();
        for (frame, module) in state.controller.modules() {
            assert_eq!(state.frame(*frame).unwrap().module_type(), module.module_type);
        }
    }

    #[tokio::test]
    async fn test_typed_command_reaches_targeted_view() {
        let mut state = dashboard();
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.controller.target(), Some(FrameId::Frame2));

        // frame2 hosts the agenda; an unknown command answers with a warning
        type_text(&mut state, "/bogus");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.controller.command(), "");
        assert!(state.activity_logs.iter().any(|e| {
            e.source == Source::Frame(FrameId::Frame2) && e.event_type == EventType::Warning
        }));
    }

    #[tokio::test]
    async fn test_backspace_edits_buffer() {
        let mut state = dashboard();
        type_text(&mut state, "hey");
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.controller.command(), "he");
    }

    #[tokio::test]
    async fn test_escape_and_ctrl_c_quit() {
        let mut state = dashboard();
        assert_eq!(press(&mut state, KeyCode::Esc), KeyOutcome::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(state.handle_key(ctrl_c), KeyOutcome::Quit);
        assert_eq!(press(&mut state, KeyCode::Char('q')), KeyOutcome::Continue);
    }

    #[tokio::test]
    async fn test_apply_selected_module_rebuilds_view() {
        let mut state = dashboard();
        press(&mut state, KeyCode::F(3)); // chat -> email
        press(&mut state, KeyCode::F(5));
        assert_eq!(
            state.frame(FrameId::Frame1).unwrap().module_type(),
            ModuleType::Email
        );

        press(&mut state, KeyCode::F(8));
        assert_eq!(
            state.frame(FrameId::Frame1).unwrap().module_type(),
            ModuleType::Chat
        );
    }

    #[tokio::test]
    async fn test_meta_command_changes_layout() {
        let mut state = dashboard();
        type_text(&mut state, ":layout quad");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.controller.layout(), LayoutMode::Quad);

        type_text(&mut state, ":module todo");
        press(&mut state, KeyCode::Enter);
        assert_eq!(
            state.frame(FrameId::Frame1).unwrap().module_type(),
            ModuleType::Todo
        );
    }

    #[tokio::test]
    async fn test_click_targets_frame() {
        let mut state = dashboard();
        let rect = frame_rect(&state, FrameId::Frame2);
        click(&mut state, rect.x + 2, rect.y + 2);
        assert_eq!(state.controller.target(), Some(FrameId::Frame2));

        // Clicks outside the grid change nothing
        click(&mut state, 5, screen().height - 2);
        assert_eq!(state.controller.target(), Some(FrameId::Frame2));
    }

    #[tokio::test]
    async fn test_click_on_remove_control_resets_without_targeting() {
        let mut state = dashboard();
        let rect = frame_rect(&state, FrameId::Frame2);
        let control = remove_control_area(rect);
        click(&mut state, control.x + 1, control.y);

        assert_eq!(
            state.frame(FrameId::Frame2).unwrap().module_type(),
            ModuleType::Chat
        );
        assert_eq!(state.controller.target(), Some(FrameId::Frame1));
    }

    #[tokio::test]
    async fn test_reply_for_replaced_view_is_dropped() {
        let mut state = dashboard();
        let old = state.frame(FrameId::Frame1).unwrap().address().instance;

        state.controller.change_module(FrameId::Frame1, ModuleType::Todo).unwrap();
        state.sync_frames();
        state.controller.change_module(FrameId::Frame1, ModuleType::Chat).unwrap();
        state.sync_frames();

        state.add_event(AppEvent::AssistantReply {
            frame: FrameId::Frame1,
            instance: old,
            message: ChatMessage::new("late", Sender::Assistant),
        });
        state.update();
        assert_eq!(chat_len(&state, FrameId::Frame1), 1);
    }

    #[tokio::test]
    async fn test_reply_for_live_view_is_appended() {
        let mut state = dashboard();
        let live = state.frame(FrameId::Frame1).unwrap().address().instance;
        state.add_event(AppEvent::AssistantReply {
            frame: FrameId::Frame1,
            instance: live,
            message: ChatMessage::new("hi", Sender::Assistant),
        });
        state.update();
        assert_eq!(chat_len(&state, FrameId::Frame1), 2);
    }

    #[tokio::test]
    async fn test_chat_code_reaches_coding_view() {
        let mut state = dashboard();
        state.controller.change_module(FrameId::Frame2, ModuleType::Coding).unwrap();
        state.sync_frames();

        type_text(&mut state, "```rust\nfn main() {}\n```");
        press(&mut state, KeyCode::Enter);
        state.update();

        match state.frame(FrameId::Frame2).unwrap().view() {
            ModuleView::Coding(coding) => assert_eq!(coding.snippets().len(), 1),
            _ => panic!("frame2 is not the code editor"),
        }
    }

    #[tokio::test]
    async fn test_tick_hands_dashboard_counters_to_stats_view() {
        let mut state = dashboard();
        type_text(&mut state, ":module stats frame2");
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "hello");
        press(&mut state, KeyCode::Enter);

        state.add_event(AppEvent::Tick(chrono::Local::now()));
        state.update();

        match state.frame(FrameId::Frame2).unwrap().view() {
            ModuleView::Stats(stats) => {
                let counters = stats.counters();
                assert_eq!(counters.commands_routed, 1);
                assert_eq!(counters.module_changes, 1);
                assert!(counters.uptime <= state.start_time.elapsed());
            }
            _ => panic!("frame2 is not the stats view"),
        }
    }

    #[tokio::test]
    async fn test_tick_updates_console_clock() {
        let mut state = dashboard();
        let now = chrono::Local::now();
        state.add_event(AppEvent::Tick(now));
        state.update();
        assert_eq!(state.console.now(), now);
    }
}

//! Dashboard controller
//!
//! Owns every piece of state shared between the console and the frames: the
//! frame → module assignment, the layout mode, the targeted frame and the
//! command being typed. All mutation goes through the named operations below;
//! each user-visible change queues a notification for the activity panel.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::error::ValidationError;
use crate::events::{Event, EventType};
use crate::layout::{FrameId, LayoutMode};
use crate::registry::ModuleType;
use std::collections::{BTreeMap, VecDeque};

/// Module assigned to a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub id: FrameId,
    pub module_type: ModuleType,
    pub title: String,
}

impl Module {
    pub fn new(id: FrameId, module_type: ModuleType) -> Self {
        Self {
            id,
            module_type,
            title: module_type.title(),
        }
    }
}

/// A submitted command resolved against the targeted frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDispatch {
    pub text: String,
    pub frame: FrameId,
    pub module_type: ModuleType,
}

/// What the dashboard should do after a console submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input or no target: nothing happened.
    Ignored,
    /// A `:` command the controller handled itself.
    Handled,
    /// Text to hand to the targeted module.
    Dispatch(CommandDispatch),
}

/// Authoritative dashboard state.
#[derive(Debug)]
pub struct DashboardController {
    modules: BTreeMap<FrameId, Module>,
    layout: LayoutMode,
    target: Option<FrameId>,
    command: String,
    notifications: VecDeque<Event>,
    commands_routed: u64,
    module_changes: u64,
}

impl DashboardController {
    /// Creates a controller with one module per frame; the target starts on frame1.
    pub fn new(assignments: BTreeMap<FrameId, ModuleType>, layout: LayoutMode) -> Self {
        let modules = FrameId::ALL
            .iter()
            .map(|frame| {
                let module_type = assignments.get(frame).copied().unwrap_or_default();
                (*frame, Module::new(*frame, module_type))
            })
            .collect();

        Self {
            modules,
            layout,
            target: Some(FrameId::Frame1),
            command: String::new(),
            notifications: VecDeque::new(),
            commands_routed: 0,
            module_changes: 0,
        }
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn target(&self) -> Option<FrameId> {
        self.target
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn module(&self, frame: FrameId) -> Option<&Module> {
        self.modules.get(&frame)
    }

    pub fn modules(&self) -> &BTreeMap<FrameId, Module> {
        &self.modules
    }

    /// Frames rendered under the active layout.
    pub fn visible_frames(&self) -> &'static [FrameId] {
        self.layout.visible_frames()
    }

    /// Commands handed to a view since start.
    pub fn commands_routed(&self) -> u64 {
        self.commands_routed
    }

    /// Module changes and removals since start.
    pub fn module_changes(&self) -> u64 {
        self.module_changes
    }

    pub fn is_targeted(&self, frame: FrameId) -> bool {
        self.target == Some(frame)
    }

    /// Replace the layout. Assignments are kept for hidden frames; a target
    /// that becomes hidden moves to frame1, which every layout renders.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        if self.layout == mode {
            return;
        }
        self.layout = mode;
        if let Some(target) = self.target {
            if !mode.is_visible(target) {
                log::debug!("{} hidden by {} layout, retargeting frame1", target, mode);
                self.target = Some(FrameId::Frame1);
            }
        }
        self.notify(format!("Layout changed to {}", mode), EventType::Info);
    }

    /// Advance fullscreen → split → quad → fullscreen.
    pub fn cycle_layout(&mut self) {
        self.set_layout_mode(self.layout.next());
    }

    pub fn change_module(
        &mut self,
        frame: FrameId,
        module_type: ModuleType,
    ) -> Result<(), ValidationError> {
        let module = self
            .modules
            .get_mut(&frame)
            .ok_or_else(|| ValidationError::UnknownFrame(frame.to_string()))?;
        module.module_type = module_type;
        module.title = module_type.title();
        let msg = format!("{} now shows {}", frame, module.title);
        self.module_changes += 1;
        self.notify(msg, EventType::Success);
        Ok(())
    }

    /// Text form of `change_module`, for console and config input.
    pub fn change_module_by_name(
        &mut self,
        frame: &str,
        module_type: &str,
    ) -> Result<(), ValidationError> {
        let frame = FrameId::parse(frame)?;
        let module_type = ModuleType::parse(module_type)?;
        self.change_module(frame, module_type)
    }

    /// Reset a frame to the default chat module.
    pub fn remove_module(&mut self, frame: FrameId) -> Result<(), ValidationError> {
        let module = self
            .modules
            .get_mut(&frame)
            .ok_or_else(|| ValidationError::UnknownFrame(frame.to_string()))?;
        let previous = module.title.clone();
        module.module_type = ModuleType::default();
        module.title = module.module_type.title();
        self.module_changes += 1;
        self.notify(
            format!("{} removed from {}", previous, frame),
            EventType::Info,
        );
        Ok(())
    }

    /// Make `frame` the exclusive target. The frame must be rendered.
    pub fn set_target_frame(&mut self, frame: FrameId) -> Result<(), ValidationError> {
        if !self.layout.is_visible(frame) {
            return Err(ValidationError::FrameNotVisible {
                frame,
                layout: self.layout,
            });
        }
        self.target = Some(frame);
        Ok(())
    }

    /// Move the target to the next (or previous) rendered frame.
    pub fn cycle_target(&mut self, forward: bool) {
        let visible = self.visible_frames();
        let current = self
            .target
            .and_then(|t| visible.iter().position(|f| *f == t))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % visible.len()
        } else {
            (current + visible.len() - 1) % visible.len()
        };
        self.target = Some(visible[next]);
    }

    pub fn push_command_char(&mut self, c: char) {
        self.command.push(c);
    }

    pub fn pop_command_char(&mut self) {
        self.command.pop();
    }

    #[cfg(test)]
    pub fn set_command(&mut self, text: impl Into<String>) {
        self.command = text.into();
    }

    /// Route `text` to the targeted frame.
    ///
    /// Blank input and a missing target leave everything untouched. On
    /// success the command buffer is cleared.
    pub fn submit_command(&mut self, text: &str) -> Option<CommandDispatch> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let frame = self.target?;
        let module_type = self.modules.get(&frame)?.module_type;

        log::info!("Command submitted to {} ({}): {}", frame, module_type, trimmed);
        self.notify(
            format!("{} -> {}: {}", module_type.title(), frame, trimmed),
            EventType::Info,
        );
        self.command.clear();
        self.commands_routed += 1;
        Some(CommandDispatch {
            text: trimmed.to_string(),
            frame,
            module_type,
        })
    }

    /// Submit the command buffer, handling `:` dashboard commands in place.
    pub fn submit_buffer(&mut self) -> Submission {
        let text = self.command.clone();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Submission::Ignored;
        }
        if let Some(meta) = trimmed.strip_prefix(':') {
            if let Err(e) = self.run_meta_command(meta) {
                self.notify(e.to_string(), EventType::Warning);
            }
            self.command.clear();
            return Submission::Handled;
        }
        match self.submit_command(trimmed) {
            Some(dispatch) => Submission::Dispatch(dispatch),
            None => Submission::Ignored,
        }
    }

    fn run_meta_command(&mut self, input: &str) -> Result<(), ValidationError> {
        let mut parts = input.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "layout" => {
                let mode = LayoutMode::parse(require(name, arg)?)?;
                self.set_layout_mode(mode);
            }
            "module" => {
                let module_type = require(name, arg)?;
                match parts.next() {
                    Some(frame) => self.change_module_by_name(frame, module_type)?,
                    None => {
                        let module_type = ModuleType::parse(module_type)?;
                        let frame = self
                            .target
                            .ok_or_else(|| ValidationError::UnknownFrame("none".to_string()))?;
                        self.change_module(frame, module_type)?;
                    }
                }
            }
            "target" => {
                let frame = FrameId::parse(require(name, arg)?)?;
                self.set_target_frame(frame)?;
            }
            "remove" => {
                let frame = match arg {
                    Some(name) => FrameId::parse(name)?,
                    None => self
                        .target
                        .ok_or_else(|| ValidationError::UnknownFrame("none".to_string()))?,
                };
                self.remove_module(frame)?;
            }
            "help" => {
                self.notify(
                    ":layout <mode> | :module <type> [n] | :target <n> | :remove [n]",
                    EventType::Info,
                );
            }
            other => return Err(ValidationError::UnknownCommand(other.to_string())),
        }
        Ok(())
    }

    /// Queue a notification for the activity panel.
    pub fn notify(&mut self, msg: impl Into<String>, event_type: EventType) {
        if self.notifications.len() >= MAX_ACTIVITY_LOGS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Event::dashboard(msg, event_type));
    }

    /// Hand over queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Event> {
        self.notifications.drain(..).collect()
    }
}

/// The argument of meta-command `name`, which must be present.
fn require<'a>(name: &str, arg: Option<&'a str>) -> Result<&'a str, ValidationError> {
    arg.ok_or_else(|| ValidationError::MissingArgument(name.to_string()))
}

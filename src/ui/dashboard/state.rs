//! Dashboard state management
//!
//! Holds the controller, the console and one live view per frame.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::controller::DashboardController;
use crate::events::{AppEvent, Event};
use crate::layout::FrameId;
use crate::modules::stats::DashboardCounters;
use crate::modules::{ModuleInstance, ModuleServices};
use crate::ui::app::UIConfig;
use crate::ui::console::ConsoleState;

use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

/// Everything the dashboard screen renders.
pub struct DashboardState {
    /// Authoritative layout, assignment and target state.
    pub controller: DashboardController,
    /// Console bar state.
    pub console: ConsoleState,
    /// Live view per frame, hidden frames included.
    pub frames: BTreeMap<FrameId, ModuleInstance>,
    /// Queue of application events waiting to be processed
    pub pending_events: VecDeque<AppEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    pub(super) services: ModuleServices,
}

impl DashboardState {
    /// Creates the dashboard and a view for every frame.
    pub fn new(services: ModuleServices, start_time: Instant, ui_config: UIConfig) -> Self {
        let controller = DashboardController::new(ui_config.assignments, ui_config.layout);
        let console = ConsoleState::new(ui_config.api, services.events.clone(), &services.shutdown);
        let frames = controller
            .modules()
            .iter()
            .map(|(frame, module)| {
                (
                    *frame,
                    ModuleInstance::new(*frame, module.module_type, &services),
                )
            })
            .collect();

        Self {
            controller,
            console,
            frames,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            start_time,
            services,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: AppEvent) {
        self.pending_events.push_back(event);
    }

    /// Figures the statistics view shows about the dashboard itself.
    pub fn counters(&self) -> DashboardCounters {
        DashboardCounters {
            uptime: self.start_time.elapsed(),
            commands_routed: self.controller.commands_routed(),
            module_changes: self.controller.module_changes(),
        }
    }

    pub fn frame(&self, frame: FrameId) -> Option<&ModuleInstance> {
        self.frames.get(&frame)
    }
}

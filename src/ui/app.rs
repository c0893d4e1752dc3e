//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::api_provider::ApiProvider;
use crate::config::default_assignments;
use crate::consts::cli_consts::timing;
use crate::events::AppEvent;
use crate::layout::{FrameId, LayoutMode};
use crate::modules::ModuleServices;
use crate::registry::ModuleType;
use crate::ui::dashboard::updaters::KeyOutcome;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal, backend::Backend};
use std::collections::BTreeMap;
use std::time::Instant;
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub layout: LayoutMode,
    pub api: ApiProvider,
    pub assignments: BTreeMap<FrameId, ModuleType>,
}

impl UIConfig {
    pub fn new(
        with_background_color: bool,
        layout: LayoutMode,
        api: ApiProvider,
        assignments: BTreeMap<FrameId, ModuleType>,
    ) -> Self {
        Self {
            with_background_color,
            layout,
            api,
            assignments,
        }
    }
}

impl Default for UIConfig {
    fn default() -> Self {
        Self::new(
            false,
            LayoutMode::default(),
            ApiProvider::default(),
            default_assignments(),
        )
    }
}

/// The different screens in the application.
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The module dashboard.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from background tasks and the logger.
    event_receiver: mpsc::Receiver<AppEvent>,

    /// Broadcasts shutdown signal to background tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Handles the dashboard views are built with.
    services: ModuleServices,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        event_receiver: mpsc::Receiver<AppEvent>,
        shutdown_sender: broadcast::Sender<()>,
        services: ModuleServices,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            current_screen: Screen::Splash,
            event_receiver,
            shutdown_sender,
            services,
            ui_config,
        }
    }

    /// Leave the splash screen.
    fn open_dashboard(&mut self) {
        let state = DashboardState::new(
            self.services.clone(),
            self.start_time,
            self.ui_config.clone(),
        );
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    fn shutdown(&self) {
        // No subscribers left is fine
        let _ = self.shutdown_sender.send(());
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = timing::splash_duration();

    // UI event loop
    loop {
        // Events stay queued in the channel until the dashboard exists
        if let Screen::Dashboard(state) = &mut app.current_screen {
            while let Ok(event) = app.event_receiver.try_recv() {
                state.add_event(event);
            }
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.open_dashboard();
                continue;
            }
        }

        // Poll for terminal events without starving the runtime
        let input = tokio::task::block_in_place(|| -> std::io::Result<Option<Event>> {
            if event::poll(timing::input_poll())? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })?;

        match input {
            Some(Event::Key(key)) => {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match &mut app.current_screen {
                    Screen::Splash => {
                        if key.code == KeyCode::Esc
                            || (key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL))
                        {
                            app.shutdown();
                            return Ok(());
                        }
                        // Any other key skips the splash screen
                        app.open_dashboard();
                    }
                    Screen::Dashboard(state) => {
                        if state.handle_key(key) == KeyOutcome::Quit {
                            app.shutdown();
                            return Ok(());
                        }
                    }
                }
            }
            Some(Event::Mouse(mouse)) => {
                if let Screen::Dashboard(state) = &mut app.current_screen {
                    let size = terminal.size()?;
                    state.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
            }
            _ => {}
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

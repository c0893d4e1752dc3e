//! Session setup and initialization

use crate::chat_mirror::FileChatMirror;
use crate::config::Config;
use crate::consts::cli_consts::{CHAT_BUS_CAPACITY, EVENT_QUEUE_SIZE, timing};
use crate::events::AppEvent;
use crate::logging::ChannelLogger;
use crate::modules::ModuleServices;
use crate::ui::UIConfig;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Everything the TUI needs to run one dashboard session.
#[derive(Debug)]
pub struct SessionData {
    /// Receives deferred results, clock ticks and log records.
    pub event_receiver: mpsc::Receiver<AppEvent>,
    /// Background tasks to await on exit.
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all background work
    pub shutdown_sender: broadcast::Sender<()>,
    /// Handles shared by every module view.
    pub services: ModuleServices,
    pub ui_config: UIConfig,
    pub chat_mirror_path: PathBuf,
}

/// Sets up the channels, the chat mirror and the logger for a session.
///
/// The logger is installed before the frame assignment is resolved, so config
/// fallbacks show up in the activity panel. The shutdown broadcast is bridged to the root cancellation token so that
/// every pending reply and the console clock stop when the UI exits.
pub async fn setup_session(
    config: Config,
    chat_mirror_path: PathBuf,
) -> Result<SessionData, Box<dyn Error>> {
    let (event_sender, event_receiver) = mpsc::channel::<AppEvent>(EVENT_QUEUE_SIZE);
    let (chat_bus, _) = broadcast::channel(CHAT_BUS_CAPACITY);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);
    let shutdown = CancellationToken::new();

    // Diagnostics go to the activity panel while the TUI owns the terminal
    ChannelLogger::install(event_sender.clone())?;
    let ui_config = UIConfig::new(
        config.with_background_color,
        config.layout,
        config.api,
        config.frame_assignments(),
    );

    let mut shutdown_receiver = shutdown_sender.subscribe();
    let root = shutdown.clone();
    let watcher = tokio::spawn(async move {
        // A closed channel means the app is gone as well
        let _ = shutdown_receiver.recv().await;
        root.cancel();
    });

    let services = ModuleServices {
        events: event_sender,
        chat_bus,
        mirror: Arc::new(FileChatMirror::new(&chat_mirror_path)),
        reply_delay: timing::assistant_reply_delay(),
        shutdown,
    };

    log::debug!("Chat mirror at {}", chat_mirror_path.display());

    Ok(SessionData {
        event_receiver,
        join_handles: vec![watcher],
        shutdown_sender,
        services,
        ui_config,
        chat_mirror_path,
    })
}

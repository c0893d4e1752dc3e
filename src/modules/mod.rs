//! Module views
//!
//! Each frame hosts one `ModuleInstance`. The view it wraps is picked by an
//! exhaustive match over `ModuleType`, so registering a new type fails to
//! compile until it has a view.

pub mod agenda;
pub mod browser;
pub mod chat;
pub mod coding;
pub mod email;
pub mod news;
pub mod placeholder;
pub mod route_planner;
pub mod stats;
pub mod todo;

use crate::chat_mirror::{ChatMessage, ChatMirror};
use crate::events::{AppEvent, Event, EventType};
use crate::layout::FrameId;
use crate::registry::ModuleType;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use agenda::AgendaModule;
use browser::BrowserModule;
use chat::ChatModule;
use coding::CodingModule;
use email::EmailModule;
use news::NewsModule;
use placeholder::PlaceholderModule;
use route_planner::RoutePlannerModule;
use stats::{DashboardCounters, StatsModule};
use todo::TodoModule;

/// Shared handles views are built with.
#[derive(Clone)]
pub struct ModuleServices {
    /// Application channel for deferred results.
    pub events: mpsc::Sender<AppEvent>,
    /// Chat publish/subscribe bus.
    pub chat_bus: broadcast::Sender<ChatMessage>,
    /// Durable chat slot.
    pub mirror: Arc<dyn ChatMirror>,
    /// Delay of the simulated assistant reply.
    pub reply_delay: Duration,
    /// Parent of every scheduled task's token; cancelled on shutdown.
    pub shutdown: CancellationToken,
}

impl fmt::Debug for ModuleServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleServices")
            .field("reply_delay", &self.reply_delay)
            .finish_non_exhaustive()
    }
}

/// Identity of a view: the frame it lives in and a per-instance id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ViewAddress {
    pub frame: FrameId,
    pub instance: Uuid,
}

/// A short user-visible message produced by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub event_type: EventType,
    pub msg: String,
}

impl Notice {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            event_type: EventType::Success,
            msg: msg.into(),
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            event_type: EventType::Info,
            msg: msg.into(),
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            event_type: EventType::Warning,
            msg: msg.into(),
        }
    }
}

/// Per-render information about the hosting frame.
#[derive(Debug, Copy, Clone)]
pub struct ViewContext {
    pub frame: FrameId,
    pub is_targeted: bool,
}

pub enum ModuleView {
    Chat(ChatModule),
    Email(EmailModule),
    Agenda(AgendaModule),
    Todo(TodoModule),
    RoutePlanner(RoutePlannerModule),
    Trading(PlaceholderModule),
    Stats(StatsModule),
    HomeAssistant(PlaceholderModule),
    Browser(BrowserModule),
    News(NewsModule),
    Blockchain(PlaceholderModule),
    Scanner(PlaceholderModule),
    Coding(CodingModule),
}

impl ModuleView {
    /// Registry: build the view for `module_type`.
    pub fn for_type(
        module_type: ModuleType,
        address: ViewAddress,
        services: &ModuleServices,
    ) -> Self {
        match module_type {
            ModuleType::Chat => ModuleView::Chat(ChatModule::new(address, services)),
            ModuleType::Email => ModuleView::Email(EmailModule::new()),
            ModuleType::Agenda => ModuleView::Agenda(AgendaModule::new()),
            ModuleType::Todo => ModuleView::Todo(TodoModule::new()),
            ModuleType::RoutePlanner => ModuleView::RoutePlanner(RoutePlannerModule::new()),
            ModuleType::Trading => ModuleView::Trading(PlaceholderModule::trading()),
            ModuleType::Stats => ModuleView::Stats(StatsModule::new()),
            ModuleType::HomeAssistant => {
                ModuleView::HomeAssistant(PlaceholderModule::home_assistant())
            }
            ModuleType::Browser => ModuleView::Browser(BrowserModule::new()),
            ModuleType::News => ModuleView::News(NewsModule::new()),
            ModuleType::Blockchain => ModuleView::Blockchain(PlaceholderModule::blockchain()),
            ModuleType::Scanner => ModuleView::Scanner(PlaceholderModule::scanner()),
            ModuleType::Coding => ModuleView::Coding(CodingModule::new(services)),
        }
    }

    pub fn module_type(&self) -> ModuleType {
        match self {
            ModuleView::Chat(_) => ModuleType::Chat,
            ModuleView::Email(_) => ModuleType::Email,
            ModuleView::Agenda(_) => ModuleType::Agenda,
            ModuleView::Todo(_) => ModuleType::Todo,
            ModuleView::RoutePlanner(_) => ModuleType::RoutePlanner,
            ModuleView::Trading(_) => ModuleType::Trading,
            ModuleView::Stats(_) => ModuleType::Stats,
            ModuleView::HomeAssistant(_) => ModuleType::HomeAssistant,
            ModuleView::Browser(_) => ModuleType::Browser,
            ModuleView::News(_) => ModuleType::News,
            ModuleView::Blockchain(_) => ModuleType::Blockchain,
            ModuleView::Scanner(_) => ModuleType::Scanner,
            ModuleView::Coding(_) => ModuleType::Coding,
        }
    }
}

/// A view bound to a frame.
pub struct ModuleInstance {
    address: ViewAddress,
    view: ModuleView,
}

impl ModuleInstance {
    pub fn new(frame: FrameId, module_type: ModuleType, services: &ModuleServices) -> Self {
        let address = ViewAddress {
            frame,
            instance: Uuid::new_v4(),
        };
        Self {
            address,
            view: ModuleView::for_type(module_type, address, services),
        }
    }

    pub fn module_type(&self) -> ModuleType {
        self.view.module_type()
    }

    pub fn address(&self) -> ViewAddress {
        self.address
    }

    pub fn view(&self) -> &ModuleView {
        &self.view
    }

    /// Entry point for console commands routed to this frame.
    pub fn process_command(&mut self, text: &str) -> Option<Event> {
        let notice = match &mut self.view {
            ModuleView::Chat(v) => v.process_command(text),
            ModuleView::Email(v) => v.process_command(text),
            ModuleView::Agenda(v) => v.process_command(text),
            ModuleView::Todo(v) => v.process_command(text),
            ModuleView::RoutePlanner(v) => v.process_command(text),
            ModuleView::Stats(v) => v.process_command(text),
            ModuleView::Browser(v) => v.process_command(text),
            ModuleView::News(v) => v.process_command(text),
            ModuleView::Coding(v) => v.process_command(text),
            ModuleView::Trading(v)
            | ModuleView::HomeAssistant(v)
            | ModuleView::Blockchain(v)
            | ModuleView::Scanner(v) => v.process_command(text),
        };
        notice.map(|n| self.to_event(n))
    }

    /// Deliver a deferred assistant reply. Replies addressed to an earlier
    /// instance of this frame are dropped.
    pub fn receive_reply(&mut self, instance: Uuid, message: ChatMessage) {
        if instance != self.address.instance {
            log::debug!("Dropping reply for replaced view in {}", self.address.frame);
            return;
        }
        if let ModuleView::Chat(chat) = &mut self.view {
            chat.receive_reply(message);
        }
    }

    /// Clock tick.
    pub fn on_tick(&mut self, counters: DashboardCounters) {
        if let ModuleView::Stats(stats) = &mut self.view {
            stats.set_counters(counters);
            stats.refresh();
        }
    }

    /// Pick up chat bus traffic.
    pub fn poll(&mut self) -> Vec<Event> {
        let notices = match &mut self.view {
            ModuleView::Coding(coding) => coding.poll_chat_feed(),
            _ => Vec::new(),
        };
        notices.into_iter().map(|n| self.to_event(n)).collect()
    }

    pub fn render(&self, f: &mut Frame, area: Rect, is_targeted: bool) {
        let cx = ViewContext {
            frame: self.address.frame,
            is_targeted,
        };
        match &self.view {
            ModuleView::Chat(v) => v.render(f, area, &cx),
            ModuleView::Email(v) => v.render(f, area, &cx),
            ModuleView::Agenda(v) => v.render(f, area, &cx),
            ModuleView::Todo(v) => v.render(f, area, &cx),
            ModuleView::RoutePlanner(v) => v.render(f, area, &cx),
            ModuleView::Stats(v) => v.render(f, area, &cx),
            ModuleView::Browser(v) => v.render(f, area, &cx),
            ModuleView::News(v) => v.render(f, area, &cx),
            ModuleView::Coding(v) => v.render(f, area, &cx),
            ModuleView::Trading(v)
            | ModuleView::HomeAssistant(v)
            | ModuleView::Blockchain(v)
            | ModuleView::Scanner(v) => v.render(f, area, &cx),
        }
    }

    fn to_event(&self, notice: Notice) -> Event {
        Event::frame(self.address.frame, notice.msg, notice.event_type)
    }
}

/// Split a command into its `/name` and the rest of the line.
pub(crate) fn split_command(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim().strip_prefix('/')?;
    match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => Some((name, arg.trim())),
        None => Some((rest, "")),
    }
}

/// Parse a one-based list position.
pub(crate) fn parse_position(arg: &str, len: usize) -> Option<usize> {
    let n: usize = arg.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Dim line asking the user to target the frame.
pub(crate) fn target_hint(cx: &ViewContext, action: &str) -> Line<'static> {
    let text = if cx.is_targeted {
        format!("Type in the console to {}", action)
    } else {
        format!("Click or Tab to {} to {}", cx.frame, action)
    };
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))
}

pub(crate) fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

pub(crate) fn muted(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(Color::DarkGray))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::chat_mirror::MockChatMirror;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    /// Services backed by an empty in-memory mirror.
    pub fn services() -> (ModuleServices, mpsc::Receiver<AppEvent>) {
        let mut mirror = MockChatMirror::new();
        mirror.expect_load().returning(|| Ok(Vec::new()));
        mirror.expect_save().returning(|_| Ok(()));
        services_with(mirror)
    }

    pub fn services_with(mirror: MockChatMirror) -> (ModuleServices, mpsc::Receiver<AppEvent>) {
        let (events, receiver) = mpsc::channel(16);
        let (chat_bus, _) = broadcast::channel(16);
        let services = ModuleServices {
            events,
            chat_bus,
            mirror: Arc::new(mirror),
            reply_delay: Duration::from_millis(10),
            shutdown: CancellationToken::new(),
        };
        (services, receiver)
    }

    pub fn address() -> ViewAddress {
        ViewAddress {
            frame: FrameId::Frame1,
            instance: Uuid::new_v4(),
        }
    }

    pub fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Draw with `draw` on a test terminal and return the screen text.
    pub fn render_to_string(
        width: u16,
        height: u16,
        draw: impl FnOnce(&mut Frame, Rect),
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }
}

//! Code editor view
//!
//! A small snippet library. Fenced code blocks appearing in the chat are
//! collected through the chat bus.

use super::{
    ModuleServices, Notice, ViewContext, heading, muted, parse_position, split_command,
    target_hint,
};
use crate::chat_mirror::ChatMessage;
use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use regex::Regex;
use std::sync::LazyLock;
use tokio::sync::broadcast::{self, error::TryRecvError};
use uuid::Uuid;

static CODE_BLOCK: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"```([a-z]*)\n([\s\S]*?)```"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Snippet {
    fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            language: language.into(),
            content: content.into(),
            timestamp: Local::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EditBuffer {
    title: String,
    content: String,
}

/// Extract every fenced code block of `text`, in order of appearance.
pub fn extract_snippets(text: &str) -> Vec<Snippet> {
    let regex = match CODE_BLOCK.as_ref() {
        Ok(regex) => regex,
        Err(e) => {
            log::error!("Code block pattern failed to compile: {}", e);
            return Vec::new();
        }
    };
    regex
        .captures_iter(text)
        .map(|caps| {
            let language = match caps.get(1).map(|m| m.as_str()) {
                Some(lang) if !lang.is_empty() => lang,
                _ => "text",
            };
            let code = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            Snippet::new(format!("Snippet from Chat ({})", language), language, code)
        })
        .collect()
}

pub struct CodingModule {
    snippets: Vec<Snippet>,
    current: Option<Uuid>,
    editing: Option<EditBuffer>,
    feed: broadcast::Receiver<ChatMessage>,
}

impl CodingModule {
    pub fn new(services: &ModuleServices) -> Self {
        let mut module = Self {
            snippets: Vec::new(),
            current: None,
            editing: None,
            feed: services.chat_bus.subscribe(),
        };

        match services.mirror.load() {
            Ok(messages) => {
                if let Some(latest) = messages.last() {
                    if let Some(notice) = module.collect_from(latest) {
                        log::info!("{}", notice.msg);
                    }
                }
            }
            Err(e) => log::warn!("Could not scan chat mirror for code: {}", e),
        }
        module
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn current(&self) -> Option<&Snippet> {
        let id = self.current?;
        self.snippets.iter().find(|s| s.id == id)
    }

    #[cfg(test)]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Drain the chat bus, collecting code from every new message.
    pub fn poll_chat_feed(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        loop {
            match self.feed.try_recv() {
                Ok(message) => notices.extend(self.collect_from(&message)),
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("Code editor missed {} chat messages", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        notices
    }

    fn collect_from(&mut self, message: &ChatMessage) -> Option<Notice> {
        let found = extract_snippets(&message.content);
        if found.is_empty() {
            return None;
        }
        let count = found.len();
        self.snippets.splice(0..0, found);
        Some(Notice::info(format!(
            "Code Detected: {} code snippets found in chat",
            count
        )))
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match split_command(text) {
            Some(("new", _)) => Some(self.create_snippet()),
            Some(("edit", _)) => self.start_edit().map(|_| Notice::info("Editing snippet")),
            Some(("save", _)) => self.save(),
            Some(("delete", _)) => self.delete_current(),
            Some(("title", "")) => Some(Notice::warning("/title needs a name")),
            Some(("title", title)) => {
                let buffer = self.start_edit()?;
                buffer.title = title.to_string();
                None
            }
            Some(("select", arg)) => match parse_position(arg, self.snippets.len()) {
                Some(index) => {
                    self.current = Some(self.snippets[index].id);
                    self.editing = None;
                    None
                }
                None => Some(Notice::warning(format!("No snippet {}", arg))),
            },
            _ => {
                self.append_text(text);
                None
            }
        }
    }

    fn create_snippet(&mut self) -> Notice {
        let snippet = Snippet::new("New Snippet", "javascript", "");
        self.current = Some(snippet.id);
        self.editing = Some(EditBuffer {
            title: snippet.title.clone(),
            content: String::new(),
        });
        self.snippets.insert(0, snippet);
        Notice::success("New Snippet Created: start coding in the editor")
    }

    /// Start editing the current snippet unless already editing.
    fn start_edit(&mut self) -> Option<&mut EditBuffer> {
        if self.editing.is_none() {
            let snippet = self.current()?;
            self.editing = Some(EditBuffer {
                title: snippet.title.clone(),
                content: snippet.content.clone(),
            });
        }
        self.editing.as_mut()
    }

    fn save(&mut self) -> Option<Notice> {
        let id = self.current?;
        let buffer = self.editing.take()?;
        let snippet = self.snippets.iter_mut().find(|s| s.id == id)?;
        snippet.title = buffer.title;
        snippet.content = buffer.content;
        snippet.timestamp = Local::now();
        Some(Notice::success(format!(
            "Snippet Saved: \"{}\" has been saved",
            snippet.title
        )))
    }

    fn delete_current(&mut self) -> Option<Notice> {
        let id = self.current.take()?;
        self.snippets.retain(|s| s.id != id);
        self.editing = None;
        Some(Notice::success("Snippet Deleted"))
    }

    fn append_text(&mut self, text: &str) {
        match self.start_edit() {
            Some(buffer) => {
                if !buffer.content.is_empty() {
                    buffer.content.push('\n');
                }
                buffer.content.push_str(text);
            }
            None => {
                let snippet = Snippet::new("Console Input", "text", text);
                self.current = Some(snippet.id);
                self.snippets.insert(0, snippet);
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let [list_area, editor_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .areas(area);

        let mut list: Vec<Line> = vec![heading("Snippets")];
        if self.snippets.is_empty() {
            list.push(Line::from(muted("No snippets yet")));
        }
        for (i, snippet) in self.snippets.iter().enumerate() {
            let selected = Some(snippet.id) == self.current;
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            list.push(Line::from(vec![
                muted(format!("{}. ", i + 1)),
                Span::styled(snippet.title.clone(), style),
            ]));
        }
        f.render_widget(
            Paragraph::new(list).block(Block::default().borders(Borders::RIGHT)),
            list_area,
        );

        let mut editor: Vec<Line> = Vec::new();
        match (&self.editing, self.current()) {
            (Some(buffer), _) => {
                editor.push(heading(format!("{} (editing)", buffer.title)));
                editor.extend(buffer.content.lines().map(|l| Line::from(l.to_string())));
                editor.push(Line::from(muted("/save to keep changes")));
            }
            (None, Some(snippet)) => {
                editor.push(heading(snippet.title.clone()));
                editor.push(Line::from(muted(format!(
                    "{} · {}",
                    snippet.language,
                    snippet.timestamp.format("%H:%M:%S")
                ))));
                editor.extend(snippet.content.lines().map(|l| {
                    Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Green)))
                }));
            }
            (None, None) => {
                editor.push(Line::from(muted("Select a snippet or /new to start")));
            }
        }
        editor.push(target_hint(cx, "edit code"));
        f.render_widget(
            Paragraph::new(editor).wrap(Wrap { trim: false }),
            editor_area.inner(Margin::new(1, 0)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::chat_mirror::{MockChatMirror, Sender};

    #[test]
    fn test_extract_snippets_defaults_language_to_text() {
        let found = extract_snippets("look:\n```rust\nfn main() {}\n```\nand\n```\nplain\n```");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].language, "rust");
        assert_eq!(found[0].content, "fn main() {}");
        assert_eq!(found[0].title, "Snippet from Chat (rust)");
        assert_eq!(found[1].language, "text");
    }

    #[test]
    fn test_extract_snippets_without_code() {
        assert!(extract_snippets("no code here").is_empty());
    }

    #[test]
    fn test_scans_latest_mirrored_message_on_start() {
        let mut mirror = MockChatMirror::new();
        mirror.expect_load().returning(|| {
            Ok(vec![
                ChatMessage::new("```py\nold()\n```", Sender::User),
                ChatMessage::new("```sh\nls\n```", Sender::Assistant),
            ])
        });
        let (services, _rx) = services_with(mirror);

        let coding = CodingModule::new(&services);
        assert_eq!(coding.snippets().len(), 1);
        assert_eq!(coding.snippets()[0].language, "sh");
    }

    #[test]
    fn test_chat_bus_messages_are_collected() {
        let (services, _rx) = services();
        let mut coding = CodingModule::new(&services);

        services
            .chat_bus
            .send(ChatMessage::new("```js\nlet a = 1;\n```", Sender::User))
            .unwrap();
        services
            .chat_bus
            .send(ChatMessage::new("thanks", Sender::Assistant))
            .unwrap();

        let notices = coding.poll_chat_feed();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].msg.starts_with("Code Detected"));
        assert_eq!(coding.snippets()[0].content, "let a = 1;");
    }

    #[test]
    fn test_free_text_creates_console_input_snippet() {
        let (services, _rx) = services();
        let mut coding = CodingModule::new(&services);

        coding.process_command("echo hi");
        let current = coding.current().unwrap();
        assert_eq!(current.title, "Console Input");
        assert_eq!(current.content, "echo hi");
        assert!(!coding.is_editing());
    }

    #[test]
    fn test_edit_and_save_cycle() {
        let (services, _rx) = services();
        let mut coding = CodingModule::new(&services);

        let notice = coding.process_command("/new").unwrap();
        assert_eq!(notice.event_type, crate::events::EventType::Success);
        coding.process_command("const x = 1;");
        coding.process_command("const y = 2;");
        coding.process_command("/title Constants");
        let saved = coding.process_command("/save").unwrap();
        assert!(saved.msg.contains("Constants"));

        let current = coding.current().unwrap();
        assert_eq!(current.title, "Constants");
        assert_eq!(current.content, "const x = 1;\nconst y = 2;");
        assert!(!coding.is_editing());
    }

    #[test]
    fn test_text_after_save_reopens_editor() {
        let (services, _rx) = services();
        let mut coding = CodingModule::new(&services);
        coding.process_command("first");
        coding.process_command("second");
        assert!(coding.is_editing());
        coding.process_command("/save");
        assert_eq!(coding.current().unwrap().content, "first\nsecond");
    }

    #[test]
    fn test_select_and_delete() {
        let (services, _rx) = services();
        let mut coding = CodingModule::new(&services);
        coding.process_command("/new");
        coding.process_command("/new");
        assert_eq!(coding.snippets().len(), 2);

        assert!(coding.process_command("/select 2").is_none());
        let second = coding.snippets()[1].id;
        assert_eq!(coding.current().unwrap().id, second);

        coding.process_command("/delete");
        assert_eq!(coding.snippets().len(), 1);
        assert!(coding.current().is_none());
        assert!(coding.process_command("/select 9").is_some());
    }

    #[test]
    fn test_title_without_name_is_rejected() {
        let (services, _rx) = services();
        let mut coding = CodingModule::new(&services);
        coding.process_command("/new");

        let notice = coding.process_command("/title").unwrap();
        assert_eq!(notice.event_type, crate::events::EventType::Warning);
        coding.process_command("/save");
        let current = coding.current().unwrap();
        assert_eq!(current.title, "New Snippet");
        assert_eq!(current.content, "");
    }

    #[test]
    fn test_commands_without_selection_do_nothing() {
        let (services, _rx) = services();
        let mut coding = CodingModule::new(&services);
        assert!(coding.process_command("/save").is_none());
        assert!(coding.process_command("/delete").is_none());
        assert!(coding.process_command("/edit").is_none());
    }
}

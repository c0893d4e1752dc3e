//! Chat view
//!
//! Keeps the conversation log, mirrors it to the chat slot and publishes every
//! new message on the chat bus. Assistant replies are simulated by a deferred
//! task owned by the view.

use super::{ModuleServices, Notice, ViewAddress, ViewContext, muted, target_hint};
use crate::chat_mirror::{ChatMessage, Sender};
use crate::consts::cli_consts::CHAT_GREETING;
use crate::events::AppEvent;
use crate::scheduler::schedule_after;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio_util::sync::CancellationToken;

pub struct ChatModule {
    address: ViewAddress,
    services: ModuleServices,
    messages: Vec<ChatMessage>,
    /// Replies scheduled but not yet received.
    pending_replies: usize,
    /// Cancelled when the view goes away, taking every pending reply with it.
    token: CancellationToken,
}

impl ChatModule {
    pub fn new(address: ViewAddress, services: &ModuleServices) -> Self {
        let messages = match services.mirror.load() {
            Ok(messages) if !messages.is_empty() => messages,
            Ok(_) => vec![ChatMessage::new(CHAT_GREETING, Sender::Assistant)],
            Err(e) => {
                log::warn!("Could not read chat mirror, starting fresh: {}", e);
                vec![ChatMessage::new(CHAT_GREETING, Sender::Assistant)]
            }
        };
        Self {
            address,
            services: services.clone(),
            messages,
            pending_replies: 0,
            token: services.shutdown.child_token(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    /// Append the user's message and schedule the assistant reply.
    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.append(ChatMessage::new(text, Sender::User));

        let reply = ChatMessage::new(
            format!("I've processed your request: \"{}\"", text),
            Sender::Assistant,
        );
        let event = AppEvent::AssistantReply {
            frame: self.address.frame,
            instance: self.address.instance,
            message: reply,
        };
        schedule_after(
            self.services.reply_delay,
            event,
            self.services.events.clone(),
            self.token.clone(),
        );
        self.pending_replies += 1;
        None
    }

    pub fn receive_reply(&mut self, message: ChatMessage) {
        self.pending_replies = self.pending_replies.saturating_sub(1);
        self.append(message);
    }

    fn append(&mut self, message: ChatMessage) {
        self.messages.push(message.clone());
        if let Err(e) = self.services.mirror.save(&self.messages) {
            log::warn!("Could not write chat mirror: {}", e);
        }
        // Nobody listening is fine
        let _ = self.services.chat_bus.send(message);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let mut lines: Vec<Line> = Vec::new();
        for message in &self.messages {
            let (label, color, alignment) = match message.sender {
                Sender::User => ("You", Color::Yellow, Alignment::Right),
                Sender::Assistant => ("ART", Color::Cyan, Alignment::Left),
            };
            for (i, text) in message.content.lines().enumerate() {
                let mut spans = Vec::new();
                if i == 0 {
                    spans.push(Span::styled(
                        format!("{}: ", label),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ));
                }
                spans.push(Span::raw(text.to_string()));
                lines.push(Line::from(spans).alignment(alignment));
            }
            lines.push(
                Line::from(muted(message.timestamp.format("%H:%M:%S").to_string()))
                    .alignment(alignment),
            );
        }
        if self.is_typing() {
            lines.push(Line::from(muted("ART is typing ...")));
        }

        // Keep the newest messages and the hint line in view
        let room = area.height.saturating_sub(1) as usize;
        let skip = lines.len().saturating_sub(room);
        let mut visible: Vec<Line> = lines.into_iter().skip(skip).collect();
        visible.push(target_hint(cx, "send a message"));

        f.render_widget(Paragraph::new(visible), area);
    }
}

impl Drop for ChatModule {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::chat_mirror::MockChatMirror;
    use crate::error::MirrorError;
    use std::io;
    use std::time::Duration;

    #[tokio::test]
    async fn test_starts_with_greeting_when_mirror_is_empty() {
        let (services, _rx) = services();
        let chat = ChatModule::new(address(), &services);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].content, CHAT_GREETING);
    }

    #[tokio::test]
    async fn test_restores_previous_conversation() {
        let mut mirror = MockChatMirror::new();
        mirror.expect_load().returning(|| {
            Ok(vec![
                ChatMessage::new("hi", Sender::User),
                ChatMessage::new("hello", Sender::Assistant),
            ])
        });
        let (services, _rx) = services_with(mirror);

        let chat = ChatModule::new(address(), &services);
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[0].content, "hi");
    }

    #[tokio::test]
    async fn test_corrupt_mirror_falls_back_to_greeting() {
        let mut mirror = MockChatMirror::new();
        mirror
            .expect_load()
            .returning(|| Err(MirrorError::Io(io::Error::other("unreadable"))));
        let (services, _rx) = services_with(mirror);

        let chat = ChatModule::new(address(), &services);
        assert_eq!(chat.messages()[0].content, CHAT_GREETING);
    }

    #[tokio::test]
    async fn test_message_is_saved_published_and_answered() {
        let mut mirror = MockChatMirror::new();
        mirror.expect_load().returning(|| Ok(Vec::new()));
        mirror
            .expect_save()
            .withf(|messages| messages.last().is_some_and(|m| m.sender == Sender::User))
            .times(1)
            .returning(|_| Ok(()));
        let (services, mut rx) = services_with(mirror);
        let mut bus = services.chat_bus.subscribe();
        let address = address();

        let mut chat = ChatModule::new(address, &services);
        assert!(chat.process_command("book a table").is_none());
        assert!(chat.is_typing());
        assert_eq!(bus.try_recv().unwrap().content, "book a table");

        match rx.recv().await {
            Some(AppEvent::AssistantReply {
                frame,
                instance,
                message,
            }) => {
                assert_eq!(frame, address.frame);
                assert_eq!(instance, address.instance);
                assert_eq!(
                    message.content,
                    "I've processed your request: \"book a table\""
                );
            }
            other => panic!("expected a reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reply_clears_typing_indicator() {
        let (services, _rx) = services();
        let mut chat = ChatModule::new(address(), &services);
        chat.process_command("hello");
        chat.receive_reply(ChatMessage::new("done", Sender::Assistant));
        assert!(!chat.is_typing());
        assert_eq!(chat.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_every_message_gets_its_own_reply() {
        let (services, mut rx) = services();
        let mut chat = ChatModule::new(address(), &services);
        chat.process_command("first");
        chat.process_command("second");

        let mut replies = Vec::new();
        for _ in 0..2 {
            match rx.recv().await {
                Some(AppEvent::AssistantReply { message, .. }) => {
                    replies.push(message.content.clone());
                    chat.receive_reply(message);
                }
                other => panic!("expected a reply, got {:?}", other),
            }
            if replies.len() == 1 {
                // One reply still outstanding
                assert!(chat.is_typing());
            }
        }
        // Both timers share a deadline, so delivery order is not fixed
        replies.sort();
        assert_eq!(
            replies,
            vec![
                "I've processed your request: \"first\"",
                "I've processed your request: \"second\"",
            ]
        );
        assert!(!chat.is_typing());
        assert_eq!(chat.messages().len(), 5);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let (services, _rx) = services();
        let mut chat = ChatModule::new(address(), &services);
        chat.process_command("   ");
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_typing());
    }

    #[tokio::test]
    async fn test_dropping_view_cancels_pending_reply() {
        let (mut services, mut rx) = services();
        services.reply_delay = Duration::from_millis(50);
        let mut chat = ChatModule::new(address(), &services);
        chat.process_command("hello");
        drop(chat);
        drop(services);

        // Channel closes without the reply ever arriving
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_render_shows_typing_and_hint() {
        let (services, _rx) = services();
        let mut chat = ChatModule::new(address(), &services);
        chat.process_command("hello");

        let cx = ViewContext {
            frame: address().frame,
            is_targeted: false,
        };
        let screen = render_to_string(60, 10, |f, area| chat.render(f, area, &cx));
        assert!(screen.contains("ART is typing"));
        assert!(screen.contains("Click or Tab to frame1"));
    }
}

//! Email view
//!
//! A static mailbox with folder selection and search.

use super::{Notice, ViewContext, muted, parse_position, split_command, target_hint};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::str::FromStr;
use strum::{Display, EnumString};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Folder {
    #[default]
    Inbox,
    Sent,
    Drafts,
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub subject: &'static str,
    pub sender: &'static str,
    pub preview: &'static str,
    pub date: &'static str,
    pub read: bool,
    pub folder: Folder,
}

impl Email {
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [self.subject, self.sender, self.preview]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

const MAILBOX: [Email; 5] = [
    Email {
        subject: "Meeting Tomorrow",
        sender: "John Doe <john@example.com>",
        preview: "Hello, I wanted to confirm our meeting tomorrow at 2pm...",
        date: "10:30 AM",
        read: false,
        folder: Folder::Inbox,
    },
    Email {
        subject: "Project Update",
        sender: "Sarah Smith <sarah@example.com>",
        preview: "I've finished the first phase of the project and wanted to share...",
        date: "Yesterday",
        read: true,
        folder: Folder::Inbox,
    },
    Email {
        subject: "Invoice #1234",
        sender: "Billing <billing@example.com>",
        preview: "Your invoice for November services is attached...",
        date: "Nov 28",
        read: true,
        folder: Folder::Inbox,
    },
    Email {
        subject: "Re: Question about API",
        sender: "Tech Support <support@example.com>",
        preview: "To answer your question about the API limits...",
        date: "Nov 26",
        read: true,
        folder: Folder::Inbox,
    },
    Email {
        subject: "Draft: Project Proposal",
        sender: "Me",
        preview: "Here is my proposal for the new project...",
        date: "2:45 PM",
        read: true,
        folder: Folder::Drafts,
    },
];

pub struct EmailModule {
    emails: Vec<Email>,
    folder: Folder,
    query: String,
}

impl EmailModule {
    pub fn new() -> Self {
        Self {
            emails: MAILBOX.to_vec(),
            folder: Folder::Inbox,
            query: String::new(),
        }
    }

    pub fn folder(&self) -> Folder {
        self.folder
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Indices of emails in the active folder that match the search.
    fn filtered_indices(&self) -> Vec<usize> {
        self.emails
            .iter()
            .enumerate()
            .filter(|(_, e)| e.folder == self.folder && e.matches(&self.query))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn filtered(&self) -> Vec<&Email> {
        self.filtered_indices()
            .into_iter()
            .map(|i| &self.emails[i])
            .collect()
    }

    pub fn unread(&self) -> usize {
        self.emails
            .iter()
            .filter(|e| e.folder == Folder::Inbox && !e.read)
            .count()
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match split_command(text) {
            Some(("folder", arg)) => match Folder::from_str(arg) {
                Ok(folder) => {
                    self.folder = folder;
                    None
                }
                Err(_) => Some(Notice::warning(format!(
                    "Unknown folder '{}', use inbox, sent, drafts or trash",
                    arg
                ))),
            },
            Some(("search", query)) => {
                self.query = query.to_string();
                None
            }
            Some(("read", arg)) => {
                let indices = self.filtered_indices();
                let position = parse_position(arg, indices.len())?;
                let email = &mut self.emails[indices[position]];
                email.read = true;
                Some(Notice::info(format!("Opened \"{}\"", email.subject)))
            }
            Some((name, _)) => Some(Notice::warning(format!("Unknown email command /{}", name))),
            None => {
                self.query = text.to_string();
                None
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let mut header = vec![
            Span::styled(
                format!("{}", self.folder).to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            muted(format!("  {} unread", self.unread())),
        ];
        if !self.query.is_empty() {
            header.push(muted(format!("  search: {}", self.query)));
        }
        let mut lines = vec![Line::from(header)];

        let emails = self.filtered();
        if emails.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(muted("No emails found")).alignment(Alignment::Center));
        }
        for (n, email) in emails.iter().enumerate() {
            let marker = if email.read { "  " } else { "● " };
            let subject_style = if email.read {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                muted(format!("{}. ", n + 1)),
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(email.subject, subject_style),
                muted(format!("  {}", email.date)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("     "),
                Span::styled(email.sender, Style::default().fg(Color::Gray)),
            ]));
            lines.push(Line::from(vec![Span::raw("     "), muted(email.preview)]));
        }
        lines.push(target_hint(cx, "search mail"));

        f.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render_to_string;
    use super::*;
    use crate::layout::FrameId;

    #[test]
    fn test_inbox_shows_four_messages() {
        let email = EmailModule::new();
        assert_eq!(email.filtered().len(), 4);
        assert_eq!(email.unread(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let mut email = EmailModule::new();
        email.process_command("/search BILLING");
        assert_eq!(email.filtered().len(), 1);
        assert_eq!(email.filtered()[0].subject, "Invoice #1234");

        email.process_command("api limits");
        assert_eq!(email.filtered()[0].subject, "Re: Question about API");

        email.process_command("/search");
        assert_eq!(email.query(), "");
        assert_eq!(email.filtered().len(), 4);
    }

    #[test]
    fn test_folder_switch() {
        let mut email = EmailModule::new();
        email.process_command("/folder drafts");
        assert_eq!(email.folder(), Folder::Drafts);
        assert_eq!(email.filtered().len(), 1);

        email.process_command("/folder trash");
        assert!(email.filtered().is_empty());
        assert!(email.process_command("/folder spam").is_some());
        assert_eq!(email.folder(), Folder::Trash);
    }

    #[test]
    fn test_read_marks_message() {
        let mut email = EmailModule::new();
        let notice = email.process_command("/read 1").unwrap();
        assert!(notice.msg.contains("Meeting Tomorrow"));
        assert_eq!(email.unread(), 0);
        assert!(email.process_command("/read 10").is_none());
    }

    #[test]
    fn test_empty_folder_renders_placeholder() {
        let mut email = EmailModule::new();
        email.process_command("/folder sent");
        let cx = ViewContext {
            frame: FrameId::Frame3,
            is_targeted: true,
        };
        let screen = render_to_string(50, 8, |f, area| email.render(f, area, &cx));
        assert!(screen.contains("No emails found"));
    }
}

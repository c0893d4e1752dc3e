//! To-do list view

use super::{Notice, ViewContext, muted, parse_position, split_command, target_hint};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::str::FromStr;
use strum::{Display, EnumString};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    fn color(self) -> Color {
        match self {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub due: Option<&'static str>,
}

impl Task {
    fn seeded(text: &str, completed: bool, priority: Priority, due: Option<&'static str>) -> Self {
        Self {
            text: text.to_string(),
            completed,
            priority,
            due,
        }
    }
}

pub struct TodoModule {
    tasks: Vec<Task>,
    filter: TodoFilter,
}

impl TodoModule {
    pub fn new() -> Self {
        Self {
            tasks: vec![
                Task::seeded("Prepare presentation for meeting", false, Priority::High, Some("Today")),
                Task::seeded("Reply to emails", false, Priority::Medium, Some("Today")),
                Task::seeded(
                    "Book train tickets for Brussels meeting",
                    false,
                    Priority::High,
                    Some("Tomorrow"),
                ),
                Task::seeded("Call the client", true, Priority::Medium, None),
                Task::seeded("Review project requirements", true, Priority::Low, None),
            ],
            filter: TodoFilter::All,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    /// Tasks passing the active filter, with their positions in the full list.
    pub fn visible(&self) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| match self.filter {
                TodoFilter::All => true,
                TodoFilter::Active => !task.completed,
                TodoFilter::Completed => task.completed,
            })
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match split_command(text) {
            Some(("add", task)) if !task.is_empty() => {
                self.add(task);
                None
            }
            Some(("done", arg)) => match self.position(arg) {
                Some(index) => {
                    let task = &mut self.tasks[index];
                    task.completed = !task.completed;
                    None
                }
                None => Some(no_task(arg)),
            },
            Some(("del", arg)) => match self.position(arg) {
                Some(index) => {
                    let task = self.tasks.remove(index);
                    Some(Notice::info(format!("Deleted \"{}\"", task.text)))
                }
                None => Some(no_task(arg)),
            },
            Some(("filter", arg)) => match TodoFilter::from_str(arg) {
                Ok(filter) => {
                    self.filter = filter;
                    None
                }
                Err(_) => Some(Notice::warning(format!(
                    "Unknown filter '{}', use all, active or completed",
                    arg
                ))),
            },
            Some((name, _)) => Some(Notice::warning(format!("Unknown todo command /{}", name))),
            None => {
                self.add(text);
                None
            }
        }
    }

    fn add(&mut self, text: &str) {
        self.tasks.insert(
            0,
            Task {
                text: text.to_string(),
                completed: false,
                priority: Priority::Medium,
                due: None,
            },
        );
    }

    /// Resolve a one-based position in the visible list.
    fn position(&self, arg: &str) -> Option<usize> {
        let visible = self.visible();
        parse_position(arg, visible.len()).map(|i| visible[i].0)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{} remaining", self.remaining()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            muted(format!("  filter: {}", self.filter)),
        ])];

        let visible = self.visible();
        if visible.is_empty() {
            lines.push(Line::from(muted("Nothing to show")));
        }
        for (n, (_, task)) in visible.iter().enumerate() {
            let (check, text_style) = if task.completed {
                (
                    "[x]",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ]", Style::default())
            };
            let mut spans = vec![
                muted(format!("{:>2}. ", n + 1)),
                Span::raw(format!("{} ", check)),
                Span::styled(task.text.clone(), text_style),
                Span::styled(
                    format!("  {}", task.priority),
                    Style::default().fg(task.priority.color()),
                ),
            ];
            if let Some(due) = task.due {
                spans.push(muted(format!("  {}", due)));
            }
            lines.push(Line::from(spans));
        }
        lines.push(target_hint(cx, "add a task"));

        f.render_widget(Paragraph::new(lines), area);
    }
}

fn no_task(arg: &str) -> Notice {
    Notice::warning(format!("No task {}", arg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;

    #[test]
    fn test_seeded_tasks() {
        let todo = TodoModule::new();
        assert_eq!(todo.tasks().len(), 5);
        assert_eq!(todo.remaining(), 3);
    }

    #[test]
    fn test_free_text_and_add_prepend_medium_task() {
        let mut todo = TodoModule::new();
        todo.process_command("Water the plants");
        todo.process_command("/add Pay rent");
        assert_eq!(todo.tasks()[0].text, "Pay rent");
        assert_eq!(todo.tasks()[1].text, "Water the plants");
        assert_eq!(todo.tasks()[0].priority, Priority::Medium);
        assert!(!todo.tasks()[0].completed);
    }

    #[test]
    fn test_done_toggles_and_del_removes() {
        let mut todo = TodoModule::new();
        todo.process_command("/done 1");
        assert!(todo.tasks()[0].completed);
        todo.process_command("/done 1");
        assert!(!todo.tasks()[0].completed);

        let notice = todo.process_command("/del 2").unwrap();
        assert!(notice.msg.contains("Reply to emails"));
        assert_eq!(todo.tasks().len(), 4);
    }

    #[test]
    fn test_positions_follow_the_filter() {
        let mut todo = TodoModule::new();
        todo.process_command("/filter completed");
        assert_eq!(todo.filter(), TodoFilter::Completed);
        assert_eq!(todo.visible().len(), 2);

        // First completed task is "Call the client"
        todo.process_command("/done 1");
        assert!(!todo.tasks()[3].completed);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut todo = TodoModule::new();
        let notice = todo.process_command("/done 42").unwrap();
        assert_eq!(notice.event_type, EventType::Warning);
        assert_eq!(notice.msg, "No task 42");
        let notice = todo.process_command("/del 9").unwrap();
        assert_eq!(notice.event_type, EventType::Warning);
        assert!(todo.process_command("/done").is_some());
        assert!(todo.process_command("/filter someday").is_some());
        assert!(todo.process_command("/frobnicate").is_some());
        assert_eq!(todo.tasks().len(), 5);
    }
}

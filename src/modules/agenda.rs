//! Agenda view
//!
//! Month calendar with the selected day's events and what's coming up.

use super::{Notice, ViewContext, heading, muted, split_command, target_hint};
use chrono::{Datelike, Days, Local, Months, NaiveDate};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const MAX_UPCOMING: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEvent {
    pub title: &'static str,
    pub date: NaiveDate,
    pub start: &'static str,
    pub end: &'static str,
    pub location: &'static str,
}

pub struct AgendaModule {
    today: NaiveDate,
    selected: NaiveDate,
    events: Vec<AgendaEvent>,
}

impl AgendaModule {
    pub fn new() -> Self {
        Self::starting_on(Local::now().date_naive())
    }

    /// Agenda whose seeded events are placed relative to `today`.
    pub fn starting_on(today: NaiveDate) -> Self {
        let in_days = |n| today.checked_add_days(Days::new(n)).unwrap_or(today);
        let events = vec![
            AgendaEvent {
                title: "Team Meeting",
                date: today,
                start: "10:00",
                end: "11:00",
                location: "Conference Room A",
            },
            AgendaEvent {
                title: "Lunch with Client",
                date: today,
                start: "12:30",
                end: "13:30",
                location: "Italian Restaurant",
            },
            AgendaEvent {
                title: "Doctor Appointment",
                date: in_days(1),
                start: "15:00",
                end: "16:00",
                location: "Medical Center",
            },
            AgendaEvent {
                title: "Meeting in Brussels",
                date: in_days(2),
                start: "16:00",
                end: "17:30",
                location: "Brussels Central Office",
            },
        ];
        Self {
            today,
            selected: today,
            events,
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Events on the selected day, by start time.
    pub fn day_events(&self) -> Vec<&AgendaEvent> {
        let mut events: Vec<_> = self
            .events
            .iter()
            .filter(|e| e.date == self.selected)
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }

    /// Events after today, soonest first.
    pub fn upcoming(&self) -> Vec<&AgendaEvent> {
        let mut events: Vec<_> = self.events.iter().filter(|e| e.date > self.today).collect();
        events.sort_by_key(|e| (e.date, e.start));
        events.truncate(MAX_UPCOMING);
        events
    }

    fn has_events(&self, date: NaiveDate) -> bool {
        self.events.iter().any(|e| e.date == date)
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        match split_command(text) {
            Some(("next", _)) => {
                self.selected = self
                    .selected
                    .checked_add_months(Months::new(1))
                    .unwrap_or(self.selected);
                None
            }
            Some(("prev", _)) => {
                self.selected = self
                    .selected
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(self.selected);
                None
            }
            Some(("today", _)) => {
                self.selected = self.today;
                None
            }
            Some(("day", arg)) => {
                let day = arg.parse::<u32>().ok();
                match day.and_then(|d| self.selected.with_day(d)) {
                    Some(date) => {
                        self.selected = date;
                        None
                    }
                    None => Some(Notice::warning(format!(
                        "{} has no day '{}'",
                        self.selected.format("%B %Y"),
                        arg
                    ))),
                }
            }
            Some((name, _)) => Some(Notice::warning(format!("Unknown agenda command /{}", name))),
            None if text.trim().is_empty() => None,
            None => Some(Notice::info(
                "Use /next, /prev, /today or /day <n> to navigate the agenda",
            )),
        }
    }

    fn month_grid(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            heading(self.selected.format("%B %Y").to_string()),
            Line::from(muted(WEEKDAYS.join(" "))),
        ];
        let Some(first) = self.selected.with_day(1) else {
            return lines;
        };
        let offset = first.weekday().num_days_from_sunday() as usize;
        let mut cells: Vec<Vec<Span<'static>>> = vec![vec![Span::raw("   ")]; offset];
        let mut date = first;
        while date.month() == first.month() {
            let mut style = Style::default();
            if date == self.today {
                style = style.fg(Color::Black).bg(Color::Cyan);
            } else if self.has_events(date) {
                style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
            }
            if date == self.selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            cells.push(vec![
                Span::styled(format!("{:>2}", date.day()), style),
                Span::raw(" "),
            ]);
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        for week in cells.chunks(7) {
            lines.push(Line::from(week.concat()));
        }
        lines
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let [calendar_area, events_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(0)])
            .areas(area);

        f.render_widget(Paragraph::new(self.month_grid()), calendar_area);

        let mut lines = vec![heading(self.selected.format("%A %-d %B").to_string())];
        let day_events = self.day_events();
        if day_events.is_empty() {
            lines.push(Line::from(muted("No events scheduled")));
        }
        for event in day_events {
            lines.push(event_line(event, false));
            lines.push(Line::from(vec![Span::raw("  "), muted(event.location)]));
        }
        lines.push(Line::from(""));
        lines.push(heading("Upcoming"));
        for event in self.upcoming() {
            lines.push(event_line(event, true));
        }
        lines.push(target_hint(cx, "navigate"));

        f.render_widget(Paragraph::new(lines), events_area);
    }
}

fn event_line(event: &AgendaEvent, with_date: bool) -> Line<'static> {
    let mut spans = Vec::new();
    if with_date {
        spans.push(muted(format!("{} ", event.date.format("%a %d"))));
    }
    spans.push(Span::styled(
        format!("{}-{} ", event.start, event.end),
        Style::default().fg(Color::Yellow),
    ));
    spans.push(Span::raw(event.title));
    Line::from(spans)
}

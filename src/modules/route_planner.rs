//! Route planner view
//!
//! Routes are canned; changing origin, destination or mode regenerates them.

use super::{Notice, ViewContext, heading, muted, split_command, target_hint};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::str::FromStr;
use strum::{Display, EnumString};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TravelMode {
    Car,
    #[default]
    Train,
    Bus,
    #[strum(disabled)]
    Walk,
}

impl TravelMode {
    fn icon(self) -> &'static str {
        match self {
            TravelMode::Car => "🚗",
            TravelMode::Train => "🚆",
            TravelMode::Bus => "🚌",
            TravelMode::Walk => "🚶",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStep {
    pub instruction: &'static str,
    pub distance: &'static str,
    pub duration: &'static str,
    pub mode: TravelMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub duration: &'static str,
    pub distance: &'static str,
    pub mode: TravelMode,
    pub departure: &'static str,
    pub arrival: &'static str,
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub event: &'static str,
    pub location: &'static str,
    pub when: &'static str,
}

const fn step(
    instruction: &'static str,
    distance: &'static str,
    duration: &'static str,
    mode: TravelMode,
) -> RouteStep {
    RouteStep {
        instruction,
        distance,
        duration,
        mode,
    }
}

pub struct RoutePlannerModule {
    origin: String,
    destination: String,
    mode: TravelMode,
    routes: Vec<Route>,
    trips: Vec<Trip>,
}

impl RoutePlannerModule {
    pub fn new() -> Self {
        let mut planner = Self {
            origin: "Leuven".to_string(),
            destination: "Brussels".to_string(),
            mode: TravelMode::Train,
            routes: Vec::new(),
            trips: vec![Trip {
                event: "Meeting in Brussels",
                location: "Brussels Central Office",
                when: "Tomorrow, 16:00",
            }],
        };
        planner.plan();
        planner
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    fn plan(&mut self) {
        if self.origin.is_empty() || self.destination.is_empty() {
            self.routes.clear();
            return;
        }
        let walk_out = step("Walk to Leuven Station", "0.5 km", "7 mins", TravelMode::Walk);
        let walk_in = step(
            "Walk to Brussels Central Office",
            "0.5 km",
            "8 mins",
            TravelMode::Walk,
        );
        let route = |duration, departure, arrival, mode, steps| Route {
            from: self.origin.clone(),
            to: self.destination.clone(),
            duration,
            distance: "30 km",
            mode,
            departure,
            arrival,
            steps,
        };

        let first = match self.mode {
            TravelMode::Car => route(
                "40 mins",
                "15:20",
                "16:00",
                TravelMode::Car,
                vec![
                    step("Head north on N19", "5 km", "8 mins", TravelMode::Car),
                    step("Take E314 towards Brussels", "20 km", "22 mins", TravelMode::Car),
                    step("Take exit 1B and follow R21", "5 km", "10 mins", TravelMode::Car),
                ],
            ),
            TravelMode::Bus => route(
                "65 mins",
                "14:55",
                "16:00",
                TravelMode::Bus,
                vec![
                    step("Walk to Leuven Bus Station", "0.3 km", "5 mins", TravelMode::Walk),
                    step(
                        "Take Bus 358 from Leuven to Brussels North",
                        "28 km",
                        "45 mins",
                        TravelMode::Bus,
                    ),
                    step("Take Metro 3 to Central Station", "1.5 km", "5 mins", TravelMode::Train),
                    walk_in.clone(),
                ],
            ),
            TravelMode::Train | TravelMode::Walk => route(
                "45 mins",
                "15:15",
                "16:00",
                TravelMode::Train,
                vec![
                    walk_out.clone(),
                    step(
                        "Take train IC 512 from Leuven to Brussels Central",
                        "29 km",
                        "25 mins",
                        TravelMode::Train,
                    ),
                    walk_in.clone(),
                ],
            ),
        };
        let second = route(
            "55 mins",
            "15:25",
            "16:20",
            TravelMode::Train,
            vec![
                walk_out,
                step(
                    "Take train IC 514 from Leuven to Brussels Central",
                    "29 km",
                    "30 mins",
                    TravelMode::Train,
                ),
                walk_in,
            ],
        );
        self.routes = vec![first, second];
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        match split_command(text) {
            Some(("from", place)) => {
                self.origin = place.to_string();
                self.plan();
                None
            }
            Some(("to", place)) => {
                self.destination = place.to_string();
                self.plan();
                None
            }
            Some(("mode", arg)) => match TravelMode::from_str(arg) {
                Ok(mode) => {
                    self.mode = mode;
                    self.plan();
                    None
                }
                Err(_) => Some(Notice::warning(format!(
                    "Unknown travel mode '{}', use car, train or bus",
                    arg
                ))),
            },
            Some(("plan", _)) => {
                let trip = self.trips.first()?;
                self.destination = trip.location.to_string();
                self.plan();
                Some(Notice::info(format!("Planning route to {}", self.destination)))
            }
            Some((name, _)) => Some(Notice::warning(format!("Unknown route command /{}", name))),
            None if text.trim().is_empty() => None,
            None => {
                self.destination = text.trim().to_string();
                self.plan();
                None
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{} → {}", self.origin, self.destination),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            muted(format!("  by {}", self.mode)),
        ])];

        if !self.trips.is_empty() {
            lines.push(heading("Upcoming Trips"));
            for trip in &self.trips {
                lines.push(Line::from(vec![
                    Span::raw(trip.event),
                    muted(format!("  {}  {}", trip.location, trip.when)),
                ]));
            }
        }

        lines.push(heading("Available Routes"));
        if self.routes.is_empty() {
            lines.push(Line::from(muted("Enter origin and destination to see routes")));
        }
        for route in &self.routes {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", route.mode.icon())),
                Span::styled(
                    format!("{} - {}", route.departure, route.arrival),
                    Style::default().fg(Color::Yellow),
                ),
                muted(format!("  {} · {}", route.duration, route.distance)),
            ]));
            for step in &route.steps {
                lines.push(Line::from(vec![
                    Span::raw(format!("   {} ", step.mode.icon())),
                    Span::raw(step.instruction),
                    muted(format!("  {} · {}", step.distance, step.duration)),
                ]));
            }
        }
        lines.push(target_hint(cx, "plan a route"));

        f.render_widget(Paragraph::new(lines), area);
    }
}

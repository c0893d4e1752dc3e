//! Statistics view: live CPU and memory figures for this process, plus
//! counters reported by the dashboard on every clock tick.

use super::{Notice, ViewContext, muted, split_command, target_hint};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};
use std::time::Duration;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Process resource usage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemMetrics {
    /// CPU usage percentage (0.0 to 100.0 per core).
    pub cpu_percent: f32,
    /// Current process RAM usage in bytes.
    pub ram_bytes: u64,
    /// Peak process RAM usage in bytes since the view was opened.
    pub peak_ram_bytes: u64,
    /// Total system RAM in bytes.
    pub total_ram_bytes: u64,
}

impl SystemMetrics {
    /// Sample the current process, keeping the peak from `previous`.
    pub fn sample(sysinfo: &mut System, previous: &SystemMetrics) -> Self {
        let pid = Pid::from(std::process::id() as usize);
        sysinfo.refresh_memory();
        sysinfo.refresh_cpu_usage();
        sysinfo.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        let (cpu_percent, ram_bytes) = sysinfo
            .process(pid)
            .map(|p| (p.cpu_usage(), p.memory()))
            .unwrap_or_default();

        Self {
            cpu_percent,
            ram_bytes,
            peak_ram_bytes: previous.peak_ram_bytes.max(ram_bytes),
            total_ram_bytes: sysinfo.total_memory(),
        }
    }

    /// RAM usage as a ratio (0.0 to 1.0).
    pub fn ram_ratio(&self) -> f64 {
        ratio(self.ram_bytes, self.total_ram_bytes)
    }

    pub fn peak_ram_ratio(&self) -> f64 {
        ratio(self.peak_ram_bytes, self.total_ram_bytes)
    }

    pub fn cpu_color(&self) -> Color {
        level_color(f64::from(self.cpu_percent) / 100.0)
    }

    pub fn ram_color(&self) -> Color {
        level_color(self.ram_ratio())
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64).clamp(0.0, 1.0)
    }
}

fn level_color(ratio: f64) -> Color {
    if ratio >= 0.8 {
        Color::Red
    } else if ratio >= 0.6 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Human-readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else {
        format!("{:.1} MB", mb)
    }
}

fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Dashboard activity since start.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DashboardCounters {
    pub uptime: Duration,
    pub commands_routed: u64,
    pub module_changes: u64,
}

pub struct StatsModule {
    sysinfo: System,
    metrics: SystemMetrics,
    counters: DashboardCounters,
    samples: u64,
}

impl StatsModule {
    pub fn new() -> Self {
        let mut module = Self {
            sysinfo: System::new(),
            metrics: SystemMetrics::default(),
            counters: DashboardCounters::default(),
            samples: 0,
        };
        module.refresh();
        module
    }

    pub fn metrics(&self) -> &SystemMetrics {
        &self.metrics
    }

    pub fn counters(&self) -> DashboardCounters {
        self.counters
    }

    pub fn set_counters(&mut self, counters: DashboardCounters) {
        self.counters = counters;
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn refresh(&mut self) {
        self.metrics = SystemMetrics::sample(&mut self.sysinfo, &self.metrics);
        self.samples += 1;
    }

    pub fn process_command(&mut self, text: &str) -> Option<Notice> {
        match split_command(text) {
            Some(("refresh", _)) => {
                self.refresh();
                Some(Notice::info(format!(
                    "CPU {:.1}%, RAM {}",
                    self.metrics.cpu_percent,
                    format_bytes(self.metrics.ram_bytes)
                )))
            }
            _ if text.trim().is_empty() => None,
            _ => Some(Notice::info(
                "Statistics refresh every second, /refresh samples now",
            )),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cx: &ViewContext) {
        let [summary_area, cpu_area, ram_area, peak_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .areas(area);

        let summary = vec![
            Line::from(muted(
                "Monitor system statistics and analytics for your ART ecosystem.",
            )),
            Line::from(muted(counters_line(&self.counters, self.samples))),
            target_hint(cx, "refresh"),
        ];
        f.render_widget(Paragraph::new(summary), summary_area);

        let m = &self.metrics;
        f.render_widget(
            gauge("CPU Usage", m.cpu_color(), f64::from(m.cpu_percent) / 100.0)
                .label(format!("{:.1}%", m.cpu_percent)),
            cpu_area,
        );
        f.render_widget(
            gauge("RAM Usage", m.ram_color(), m.ram_ratio()).label(format!(
                "{} / {}",
                format_bytes(m.ram_bytes),
                format_bytes(m.total_ram_bytes)
            )),
            ram_area,
        );
        if peak_area.height >= 3 {
            f.render_widget(
                gauge("Peak RAM", Color::Magenta, m.peak_ram_ratio())
                    .label(format_bytes(m.peak_ram_bytes)),
                Rect {
                    height: 3,
                    ..peak_area
                },
            );
        }
    }
}

fn counters_line(counters: &DashboardCounters, samples: u64) -> String {
    format!(
        "Up {}  ·  {} commands  ·  {} module changes  ·  {} samples",
        format_uptime(counters.uptime),
        counters.commands_routed,
        counters.module_changes,
        samples
    )
}

fn gauge(title: &'static str, color: Color, ratio: f64) -> Gauge<'static> {
    Gauge::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        )
        .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .ratio(ratio.clamp(0.0, 1.0))
}

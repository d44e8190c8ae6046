//! Header status bar: system label, active feeds, disk usage, alerts

use cctv_types::{CameraTable, FeedRatio, StatusSettings};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Always "ONLINE"; there is no health check behind it
pub const SYSTEM_LABEL: &str = "ONLINE";

pub const DISK_BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBarView {
    pub system: &'static str,
    pub active_feeds: FeedRatio,
    pub disk_usage_percent: u8,
    pub alert_count: u32,
}

impl StatusBarView {
    pub fn from_settings(cameras: &CameraTable, status: &StatusSettings) -> Self {
        Self {
            system: SYSTEM_LABEL,
            active_feeds: cameras.feed_ratio(),
            disk_usage_percent: status.disk_usage_percent.min(100),
            alert_count: status.alert_count,
        }
    }
}

/// Text bar of `width` cells, filled in proportion to `percent` (rounded)
pub fn disk_bar(percent: u8, width: usize) -> String {
    let percent = usize::from(percent.min(100));
    let filled = ((percent * width + 50) / 100).min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

pub fn render_status_bar(frame: &mut Frame<'_>, area: Rect, view: &StatusBarView) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::styled("SYSTEM ", label),
            Span::styled(
                view.system,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ACTIVE FEEDS ", label),
            Span::styled(view.active_feeds.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("DISK USAGE ", label),
            Span::styled(
                disk_bar(view.disk_usage_percent, DISK_BAR_WIDTH),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(format!(" {}%", view.disk_usage_percent), value),
            Span::styled("   ALERTS ", label),
            Span::styled(
                view.alert_count.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

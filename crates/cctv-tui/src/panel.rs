//! Camera panel
//!
//! [`PanelView::build`] turns a camera record plus its transient state into a
//! view model; [`render_panel`] paints it. The view model is where every
//! decision lives (template, REC indicator, dot placement), so it can be
//! checked without a terminal.

use std::time::Duration;

use cctv_clock::overlay_time;
use cctv_types::{CameraRecord, CameraStatus};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Per-position delay before a panel shows its feed
pub const ENTRY_DELAY_STEP: Duration = Duration::from_millis(100);

pub const DOT_COUNT: usize = 3;

/// Pulse phase offset between consecutive motion dots
pub const DOT_PULSE_STEP: Duration = Duration::from_millis(500);

const DOT_PULSE_PERIOD: Duration = Duration::from_millis(1500);
const NOISE_GLYPHS: [&str; 4] = [" ", "░", "▒", "▓"];

/// Decorative motion marker, positioned in percent of the feed area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionDot {
    /// In `[20, 80)`
    pub left_percent: f64,
    /// In `[30, 70)`
    pub top_percent: f64,
    pub pulse_offset: Duration,
}

/// Scatter the motion dots. Called on every render; positions are not kept.
pub fn scatter_dots<R: Rng + ?Sized>(rng: &mut R) -> [MotionDot; DOT_COUNT] {
    std::array::from_fn(|i| MotionDot {
        left_percent: rng.gen_range(20.0..80.0),
        top_percent: rng.gen_range(30.0..70.0),
        pulse_offset: DOT_PULSE_STEP * i as u32,
    })
}

/// Status-driven feed visual
#[derive(Debug, Clone, PartialEq)]
pub enum PanelTemplate {
    Scene {
        night_vision: bool,
        dots: [MotionDot; DOT_COUNT],
    },
    SignalLost {
        noise_seed: u64,
    },
    Offline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub camera_id: String,
    pub location: String,
    pub time_label: String,
    /// REC indicator lit
    pub recording: bool,
    pub glitching: bool,
    pub template: PanelTemplate,
    pub entry_delay: Duration,
}

impl PanelView {
    pub fn build<R: Rng + ?Sized>(
        camera: &CameraRecord,
        glitching: bool,
        now: &NaiveDateTime,
        index: usize,
        rng: &mut R,
    ) -> Self {
        let template = match camera.status {
            CameraStatus::Active => PanelTemplate::Scene {
                night_vision: camera.kind.is_night_vision(),
                dots: scatter_dots(rng),
            },
            CameraStatus::SignalLost => PanelTemplate::SignalLost {
                noise_seed: rng.gen(),
            },
            CameraStatus::Offline => PanelTemplate::Offline,
        };

        Self {
            camera_id: camera.id.clone(),
            location: camera.location.clone(),
            time_label: overlay_time(now),
            recording: camera.is_active(),
            glitching,
            template,
            entry_delay: entry_delay(index),
        }
    }

    pub fn is_revealed(&self, since_mount: Duration) -> bool {
        since_mount >= self.entry_delay
    }
}

pub fn entry_delay(index: usize) -> Duration {
    ENTRY_DELAY_STEP * index as u32
}

pub fn render_panel(frame: &mut Frame<'_>, area: Rect, panel: &PanelView, since_mount: Duration) {
    let border_style = if panel.glitching {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::REVERSED)
    } else if panel.recording {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let id_label = if panel.glitching {
        format!(" {} ", scramble(&panel.camera_id))
    } else {
        format!(" {} ", panel.camera_id)
    };

    let rec = if panel.recording {
        Span::styled(
            " ● REC ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" ○ REC ", Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            id_label,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title(
            Title::from(Span::styled(
                format!(" {} ", panel.time_label),
                Style::default().fg(Color::Cyan),
            ))
            .alignment(Alignment::Right),
        )
        .title(
            Title::from(Span::styled(
                format!(" {} ", panel.location),
                Style::default().fg(Color::Gray),
            ))
            .position(Position::Bottom),
        )
        .title(
            Title::from(rec)
                .position(Position::Bottom)
                .alignment(Alignment::Right),
        );

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if !panel.is_revealed(since_mount) {
        render_centered(
            frame,
            inner,
            &[Line::styled("CONNECTING…", Style::default().fg(Color::DarkGray))],
        );
        return;
    }

    match &panel.template {
        PanelTemplate::Scene { night_vision, dots } => {
            render_scene(frame, inner, *night_vision, dots, since_mount)
        }
        PanelTemplate::SignalLost { noise_seed } => render_signal_lost(frame, inner, *noise_seed),
        PanelTemplate::Offline => render_centered(
            frame,
            inner,
            &[
                Line::styled(
                    "NO SIGNAL",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Line::styled("CHECK CONNECTION", Style::default().fg(Color::DarkGray)),
            ],
        ),
    }

    if panel.glitching {
        render_tear(frame, inner);
    }
}

fn render_scene(
    frame: &mut Frame<'_>,
    area: Rect,
    night_vision: bool,
    dots: &[MotionDot; DOT_COUNT],
    since_mount: Duration,
) {
    let (scan_style, dot_style) = if night_vision {
        (
            Style::default().fg(Color::Green).bg(Color::Rgb(0, 32, 0)),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };

    let buf = frame.buffer_mut();
    let scanline = "┈".repeat(area.width as usize);
    let blank = " ".repeat(area.width as usize);
    for row in 0..area.height {
        let line = if row % 2 == 1 { &scanline } else { &blank };
        buf.set_string(area.x, area.y + row, line, scan_style);
    }

    for dot in dots {
        let x = area.x + percent_of(area.width, dot.left_percent);
        let y = area.y + percent_of(area.height, dot.top_percent);
        let phase = (since_mount + dot.pulse_offset).as_millis() % DOT_PULSE_PERIOD.as_millis();
        let glyph = if phase < DOT_PULSE_PERIOD.as_millis() / 2 { "●" } else { "•" };
        buf.set_string(x, y, glyph, dot_style);
    }
}

fn render_signal_lost(frame: &mut Frame<'_>, area: Rect, noise_seed: u64) {
    let mut rng = StdRng::seed_from_u64(noise_seed);
    let noise_style = Style::default().fg(Color::DarkGray);
    let buf = frame.buffer_mut();
    for row in 0..area.height {
        let line: String = (0..area.width)
            .map(|_| NOISE_GLYPHS[rng.gen_range(0..NOISE_GLYPHS.len())])
            .collect();
        buf.set_string(area.x, area.y + row, line, noise_style);
    }

    render_centered(
        frame,
        area,
        &[Line::styled(
            " SIGNAL LOST ",
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )],
    );
}

/// Horizontal tear lines drawn over a glitching feed
fn render_tear(frame: &mut Frame<'_>, area: Rect) {
    let style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
    let tear: String = (0..area.width)
        .map(|i| if i % 2 == 0 { '▚' } else { '▞' })
        .collect();
    let buf = frame.buffer_mut();
    for row in [area.height / 3, area.height * 2 / 3] {
        buf.set_string(area.x, area.y + row, &tear, style);
    }
}

fn render_centered(frame: &mut Frame<'_>, area: Rect, lines: &[Line<'static>]) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let target = Rect::new(area.x, top, area.width, height);
    frame.render_widget(
        Paragraph::new(lines.to_vec()).alignment(Alignment::Center),
        target,
    );
}

fn percent_of(extent: u16, percent: f64) -> u16 {
    let offset = (f64::from(extent) * percent / 100.0) as u16;
    offset.min(extent.saturating_sub(1))
}

fn scramble(id: &str) -> String {
    id.chars()
        .rev()
        .map(|c| if c == '-' { '▒' } else { c })
        .collect()
}

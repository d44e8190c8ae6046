//! Layout shell
//!
//! [`Dashboard`] is the composition root: it owns the clock source and one
//! glitch scheduler per camera for as long as it is mounted. Each frame it
//! produces a [`DashboardView`], which [`draw_dashboard`] paints.

use std::sync::Arc;
use std::time::Duration;

use cctv_clock::{header_timestamp, Clock, ClockSource, CLOCK_PERIOD};
use cctv_glitch::{GlitchHandle, GlitchPolicy, GlitchScheduler, RandomDice};
use cctv_types::{Branding, DashboardSettings};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::panel::{render_panel, PanelView};
use crate::status_bar::{render_status_bar, StatusBarView};

/// Runtime knobs that are not part of the static configuration
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Seed for glitch trials and cosmetic randomness; entropy when `None`
    pub seed: Option<u64>,
    pub glitch: GlitchPolicy,
    pub clock_period: Duration,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            seed: None,
            glitch: GlitchPolicy::default(),
            clock_period: CLOCK_PERIOD,
        }
    }
}

pub struct Dashboard {
    settings: DashboardSettings,
    clock: ClockSource,
    glitches: Vec<GlitchHandle>,
    cosmetic_rng: StdRng,
    mounted_at: Instant,
}

impl Dashboard {
    /// Start the clock and every panel's glitch timer. Needs a tokio runtime.
    pub fn mount(settings: DashboardSettings, clock: Arc<dyn Clock>, options: DashboardOptions) -> Self {
        let clock = ClockSource::with_period(clock, options.clock_period);

        let glitches = settings
            .cameras
            .iter()
            .enumerate()
            .map(|(index, camera)| {
                let dice = match options.seed {
                    Some(seed) => RandomDice::seeded(seed.wrapping_add(index as u64 + 1)),
                    None => RandomDice::from_entropy(),
                };
                GlitchScheduler::spawn(camera, options.glitch, dice)
            })
            .collect::<Vec<_>>();

        let cosmetic_rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!(
            cameras = settings.cameras.len(),
            active = settings.cameras.active_count(),
            "dashboard mounted"
        );

        Self {
            settings,
            clock,
            glitches,
            cosmetic_rng,
            mounted_at: Instant::now(),
        }
    }

    /// Receiver for the shared clock; closed once the dashboard unmounts
    pub fn clock_updates(&self) -> watch::Receiver<NaiveDateTime> {
        self.clock.subscribe()
    }

    /// One glitch flag receiver per panel, in grid order
    pub fn glitch_updates(&self) -> Vec<watch::Receiver<bool>> {
        self.glitches.iter().map(GlitchHandle::subscribe).collect()
    }

    pub fn panel_count(&self) -> usize {
        self.glitches.len()
    }

    /// Panel keys in grid order
    pub fn panel_ids(&self) -> impl Iterator<Item = &str> {
        self.glitches.iter().map(|glitch| glitch.camera_id())
    }

    pub fn since_mount(&self) -> Duration {
        self.mounted_at.elapsed()
    }

    /// Snapshot transient state into a view model.
    ///
    /// Motion dots and static noise are drawn fresh on every call.
    pub fn view(&mut self) -> DashboardView {
        let now = self.clock.now();
        let since_mount = self.since_mount();

        let panels = self
            .settings
            .cameras
            .iter()
            .zip(&self.glitches)
            .enumerate()
            .map(|(index, (camera, glitch))| {
                PanelView::build(
                    camera,
                    glitch.is_glitching(),
                    &now,
                    index,
                    &mut self.cosmetic_rng,
                )
            })
            .collect();

        DashboardView {
            header: HeaderView {
                branding: self.settings.branding.clone(),
                timestamp: header_timestamp(&now),
            },
            status: StatusBarView::from_settings(&self.settings.cameras, &self.settings.status),
            panels,
            footer: self.settings.branding.footer.clone(),
            since_mount,
        }
    }

    /// Stop every timer and wait for them to exit.
    pub async fn unmount(self) {
        let Self {
            clock, glitches, ..
        } = self;
        clock.stop().await;
        for glitch in glitches {
            glitch.stop().await;
        }
        tracing::info!("dashboard unmounted");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub branding: Branding,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub header: HeaderView,
    pub status: StatusBarView,
    pub panels: Vec<PanelView>,
    pub footer: String,
    pub since_mount: Duration,
}

/// Columns and rows for `count` panels: as square as possible, filled row-major
pub fn grid_shape(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let mut cols = 1;
    while cols * cols < count {
        cols += 1;
    }
    let rows = count.div_ceil(cols);
    (cols, rows)
}

pub fn draw_dashboard(frame: &mut Frame<'_>, view: &DashboardView) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, vertical[0], view);
    render_grid(frame, vertical[1], view);

    let footer = Paragraph::new(Line::styled(
        view.footer.as_str(),
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(footer, vertical[2]);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, view: &DashboardView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32),
            Constraint::Min(21),
            Constraint::Length(46),
        ])
        .split(inner);

    let branding = &view.header.branding;
    let brand = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", branding.icon),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                branding.name.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", branding.suffix),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::styled(
            branding.subtitle.as_str(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(brand, columns[0]);

    let clock = Paragraph::new(Line::styled(
        view.header.timestamp.as_str(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(clock, columns[1]);

    render_status_bar(frame, columns[2], &view.status);
}

fn render_grid(frame: &mut Frame<'_>, area: Rect, view: &DashboardView) {
    let (cols, rows) = grid_shape(view.panels.len());
    if cols == 0 {
        let empty = Paragraph::new("NO CAMERAS CONFIGURED")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, chunk) in view.panels.chunks(cols).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
            .split(row_areas[row]);
        for (col, panel) in chunk.iter().enumerate() {
            render_panel(frame, cells[col], panel, view.since_mount);
        }
    }
}

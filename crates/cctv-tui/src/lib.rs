//! Terminal rendering of the JOLUP CCTV dashboard
//!
//! [`run_dashboard`] takes over the terminal until the user quits;
//! [`render_snapshot`] renders a single frame to text without touching it.

use std::sync::Arc;
use std::time::Duration;

use cctv_clock::{Clock, SystemClock};
use cctv_types::DashboardSettings;
use crossterm::cursor::Show;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend, TestBackend};
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use thiserror::Error;

pub mod panel;
pub mod shell;
pub mod status_bar;

pub use panel::{entry_delay, scatter_dots, MotionDot, PanelTemplate, PanelView, ENTRY_DELAY_STEP};
pub use shell::{draw_dashboard, grid_shape, Dashboard, DashboardOptions, DashboardView};
pub use status_bar::{disk_bar, StatusBarView};

/// Redraw cadence; also the input poll timeout
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the dashboard full-screen until `q`, `Esc` or `Ctrl-C`.
///
/// The terminal is restored and the dashboard unmounted on every exit path.
pub async fn run_dashboard(
    settings: DashboardSettings,
    options: DashboardOptions,
) -> Result<(), TuiError> {
    let mut dashboard = Dashboard::mount(settings, Arc::new(SystemClock), options);
    let result = drive_terminal(&mut dashboard);
    dashboard.unmount().await;
    result
}

fn drive_terminal(dashboard: &mut Dashboard) -> Result<(), TuiError> {
    let mut guard = TerminalGuard::enter()?;
    let outcome = Terminal::new(CrosstermBackend::new(std::io::stdout()))
        .map_err(TuiError::from)
        .and_then(|mut terminal| event_loop(&mut terminal, dashboard));
    let restored = guard.restore();
    outcome?;
    restored?;
    Ok(())
}

/// Raw mode plus alternate screen, undone on restore or drop
struct TerminalGuard {
    raw_mode: bool,
    alternate_screen: bool,
}

impl TerminalGuard {
    fn enter() -> std::io::Result<Self> {
        let mut guard = Self {
            raw_mode: false,
            alternate_screen: false,
        };
        enable_raw_mode()?;
        guard.raw_mode = true;
        execute!(std::io::stdout(), EnterAlternateScreen)?;
        guard.alternate_screen = true;
        Ok(guard)
    }

    /// Undo whatever `enter` managed to do. Every step runs; the first
    /// failure is returned.
    fn restore(&mut self) -> std::io::Result<()> {
        let raw = if std::mem::take(&mut self.raw_mode) {
            disable_raw_mode()
        } else {
            Ok(())
        };
        let screen = if std::mem::take(&mut self.alternate_screen) {
            execute!(std::io::stdout(), LeaveAlternateScreen)
        } else {
            Ok(())
        };
        let cursor = execute!(std::io::stdout(), Show);
        first_error([raw, screen, cursor])
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw_mode || self.alternate_screen {
            let _ = self.restore();
        }
    }
}

fn first_error<const N: usize>(results: [std::io::Result<()>; N]) -> std::io::Result<()> {
    results.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    dashboard: &mut Dashboard,
) -> Result<(), TuiError> {
    loop {
        let view = dashboard.view();
        terminal.draw(|frame| draw_dashboard(frame, &view))?;

        if event::poll(FRAME_INTERVAL)? {
            if let CEvent::Key(key) = event::read()? {
                if is_quit(&key) {
                    tracing::debug!(?key.code, "quit requested");
                    return Ok(());
                }
            }
        }
    }
}

pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Mount, let every panel finish its entry delay, render one frame of
/// `width` x `height` cells, unmount, and return the frame as text.
pub async fn render_snapshot(
    settings: DashboardSettings,
    clock: Arc<dyn Clock>,
    options: DashboardOptions,
    width: u16,
    height: u16,
) -> Result<String, TuiError> {
    let mut dashboard = Dashboard::mount(settings, clock, options);
    tokio::time::sleep(entry_delay(dashboard.panel_count())).await;

    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    let view = dashboard.view();
    terminal.draw(|frame| draw_dashboard(frame, &view))?;
    dashboard.unmount().await;

    Ok(buffer_text(terminal.backend().buffer()))
}

/// Buffer contents as lines of text, trailing spaces trimmed
pub fn buffer_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content()
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

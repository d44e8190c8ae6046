use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::watch;

use crate::clock::Clock;
use crate::task::ScheduledTask;

/// Refresh period of the dashboard clock
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Publishes the current time to subscribers on a fixed period.
///
/// The latest value is available immediately after [`ClockSource::start`];
/// later values arrive once per period. Stopping or dropping the source ends
/// publication and closes every subscriber's channel.
#[derive(Debug)]
pub struct ClockSource {
    rx: watch::Receiver<NaiveDateTime>,
    task: ScheduledTask,
}

impl ClockSource {
    pub fn start(clock: Arc<dyn Clock>) -> Self {
        Self::with_period(clock, CLOCK_PERIOD)
    }

    pub fn with_period(clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (tx, rx) = watch::channel(clock.now());
        let task = ScheduledTask::every("clock", period, move || {
            tx.send_replace(clock.now());
        });
        tracing::debug!(period_ms = period.as_millis() as u64, "clock source started");
        Self { rx, task }
    }

    /// Most recently published time
    pub fn now(&self) -> NaiveDateTime {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<NaiveDateTime> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub async fn stop(self) {
        self.task.stop().await;
        tracing::debug!("clock source stopped");
    }
}

//! Scheduled tasks
//!
//! A [`ScheduledTask`] owns a spawned tokio task plus the sending half of a
//! oneshot stop signal. The task body selects on the signal and exits when it
//! fires or when the sender is dropped. Dropping the handle also aborts the
//! task, so no timer outlives its owner.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Resolves when the owning [`ScheduledTask`] is stopped or dropped
pub type StopSignal = oneshot::Receiver<()>;

pub struct ScheduledTask {
    name: String,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawn `body` on the current runtime, handing it the stop signal.
    pub fn spawn<F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(StopSignal) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(body(stop_rx));
        tracing::trace!(task = %name, "scheduled task spawned");
        Self {
            name,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Run `tick` once per `period`, first after one full period.
    pub fn every<F>(name: impl Into<String>, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        Self::spawn(name, move |mut stop| async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = interval.tick() => tick(),
                }
            }
        })
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }

    /// Signal the task and wait for it to exit.
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        tracing::trace!(task = %self.name, "scheduled task stopped");
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("name", &self.name)
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_every_waits_one_period_before_first_tick() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let task = ScheduledTask::every("counter", Duration::from_secs(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(1_999)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(4)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_ticks() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let task = ScheduledTask::every("counter", Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(1_500)).await;
        task.stop().await;
        let after_stop = ticks.load(Ordering::SeqCst);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let task = ScheduledTask::every("counter", Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(task);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_spawn_body_observes_stop_signal() {
        let (done_tx, done_rx) = oneshot::channel();
        let task = ScheduledTask::spawn("waiter", move |stop| async move {
            let _ = stop.await;
            let _ = done_tx.send("stopped");
        });
        assert!(!task.is_finished());
        task.stop().await;
        assert_eq!(done_rx.await.unwrap(), "stopped");
    }
}

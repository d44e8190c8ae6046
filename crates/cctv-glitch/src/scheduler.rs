use std::time::Duration;

use cctv_clock::ScheduledTask;
use cctv_types::CameraRecord;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::dice::GlitchDice;
use crate::machine::{GlitchMachine, TrialOutcome};
use crate::policy::GlitchPolicy;

pub struct GlitchScheduler;

impl GlitchScheduler {
    /// Start the trial timer for one panel.
    ///
    /// Trials and the revert deadline run inside a single scheduled task, so
    /// stopping the handle cancels both.
    pub fn spawn<D>(camera: &CameraRecord, policy: GlitchPolicy, dice: D) -> GlitchHandle
    where
        D: GlitchDice + 'static,
    {
        let (tx, rx) = watch::channel(false);
        let camera_id = camera.id.clone();
        let status = camera.status;
        let task_name = format!("glitch:{}", camera_id);
        let period = policy.period.max(Duration::from_millis(1));

        let log_id = camera_id.clone();
        let task = ScheduledTask::spawn(task_name, move |mut stop| async move {
            let mut dice = dice;
            let mut machine = GlitchMachine::new(policy.threshold);
            let mut trials = time::interval_at(Instant::now() + period, period);
            trials.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let revert = time::sleep(Duration::ZERO);
            tokio::pin!(revert);
            let mut revert_pending = false;

            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = trials.tick() => {
                        match machine.trial(dice.sample(), status) {
                            TrialOutcome::Started => {
                                let hold = dice.duration(policy.min_duration, policy.max_duration);
                                revert.as_mut().reset(Instant::now() + hold);
                                revert_pending = true;
                                tx.send_replace(true);
                                tracing::debug!(camera = %log_id, hold_ms = hold.as_millis() as u64, "glitch started");
                            }
                            TrialOutcome::Coalesced => {
                                tracing::trace!(camera = %log_id, "glitch trial coalesced");
                            }
                            TrialOutcome::Missed | TrialOutcome::Ignored => {}
                        }
                    }
                    _ = &mut revert, if revert_pending => {
                        revert_pending = false;
                        if machine.revert() {
                            tx.send_replace(false);
                            tracing::debug!(camera = %log_id, "glitch reverted");
                        }
                    }
                }
            }
        });

        GlitchHandle {
            camera_id,
            rx,
            task,
        }
    }
}

/// Owning handle for one panel's glitch timer
#[derive(Debug)]
pub struct GlitchHandle {
    camera_id: String,
    rx: watch::Receiver<bool>,
    task: ScheduledTask,
}

impl GlitchHandle {
    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }

    pub fn is_glitching(&self) -> bool {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel pending trials and any pending revert.
    pub async fn stop(self) {
        self.task.stop().await;
    }
}

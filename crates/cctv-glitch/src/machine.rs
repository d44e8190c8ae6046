use cctv_types::CameraStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlitchState {
    #[default]
    Quiescent,
    Glitching,
}

/// Result of one periodic trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    /// Camera is not active; nothing happens whatever the sample
    Ignored,
    /// Sample did not clear the threshold
    Missed,
    /// Quiescent panel entered the glitching state
    Started,
    /// Sample cleared the threshold while a glitch was already running.
    /// The running glitch keeps its original revert deadline.
    Coalesced,
}

/// Two-state glitch toggle for one panel
#[derive(Debug, Clone)]
pub struct GlitchMachine {
    state: GlitchState,
    threshold: f64,
}

impl GlitchMachine {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: GlitchState::Quiescent,
            threshold,
        }
    }

    pub fn state(&self) -> GlitchState {
        self.state
    }

    pub fn is_glitching(&self) -> bool {
        self.state == GlitchState::Glitching
    }

    pub fn trial(&mut self, sample: f64, status: CameraStatus) -> TrialOutcome {
        if !status.is_active() {
            return TrialOutcome::Ignored;
        }
        if sample <= self.threshold {
            return TrialOutcome::Missed;
        }
        match self.state {
            GlitchState::Glitching => TrialOutcome::Coalesced,
            GlitchState::Quiescent => {
                self.state = GlitchState::Glitching;
                TrialOutcome::Started
            }
        }
    }

    /// Return to quiescent. Returns whether the state changed.
    pub fn revert(&mut self) -> bool {
        let was_glitching = self.is_glitching();
        self.state = GlitchState::Quiescent;
        was_glitching
    }
}

use std::time::Duration;

/// Timing and probability of cosmetic glitches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchPolicy {
    /// Interval between trials
    pub period: Duration,
    /// A trial starts a glitch when its sample is strictly above this value
    pub threshold: f64,
    /// Shortest glitch (inclusive)
    pub min_duration: Duration,
    /// Longest glitch (exclusive)
    pub max_duration: Duration,
}

impl Default for GlitchPolicy {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(2),
            threshold: 0.95,
            min_duration: Duration::from_millis(150),
            max_duration: Duration::from_millis(350),
        }
    }
}

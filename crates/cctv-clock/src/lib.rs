//! Clock source and timer primitives
//!
//! - [`Clock`]: where "now" comes from (system or manually driven)
//! - [`ScheduledTask`]: a spawned timer loop with an explicit stop signal
//! - [`ClockSource`]: publishes the current time once per period to any
//!   number of subscribers until stopped
//! - [`header_timestamp`] / [`overlay_time`]: the two display formats

pub mod clock;
pub mod format;
pub mod source;
pub mod task;

pub use clock::{Clock, ManualClock, SystemClock};
pub use format::{header_timestamp, overlay_time, HEADER_FORMAT, OVERLAY_FORMAT};
pub use source::{ClockSource, CLOCK_PERIOD};
pub use task::{ScheduledTask, StopSignal};

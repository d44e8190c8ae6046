//! Glitch scheduling
//!
//! Every camera panel owns one scheduler. Every [`GlitchPolicy::period`] it
//! rolls a [`GlitchDice`]; a roll above the threshold on an active camera
//! puts the panel into the glitching state for a random short duration,
//! after which it reverts on its own.
//!
//! ```text
//!            trial > threshold && active
//! Quiescent ─────────────────────────────▶ Glitching
//!     ▲                                        │
//!     └──────────── revert deadline ───────────┘
//! ```

pub mod dice;
pub mod machine;
pub mod policy;
pub mod scheduler;

pub use dice::{GlitchDice, RandomDice};
pub use machine::{GlitchMachine, GlitchState, TrialOutcome};
pub use policy::GlitchPolicy;
pub use scheduler::{GlitchHandle, GlitchScheduler};

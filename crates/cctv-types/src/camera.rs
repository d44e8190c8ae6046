//! Camera records
//!
//! A camera record is a static descriptor of a simulated feed. The status
//! enumeration doubles as the only fault model in the system: `Offline` and
//! `SignalLost` are rendered as fixed placeholder states, never recovered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated feed status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraStatus {
    /// Feed is live: placeholder scene, recording indicator lit
    Active,
    /// Camera unreachable
    Offline,
    /// Camera reachable but no picture
    SignalLost,
}

impl CameraStatus {
    /// Whether the feed counts as live (recording, eligible for glitches)
    pub fn is_active(&self) -> bool {
        matches!(self, CameraStatus::Active)
    }

    /// Wire label, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraStatus::Active => "active",
            CameraStatus::Offline => "offline",
            CameraStatus::SignalLost => "signal-lost",
        }
    }
}

impl fmt::Display for CameraStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Camera hardware type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraKind {
    Indoor,
    Outdoor,
    NightVision,
}

impl CameraKind {
    pub fn is_night_vision(&self) -> bool {
        matches!(self, CameraKind::NightVision)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraKind::Indoor => "indoor",
            CameraKind::Outdoor => "outdoor",
            CameraKind::NightVision => "night-vision",
        }
    }
}

impl fmt::Display for CameraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Static descriptor of one simulated feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraRecord {
    /// Unique identifier, e.g. `CAM-01`
    pub id: String,
    /// Location label shown in the overlay
    pub location: String,
    pub status: CameraStatus,
    #[serde(rename = "type")]
    pub kind: CameraKind,
}

impl CameraRecord {
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        status: CameraStatus,
        kind: CameraKind,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            status,
            kind,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

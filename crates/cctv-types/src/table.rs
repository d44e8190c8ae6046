//! The camera table
//!
//! Built once at startup and shared by reference-counted slice. There is no
//! mutation API; a different camera list means a different table.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::camera::{CameraKind, CameraRecord, CameraStatus};
use crate::error::{Result, TypesError};

/// Immutable, validated list of camera records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraTable {
    records: Arc<[CameraRecord]>,
}

impl CameraTable {
    /// Validate and freeze a camera list.
    ///
    /// Identifiers must be non-empty and unique. Order is preserved and
    /// defines the panel order on screen.
    pub fn new(records: Vec<CameraRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(TypesError::EmptyCameraId { position });
            }
            if !seen.insert(record.id.as_str()) {
                return Err(TypesError::DuplicateCameraId {
                    id: record.id.clone(),
                });
            }
        }
        Ok(Self {
            records: records.into(),
        })
    }

    /// The nine-camera table the dashboard ships with
    pub fn default_table() -> Self {
        use CameraKind::*;
        use CameraStatus::*;

        let records = vec![
            CameraRecord::new("CAM-01", "PARKING LOT A - NORTH", Active, Outdoor),
            CameraRecord::new("CAM-02", "MAIN ENTRANCE", Active, Indoor),
            CameraRecord::new("CAM-03", "STAIRWELL B", SignalLost, Indoor),
            CameraRecord::new("CAM-04", "LOADING DOCK", Active, NightVision),
            CameraRecord::new("CAM-05", "LOBBY - RECEPTION", Active, Indoor),
            CameraRecord::new("CAM-06", "REAR ALLEY", Offline, NightVision),
            CameraRecord::new("CAM-07", "ELEVATOR 1", Active, Indoor),
            CameraRecord::new("CAM-08", "ROOFTOP ACCESS", Active, Outdoor),
            CameraRecord::new("CAM-09", "SERVER ROOM", Active, Indoor),
        ];
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CameraRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[CameraRecord] {
        &self.records
    }

    /// Look up a camera by identifier
    pub fn get(&self, id: &str) -> Option<&CameraRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Number of cameras whose status is active
    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_active()).count()
    }

    pub fn feed_ratio(&self) -> FeedRatio {
        FeedRatio {
            active: self.active_count(),
            total: self.len(),
        }
    }
}

impl Default for CameraTable {
    fn default() -> Self {
        Self::default_table()
    }
}

impl<'a> IntoIterator for &'a CameraTable {
    type Item = &'a CameraRecord;
    type IntoIter = std::slice::Iter<'a, CameraRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Active feeds over total feeds, displayed as `active/total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedRatio {
    pub active: usize,
    pub total: usize,
}

impl fmt::Display for FeedRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.active, self.total)
    }
}

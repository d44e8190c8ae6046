//! Hardcoded dashboard values
//!
//! Disk usage and alert count are cosmetic constants, not measurements.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypesError};
use crate::table::CameraTable;

/// Default disk usage shown in the status bar
pub const DEFAULT_DISK_USAGE_PERCENT: u8 = 67;

/// Default alert counter shown in the status bar
pub const DEFAULT_ALERT_COUNT: u32 = 3;

/// Status bar constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSettings {
    #[serde(default = "default_disk_usage")]
    pub disk_usage_percent: u8,

    #[serde(default = "default_alert_count")]
    pub alert_count: u32,
}

impl StatusSettings {
    pub fn new(disk_usage_percent: u8, alert_count: u32) -> Result<Self> {
        let settings = Self {
            disk_usage_percent,
            alert_count,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.disk_usage_percent > 100 {
            return Err(TypesError::DiskUsageOutOfRange {
                percent: self.disk_usage_percent,
            });
        }
        Ok(())
    }
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            disk_usage_percent: DEFAULT_DISK_USAGE_PERCENT,
            alert_count: DEFAULT_ALERT_COUNT,
        }
    }
}

fn default_disk_usage() -> u8 {
    DEFAULT_DISK_USAGE_PERCENT
}

fn default_alert_count() -> u32 {
    DEFAULT_ALERT_COUNT
}

/// Header and footer text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub icon: String,
    pub name: String,
    pub suffix: String,
    pub subtitle: String,
    pub footer: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            icon: "◉".to_string(),
            name: "JOLUP".to_string(),
            suffix: "CCTV".to_string(),
            subtitle: "SURVEILLANCE NETWORK v2.4.1".to_string(),
            footer: "Requested by @JolupCCTV · Built by @clonkbot".to_string(),
        }
    }
}

/// Everything the composition root needs, fixed for the dashboard's lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSettings {
    pub cameras: CameraTable,
    pub status: StatusSettings,
    pub branding: Branding,
}

impl DashboardSettings {
    pub fn new(cameras: CameraTable, status: StatusSettings, branding: Branding) -> Result<Self> {
        status.validate()?;
        Ok(Self {
            cameras,
            status,
            branding,
        })
    }
}

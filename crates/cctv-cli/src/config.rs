//! Dashboard configuration
//!
//! Built-in defaults, then an optional TOML file, then `CCTV_*` environment
//! overrides (`CCTV_STATUS__ALERT_COUNT=5`). Read once at startup.
//!
//! ```toml
//! seed = 42
//!
//! [status]
//! disk_usage_percent = 80
//! alert_count = 1
//!
//! [[cameras]]
//! id = "CAM-01"
//! location = "GATE"
//! status = "active"
//! type = "outdoor"
//! ```

use std::path::Path;

use anyhow::Context;
use cctv_types::{Branding, CameraRecord, CameraTable, DashboardSettings, StatusSettings};
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "CCTV";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Camera table; the built-in nine cameras when absent
    #[serde(default = "default_cameras")]
    pub cameras: Vec<CameraRecord>,

    #[serde(default)]
    pub status: StatusSettings,

    #[serde(default)]
    pub branding: Branding,

    /// Seed for glitch timing and cosmetic noise
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        Self::build(builder).with_context(|| match path {
            Some(path) => format!("failed to load configuration from {}", path.display()),
            None => "failed to load configuration".to_string(),
        })
    }

    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        let builder = Config::builder().add_source(File::from_str(source, FileFormat::Toml));
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate and freeze into the settings handed to the dashboard
    pub fn into_settings(self) -> anyhow::Result<DashboardSettings> {
        let cameras = CameraTable::new(self.cameras).context("invalid camera table")?;
        let settings = DashboardSettings::new(cameras, self.status, self.branding)
            .context("invalid status values")?;
        Ok(settings)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cameras: default_cameras(),
            status: StatusSettings::default(),
            branding: Branding::default(),
            seed: None,
        }
    }
}

fn default_cameras() -> Vec<CameraRecord> {
    CameraTable::default_table().records().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cctv_types::{CameraKind, CameraStatus};
    use std::io::Write;
    use std::sync::Mutex;

    // Tests that call `load` read the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_source_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.cameras.len(), 9);
        assert_eq!(config.seed, None);

        let settings = config.into_settings().unwrap();
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn test_custom_table_and_status() {
        let config = AppConfig::from_toml(
            r#"
            seed = 42

            [status]
            alert_count = 0

            [[cameras]]
            id = "CAM-A"
            location = "GATE"
            status = "active"
            type = "night-vision"

            [[cameras]]
            id = "CAM-B"
            location = "YARD"
            status = "offline"
            type = "outdoor"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.cameras.len(), 2);
        assert_eq!(settings.cameras.feed_ratio().to_string(), "1/2");
        assert_eq!(settings.status.alert_count, 0);
        assert_eq!(settings.status.disk_usage_percent, 67);

        let gate = settings.cameras.get("CAM-A").unwrap();
        assert_eq!(gate.kind, CameraKind::NightVision);
        assert_eq!(gate.status, CameraStatus::Active);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let config = AppConfig::from_toml(
            r#"
            [[cameras]]
            id = "CAM-01"
            location = "A"
            status = "active"
            type = "indoor"

            [[cameras]]
            id = "CAM-01"
            location = "B"
            status = "active"
            type = "indoor"
            "#,
        )
        .unwrap();
        let err = config.into_settings().unwrap_err();
        assert!(format!("{err:#}").contains("Duplicate camera identifier: CAM-01"));
    }

    #[test]
    fn test_disk_usage_out_of_range_rejected() {
        let config = AppConfig::from_toml("[status]\ndisk_usage_percent = 150\n").unwrap();
        assert!(config.into_settings().is_err());
    }

    #[test]
    fn test_unknown_status_is_a_parse_error() {
        let result = AppConfig::from_toml(
            r#"
            [[cameras]]
            id = "CAM-01"
            location = "A"
            status = "rebooting"
            type = "indoor"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let result = AppConfig::load(Some(Path::new("/nonexistent/cctv.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reads_toml_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = toml_file("seed = 9\n\n[status]\ndisk_usage_percent = 80\nalert_count = 1\n");

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.cameras.len(), 9);

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.status.disk_usage_percent, 80);
        assert_eq!(settings.status.alert_count, 1);
    }

    #[test]
    fn test_environment_overrides_defaults_and_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("CCTV_STATUS__ALERT_COUNT", "5");
        std::env::set_var("CCTV_SEED", "42");

        let from_defaults = AppConfig::load(None);
        let file = toml_file("seed = 9\n\n[status]\nalert_count = 1\n");
        let from_file = AppConfig::load(Some(file.path()));

        std::env::remove_var("CCTV_STATUS__ALERT_COUNT");
        std::env::remove_var("CCTV_SEED");

        let from_defaults = from_defaults.unwrap();
        assert_eq!(from_defaults.status.alert_count, 5);
        assert_eq!(from_defaults.seed, Some(42));
        assert_eq!(from_defaults.status.disk_usage_percent, 67);

        let from_file = from_file.unwrap();
        assert_eq!(from_file.status.alert_count, 5);
        assert_eq!(from_file.seed, Some(42));
    }
}

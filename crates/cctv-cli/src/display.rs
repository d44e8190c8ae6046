//! Display utilities for the `list` command

use cctv_types::{CameraRecord, CameraStatus, CameraTable};
use colored::*;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// One fixed-width row per camera, no colour
pub fn camera_row(camera: &CameraRecord) -> String {
    format!(
        "{:<8} {:<24} {:<12} {}",
        camera.id, camera.location, camera.status, camera.kind
    )
}

pub fn print_cameras(table: &CameraTable) {
    section("CAMERA FEEDS");
    println!(
        "  {}",
        format!("{:<8} {:<24} {:<12} {}", "ID", "LOCATION", "STATUS", "TYPE").bright_black()
    );
    for camera in table {
        let row = camera_row(camera);
        let row = match camera.status {
            CameraStatus::Active => row.bright_green(),
            CameraStatus::SignalLost => row.yellow(),
            CameraStatus::Offline => row.bright_red(),
        };
        println!("  {}", row);
    }
    println!();
    println!(
        "  {}: {}",
        "ACTIVE FEEDS".bright_white(),
        table.feed_ratio().to_string().bright_cyan()
    );
}

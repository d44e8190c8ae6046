use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use cctv_clock::ManualClock;
use cctv_glitch::GlitchPolicy;
use cctv_tui::{render_snapshot, Dashboard, DashboardOptions, PanelTemplate};
use cctv_types::{CameraTable, DashboardSettings};
use chrono::{NaiveDate, NaiveDateTime};

fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(9, 59, 58)
        .unwrap()
}

fn seeded() -> DashboardOptions {
    DashboardOptions {
        seed: Some(7),
        ..DashboardOptions::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_default_grid_has_nine_unique_panels() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let mut dashboard = Dashboard::mount(DashboardSettings::default(), clock, seeded());

    assert_eq!(dashboard.panel_count(), 9);
    let ids: Vec<&str> = dashboard.panel_ids().collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 9);
    assert_eq!(ids.first(), Some(&"CAM-01"));
    assert_eq!(ids.last(), Some(&"CAM-09"));

    let view = dashboard.view();
    assert_eq!(view.panels.len(), 9);
    assert_eq!(view.header.timestamp, "2024/06/01 09:59:58");
    assert_eq!(view.status.active_feeds.to_string(), "7/9");
    assert!(view.panels.iter().all(|p| p.time_label == "09:59:58"));
    assert!(view.panels.iter().all(|p| !p.glitching));

    dashboard.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_view_follows_clock() {
    let clock = ManualClock::new(start_time());
    let mut dashboard = Dashboard::mount(DashboardSettings::default(), Arc::new(clock.clone()), seeded());

    clock.advance(chrono::Duration::seconds(2));
    tokio::time::sleep(Duration::from_millis(1_100)).await;

    let view = dashboard.view();
    assert_eq!(view.header.timestamp, "2024/06/01 10:00:00");
    assert_eq!(view.panels[0].time_label, "10:00:00");

    dashboard.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_only_active_panels_glitch() {
    let options = DashboardOptions {
        seed: Some(11),
        glitch: GlitchPolicy {
            threshold: -1.0,
            ..GlitchPolicy::default()
        },
        ..DashboardOptions::default()
    };
    let clock = Arc::new(ManualClock::new(start_time()));
    let mut dashboard = Dashboard::mount(DashboardSettings::default(), clock, options);

    // First trial fires at 2s; every glitch lasts at least 150ms
    tokio::time::sleep(Duration::from_millis(2_050)).await;
    let view = dashboard.view();
    let table = CameraTable::default_table();
    for (panel, camera) in view.panels.iter().zip(table.iter()) {
        assert_eq!(panel.glitching, camera.is_active(), "{}", camera.id);
    }

    // And every glitch is over before 350ms have passed
    tokio::time::sleep(Duration::from_millis(400)).await;
    let view = dashboard.view();
    assert!(view.panels.iter().all(|p| !p.glitching));

    dashboard.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_dots_redrawn_each_view() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let mut dashboard = Dashboard::mount(DashboardSettings::default(), clock, seeded());

    let first = dashboard.view();
    let second = dashboard.view();
    let dots = |view: &cctv_tui::DashboardView| match &view.panels[0].template {
        PanelTemplate::Scene { dots, .. } => *dots,
        other => panic!("unexpected template {other:?}"),
    };
    assert_ne!(dots(&first), dots(&second));

    dashboard.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_text() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let text = render_snapshot(DashboardSettings::default(), clock, seeded(), 150, 48)
        .await
        .unwrap();

    assert!(text.contains("JOLUP"));
    assert!(text.contains("SURVEILLANCE NETWORK v2.4.1"));
    assert!(text.contains("2024/06/01 09:59:58"));
    assert!(text.contains("SYSTEM ONLINE"));
    assert!(text.contains("ACTIVE FEEDS 7/9"));
    assert!(text.contains("███████░░░ 67%"));
    assert!(text.contains("ALERTS 3"));
    assert!(text.contains("Requested by @JolupCCTV · Built by @clonkbot"));

    for n in 1..=9 {
        let id = format!("CAM-{:02}", n);
        assert_eq!(text.matches(&id).count(), 1, "{id}");
    }
    assert!(text.contains("PARKING LOT A - NORTH"));
    assert!(text.contains("SERVER ROOM"));

    assert_eq!(text.matches("SIGNAL LOST").count(), 1);
    assert_eq!(text.matches("NO SIGNAL").count(), 1);
    assert_eq!(text.matches("CHECK CONNECTION").count(), 1);

    assert_eq!(text.matches("● REC").count(), 7);
    assert_eq!(text.matches("○ REC").count(), 2);

    // Nine overlays plus the header
    assert_eq!(text.matches("09:59:58").count(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_survives_tiny_terminal() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let text = render_snapshot(DashboardSettings::default(), clock.clone(), seeded(), 40, 10)
        .await
        .unwrap();
    assert_eq!(text.split('\n').count(), 10);

    let empty = DashboardSettings {
        cameras: CameraTable::new(Vec::new()).unwrap(),
        ..DashboardSettings::default()
    };
    let text = render_snapshot(empty, clock, seeded(), 120, 12).await.unwrap();
    assert!(text.contains("NO CAMERAS CONFIGURED"));
    assert!(text.contains("0/0"));
}

#[tokio::test(start_paused = true)]
async fn test_unmount_closes_every_channel() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let dashboard = Dashboard::mount(DashboardSettings::default(), clock, seeded());

    let mut clock_rx = dashboard.clock_updates();
    let mut glitch_rxs = dashboard.glitch_updates();
    assert_eq!(glitch_rxs.len(), 9);

    let _ = clock_rx.borrow_and_update();
    for rx in &mut glitch_rxs {
        let _ = rx.borrow_and_update();
    }

    dashboard.unmount().await;
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert!(clock_rx.changed().await.is_err());
    for rx in &mut glitch_rxs {
        assert!(rx.changed().await.is_err());
    }
}

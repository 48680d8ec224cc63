use std::path::{Path, PathBuf};

mod controller;
mod ui;

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use portal_core::{load_settings, PortalController, PortalSettings};
use tracing_subscriber::EnvFilter;

use crate::controller::events::describe_settings_error;
use crate::ui::PortalGuiApp;

#[derive(Debug, Parser)]
#[command(name = "portal-gui", about = "Academic portal sign-in window")]
struct Args {
    /// Settings file. Defaults to ./portal.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Builds the controller, falling back to default settings (with a notice
/// for the user) when the configured ones cannot be loaded.
fn build_portal(config: Option<&Path>) -> anyhow::Result<(PortalController, Option<String>)> {
    let (settings, notice) = match load_settings(config) {
        Ok(settings) => (settings, None),
        Err(err) => {
            tracing::warn!(error = %err, "falling back to default portal settings");
            (PortalSettings::default(), Some(describe_settings_error(&err)))
        }
    };
    let portal = PortalController::new(settings).context("failed to initialize portal")?;
    Ok((portal, notice))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let (portal, notice) = match build_portal(args.config.as_deref()) {
        Ok(built) => built,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "portal startup failed");
            std::process::exit(1);
        }
    };
    let title = format!("{} Academic Portal", portal.settings().brand_name);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(PortalGuiApp::new(portal, notice)))),
    )
}

#[cfg(test)]
mod tests {
    use std::{path::Path, time::Duration};

    use portal_core::{FocusTarget, Key, PortalController, PortalEvent, PortalSettings, SettingsError};
    use shared::domain::FieldId;

    use super::build_portal;
    use crate::controller::events::{describe_settings_error, FrameKeys};
    use crate::controller::orchestration::dispatch_portal_events;
    use crate::ui::app::{notification_offset, repaint_delay, shake_offset};

    #[test]
    fn missing_settings_file_falls_back_to_defaults_with_notice() {
        let (portal, notice) =
            build_portal(Some(Path::new("definitely/not/here/portal.toml"))).expect("portal");
        assert_eq!(portal.settings().institution_domain, "parsu.edu.ph");
        let notice = notice.expect("fallback notice");
        assert!(notice.contains("using built-in defaults"));
    }

    #[test]
    fn describes_override_errors_with_the_offending_key() {
        let err = SettingsError::InvalidOverride {
            key: "PORTAL__MIN_PASSWORD_LEN".into(),
            value: "six".into(),
        };
        let text = describe_settings_error(&err);
        assert!(text.contains("PORTAL__MIN_PASSWORD_LEN=six"));
    }

    #[test]
    fn enter_routing_follows_focus() {
        let keys = FrameKeys {
            escape: false,
            enter: true,
        };
        assert_eq!(
            keys.field_submit_event(FieldId::Email, true),
            Some(PortalEvent::Key {
                key: Key::Enter,
                focus: Some(FocusTarget::Field(FieldId::Email)),
            })
        );
        assert_eq!(keys.field_submit_event(FieldId::Email, false), None);
        assert_eq!(
            keys.toggle_event(true),
            PortalEvent::Key {
                key: Key::Enter,
                focus: Some(FocusTarget::ToggleButton),
            }
        );
        assert_eq!(FrameKeys::default().toggle_event(true), PortalEvent::ToggleBook);
        assert_eq!(keys.escape_event(), None);
    }

    #[test]
    fn repaints_at_the_next_deadline_but_never_sleeps_long() {
        assert_eq!(repaint_delay(1_000, Some(1_300), false), Duration::from_millis(300));
        assert_eq!(repaint_delay(1_000, Some(900), false), Duration::ZERO);
        assert_eq!(repaint_delay(1_000, Some(9_000), false), Duration::from_millis(500));
        assert_eq!(repaint_delay(1_000, None, false), Duration::from_millis(500));
        assert_eq!(repaint_delay(1_000, None, true), Duration::from_millis(16));
    }

    #[test]
    fn stack_slots_move_down_and_shake_stays_positive() {
        assert!(notification_offset(1).y > notification_offset(0).y);
        assert_eq!(shake_offset(false, 3.0), 6.0);
        for step in 0..100 {
            let offset = shake_offset(true, f64::from(step) * 0.013);
            assert!((1.0..=11.0).contains(&offset));
        }
    }

    #[test]
    fn each_frame_releases_the_signal_log() {
        let mut portal = PortalController::new(PortalSettings::default()).expect("portal");
        let released = dispatch_portal_events(&mut portal, vec![PortalEvent::ToggleBook], 0);
        assert_eq!(released, 1);
        assert!(portal.signals().is_empty());

        for frame in 1..=10_000_u64 {
            let edit = PortalEvent::EmailEdited(format!("user{frame}@parsu.edu.ph"));
            portal.tick(frame);
            dispatch_portal_events(&mut portal, vec![edit], frame);
            assert!(portal.signals().is_empty());
        }
        portal.tick(20_000);
        dispatch_portal_events(&mut portal, Vec::new(), 20_000);
        assert!(portal.signals().is_empty());
        assert!(portal.view().email.error.is_none());
    }
}

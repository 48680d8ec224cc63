//! Keyboard mapping and startup error reporting for the portal GUI.

use portal_core::{FocusTarget, Key, PortalEvent, SettingsError};
use shared::domain::FieldId;

/// Keys pressed this frame, sampled once before any widget consumes them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameKeys {
    pub escape: bool,
    pub enter: bool,
}

impl FrameKeys {
    pub fn sample(ctx: &egui::Context) -> Self {
        ctx.input(|i| Self {
            escape: i.key_pressed(egui::Key::Escape),
            enter: i.key_pressed(egui::Key::Enter),
        })
    }

    pub fn escape_event(self) -> Option<PortalEvent> {
        self.escape.then_some(PortalEvent::Key {
            key: Key::Escape,
            focus: None,
        })
    }

    /// A single-line edit gives up focus on Enter, so `lost_focus` stands in
    /// for "had focus when Enter was pressed".
    pub fn field_submit_event(self, field: FieldId, lost_focus: bool) -> Option<PortalEvent> {
        (self.enter && lost_focus).then_some(PortalEvent::Key {
            key: Key::Enter,
            focus: Some(FocusTarget::Field(field)),
        })
    }

    /// egui activates a focused button on Enter; report that as a key press
    /// so the controller sees the same routing a keyboard user triggered.
    pub fn toggle_event(self, had_focus: bool) -> PortalEvent {
        if self.enter && had_focus {
            PortalEvent::Key {
                key: Key::Enter,
                focus: Some(FocusTarget::ToggleButton),
            }
        } else {
            PortalEvent::ToggleBook
        }
    }
}

pub fn describe_settings_error(err: &SettingsError) -> String {
    match err {
        SettingsError::Read { path, .. } => format!(
            "Could not read portal settings from {}; using built-in defaults.",
            path.display()
        ),
        SettingsError::Parse { path, .. } => format!(
            "Portal settings in {} are malformed; using built-in defaults.",
            path.display()
        ),
        SettingsError::InvalidOverride { key, value } => {
            format!("Ignoring environment override {key}={value}; using built-in defaults.")
        }
        SettingsError::Invalid(_) | SettingsError::EmailPattern { .. } => {
            format!("Portal settings rejected ({err}); using built-in defaults.")
        }
    }
}

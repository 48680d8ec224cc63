//! Inputs accepted by the controller and the transitions it reports back.

use serde::Serialize;
use shared::domain::{AttemptId, FieldId, NotificationId, NotificationKind, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
}

/// The control holding keyboard focus when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    ToggleButton,
    Field(FieldId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalEvent {
    ToggleBook,
    Back,
    Key {
        key: Key,
        focus: Option<FocusTarget>,
    },
    EmailEdited(String),
    PasswordEdited(String),
    RoleSelected(Option<Role>),
    Submit,
    AlternateAuth,
    RequestAccount,
    ContinueToDashboard,
    BackToLogin,
}

impl PortalEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PortalEvent::ToggleBook => "toggle_book",
            PortalEvent::Back => "back",
            PortalEvent::Key { key: Key::Escape, .. } => "key_escape",
            PortalEvent::Key { key: Key::Enter, .. } => "key_enter",
            PortalEvent::EmailEdited(_) => "email_edited",
            PortalEvent::PasswordEdited(_) => "password_edited",
            PortalEvent::RoleSelected(_) => "role_selected",
            PortalEvent::Submit => "submit",
            PortalEvent::AlternateAuth => "alternate_auth",
            PortalEvent::RequestAccount => "request_account",
            PortalEvent::ContinueToDashboard => "continue_to_dashboard",
            PortalEvent::BackToLogin => "back_to_login",
        }
    }
}

/// Observable transition, recorded in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    BookOpened,
    BookClosed,
    PagesRevealed,
    FocusRequested {
        field: FieldId,
    },
    FieldInvalid {
        field: FieldId,
        message: String,
    },
    FieldCleared {
        field: FieldId,
    },
    SubmitRejected {
        invalid: Vec<FieldId>,
    },
    AuthenticationStarted {
        attempt: AttemptId,
    },
    Authenticated {
        attempt: AttemptId,
    },
    DashboardPresented {
        attempt: AttemptId,
    },
    DashboardDismissed {
        attempt: AttemptId,
        continued: bool,
    },
    FormReset,
    NotificationShown {
        id: NotificationId,
        kind: NotificationKind,
        title: String,
        message: String,
    },
    NotificationLeaving {
        id: NotificationId,
    },
    NotificationRemoved {
        id: NotificationId,
    },
    AlternateAuthStarted,
    AlternateAuthFinished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalRecord {
    pub at_ms: u64,
    #[serde(flatten)]
    pub signal: Signal,
}

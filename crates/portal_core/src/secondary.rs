//! Placeholder actions next to the sign-in form. They only ever produce
//! notifications.

use crate::submission::ButtonView;

pub const ALT_AUTH_TITLE: &str = "Google Integration";
pub const ALT_AUTH_MESSAGE: &str =
    "Google Workspace authentication would be processed here with university SSO.";
pub const REGISTRATION_TITLE: &str = "Account Registration";
pub const REGISTRATION_MESSAGE: &str =
    "New student registration portal would open here with university verification process.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AltAuthState {
    #[default]
    Ready,
    Connecting {
        since_ms: u64,
    },
}

impl AltAuthState {
    pub fn is_connecting(self) -> bool {
        matches!(self, AltAuthState::Connecting { .. })
    }

    pub fn button(self) -> ButtonView {
        match self {
            AltAuthState::Ready => ButtonView {
                label: "Continue with Google",
                enabled: true,
                busy: false,
            },
            AltAuthState::Connecting { .. } => ButtonView {
                label: "Connecting...",
                enabled: false,
                busy: true,
            },
        }
    }
}

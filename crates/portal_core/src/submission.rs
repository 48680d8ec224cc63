//! Simulated authentication: the submit control's state machine and the
//! dashboard it leads to.

use serde::Serialize;
use shared::domain::{AttemptId, FieldId, Role};

use crate::validation::{display_name, welcome_name};

pub const REJECTED_TITLE: &str = "Authentication Failed";
pub const REJECTED_MESSAGE: &str = "Please verify all required fields are correctly completed.";
pub const AUTHENTICATED_TITLE: &str = "Authentication Successful";
pub const DASHBOARD_HEADING: &str = "Portal Access Granted";
pub const REDIRECT_TITLE: &str = "Redirecting...";
pub const REDIRECT_MESSAGE: &str = "Taking you to your personalized academic dashboard.";

const IDLE_LABEL: &str = "Access Portal";
const PENDING_LABEL: &str = "Authenticating...";
const AUTHENTICATED_LABEL: &str = "Access Granted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub id: AttemptId,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub started_at_ms: u64,
    pub result_pending: bool,
}

impl LoginAttempt {
    pub fn welcome_message(&self, brand_name: &str) -> String {
        format!("Welcome to {brand_name}, {}!", welcome_name(&self.email))
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView {
            attempt: self.id,
            heading: DASHBOARD_HEADING,
            display_name: display_name(&self.email),
            role: self.role,
            role_label: self.role.label(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Rejected,
    Pending(LoginAttempt),
    Authenticated(LoginAttempt),
}

impl SubmitState {
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmitState::Idle | SubmitState::Rejected)
    }

    pub fn attempt(&self) -> Option<&LoginAttempt> {
        match self {
            SubmitState::Pending(attempt) | SubmitState::Authenticated(attempt) => Some(attempt),
            SubmitState::Idle | SubmitState::Rejected => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmitState::Pending(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmitState::Idle => "idle",
            SubmitState::Rejected => "rejected",
            SubmitState::Pending(_) => "pending",
            SubmitState::Authenticated(_) => "authenticated",
        }
    }

    pub fn control(&self) -> ButtonView {
        match self {
            SubmitState::Idle | SubmitState::Rejected => ButtonView {
                label: IDLE_LABEL,
                enabled: true,
                busy: false,
            },
            SubmitState::Pending(_) => ButtonView {
                label: PENDING_LABEL,
                enabled: false,
                busy: true,
            },
            SubmitState::Authenticated(_) => ButtonView {
                label: AUTHENTICATED_LABEL,
                enabled: false,
                busy: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub attempt: AttemptId,
    pub heading: &'static str,
    pub display_name: String,
    pub role: Role,
    pub role_label: &'static str,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submit was not accepted in the current state.
    Ignored,
    Rejected(Vec<FieldId>),
    Pending(AttemptId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt() -> LoginAttempt {
        LoginAttempt {
            id: AttemptId(1),
            email: "a.student@parsu.edu.ph".into(),
            password: "secret1".into(),
            role: Role::Student,
            started_at_ms: 0,
            result_pending: true,
        }
    }

    #[test]
    fn control_is_disabled_only_while_an_attempt_exists() {
        assert!(SubmitState::Idle.control().enabled);
        assert!(SubmitState::Rejected.control().enabled);

        let pending = SubmitState::Pending(attempt()).control();
        assert!(!pending.enabled);
        assert!(pending.busy);
        assert_eq!(pending.label, "Authenticating...");

        assert!(!SubmitState::Authenticated(attempt()).control().enabled);
    }

    #[test]
    fn messages_use_the_email_local_part() {
        let attempt = attempt();
        assert_eq!(
            attempt.welcome_message("EduVault"),
            "Welcome to EduVault, A.STUDENT!"
        );

        let dashboard = attempt.dashboard();
        assert_eq!(dashboard.display_name, "A STUDENT");
        assert_eq!(dashboard.role_label, "Student");
        assert_eq!(dashboard.email, "a.student@parsu.edu.ph");
    }
}

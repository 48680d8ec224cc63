//! Human-readable rendering of a session transcript.

use portal_core::{DashboardView, Signal, SignalRecord};
use shared::domain::{FieldId, NotificationKind};

fn field_name(field: FieldId) -> &'static str {
    match field {
        FieldId::Email => "email",
        FieldId::Password => "password",
        FieldId::Role => "role",
    }
}

fn kind_name(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "success",
        NotificationKind::Error => "error",
        NotificationKind::Info => "info",
    }
}

pub fn describe(signal: &Signal) -> String {
    match signal {
        Signal::BookOpened => "portal opened".to_string(),
        Signal::BookClosed => "portal closed".to_string(),
        Signal::PagesRevealed => "pages revealed".to_string(),
        Signal::FocusRequested { field } => format!("focus moved to {}", field_name(*field)),
        Signal::FieldInvalid { field, message } => {
            format!("{} invalid: {message}", field_name(*field))
        }
        Signal::FieldCleared { field } => format!("{} error cleared", field_name(*field)),
        Signal::SubmitRejected { invalid } => {
            let fields: Vec<&str> = invalid.iter().map(|f| field_name(*f)).collect();
            format!("sign-in rejected ({})", fields.join(", "))
        }
        Signal::AuthenticationStarted { attempt } => {
            format!("authenticating (attempt {})", attempt.0)
        }
        Signal::Authenticated { attempt } => format!("authenticated (attempt {})", attempt.0),
        Signal::DashboardPresented { attempt } => {
            format!("dashboard presented (attempt {})", attempt.0)
        }
        Signal::DashboardDismissed { continued, .. } => {
            if *continued {
                "dashboard dismissed: continue".to_string()
            } else {
                "dashboard dismissed: back to login".to_string()
            }
        }
        Signal::FormReset => "form reset".to_string(),
        Signal::NotificationShown {
            id,
            kind,
            title,
            message,
        } => format!("[{} #{}] {title}: {message}", kind_name(*kind), id.0),
        Signal::NotificationLeaving { id } => format!("notification #{} leaving", id.0),
        Signal::NotificationRemoved { id } => format!("notification #{} removed", id.0),
        Signal::AlternateAuthStarted => "alternate sign-in connecting".to_string(),
        Signal::AlternateAuthFinished => "alternate sign-in finished".to_string(),
    }
}

pub fn format_record(record: &SignalRecord) -> String {
    format!("{:>6} ms  {}", record.at_ms, describe(&record.signal))
}

pub fn format_dashboard(dashboard: &DashboardView) -> String {
    format!(
        "{}: {} ({}) <{}>",
        dashboard.heading, dashboard.display_name, dashboard.role_label, dashboard.email
    )
}

#[cfg(test)]
mod tests {
    use shared::domain::NotificationId;

    use super::*;

    #[test]
    fn pads_timestamps_and_names_notification_kinds() {
        let record = SignalRecord {
            at_ms: 2_500,
            signal: Signal::NotificationShown {
                id: NotificationId(3),
                kind: NotificationKind::Success,
                title: "Authentication Successful".into(),
                message: "Welcome to EduVault, A.STUDENT!".into(),
            },
        };
        assert_eq!(
            format_record(&record),
            "  2500 ms  [success #3] Authentication Successful: Welcome to EduVault, A.STUDENT!"
        );
    }

    #[test]
    fn lists_rejected_fields_in_form_order() {
        let text = describe(&Signal::SubmitRejected {
            invalid: vec![FieldId::Email, FieldId::Role],
        });
        assert_eq!(text, "sign-in rejected (email, role)");
    }
}

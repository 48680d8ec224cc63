use thiserror::Error;

use crate::domain::FieldId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("University email address is required")]
    Missing,
    #[error("Please use your official @{domain} email address")]
    WrongDomain { domain: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password is required for authentication")]
    Missing,
    #[error("Password must be at least {min_len} characters for security")]
    TooShort { min_len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("Please specify your academic role for proper access")]
    Unselected,
}

/// A failed field check. `Display` is the message shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Role(#[from] RoleError),
}

impl FieldError {
    pub fn field(&self) -> FieldId {
        match self {
            FieldError::Email(_) => FieldId::Email,
            FieldError::Password(_) => FieldId::Password,
            FieldError::Role(_) => FieldId::Role,
        }
    }

    /// True when the field was left empty rather than filled in wrongly.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            FieldError::Email(EmailError::Missing)
                | FieldError::Password(PasswordError::Missing)
                | FieldError::Role(RoleError::Unselected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_display_the_user_facing_message() {
        let err = FieldError::from(EmailError::WrongDomain {
            domain: "parsu.edu.ph".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Please use your official @parsu.edu.ph email address"
        );
        assert_eq!(err.field(), FieldId::Email);
        assert!(!err.is_missing());
    }

    #[test]
    fn distinguishes_missing_from_malformed() {
        assert!(FieldError::from(PasswordError::Missing).is_missing());
        assert!(!FieldError::from(PasswordError::TooShort { min_len: 6 }).is_missing());
        assert!(FieldError::from(RoleError::Unselected).is_missing());
        assert_eq!(
            PasswordError::TooShort { min_len: 6 }.to_string(),
            "Password must be at least 6 characters for security"
        );
    }
}

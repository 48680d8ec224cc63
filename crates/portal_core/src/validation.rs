//! Field validators for the sign-in form.
//!
//! Each validator is a pure function of the current field value. The error
//! variants distinguish an empty field from a wrongly filled one.

use regex::Regex;
use shared::{
    domain::Role,
    error::{EmailError, PasswordError, RoleError},
};

/// Accepts only addresses on the institution's own domain.
#[derive(Debug, Clone)]
pub struct EmailPolicy {
    domain: String,
    pattern: Regex,
}

impl EmailPolicy {
    pub fn new(domain: &str) -> Result<Self, regex::Error> {
        let domain = domain.trim().to_string();
        let pattern = Regex::new(&format!(
            r"^[a-zA-Z0-9._%+-]+@{}$",
            regex::escape(&domain)
        ))?;
        Ok(Self { domain, pattern })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn validate(&self, raw: &str) -> Result<(), EmailError> {
        let email = raw.trim();
        if email.is_empty() {
            return Err(EmailError::Missing);
        }
        if !self.pattern.is_match(email) {
            return Err(EmailError::WrongDomain {
                domain: self.domain.clone(),
            });
        }
        Ok(())
    }
}

pub fn validate_password(raw: &str, min_len: usize) -> Result<(), PasswordError> {
    if raw.is_empty() {
        return Err(PasswordError::Missing);
    }
    if raw.chars().count() < min_len {
        return Err(PasswordError::TooShort { min_len });
    }
    Ok(())
}

pub fn validate_role(role: Option<Role>) -> Result<(), RoleError> {
    role.map(|_| ()).ok_or(RoleError::Unselected)
}

/// The part of an address before the first `@`.
pub fn local_part(email: &str) -> &str {
    let email = email.trim();
    email.split('@').next().unwrap_or(email)
}

/// Name used in the welcome notification: the local part, upper-cased.
pub fn welcome_name(email: &str) -> String {
    local_part(email).to_uppercase()
}

/// Name shown on the dashboard: the local part with `.` and `_` turned
/// into spaces, upper-cased.
pub fn display_name(email: &str) -> String {
    local_part(email).replace(['.', '_'], " ").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> EmailPolicy {
        EmailPolicy::new("parsu.edu.ph").expect("pattern")
    }

    #[test]
    fn accepts_institutional_addresses() {
        let policy = policy();
        assert_eq!(policy.validate("a.student@parsu.edu.ph"), Ok(()));
        assert_eq!(policy.validate("  j_doe+lab%1@parsu.edu.ph  "), Ok(()));
    }

    #[test]
    fn empty_email_is_missing() {
        let policy = policy();
        assert_eq!(policy.validate(""), Err(EmailError::Missing));
        assert_eq!(policy.validate("   "), Err(EmailError::Missing));
    }

    #[test]
    fn foreign_or_malformed_email_names_the_domain() {
        let policy = policy();
        for email in [
            "bad@example.com",
            "student@parsu.edu.ph.evil.com",
            "student@parsuXeduXph",
            "@parsu.edu.ph",
            "two words@parsu.edu.ph",
            "student@PARSU.EDU.PH",
            "no-at-sign",
        ] {
            let err = policy.validate(email).expect_err(email);
            assert!(
                err.to_string()
                    .contains("official @parsu.edu.ph email address"),
                "{email}: {err}"
            );
        }
    }

    #[test]
    fn domain_is_matched_literally() {
        let policy = EmailPolicy::new("uni.example").expect("pattern");
        assert_eq!(policy.validate("x@uni.example"), Ok(()));
        assert!(policy.validate("x@uniXexample").is_err());
        assert!(policy.validate("x@parsu.edu.ph").is_err());
    }

    #[test]
    fn password_rules() {
        assert_eq!(validate_password("", 6), Err(PasswordError::Missing));
        for short in ["a", "12345", "abcde"] {
            assert_eq!(
                validate_password(short, 6),
                Err(PasswordError::TooShort { min_len: 6 })
            );
        }
        assert_eq!(validate_password("secret", 6), Ok(()));
        assert_eq!(validate_password("secret1", 6), Ok(()));
        assert_eq!(validate_password("      ", 6), Ok(()));
        assert_eq!(validate_password("ñandú!", 6), Ok(()));
    }

    #[test]
    fn role_is_required() {
        assert_eq!(validate_role(None), Err(RoleError::Unselected));
        for role in Role::ALL {
            assert_eq!(validate_role(Some(role)), Ok(()));
        }
    }

    #[test]
    fn derives_names_from_local_part() {
        assert_eq!(welcome_name("a.student@parsu.edu.ph"), "A.STUDENT");
        assert_eq!(display_name("a.student@parsu.edu.ph"), "A STUDENT");
        assert_eq!(display_name("juan_dela.cruz@parsu.edu.ph"), "JUAN DELA CRUZ");
        assert_eq!(local_part("plain"), "plain");
    }
}

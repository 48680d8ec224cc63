use shared::{
    domain::{FieldId, Role},
    error::FieldError,
};

/// One input of the sign-in form together with its validation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField<V> {
    value: V,
    error: Option<FieldError>,
    shake_until_ms: Option<u64>,
}

impl<V: Default> FormField<V> {
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn set_value(&mut self, value: V) {
        self.value = value;
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Records a validation outcome. A failure restarts the shake animation.
    pub fn record(&mut self, outcome: Result<(), FieldError>, now_ms: u64, shake_ms: u64) {
        match outcome {
            Ok(()) => self.clear_error(),
            Err(err) => {
                self.error = Some(err);
                self.shake_until_ms = Some(now_ms.saturating_add(shake_ms));
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.shake_until_ms = None;
    }

    pub fn is_shaking(&self, now_ms: u64) -> bool {
        self.shake_until_ms.is_some_and(|until| now_ms < until)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: FormField<String>,
    pub password: FormField<String>,
    pub role: FormField<Option<Role>>,
}

impl LoginForm {
    pub fn error(&self, field: FieldId) -> Option<&FieldError> {
        match field {
            FieldId::Email => self.email.error(),
            FieldId::Password => self.password.error(),
            FieldId::Role => self.role.error(),
        }
    }

    pub fn invalid_fields(&self) -> Vec<FieldId> {
        [FieldId::Email, FieldId::Password, FieldId::Role]
            .into_iter()
            .filter(|field| self.error(*field).is_some())
            .collect()
    }

    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        self.email.reset();
        self.password.reset();
        self.role.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::{EmailError, RoleError};

    #[test]
    fn failure_sets_error_and_shakes_until_deadline() {
        let mut field = FormField::<String>::default();
        field.set_value("bad@example.com".into());
        field.record(
            Err(EmailError::WrongDomain {
                domain: "parsu.edu.ph".into(),
            }
            .into()),
            1_000,
            600,
        );

        assert!(!field.is_valid());
        assert!(field.is_shaking(1_599));
        assert!(!field.is_shaking(1_600));

        field.record(Ok(()), 2_000, 600);
        assert!(field.is_valid());
        assert!(!field.is_shaking(2_000));
        assert_eq!(field.value(), "bad@example.com");
    }

    #[test]
    fn reset_returns_to_pristine() {
        let mut form = LoginForm::default();
        form.email.set_value("x".into());
        form.role.record(Err(RoleError::Unselected.into()), 0, 600);
        assert_eq!(form.invalid_fields(), vec![FieldId::Role]);

        form.reset();
        assert!(form.is_pristine());
    }
}

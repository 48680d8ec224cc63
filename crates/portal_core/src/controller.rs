//! The portal's single view controller.
//!
//! All state lives in [`PortalController`]. Hosts feed it events and clock
//! ticks; it never reads a clock of its own. Every operation takes `now_ms`
//! from a monotonic host clock, first fires any timer that became due, then
//! applies the operation.

use shared::{
    domain::{AttemptId, FieldId, NotificationId, NotificationKind, Role},
    error::FieldError,
};

use crate::{
    book::{BookState, BookTransition},
    config::{PortalSettings, SettingsError},
    event::{FocusTarget, Key, PortalEvent, Signal, SignalRecord},
    form::{FormField, LoginForm},
    notification::{NotificationCenter, NotificationPhase},
    scheduler::Scheduler,
    secondary::{
        AltAuthState, ALT_AUTH_MESSAGE, ALT_AUTH_TITLE, REGISTRATION_MESSAGE,
        REGISTRATION_TITLE,
    },
    submission::{
        DashboardView, LoginAttempt, SubmitOutcome, SubmitState, AUTHENTICATED_TITLE,
        REDIRECT_MESSAGE, REDIRECT_TITLE, REJECTED_MESSAGE, REJECTED_TITLE,
    },
    validation::{validate_password, validate_role, EmailPolicy},
    view::{BookView, FieldView, NotificationView, PortalView, RoleFieldView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Task {
    RevealPages,
    FocusFirstField,
    Validate(FieldId),
    CompleteAuthentication(AttemptId),
    PresentDashboard(AttemptId),
    RetireNotification(NotificationId),
    RemoveNotification(NotificationId),
    FinishAlternateAuth,
}

impl Task {
    fn name(&self) -> &'static str {
        match self {
            Task::RevealPages => "reveal_pages",
            Task::FocusFirstField => "focus_first_field",
            Task::Validate(_) => "validate_field",
            Task::CompleteAuthentication(_) => "complete_authentication",
            Task::PresentDashboard(_) => "present_dashboard",
            Task::RetireNotification(_) => "retire_notification",
            Task::RemoveNotification(_) => "remove_notification",
            Task::FinishAlternateAuth => "finish_alternate_auth",
        }
    }
}

#[derive(Debug)]
pub struct PortalController {
    settings: PortalSettings,
    email_policy: EmailPolicy,

    book: BookState,
    pages_revealed: bool,
    focus_request: Option<FieldId>,

    form: LoginForm,
    submit: SubmitState,
    next_attempt_id: u64,
    dashboard: Option<DashboardView>,
    alt_auth: AltAuthState,

    notifications: NotificationCenter,
    scheduler: Scheduler<Task>,

    now_ms: u64,
    signals: Vec<SignalRecord>,
}

impl PortalController {
    pub fn new(settings: PortalSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let email_policy = EmailPolicy::new(&settings.institution_domain).map_err(|source| {
            SettingsError::EmailPattern {
                domain: settings.institution_domain.clone(),
                source,
            }
        })?;

        Ok(Self {
            notifications: NotificationCenter::new(settings.max_visible_notifications),
            settings,
            email_policy,
            book: BookState::Closed,
            pages_revealed: false,
            focus_request: None,
            form: LoginForm::default(),
            submit: SubmitState::Idle,
            next_attempt_id: 1,
            dashboard: None,
            alt_auth: AltAuthState::Ready,
            scheduler: Scheduler::new(),
            now_ms: 0,
            signals: Vec::new(),
        })
    }

    // ---------- accessors ----------

    pub fn settings(&self) -> &PortalSettings {
        &self.settings
    }

    pub fn book_state(&self) -> BookState {
        self.book
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit
    }

    pub fn dashboard(&self) -> Option<&DashboardView> {
        self.dashboard.as_ref()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn alt_auth_state(&self) -> AltAuthState {
        self.alt_auth
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.scheduler.is_empty()
    }

    pub fn has_pending_validation(&self, field: FieldId) -> bool {
        self.scheduler.is_scheduled(&Task::Validate(field))
    }

    /// Yields a pending focus move once.
    pub fn take_focus_request(&mut self) -> Option<FieldId> {
        self.focus_request.take()
    }

    pub fn signals(&self) -> &[SignalRecord] {
        &self.signals
    }

    pub fn drain_signals(&mut self) -> Vec<SignalRecord> {
        std::mem::take(&mut self.signals)
    }

    // ---------- driving ----------

    /// Fires every timer due at or before `now_ms`, in deadline order.
    /// Returns how many fired.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.now_ms = self.now_ms.max(now_ms);
        let mut fired = 0;
        while let Some((due_ms, task)) = self.scheduler.pop_due(self.now_ms) {
            tracing::debug!(task = task.name(), due_ms, "portal timer fired");
            self.run_task(task, due_ms);
            fired += 1;
        }
        fired
    }

    pub fn handle(&mut self, event: PortalEvent, now_ms: u64) {
        let now = self.sync(now_ms);
        tracing::debug!(event = event.name(), now_ms = now, "portal event");
        match event {
            PortalEvent::ToggleBook => self.toggle_book_at(now),
            PortalEvent::Back => self.set_book(BookState::Closed, now),
            PortalEvent::Key { key, focus } => self.key_at(key, focus, now),
            PortalEvent::EmailEdited(value) => self.edit_email_at(value, now),
            PortalEvent::PasswordEdited(value) => self.edit_password_at(value, now),
            PortalEvent::RoleSelected(role) => self.select_role_at(role, now),
            PortalEvent::Submit => {
                self.submit_at(now);
            }
            PortalEvent::AlternateAuth => self.alternate_auth_at(now),
            PortalEvent::RequestAccount => self.request_account_at(now),
            PortalEvent::ContinueToDashboard => self.continue_to_dashboard_at(now),
            PortalEvent::BackToLogin => self.back_to_login_at(now),
        }
    }

    // ---------- operations ----------

    pub fn toggle_book(&mut self, now_ms: u64) {
        let now = self.sync(now_ms);
        self.toggle_book_at(now);
    }

    pub fn open_book(&mut self, now_ms: u64) {
        let now = self.sync(now_ms);
        self.set_book(BookState::Open, now);
    }

    pub fn close_book(&mut self, now_ms: u64) {
        let now = self.sync(now_ms);
        self.set_book(BookState::Closed, now);
    }

    pub fn edit_email(&mut self, value: impl Into<String>, now_ms: u64) {
        let now = self.sync(now_ms);
        self.edit_email_at(value.into(), now);
    }

    pub fn edit_password(&mut self, value: impl Into<String>, now_ms: u64) {
        let now = self.sync(now_ms);
        self.edit_password_at(value.into(), now);
    }

    pub fn select_role(&mut self, role: Option<Role>, now_ms: u64) {
        let now = self.sync(now_ms);
        self.select_role_at(role, now);
    }

    pub fn submit(&mut self, now_ms: u64) -> SubmitOutcome {
        let now = self.sync(now_ms);
        self.submit_at(now)
    }

    pub fn continue_to_dashboard(&mut self, now_ms: u64) {
        let now = self.sync(now_ms);
        self.continue_to_dashboard_at(now);
    }

    pub fn back_to_login(&mut self, now_ms: u64) {
        let now = self.sync(now_ms);
        self.back_to_login_at(now);
    }

    pub fn reset_login_form(&mut self, now_ms: u64) {
        let now = self.sync(now_ms);
        self.reset_login_form_at(now);
    }

    pub fn alternate_auth(&mut self, now_ms: u64) {
        let now = self.sync(now_ms);
        self.alternate_auth_at(now);
    }

    pub fn request_account(&mut self, now_ms: u64) {
        let now = self.sync(now_ms);
        self.request_account_at(now);
    }

    pub fn present(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now_ms: u64,
    ) -> NotificationId {
        let now = self.sync(now_ms);
        self.present_at(kind, title, message, now)
    }

    pub fn view(&self) -> PortalView {
        let now = self.now_ms;
        let is_open = self.book.is_open();
        PortalView {
            brand_name: self.settings.brand_name.clone(),
            institution_domain: self.email_policy.domain().to_string(),
            book: BookView {
                is_open,
                toggle_label: self.book.toggle_label(),
                back_visible: is_open,
                content_visible: is_open,
                pages_revealed: self.pages_revealed,
            },
            email: text_field_view(&self.form.email, now),
            password: text_field_view(&self.form.password, now),
            role: RoleFieldView {
                selected: *self.form.role.value(),
                options: Role::ALL,
                error: self.form.role.error().map(ToString::to_string),
                shaking: self.form.role.is_shaking(now),
            },
            submit: self.submit.control(),
            alternate_auth: self.alt_auth.button(),
            notifications: self
                .notifications
                .stack()
                .enumerate()
                .map(|(slot, n)| NotificationView {
                    id: n.id,
                    kind: n.kind,
                    title: n.title.clone(),
                    message: n.message.clone(),
                    slot,
                    leaving: n.phase == NotificationPhase::Leaving,
                    created_at_ms: n.created_at_ms,
                })
                .collect(),
            dashboard: self.dashboard.clone(),
        }
    }

    // ---------- internals ----------

    fn sync(&mut self, now_ms: u64) -> u64 {
        self.tick(now_ms);
        self.now_ms
    }

    fn record(&mut self, at_ms: u64, signal: Signal) {
        self.signals.push(SignalRecord { at_ms, signal });
    }

    fn accepts_form_input(&self) -> bool {
        self.book.is_open() && self.dashboard.is_none()
    }

    fn run_task(&mut self, task: Task, at: u64) {
        match task {
            Task::RevealPages => {
                if self.book.is_open() {
                    self.pages_revealed = true;
                    self.record(at, Signal::PagesRevealed);
                }
            }
            Task::FocusFirstField => {
                if self.book.is_open() {
                    self.focus_request = Some(FieldId::Email);
                    self.record(
                        at,
                        Signal::FocusRequested {
                            field: FieldId::Email,
                        },
                    );
                }
            }
            Task::Validate(field) => {
                self.validate_field(field, at);
            }
            Task::CompleteAuthentication(id) => self.complete_authentication(id, at),
            Task::PresentDashboard(id) => self.present_dashboard(id, at),
            Task::RetireNotification(id) => self.retire_notification(id, at),
            Task::RemoveNotification(id) => {
                if self.notifications.remove(id).is_some() {
                    self.record(at, Signal::NotificationRemoved { id });
                }
            }
            Task::FinishAlternateAuth => self.finish_alternate_auth(at),
        }
    }

    fn toggle_book_at(&mut self, now: u64) {
        self.set_book(self.book.toggled(), now);
    }

    fn set_book(&mut self, target: BookState, now: u64) {
        match self.book.transition(target) {
            None => tracing::debug!(state = ?self.book, "book already in requested state"),
            Some(BookTransition::Opened) => {
                self.book = BookState::Open;
                let timings = self.settings.timings;
                self.scheduler
                    .schedule(Task::RevealPages, due(now, timings.pages_reveal_delay_ms));
                self.scheduler
                    .schedule(Task::FocusFirstField, due(now, timings.focus_delay_ms));
                tracing::info!("portal opened");
                self.record(now, Signal::BookOpened);
            }
            Some(BookTransition::Closed) => {
                self.book = BookState::Closed;
                self.pages_revealed = false;
                self.focus_request = None;
                self.scheduler.cancel(&Task::RevealPages);
                self.scheduler.cancel(&Task::FocusFirstField);
                tracing::info!("portal closed");
                self.record(now, Signal::BookClosed);
                self.reset_login_form_at(now);
            }
        }
    }

    fn key_at(&mut self, key: Key, focus: Option<FocusTarget>, now: u64) {
        match (key, focus) {
            (Key::Escape, _) => self.set_book(BookState::Closed, now),
            (Key::Enter, Some(FocusTarget::ToggleButton)) => self.toggle_book_at(now),
            (Key::Enter, Some(FocusTarget::Field(FieldId::Email | FieldId::Password))) => {
                self.submit_at(now);
            }
            // Enter on the role selector belongs to the selector.
            (Key::Enter, Some(FocusTarget::Field(FieldId::Role)) | None) => {}
        }
    }

    fn edit_email_at(&mut self, value: String, now: u64) {
        if !self.accepts_form_input() {
            tracing::warn!("email edit ignored while the form is unavailable");
            return;
        }
        let empty = value.trim().is_empty();
        self.form.email.set_value(value);
        self.debounce_validation(FieldId::Email, empty, now);
    }

    fn edit_password_at(&mut self, value: String, now: u64) {
        if !self.accepts_form_input() {
            tracing::warn!("password edit ignored while the form is unavailable");
            return;
        }
        let empty = value.is_empty();
        self.form.password.set_value(value);
        self.debounce_validation(FieldId::Password, empty, now);
    }

    fn debounce_validation(&mut self, field: FieldId, empty: bool, now: u64) {
        let task = Task::Validate(field);
        self.scheduler.cancel(&task);
        if empty {
            self.clear_field_error(field, now);
        } else {
            self.scheduler
                .schedule(task, due(now, self.settings.timings.debounce_ms));
        }
    }

    fn select_role_at(&mut self, role: Option<Role>, now: u64) {
        if !self.accepts_form_input() {
            tracing::warn!("role change ignored while the form is unavailable");
            return;
        }
        self.form.role.set_value(role);
        self.validate_field(FieldId::Role, now);
    }

    fn clear_field_error(&mut self, field: FieldId, now: u64) {
        let had_error = self.form.error(field).is_some();
        match field {
            FieldId::Email => self.form.email.clear_error(),
            FieldId::Password => self.form.password.clear_error(),
            FieldId::Role => self.form.role.clear_error(),
        }
        if had_error {
            self.record(now, Signal::FieldCleared { field });
        }
    }

    /// Runs one validator against the field's current value and records the
    /// outcome on the field. Returns whether it passed.
    fn validate_field(&mut self, field: FieldId, now: u64) -> bool {
        let outcome: Result<(), FieldError> = match field {
            FieldId::Email => self
                .email_policy
                .validate(self.form.email.value())
                .map_err(FieldError::from),
            FieldId::Password => {
                validate_password(self.form.password.value(), self.settings.min_password_len)
                    .map_err(FieldError::from)
            }
            FieldId::Role => validate_role(*self.form.role.value()).map_err(FieldError::from),
        };

        let passed = outcome.is_ok();
        match &outcome {
            Err(err) => {
                tracing::debug!(field = ?field, error = %err, "field invalid");
                self.record(
                    now,
                    Signal::FieldInvalid {
                        field,
                        message: err.to_string(),
                    },
                );
            }
            Ok(()) if self.form.error(field).is_some() => {
                self.record(now, Signal::FieldCleared { field });
            }
            Ok(()) => {}
        }

        let shake_ms = self.settings.timings.shake_duration_ms;
        match field {
            FieldId::Email => self.form.email.record(outcome, now, shake_ms),
            FieldId::Password => self.form.password.record(outcome, now, shake_ms),
            FieldId::Role => self.form.role.record(outcome, now, shake_ms),
        }
        passed
    }

    fn submit_at(&mut self, now: u64) -> SubmitOutcome {
        if !self.book.is_open() {
            tracing::warn!("submit ignored: portal is closed");
            return SubmitOutcome::Ignored;
        }
        if self.dashboard.is_some() || !self.submit.accepts_submit() {
            tracing::warn!(state = self.submit.name(), "submit ignored");
            return SubmitOutcome::Ignored;
        }

        // Validators run synchronously below; pending debounced runs are stale.
        self.scheduler
            .cancel_where(|task| matches!(task, Task::Validate(_)));

        let email_ok = self.validate_field(FieldId::Email, now);
        let password_ok = self.validate_field(FieldId::Password, now);
        let role_ok = self.validate_field(FieldId::Role, now);

        match (email_ok && password_ok && role_ok, *self.form.role.value()) {
            (true, Some(role)) => {
                let id = AttemptId(self.next_attempt_id);
                self.next_attempt_id += 1;
                self.submit = SubmitState::Pending(LoginAttempt {
                    id,
                    email: self.form.email.value().trim().to_string(),
                    password: self.form.password.value().clone(),
                    role,
                    started_at_ms: now,
                    result_pending: true,
                });
                self.scheduler.schedule(
                    Task::CompleteAuthentication(id),
                    due(now, self.settings.timings.auth_latency_ms),
                );
                tracing::info!(attempt = id.0, role = role.label(), "authentication started");
                self.record(now, Signal::AuthenticationStarted { attempt: id });
                SubmitOutcome::Pending(id)
            }
            _ => {
                let invalid = self.form.invalid_fields();
                self.submit = SubmitState::Rejected;
                tracing::warn!(invalid = ?invalid, "sign-in rejected by validation");
                self.record(
                    now,
                    Signal::SubmitRejected {
                        invalid: invalid.clone(),
                    },
                );
                self.present_at(NotificationKind::Error, REJECTED_TITLE, REJECTED_MESSAGE, now);
                SubmitOutcome::Rejected(invalid)
            }
        }
    }

    fn complete_authentication(&mut self, id: AttemptId, at: u64) {
        let attempt = match &mut self.submit {
            SubmitState::Pending(attempt) if attempt.id == id => {
                attempt.result_pending = false;
                attempt.clone()
            }
            _ => {
                tracing::debug!(attempt = id.0, "stale authentication timer ignored");
                return;
            }
        };

        let welcome = attempt.welcome_message(&self.settings.brand_name);
        self.submit = SubmitState::Authenticated(attempt);
        tracing::info!(attempt = id.0, "authentication completed");
        self.record(at, Signal::Authenticated { attempt: id });
        self.present_at(NotificationKind::Success, AUTHENTICATED_TITLE, welcome, at);
        self.scheduler.schedule(
            Task::PresentDashboard(id),
            due(at, self.settings.timings.dashboard_delay_ms),
        );
    }

    fn present_dashboard(&mut self, id: AttemptId, at: u64) {
        let SubmitState::Authenticated(attempt) = &self.submit else {
            return;
        };
        if attempt.id != id || self.dashboard.is_some() {
            return;
        }
        self.dashboard = Some(attempt.dashboard());
        tracing::info!(attempt = id.0, "dashboard presented");
        self.record(at, Signal::DashboardPresented { attempt: id });
    }

    fn continue_to_dashboard_at(&mut self, now: u64) {
        let Some(dashboard) = self.dashboard.take() else {
            tracing::warn!("continue ignored: no dashboard shown");
            return;
        };
        self.record(
            now,
            Signal::DashboardDismissed {
                attempt: dashboard.attempt,
                continued: true,
            },
        );
        self.present_at(NotificationKind::Info, REDIRECT_TITLE, REDIRECT_MESSAGE, now);
    }

    fn back_to_login_at(&mut self, now: u64) {
        let Some(dashboard) = self.dashboard.take() else {
            tracing::warn!("back to login ignored: no dashboard shown");
            return;
        };
        self.record(
            now,
            Signal::DashboardDismissed {
                attempt: dashboard.attempt,
                continued: false,
            },
        );
        self.reset_login_form_at(now);
    }

    fn reset_login_form_at(&mut self, now: u64) {
        self.scheduler
            .cancel_where(|task| matches!(task, Task::Validate(_)));
        if let Some(id) = self.submit.attempt().map(|attempt| attempt.id) {
            self.scheduler.cancel(&Task::CompleteAuthentication(id));
            self.scheduler.cancel(&Task::PresentDashboard(id));
        }
        self.form.reset();
        self.submit = SubmitState::Idle;
        self.dashboard = None;
        self.record(now, Signal::FormReset);
    }

    fn alternate_auth_at(&mut self, now: u64) {
        if !self.accepts_form_input() || self.alt_auth.is_connecting() {
            tracing::warn!("alternate sign-in ignored");
            return;
        }
        self.alt_auth = AltAuthState::Connecting { since_ms: now };
        self.scheduler.schedule(
            Task::FinishAlternateAuth,
            due(now, self.settings.timings.alt_auth_latency_ms),
        );
        self.record(now, Signal::AlternateAuthStarted);
    }

    fn finish_alternate_auth(&mut self, at: u64) {
        if !self.alt_auth.is_connecting() {
            return;
        }
        self.alt_auth = AltAuthState::Ready;
        self.record(at, Signal::AlternateAuthFinished);
        self.present_at(NotificationKind::Success, ALT_AUTH_TITLE, ALT_AUTH_MESSAGE, at);
    }

    fn request_account_at(&mut self, now: u64) {
        if !self.accepts_form_input() {
            tracing::warn!("account request ignored while the form is unavailable");
            return;
        }
        self.present_at(
            NotificationKind::Info,
            REGISTRATION_TITLE,
            REGISTRATION_MESSAGE,
            now,
        );
    }

    fn present_at(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        at: u64,
    ) -> NotificationId {
        let title = title.into();
        let message = message.into();
        let id = self
            .notifications
            .present(kind, title.clone(), message.clone(), at);
        self.scheduler.schedule(
            Task::RetireNotification(id),
            due(at, self.settings.timings.notification_display_ms),
        );
        tracing::debug!(id = id.0, kind = ?kind, %title, "notification shown");
        self.record(
            at,
            Signal::NotificationShown {
                id,
                kind,
                title,
                message,
            },
        );

        for overflowed in self.notifications.overflow() {
            self.retire_notification(overflowed, at);
        }
        id
    }

    fn retire_notification(&mut self, id: NotificationId, at: u64) {
        self.scheduler.cancel(&Task::RetireNotification(id));
        if self.notifications.begin_exit(id) {
            self.scheduler.schedule(
                Task::RemoveNotification(id),
                due(at, self.settings.timings.notification_exit_ms),
            );
            self.record(at, Signal::NotificationLeaving { id });
        }
    }
}

/// Deadline `delay_ms` after `now_ms`. Saturates so oversized configured
/// delays mean "never" instead of overflowing.
fn due(now_ms: u64, delay_ms: u64) -> u64 {
    now_ms.saturating_add(delay_ms)
}

fn text_field_view(field: &FormField<String>, now_ms: u64) -> FieldView {
    FieldView {
        value: field.value().clone(),
        error: field.error().map(ToString::to_string),
        shaking: field.is_shaking(now_ms),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

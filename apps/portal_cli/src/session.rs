//! Plays one scripted sign-in against the portal controller.

use std::time::Duration;

use async_trait::async_trait;
use portal_core::{DashboardView, PortalController, PortalEvent, SignalRecord, SubmitOutcome};
use serde::Serialize;
use shared::domain::Role;

/// Time source for a session. The controller never sleeps; the clock decides
/// how long it takes to reach the next deadline.
#[async_trait]
pub trait SessionClock: Send {
    fn now_ms(&self) -> u64;

    async fn advance_to(&mut self, deadline_ms: u64);
}

/// Jumps straight to each deadline.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now_ms: u64,
}

#[async_trait]
impl SessionClock for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    async fn advance_to(&mut self, deadline_ms: u64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }
}

/// Waits out every delay on the tokio timer.
#[derive(Debug)]
pub struct RealtimeClock {
    started: tokio::time::Instant,
}

impl RealtimeClock {
    pub fn start() -> Self {
        Self {
            started: tokio::time::Instant::now(),
        }
    }
}

#[async_trait]
impl SessionClock for RealtimeClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    async fn advance_to(&mut self, deadline_ms: u64) {
        tokio::time::sleep_until(self.started + Duration::from_millis(deadline_ms)).await;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AfterDashboard {
    #[default]
    Continue,
    Back,
}

#[derive(Debug, Clone)]
pub struct SessionScript {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub after_dashboard: AfterDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    DashboardReached,
    Rejected,
    Abandoned,
}

impl SessionOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            SessionOutcome::DashboardReached => 0,
            SessionOutcome::Abandoned => 1,
            SessionOutcome::Rejected => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub dashboard: Option<DashboardView>,
    pub transcript: Vec<SignalRecord>,
}

/// Opens the book, fills the form once focus lands on it, submits, and
/// follows a successful attempt through the dashboard. Pending timers are
/// run out before returning so the transcript ends with every notification
/// removed.
pub async fn run_session<C: SessionClock>(
    portal: &mut PortalController,
    clock: &mut C,
    script: &SessionScript,
) -> SessionReport {
    portal.handle(PortalEvent::ToggleBook, clock.now_ms());
    let mut focused = false;
    settle_until(portal, clock, |portal| {
        focused = focused || portal.take_focus_request().is_some();
        focused
    })
    .await;

    let now = clock.now_ms();
    portal.handle(PortalEvent::EmailEdited(script.email.clone()), now);
    portal.handle(PortalEvent::PasswordEdited(script.password.clone()), now);
    portal.handle(PortalEvent::RoleSelected(script.role), now);

    let mut dashboard = None;
    let outcome = match portal.submit(clock.now_ms()) {
        SubmitOutcome::Rejected(invalid) => {
            tracing::info!(?invalid, "sign-in rejected");
            SessionOutcome::Rejected
        }
        SubmitOutcome::Ignored => SessionOutcome::Abandoned,
        SubmitOutcome::Pending(attempt) => {
            tracing::info!(attempt = attempt.0, "waiting for authentication");
            settle_until(portal, clock, |portal| portal.dashboard().is_some()).await;
            dashboard = portal.dashboard().cloned();
            match (dashboard.is_some(), script.after_dashboard) {
                (false, _) => SessionOutcome::Abandoned,
                (true, AfterDashboard::Continue) => {
                    portal.continue_to_dashboard(clock.now_ms());
                    SessionOutcome::DashboardReached
                }
                (true, AfterDashboard::Back) => {
                    portal.back_to_login(clock.now_ms());
                    SessionOutcome::DashboardReached
                }
            }
        }
    };

    settle_until(portal, clock, |_| false).await;
    SessionReport {
        outcome,
        dashboard,
        transcript: portal.drain_signals(),
    }
}

/// Advances through deadlines until `done` holds or nothing is scheduled.
async fn settle_until<C, F>(portal: &mut PortalController, clock: &mut C, mut done: F)
where
    C: SessionClock,
    F: FnMut(&mut PortalController) -> bool,
{
    while !done(portal) {
        let Some(deadline) = portal.next_deadline() else {
            break;
        };
        clock.advance_to(deadline).await;
        portal.tick(clock.now_ms());
    }
}

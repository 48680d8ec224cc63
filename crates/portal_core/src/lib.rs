//! Headless core of the academic portal landing screen: the book, the
//! sign-in form and its validators, simulated authentication, and the
//! notification stack, all driven by an external millisecond clock.

pub mod book;
pub mod config;
pub mod controller;
pub mod event;
pub mod form;
pub mod notification;
pub mod scheduler;
pub mod secondary;
pub mod submission;
pub mod validation;
pub mod view;

pub use book::BookState;
pub use config::{load_settings, PortalSettings, SettingsError, Timings};
pub use controller::PortalController;
pub use event::{FocusTarget, Key, PortalEvent, Signal, SignalRecord};
pub use submission::{DashboardView, SubmitOutcome, SubmitState};
pub use view::PortalView;

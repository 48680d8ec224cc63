//! UI layer for the portal window: app shell, book pages, notifications and theme.

pub mod app;
pub mod theme;

pub use app::PortalGuiApp;

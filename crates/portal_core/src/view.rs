//! Plain-data description of what the portal should look like right now.
//! Hosts draw from this and nothing else.

use serde::Serialize;
use shared::domain::{NotificationId, NotificationKind, Role};

use crate::submission::{ButtonView, DashboardView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortalView {
    pub brand_name: String,
    pub institution_domain: String,
    pub book: BookView,
    pub email: FieldView,
    pub password: FieldView,
    pub role: RoleFieldView,
    pub submit: ButtonView,
    pub alternate_auth: ButtonView,
    pub notifications: Vec<NotificationView>,
    pub dashboard: Option<DashboardView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub is_open: bool,
    pub toggle_label: &'static str,
    pub back_visible: bool,
    pub content_visible: bool,
    pub pages_revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub value: String,
    pub error: Option<String>,
    pub shaking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleFieldView {
    pub selected: Option<Role>,
    pub options: [Role; 5],
    pub error: Option<String>,
    pub shaking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// 0 is the top of the stack.
    pub slot: usize,
    pub leaving: bool,
    pub created_at_ms: u64,
}

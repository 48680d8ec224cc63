//! Academic navy/gold palette.

use shared::domain::NotificationKind;

pub const NAVY: egui::Color32 = egui::Color32::from_rgb(26, 43, 76);
pub const NAVY_DEEP: egui::Color32 = egui::Color32::from_rgb(15, 27, 51);
pub const GOLD: egui::Color32 = egui::Color32::from_rgb(212, 175, 55);
pub const CREAM: egui::Color32 = egui::Color32::from_rgb(250, 246, 236);
pub const INK: egui::Color32 = egui::Color32::from_rgb(45, 55, 72);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(197, 48, 48);

pub fn kind_color(kind: NotificationKind) -> egui::Color32 {
    match kind {
        NotificationKind::Success => egui::Color32::from_rgb(72, 187, 120),
        NotificationKind::Error => egui::Color32::from_rgb(229, 62, 62),
        NotificationKind::Info => egui::Color32::from_rgb(66, 153, 225),
    }
}

pub fn kind_glyph(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✔",
        NotificationKind::Error => "✖",
        NotificationKind::Info => "ℹ",
    }
}

pub fn portal_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = NAVY_DEEP;
    visuals.window_fill = CREAM;
    visuals.extreme_bg_color = egui::Color32::WHITE;
    visuals.override_text_color = Some(INK);
    visuals.selection.bg_fill = GOLD.gamma_multiply(0.6);
    visuals.hyperlink_color = NAVY;
    visuals.widgets.inactive.bg_fill = NAVY;
    visuals.widgets.inactive.weak_bg_fill = NAVY;
    visuals.widgets.hovered.bg_fill = GOLD;
    visuals.widgets.hovered.weak_bg_fill = GOLD;
    visuals.widgets.active.bg_fill = GOLD.gamma_multiply(0.85);
    visuals.window_corner_radius = egui::CornerRadius::same(12);
    visuals.menu_corner_radius = egui::CornerRadius::same(8);
    visuals
}

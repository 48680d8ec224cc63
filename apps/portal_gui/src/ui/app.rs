use std::time::{Duration, Instant};

use chrono::Local;
use eframe::egui;
use portal_core::{
    view::{FieldView, NotificationView},
    DashboardView, PortalController, PortalEvent, PortalView,
};
use shared::domain::{FieldId, NotificationKind, Role};

use crate::controller::{events::FrameKeys, orchestration::dispatch_portal_events};
use crate::ui::theme;

const CARD_MIN_WIDTH: f32 = 640.0;
const CARD_MAX_WIDTH: f32 = 920.0;
const NOTIFICATION_WIDTH: f32 = 320.0;
const NOTIFICATION_SPACING: f32 = 88.0;
const IDLE_REPAINT: Duration = Duration::from_millis(500);
const ANIMATION_REPAINT: Duration = Duration::from_millis(16);

pub struct PortalGuiApp {
    portal: PortalController,
    clock: Instant,
    startup_notice: Option<String>,
    visuals_applied: bool,
}

impl PortalGuiApp {
    pub fn new(portal: PortalController, startup_notice: Option<String>) -> Self {
        Self {
            portal,
            clock: Instant::now(),
            startup_notice,
            visuals_applied: false,
        }
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.clock.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn apply_visuals_if_needed(&mut self, ctx: &egui::Context) {
        if self.visuals_applied {
            return;
        }
        let mut style = (*ctx.style()).clone();
        style.visuals = theme::portal_visuals();
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.interact_size = egui::vec2(40.0, 30.0);
        ctx.set_style(style);
        self.visuals_applied = true;
    }

    fn show_startup_notice(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.startup_notice.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.startup_notice = None;
                        }
                    });
                });
            });
        ui.add_space(10.0);
    }

    fn show_portal(
        &mut self,
        ctx: &egui::Context,
        view: &PortalView,
        keys: FrameKeys,
        focus_email: bool,
        events: &mut Vec<PortalEvent>,
    ) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(theme::NAVY_DEEP))
            .show(ctx, |ui| {
                let avail = ui.available_size();
                let card_width = avail.x.clamp(CARD_MIN_WIDTH, CARD_MAX_WIDTH);
                ui.add_space((avail.y * 0.08).clamp(16.0, 72.0));

                ui.vertical_centered(|ui| {
                    ui.set_width(card_width);
                    self.show_startup_notice(ui);

                    if view.book.is_open {
                        show_open_book(ui, view, keys, focus_email, events);
                    } else {
                        show_cover(ui, view, keys, events);
                    }

                    ui.add_space(14.0);
                    ui.label(
                        egui::RichText::new(Local::now().format("%A, %d %B %Y  %H:%M").to_string())
                            .small()
                            .color(theme::CREAM.gamma_multiply(0.6)),
                    );
                });
            });
    }
}

impl eframe::App for PortalGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals_if_needed(ctx);

        let now = self.now_ms();
        self.portal.tick(now);
        let focus_email = self.portal.take_focus_request() == Some(FieldId::Email);
        let view = self.portal.view();
        let keys = FrameKeys::sample(ctx);

        // Escape closes the book from anywhere, the dashboard included.
        let mut events: Vec<PortalEvent> = keys.escape_event().into_iter().collect();

        self.show_portal(ctx, &view, keys, focus_email, &mut events);
        show_notifications(ctx, &view.notifications);
        if let Some(dashboard) = &view.dashboard {
            show_dashboard(ctx, dashboard, &mut events);
        }

        dispatch_portal_events(&mut self.portal, events, now);

        let view = self.portal.view();
        let animating = view.email.shaking
            || view.password.shaking
            || view.role.shaking
            || view.submit.busy
            || view.alternate_auth.busy
            || view.notifications.iter().any(|n| n.leaving);
        ctx.request_repaint_after(repaint_delay(
            self.portal.now_ms(),
            self.portal.next_deadline(),
            animating,
        ));
    }
}

fn show_cover(
    ui: &mut egui::Ui,
    view: &PortalView,
    keys: FrameKeys,
    events: &mut Vec<PortalEvent>,
) {
    egui::Frame::NONE
        .fill(theme::NAVY)
        .stroke(egui::Stroke::new(2.0, theme::GOLD))
        .corner_radius(14.0)
        .inner_margin(egui::Margin::symmetric(28, 40))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("🎓").size(44.0));
                ui.label(
                    egui::RichText::new(&view.brand_name)
                        .size(34.0)
                        .strong()
                        .color(theme::GOLD),
                );
                ui.label(
                    egui::RichText::new("Academic Portal")
                        .size(16.0)
                        .color(theme::CREAM),
                );
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(format!(
                        "Sign in with your @{} account.",
                        view.institution_domain
                    ))
                    .color(theme::CREAM.gamma_multiply(0.8)),
                );
                ui.add_space(20.0);
                show_toggle_button(ui, view, keys, events);
            });
        });
}

fn show_toggle_button(
    ui: &mut egui::Ui,
    view: &PortalView,
    keys: FrameKeys,
    events: &mut Vec<PortalEvent>,
) {
    let button = egui::Button::new(
        egui::RichText::new(view.book.toggle_label)
            .strong()
            .size(16.0)
            .color(theme::CREAM),
    )
    .min_size(egui::vec2(200.0, 40.0));
    let response = ui.add(button);
    if response.clicked() {
        events.push(keys.toggle_event(response.has_focus()));
    }
}

fn show_open_book(
    ui: &mut egui::Ui,
    view: &PortalView,
    keys: FrameKeys,
    focus_email: bool,
    events: &mut Vec<PortalEvent>,
) {
    ui.horizontal(|ui| {
        if view.book.back_visible
            && ui
                .button(egui::RichText::new("← Back").color(theme::CREAM))
                .clicked()
        {
            events.push(PortalEvent::Back);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            show_toggle_button(ui, view, keys, events);
        });
    });
    ui.add_space(8.0);

    egui::Frame::NONE
        .fill(theme::CREAM)
        .stroke(egui::Stroke::new(2.0, theme::GOLD))
        .corner_radius(14.0)
        .inner_margin(egui::Margin::symmetric(22, 20))
        .show(ui, |ui| {
            if !view.book.pages_revealed {
                ui.multiply_opacity(0.35);
            }
            ui.columns(2, |columns| {
                show_welcome_page(&mut columns[0], view);
                show_form_page(&mut columns[1], view, keys, focus_email, events);
            });
        });
}

fn show_welcome_page(ui: &mut egui::Ui, view: &PortalView) {
    ui.label(
        egui::RichText::new(format!("Welcome to {}", view.brand_name))
            .size(24.0)
            .strong()
            .color(theme::NAVY),
    );
    ui.add_space(6.0);
    ui.label("Secure access to courses, research resources and campus services.");
    ui.add_space(10.0);
    ui.label(egui::RichText::new("Who can sign in").strong());
    for role in view.role.options {
        ui.label(format!("• {}", role.label()));
    }
    ui.add_space(10.0);
    ui.weak(format!(
        "Use the email address issued by @{}.",
        view.institution_domain
    ));
}

fn show_form_page(
    ui: &mut egui::Ui,
    view: &PortalView,
    keys: FrameKeys,
    focus_email: bool,
    events: &mut Vec<PortalEvent>,
) {
    let time = ui.input(|i| i.time);
    ui.label(
        egui::RichText::new("Sign In")
            .size(22.0)
            .strong()
            .color(theme::NAVY),
    );
    ui.add_space(6.0);

    let hint = format!("you@{}", view.institution_domain);
    let (email_resp, email) = portal_text_field(
        ui,
        "portal_email",
        "University Email",
        &hint,
        &view.email,
        false,
        focus_email,
        time,
    );
    if email_resp.changed() {
        events.push(PortalEvent::EmailEdited(email));
    }
    events.extend(keys.field_submit_event(FieldId::Email, email_resp.lost_focus()));

    let (password_resp, password) = portal_text_field(
        ui,
        "portal_password",
        "Password",
        "Your password",
        &view.password,
        true,
        false,
        time,
    );
    if password_resp.changed() {
        events.push(PortalEvent::PasswordEdited(password));
    }
    events.extend(keys.field_submit_event(FieldId::Password, password_resp.lost_focus()));

    ui.label(egui::RichText::new("Academic Role").strong());
    let mut selected = view.role.selected;
    ui.horizontal(|ui| {
        ui.add_space(shake_offset(view.role.shaking, time));
        egui::ComboBox::from_id_salt("portal_role")
            .selected_text(selected.map(Role::label).unwrap_or("Select your role"))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, None, "Select your role");
                for role in view.role.options {
                    ui.selectable_value(&mut selected, Some(role), role.label());
                }
            });
    });
    if selected != view.role.selected {
        events.push(PortalEvent::RoleSelected(selected));
    }
    show_field_error(ui, view.role.error.as_deref());

    ui.add_space(10.0);
    let submit = egui::Button::new(
        egui::RichText::new(view.submit.label)
            .strong()
            .size(16.0)
            .color(theme::CREAM),
    )
    .min_size(egui::vec2(ui.available_width(), 40.0));
    ui.horizontal(|ui| {
        if ui.add_enabled(view.submit.enabled, submit).clicked() {
            events.push(PortalEvent::Submit);
        }
        if view.submit.busy {
            ui.spinner();
        }
    });

    ui.add_space(6.0);
    ui.vertical_centered(|ui| {
        ui.weak("or");
    });
    let alternate = egui::Button::new(view.alternate_auth.label)
        .min_size(egui::vec2(ui.available_width(), 34.0));
    if ui
        .add_enabled(view.alternate_auth.enabled, alternate)
        .clicked()
    {
        events.push(PortalEvent::AlternateAuth);
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.weak("New to the university?");
        if ui.link("Request Account").clicked() {
            events.push(PortalEvent::RequestAccount);
        }
    });
}

#[allow(clippy::too_many_arguments)]
fn portal_text_field(
    ui: &mut egui::Ui,
    id: &'static str,
    label: &str,
    hint: &str,
    field: &FieldView,
    password: bool,
    should_focus: bool,
    time: f64,
) -> (egui::Response, String) {
    ui.label(egui::RichText::new(label).strong());
    let mut buffer = field.value.clone();
    let edit = egui::TextEdit::singleline(&mut buffer)
        .id_salt(id)
        .password(password)
        .hint_text(hint)
        .desired_width(f32::INFINITY);

    let response = ui
        .horizontal(|ui| {
            ui.add_space(shake_offset(field.shaking, time));
            ui.add_sized([ui.available_width(), 34.0], edit)
        })
        .inner;

    if should_focus {
        response.request_focus();
    }
    show_field_error(ui, field.error.as_deref());
    (response, buffer)
}

fn show_field_error(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(error) = error {
        ui.label(
            egui::RichText::new(error)
                .small()
                .color(theme::ERROR_TEXT),
        );
    }
    ui.add_space(4.0);
}

fn show_notifications(ctx: &egui::Context, notifications: &[NotificationView]) {
    for notification in notifications {
        let color = theme::kind_color(notification.kind);
        let alpha = if notification.leaving { 0.4 } else { 1.0 };

        egui::Area::new(egui::Id::new(("portal_notification", notification.id)))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::RIGHT_TOP, notification_offset(notification.slot))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(theme::CREAM.gamma_multiply(alpha))
                    .stroke(egui::Stroke::new(2.0, color.gamma_multiply(alpha)))
                    .corner_radius(10.0)
                    .inner_margin(egui::Margin::symmetric(14, 10))
                    .show(ui, |ui| {
                        ui.set_width(NOTIFICATION_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(theme::kind_glyph(notification.kind))
                                    .size(18.0)
                                    .color(color),
                            );
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(&notification.title).strong());
                                ui.label(&notification.message);
                            });
                        });
                    });
            });
    }
}

fn show_dashboard(ctx: &egui::Context, dashboard: &DashboardView, events: &mut Vec<PortalEvent>) {
    egui::Window::new("portal_dashboard")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::NONE
                .fill(theme::CREAM)
                .stroke(egui::Stroke::new(2.0, theme::GOLD))
                .corner_radius(16.0)
                .inner_margin(egui::Margin::symmetric(28, 24)),
        )
        .show(ctx, |ui| {
            ui.set_width(380.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("✔")
                        .size(36.0)
                        .color(theme::kind_color(NotificationKind::Success)),
                );
                ui.label(
                    egui::RichText::new(dashboard.heading)
                        .size(22.0)
                        .strong()
                        .color(theme::NAVY),
                );
                ui.add_space(8.0);
                ui.label(egui::RichText::new(&dashboard.display_name).size(18.0).strong());
                ui.label(dashboard.role_label);
                ui.weak(&dashboard.email);
                ui.add_space(16.0);

                if ui
                    .add(egui::Button::new(
                        egui::RichText::new("Continue to Dashboard")
                            .strong()
                            .color(theme::CREAM),
                    ))
                    .clicked()
                {
                    events.push(PortalEvent::ContinueToDashboard);
                }
                if ui.button("Back to Login").clicked() {
                    events.push(PortalEvent::BackToLogin);
                }
            });
        });
}

/// Horizontal jitter applied to a field while its invalid-input shake runs.
pub fn shake_offset(shaking: bool, time: f64) -> f32 {
    if shaking {
        6.0 + 5.0 * (time * 40.0).sin() as f32
    } else {
        6.0
    }
}

pub fn notification_offset(slot: usize) -> egui::Vec2 {
    egui::vec2(-16.0, 16.0 + slot as f32 * NOTIFICATION_SPACING)
}

pub fn repaint_delay(now_ms: u64, next_deadline: Option<u64>, animating: bool) -> Duration {
    if animating {
        return ANIMATION_REPAINT;
    }
    match next_deadline {
        Some(due) => Duration::from_millis(due.saturating_sub(now_ms)).min(IDLE_REPAINT),
        None => IDLE_REPAINT,
    }
}

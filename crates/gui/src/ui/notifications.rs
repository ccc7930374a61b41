//! Toast overlay in the top-right corner

use egui::{Color32, Context, RichText};

use crate::session::ToolSession;
use crate::state::Severity;

fn fill(severity: Severity) -> Color32 {
    match severity {
        Severity::Info => Color32::from_rgb(33, 150, 243),
        Severity::Success => Color32::from_rgb(76, 175, 80),
        Severity::Error => Color32::from_rgb(244, 67, 54),
    }
}

/// Draw the current toast; a click dismisses it early
pub fn show(ctx: &Context, session: &mut ToolSession) {
    let Some(toast) = session.notifications().current() else {
        return;
    };
    let color = fill(toast.severity);
    let message = toast.message.clone();

    let response = egui::Area::new(egui::Id::new("toast"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 40.0))
        .order(egui::Order::Foreground)
        .interactable(true)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(color)
                .stroke(egui::Stroke::NONE)
                .inner_margin(egui::Margin::symmetric(14, 10))
                .show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.label(RichText::new(message).color(Color32::WHITE));
                })
                .response
                .interact(egui::Sense::click())
        })
        .inner;

    if response.clicked() {
        session.dismiss_notification();
    }
}

use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, EditorState};

pub fn show(ui: &mut Ui, state: &AppState) {
    let session = &state.session;
    ui.horizontal(|ui| {
        let hint = if session.floor_plan().is_none() {
            t("hint.no_image")
        } else if session.engine().is_scale_set() {
            t("hint.scaled")
        } else {
            match session.editor().state() {
                EditorState::Empty => t("hint.empty"),
                EditorState::Drawing => t("hint.drawing"),
                EditorState::Closed => t("hint.closed"),
            }
        };
        ui.weak(hint);

        let points = session.editor().len();
        if points > 0 {
            ui.separator();
            ui.label(format!("{}: {points}", t("panel.points")));
        }

        if let Some(scale) = session.scale() {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(46, 125, 50), scale.readout());
        }

        if session.is_loading() {
            ui.separator();
            ui.spinner();
            ui.weak(t("canvas.loading"));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(p) = session.pointer_position() {
                ui.monospace(format!("{:>6.1}, {:>6.1}", p.x, p.y));
            }
            if let Some(canvas) = session.canvas_size() {
                ui.weak(format!("{:.0}×{:.0}", canvas.width, canvas.height));
                ui.separator();
            }
        });
    });
}

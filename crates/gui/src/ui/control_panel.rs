//! Right-hand panel: area input, scale readout and grid controls

use egui::Ui;
use shared::AreaUnit;

use crate::i18n::t;
use crate::state::{AppState, EditorState};

pub fn unit_label(unit: AreaUnit) -> &'static str {
    match unit {
        AreaUnit::SquareMeters => t("unit.square_meters"),
        AreaUnit::TatamiMat => t("unit.tatami"),
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let attached = state.session.is_attached();

    ui.heading(t("panel.area"));
    ui.add_space(4.0);
    show_area_form(ui, state, attached);

    ui.add_space(8.0);
    ui.separator();
    show_outline(ui, state, attached);

    ui.add_space(8.0);
    ui.separator();
    show_scale(ui, state);

    if state.session.engine().grid_controls_visible() {
        ui.add_space(8.0);
        ui.separator();
        show_grid_controls(ui, state);
    }
}

fn show_area_form(ui: &mut Ui, state: &mut AppState, attached: bool) {
    let form = &mut state.session.area_form;
    let response = ui.add_enabled(
        attached,
        egui::TextEdit::singleline(&mut form.text)
            .hint_text("12.5")
            .desired_width(f32::INFINITY),
    );
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.horizontal(|ui| {
        ui.label(t("panel.unit"));
        egui::ComboBox::from_id_salt("area_unit_combo")
            .selected_text(unit_label(form.unit))
            .show_ui(ui, |ui| {
                for unit in AreaUnit::all() {
                    ui.selectable_value(&mut form.unit, *unit, unit_label(*unit));
                }
            });
    });

    let closed = state.session.editor().state() == EditorState::Closed;
    let clicked = ui
        .add_enabled(attached && closed, egui::Button::new(t("panel.calculate")))
        .clicked();
    if clicked || (submitted && attached) {
        // The session already raised an error toast
        if let Err(e) = state.session.submit_area_form() {
            tracing::debug!("Area form rejected: {e}");
        }
    }
}

fn show_outline(ui: &mut Ui, state: &mut AppState, attached: bool) {
    let editor = state.session.editor();
    let drawing = editor.state() == EditorState::Drawing;
    let can_close = drawing && editor.len() >= 3 && !state.session.engine().is_scale_set();
    let points = editor.len();
    let area = editor.area();

    ui.label(format!("{}: {points}", t("panel.points")));
    if editor.is_closed() {
        ui.label(format!("{}: {area:.0} px²", t("panel.pixel_area")));
    }

    ui.horizontal(|ui| {
        if ui
            .add_enabled(can_close, egui::Button::new(t("panel.finish")))
            .clicked()
        {
            state.session.close_polygon();
        }
        if ui
            .add_enabled(attached && points > 0, egui::Button::new(t("panel.clear")))
            .clicked()
        {
            state.session.clear_selection();
        }
    });
}

fn show_scale(ui: &mut Ui, state: &AppState) {
    ui.label(egui::RichText::new(t("panel.scale")).strong());
    match state.session.scale() {
        Some(scale) => {
            ui.label(egui::RichText::new(scale.readout()).monospace());
            ui.weak(format!(
                "{} {} = {:.2} m²",
                scale.source_area,
                scale.source_unit.abbrev(),
                scale.real_area_m2()
            ));
        }
        None => {
            ui.weak(t("panel.no_scale"));
        }
    }
}

fn show_grid_controls(ui: &mut Ui, state: &mut AppState) {
    ui.label(egui::RichText::new(t("panel.grid")).strong());
    let visible = state.session.engine().is_grid_visible();
    let label = if visible {
        t("panel.hide_grid")
    } else {
        t("panel.show_grid")
    };
    if ui.button(label).clicked() {
        state.session.toggle_grid();
    }
    if let Some(grid) = state.session.engine().grid() {
        let offset = grid.offset();
        ui.weak(format!(
            "{}: ({:.1}, {:.1}) px",
            t("panel.grid_offset"),
            offset.x,
            offset.y
        ));
    }
}

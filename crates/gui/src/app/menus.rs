//! Application menu bar, settings window and reset confirmation

use eframe::egui;
use shared::AreaUnit;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::settings::AppSettings;
use crate::state::AppState;
use crate::ui::control_panel::unit_label;

/// Show the file menu. Returns true when "Open image" was chosen.
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let mut open = false;
    ui.menu_button(t("menu.file"), |ui| {
        if ui
            .add_enabled(!state.session.is_loading(), egui::Button::new(t("menu.open")))
            .clicked()
        {
            open = true;
            ui.close_menu();
        }
        if ui.button(t("menu.reset")).clicked() {
            state.confirm_reset = true;
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
    open
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.controls, t("menu.controls"));
        let enabled = state.session.engine().grid_controls_visible();
        let mut visible = state.session.engine().is_grid_visible();
        if ui
            .add_enabled(enabled, egui::Checkbox::new(&mut visible, t("panel.show_grid")))
            .changed()
        {
            state.session.toggle_grid();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for l in Lang::all() {
                if ui.selectable_label(lang() == *l, l.display_name()).clicked() {
                    set_lang(*l);
                    state.settings.language = *l;
                    state.settings.save();
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    if ui.button(t("menu.settings")).clicked() {
        state.show_settings_window = true;
    }
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_ui_settings(ui, state);
                show_grid_settings(ui, state);
                show_polygon_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open && state.show_settings_window;
}

fn color_row(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *rgb = [color.r(), color.g(), color.b()];
        }
    });
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.toast_seconds"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.toast_seconds)
                .speed(0.1)
                .range(0.5..=30.0),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.default_unit"));
        egui::ComboBox::from_id_salt("default_unit_combo")
            .selected_text(unit_label(state.settings.default_unit))
            .show_ui(ui, |ui| {
                for unit in AreaUnit::all() {
                    ui.selectable_value(&mut state.settings.default_unit, *unit, unit_label(*unit));
                }
            });
    });
    ui.add_space(10.0);
}

fn show_grid_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.grid"));
    color_row(ui, t("settings.grid_color"), &mut state.settings.grid.color);
    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        ui.add(egui::Slider::new(&mut state.settings.grid.opacity, 0.0..=1.0));
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.grid_width"));
        ui.add(
            egui::DragValue::new(&mut state.settings.grid.width)
                .speed(0.1)
                .range(0.5..=5.0),
        );
    });
    ui.add_space(10.0);
}

fn show_polygon_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.polygon"));
    color_row(ui, t("settings.polygon_color"), &mut state.settings.polygon.color);
    ui.horizontal(|ui| {
        ui.label(t("settings.fill_opacity"));
        ui.add(egui::Slider::new(&mut state.settings.polygon.fill_opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.commit_settings();
            state
                .session
                .notify("notify.settings_saved", crate::state::Severity::Info);
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings {
                language: state.settings.language,
                ..AppSettings::default()
            };
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}

/// Modal asking before the tool is reset
pub fn reset_confirmation(ctx: &egui::Context, state: &mut AppState) {
    if !state.confirm_reset {
        return;
    }
    egui::Window::new(t("menu.reset"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(t("dialog.confirm_reset"));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(t("dialog.ok")).clicked() {
                    state.confirm_reset = false;
                    state.session.reset();
                }
                if ui.button(t("dialog.cancel")).clicked() {
                    state.confirm_reset = false;
                }
            });
        });
}

//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;

/// Shortcuts the app has to act on outside the session
#[derive(Debug, Default)]
pub struct KeyboardActions {
    pub open_file: bool,
}

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) -> KeyboardActions {
    let mut actions = KeyboardActions::default();

    // Escape cancels a grid drag even with a text field focused
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        handle_escape(state);
    }

    // Don't handle the rest when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return actions;
    }

    ctx.input(|i| {
        // Ctrl+O — open image
        if i.modifiers.command && i.key_pressed(egui::Key::O) {
            actions.open_file = true;
        }
        // G — toggle grid
        if i.key_pressed(egui::Key::G) && !i.modifiers.command {
            state.session.toggle_grid();
        }
        // Enter — close the outline
        if i.key_pressed(egui::Key::Enter) && state.session.editor().len() >= 3 {
            state.session.close_polygon();
        }
    });
    actions
}

fn handle_escape(state: &mut AppState) {
    if state.session.engine().is_dragging_grid() {
        state.session.cancel_grid_drag();
    } else if state.confirm_reset {
        state.confirm_reset = false;
    } else if state.show_settings_window {
        state.show_settings_window = false;
    } else {
        state.session.dismiss_notification();
    }
}

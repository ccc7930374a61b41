//! Floor plan canvas: image, overlays and pointer routing

mod painter;

use egui::{PointerButton, Pos2, Rect, Sense, TextureHandle, TextureOptions, Ui};
use shared::{CanvasSize, Point2D};

use crate::i18n::t;
use crate::state::{AppState, InputKind};

/// What the current primary-button drag is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragTarget {
    Vertex,
    Grid,
}

pub struct CanvasPanel {
    /// Uploaded floor plan texture and the plan id it was built from
    texture: Option<(u64, TextureHandle)>,
    /// Space available to the canvas in the last frame
    container: CanvasSize,
    window_height: f64,
    drag: Option<DragTarget>,
    hovered: bool,
}

impl CanvasPanel {
    pub fn new() -> Self {
        Self {
            texture: None,
            container: CanvasSize::default(),
            window_height: 0.0,
            drag: None,
            hovered: false,
        }
    }

    pub fn container(&self) -> CanvasSize {
        self.container
    }

    pub fn window_height(&self) -> f64 {
        self.window_height
    }

    /// Drop everything derived from the previous floor plan
    pub fn on_reset(&mut self) {
        self.drag = None;
        self.hovered = false;
    }

    /// Show the canvas. Returns true when the placeholder asked for a file.
    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) -> bool {
        let available = ui.available_size();
        self.container = CanvasSize::new(available.x as f64, available.y as f64);
        self.window_height = ui.ctx().screen_rect().height() as f64;

        let Some(plan) = state.session.floor_plan() else {
            self.texture = None;
            return self.show_placeholder(ui, state.session.is_loading());
        };

        let plan_id = plan.id;
        let display = plan.display;
        if self.texture.as_ref().map(|(id, _)| *id) != Some(plan_id) {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [plan.image.width as usize, plan.image.height as usize],
                &plan.image.rgba,
            );
            let handle = ui
                .ctx()
                .load_texture("floor_plan", image, TextureOptions::LINEAR);
            self.texture = Some((plan_id, handle));
        }

        let size = egui::vec2(display.width as f32, display.height as f32);
        ui.centered_and_justified(|ui| {
            let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
            if let Some((_, tex)) = self.texture.as_ref() {
                ui.painter().image(
                    tex.id(),
                    rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            self.handle_input(ui, &response, rect, state);
            self.paint_overlays(ui, rect, state);
            if state.session.is_loading() {
                ui.painter().rect_filled(rect, 0.0, egui::Color32::from_white_alpha(120));
            }
        });
        false
    }

    fn show_placeholder(&mut self, ui: &mut Ui, loading: bool) -> bool {
        let mut clicked = false;
        ui.centered_and_justified(|ui| {
            if loading {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label(t("canvas.loading"));
                });
            } else {
                clicked = ui
                    .add(egui::Button::new(t("canvas.placeholder")).frame(false))
                    .clicked();
            }
        });
        clicked
    }

    fn input_kind(ui: &Ui, long_press: bool) -> InputKind {
        if long_press {
            InputKind::TouchLongPress
        } else if ui.input(|i| i.any_touches()) {
            InputKind::TouchTap
        } else {
            InputKind::Pointer
        }
    }

    fn handle_input(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        rect: Rect,
        state: &mut AppState,
    ) {
        let session = &mut state.session;
        let to_canvas =
            |pos: Pos2| Point2D::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
        let input = Self::input_kind(ui, false);

        match response.hover_pos() {
            Some(pos) => {
                self.hovered = true;
                session.hover(to_canvas(pos), input);
            }
            None if self.hovered && self.drag.is_none() => {
                self.hovered = false;
                session.pointer_left();
            }
            None => {}
        }

        // Vertex handles win over the grid
        if response.drag_started_by(PointerButton::Primary) {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = origin {
                let p = to_canvas(pos);
                self.drag = if session.begin_vertex_drag(p, input) {
                    Some(DragTarget::Vertex)
                } else if session.begin_grid_drag(p) {
                    Some(DragTarget::Grid)
                } else {
                    None
                };
            }
        }

        if response.dragged_by(PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = to_canvas(pos);
                match self.drag {
                    Some(DragTarget::Vertex) => {
                        session.drag_vertex(p);
                    }
                    Some(DragTarget::Grid) => {
                        session.continue_grid_drag(p);
                    }
                    None => {}
                }
            }
        }

        if response.drag_stopped() {
            match self.drag.take() {
                Some(DragTarget::Vertex) => session.end_vertex_drag(),
                Some(DragTarget::Grid) => {
                    session.end_grid_drag();
                }
                None => {}
            }
        }

        if response.long_touched() {
            if let Some(pos) = response.interact_pointer_pos() {
                session.add_point(to_canvas(pos), Self::input_kind(ui, true));
            }
        } else if response.clicked_by(PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                session.add_point(to_canvas(pos), input);
            }
        }
    }

    fn paint_overlays(&self, ui: &Ui, rect: Rect, state: &AppState) {
        let painter = ui.painter_at(rect);
        let engine = state.session.engine();
        if engine.is_grid_visible() {
            if let Some(grid) = engine.grid() {
                painter::paint_grid(&painter, rect, grid, &state.settings.grid);
            }
        }
        painter::paint_draw_list(
            &painter,
            rect,
            state.session.editor().drawables(),
            &state.settings.polygon,
        );
    }
}

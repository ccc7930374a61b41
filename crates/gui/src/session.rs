//! Headless tool session: canvas lifecycle, image intake and the routing of
//! pointer input into the polygon editor and the scale engine.
//!
//! The desktop app drives one of these per window; tests and the command
//! protocol drive it directly.

use std::path::Path;

use shared::{parse_area_input, AreaUnit, CanvasSize, Point2D};

use crate::error::{ImageLoadError, ValidationError};
use crate::i18n::t;
use crate::image_loader::{self, PreparedImage};
use crate::state::notifications::{Notifications, Severity};
use crate::state::polygon::{AddPointOutcome, InputKind, PolygonChange, PolygonEditor};
use crate::state::scale::{Scale, ScaleEngine};
use crate::state::settings::AppSettings;

/// Share of the window height used when the canvas container has none
pub const CONTAINER_HEIGHT_FALLBACK: f64 = 0.7;

/// Container for fitting: a zero-height area falls back to 70 % of the window
pub fn container_with_fallback(available: CanvasSize, window_height: f64) -> CanvasSize {
    if available.height > 0.0 {
        available
    } else {
        CanvasSize::new(available.width, window_height * CONTAINER_HEIGHT_FALLBACK)
    }
}

/// Floor plan currently shown under the overlays
#[derive(Debug, Clone)]
pub struct FloorPlan {
    /// Changes on every load so the UI knows to upload a new texture
    pub id: u64,
    pub image: PreparedImage,
    /// Fitted display size, equal to the canvas size
    pub display: CanvasSize,
}

/// Area input form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaForm {
    pub text: String,
    pub unit: AreaUnit,
}

pub struct ToolSession {
    editor: PolygonEditor,
    engine: ScaleEngine,
    notifications: Notifications,
    canvas: Option<CanvasSize>,
    floor_plan: Option<FloorPlan>,
    next_plan_id: u64,
    loading: bool,
    pointer: Option<Point2D>,
    epoch: u64,
    default_unit: AreaUnit,
    pub area_form: AreaForm,
}

impl Default for ToolSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolSession {
    pub fn new() -> Self {
        Self {
            editor: PolygonEditor::new(),
            engine: ScaleEngine::new(),
            notifications: Notifications::default(),
            canvas: None,
            floor_plan: None,
            next_plan_id: 1,
            loading: false,
            pointer: None,
            epoch: 0,
            default_unit: AreaUnit::default(),
            area_form: AreaForm::default(),
        }
    }

    pub fn with_settings(settings: &AppSettings) -> Self {
        let mut session = Self::new();
        session.apply_settings(settings);
        session.area_form.unit = settings.default_unit;
        session
    }

    /// Pick up toast duration and default unit from the settings
    pub fn apply_settings(&mut self, settings: &AppSettings) {
        self.notifications.set_duration(settings.ui.toast_seconds);
        self.default_unit = settings.default_unit;
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn editor(&self) -> &PolygonEditor {
        &self.editor
    }

    pub fn engine(&self) -> &ScaleEngine {
        &self.engine
    }

    pub fn scale(&self) -> Option<&Scale> {
        self.engine.scale()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn floor_plan(&self) -> Option<&FloorPlan> {
        self.floor_plan.as_ref()
    }

    /// Bumped on every reset fan-out (explicit reset and new image load)
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ── Shell services ────────────────────────────────────────

    pub fn canvas_size(&self) -> Option<CanvasSize> {
        self.canvas
    }

    pub fn is_attached(&self) -> bool {
        self.canvas.is_some()
    }

    /// Bind a canvas. A second attach without a detach is rejected.
    pub fn attach(&mut self, canvas: CanvasSize) -> bool {
        if self.canvas.is_some() {
            tracing::debug!("attach ignored: canvas already attached");
            return false;
        }
        tracing::info!("Canvas attached ({:.0}x{:.0})", canvas.width, canvas.height);
        self.canvas = Some(canvas);
        true
    }

    pub fn detach(&mut self) -> bool {
        self.pointer = None;
        let had = self.canvas.take().is_some();
        if had {
            tracing::debug!("Canvas detached");
        }
        had
    }

    pub fn pointer_position(&self) -> Option<Point2D> {
        self.pointer
    }

    /// Raise a toast whose text is the translation of `key`
    pub fn notify(&mut self, key: &'static str, severity: Severity) {
        self.notifications.push(key, t(key), severity);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Advance the notification clock (seconds)
    pub fn tick(&mut self, now: f64) {
        self.notifications.tick(now);
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    // ── Polygon input ─────────────────────────────────────────

    fn accepts_points(&self) -> bool {
        self.canvas.is_some() && !self.engine.is_scale_set()
    }

    /// Pointer moved over the canvas
    pub fn hover(&mut self, p: Point2D, input: InputKind) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        self.pointer = Some(p);
        if !self.accepts_points() {
            return false;
        }
        self.editor.hover(p, input)
    }

    /// Pointer left the canvas
    pub fn pointer_left(&mut self) {
        self.pointer = None;
        self.editor.clear_hover();
    }

    /// Click, tap or long press on the canvas
    pub fn add_point(&mut self, p: Point2D, input: InputKind) -> AddPointOutcome {
        if !self.accepts_points() {
            tracing::debug!("add_point ignored: no canvas or scale already set");
            return AddPointOutcome::Rejected;
        }
        self.pointer = Some(p);
        let outcome = self.editor.add_point(p, input);
        if outcome == AddPointOutcome::Closed {
            self.notify("notify.polygon_closed", Severity::Success);
        }
        outcome
    }

    /// Explicit "close polygon" action
    pub fn close_polygon(&mut self) -> bool {
        if self.engine.is_scale_set() {
            return false;
        }
        let closed = self.editor.close_polygon();
        if closed {
            self.notify("notify.polygon_closed", Severity::Success);
        }
        closed
    }

    fn forward_change(&mut self, change: PolygonChange) {
        if self.engine.on_polygon_changed(change) {
            self.notify("notify.scale_invalidated", Severity::Info);
        }
    }

    /// Move a vertex of the closed polygon; any scale is dropped
    pub fn move_vertex(&mut self, index: usize, position: Point2D) -> bool {
        match self.editor.move_vertex(index, position) {
            Some(change) => {
                self.forward_change(change);
                true
            }
            None => false,
        }
    }

    /// Grab the vertex under `p`, if any
    pub fn begin_vertex_drag(&mut self, p: Point2D, input: InputKind) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        match self.editor.vertex_at(p, input) {
            Some(index) => self.editor.begin_vertex_drag(index),
            None => false,
        }
    }

    pub fn drag_vertex(&mut self, p: Point2D) -> bool {
        self.pointer = Some(p);
        match self.editor.drag_vertex(p) {
            Some(change) => {
                self.forward_change(change);
                true
            }
            None => false,
        }
    }

    pub fn end_vertex_drag(&mut self) {
        self.editor.end_vertex_drag();
    }

    /// Discard the outline together with any scale and grid
    pub fn clear_selection(&mut self) {
        self.editor.clear();
        self.engine.invalidate();
        self.engine.set_grid_visible(true);
        self.notify("notify.selection_cleared", Severity::Info);
    }

    // ── Scale ─────────────────────────────────────────────────

    /// Parse `area_text` and derive the scale from the closed outline
    pub fn compute_scale(
        &mut self,
        area_text: &str,
        unit: AreaUnit,
    ) -> Result<Scale, ValidationError> {
        let result = parse_area_input(area_text)
            .map_err(ValidationError::from)
            .and_then(|area| {
                let canvas = self.canvas.unwrap_or_default();
                self.engine
                    .compute_scale(&self.editor, area, unit, canvas)
                    .cloned()
            });
        match &result {
            Ok(_) => self.notify("notify.scale_computed", Severity::Success),
            Err(e) => {
                tracing::warn!("Scale rejected: {e}");
                self.notify(e.message_key(), Severity::Error);
            }
        }
        result
    }

    /// `compute_scale` with the values currently in the area form
    pub fn submit_area_form(&mut self) -> Result<Scale, ValidationError> {
        let AreaForm { text, unit } = self.area_form.clone();
        self.compute_scale(&text, unit)
    }

    // ── Grid ──────────────────────────────────────────────────

    /// Start dragging the grid. Needs a scale and a visible grid.
    pub fn begin_grid_drag(&mut self, p: Point2D) -> bool {
        if !self.engine.is_grid_visible() {
            return false;
        }
        self.pointer = Some(p);
        self.engine.begin_grid_drag(p)
    }

    pub fn continue_grid_drag(&mut self, p: Point2D) -> bool {
        self.pointer = Some(p);
        self.engine.continue_grid_drag(p)
    }

    pub fn end_grid_drag(&mut self) -> bool {
        self.engine.end_grid_drag()
    }

    pub fn cancel_grid_drag(&mut self) -> bool {
        let cancelled = self.engine.cancel_grid_drag();
        if cancelled {
            self.notify("notify.drag_cancelled", Severity::Info);
        }
        cancelled
    }

    /// Show or hide the grid; returns the new visibility
    pub fn toggle_grid(&mut self) -> bool {
        if !self.engine.grid_controls_visible() {
            return self.engine.is_grid_visible();
        }
        let visible = self.engine.toggle_grid();
        if visible {
            self.notify("notify.grid_shown", Severity::Info);
        } else {
            self.notify("notify.grid_hidden", Severity::Info);
        }
        visible
    }

    // ── Lifecycle ─────────────────────────────────────────────

    fn reset_components(&mut self) {
        self.editor.reset();
        self.engine.reset();
        self.detach();
        self.epoch += 1;
    }

    /// Drop image, canvas, outline, scale and form; back to the upload screen
    pub fn reset(&mut self) {
        self.reset_components();
        self.floor_plan = None;
        self.loading = false;
        self.area_form = AreaForm {
            text: String::new(),
            unit: self.default_unit,
        };
        tracing::info!("Tool reset (epoch {})", self.epoch);
        self.notify("notify.tool_reset", Severity::Info);
    }

    /// Check type and size of an incoming file. On success the loading
    /// indicator is raised until `finish_load` is called.
    pub fn accept_file(&mut self, mime: &str, size: u64) -> bool {
        let checked =
            image_loader::validate_mime(mime).and_then(|_| image_loader::validate_size(size));
        match checked {
            Ok(()) => {
                self.loading = true;
                true
            }
            Err(e) => {
                self.fail_load(e);
                false
            }
        }
    }

    /// Outcome of a decode started after `accept_file`
    pub fn finish_load(
        &mut self,
        result: Result<PreparedImage, ImageLoadError>,
        container: CanvasSize,
    ) -> bool {
        // A reset since `accept_file` makes this result stale
        if !self.loading {
            tracing::debug!("Discarding image load finished after reset");
            return false;
        }
        match result {
            Ok(image) => {
                self.install_image(image, container);
                true
            }
            Err(e) => {
                self.fail_load(e);
                false
            }
        }
    }

    /// Decode synchronously and install the image
    pub fn load_image_bytes(&mut self, bytes: &[u8], mime: &str, container: CanvasSize) -> bool {
        if !self.accept_file(mime, bytes.len() as u64) {
            return false;
        }
        let result = image_loader::prepare_image(bytes, mime);
        self.finish_load(result, container)
    }

    pub fn load_image_path(&mut self, path: &Path, container: CanvasSize) -> bool {
        match image_loader::read_image_file(path) {
            Ok((bytes, mime)) => self.load_image_bytes(&bytes, &mime, container),
            Err(e) => {
                self.fail_load(e);
                false
            }
        }
    }

    fn install_image(&mut self, image: PreparedImage, container: CanvasSize) {
        let fitted = image_loader::fit_to_container(image.size(), container);
        self.reset_components();
        self.attach(fitted);
        tracing::info!(
            "Floor plan loaded: {}x{} shown at {:.0}x{:.0}",
            image.width,
            image.height,
            fitted.width,
            fitted.height
        );
        self.floor_plan = Some(FloorPlan {
            id: self.next_plan_id,
            image,
            display: fitted,
        });
        self.next_plan_id += 1;
        self.loading = false;
        self.notify("notify.image_loaded", Severity::Success);
    }

    fn fail_load(&mut self, error: ImageLoadError) {
        tracing::warn!("Image rejected: {error}");
        self.loading = false;
        self.notify(error.message_key(), Severity::Error);
    }
}

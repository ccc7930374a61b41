use shared::{pixels_per_meter, AreaInputError, AreaUnit, CanvasSize, Point2D};

use super::grid::Grid;
use super::polygon::{PolygonChange, PolygonEditor};
use crate::error::ValidationError;

/// Derived pixel/meter scale and what it was computed from
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Scale {
    pub pixels_per_meter: f64,
    /// Area as entered by the user
    pub source_area: f64,
    pub source_unit: AreaUnit,
    /// Pixel area of the polygon at computation time
    pub pixel_area: f64,
}

impl Scale {
    /// Entered area converted to m²
    pub fn real_area_m2(&self) -> f64 {
        self.source_unit.to_square_meters(self.source_area)
    }

    /// "1 meter = X.XX pixels"
    pub fn readout(&self) -> String {
        format!("1 meter = {:.2} pixels", self.pixels_per_meter)
    }
}

/// Owns the scale and the 1 m reference grid derived from it
#[derive(Debug, Clone)]
pub struct ScaleEngine {
    scale: Option<Scale>,
    grid: Option<Grid>,
    grid_visible: bool,
}

impl Default for ScaleEngine {
    fn default() -> Self {
        Self {
            scale: None,
            grid: None,
            grid_visible: true,
        }
    }
}

impl ScaleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> Option<&Scale> {
        self.scale.as_ref()
    }

    pub fn is_scale_set(&self) -> bool {
        self.scale.is_some()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn is_grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Grid controls are offered only while a scale exists
    pub fn grid_controls_visible(&self) -> bool {
        self.scale.is_some()
    }

    /// Derive pixels-per-meter from the closed polygon and the known area,
    /// then rebuild the grid at the new spacing with a zero offset.
    pub fn compute_scale(
        &mut self,
        editor: &PolygonEditor,
        user_area: f64,
        unit: AreaUnit,
        canvas: CanvasSize,
    ) -> Result<&Scale, ValidationError> {
        if !user_area.is_finite() {
            return Err(AreaInputError::NotFinite.into());
        }
        if user_area <= 0.0 {
            return Err(AreaInputError::NotPositive(user_area).into());
        }
        if !editor.is_closed() || editor.len() < 3 {
            return Err(ValidationError::PolygonNotClosed);
        }
        let pixel_area = editor.area();
        if pixel_area <= 0.0 {
            return Err(ValidationError::DegeneratePolygon);
        }

        let real_area = unit.to_square_meters(user_area);
        let ppm = pixels_per_meter(pixel_area, real_area);
        tracing::info!(
            "Scale computed: {pixel_area:.0} px² / {real_area:.3} m² -> {ppm:.3} px/m"
        );

        self.grid = Some(Grid::new(ppm, canvas));
        Ok(&*self.scale.insert(Scale {
            pixels_per_meter: ppm,
            source_area: user_area,
            source_unit: unit,
            pixel_area,
        }))
    }

    /// Drop scale and grid. Returns whether a scale existed.
    pub fn invalidate(&mut self) -> bool {
        self.grid = None;
        let had = self.scale.take().is_some();
        if had {
            tracing::info!("Scale invalidated");
        }
        had
    }

    /// Hook for polygon mutations after closure
    pub fn on_polygon_changed(&mut self, change: PolygonChange) -> bool {
        tracing::debug!("Polygon changed: {change:?}");
        self.invalidate()
    }

    /// Canvas resized: keep spacing and offset, cover the new extent
    pub fn resize(&mut self, canvas: CanvasSize) {
        if let Some(grid) = self.grid.as_mut() {
            grid.set_extent(canvas);
        }
    }

    /// Flip grid visibility. Offset and spacing are untouched.
    pub fn toggle_grid(&mut self) -> bool {
        self.grid_visible = !self.grid_visible;
        self.grid_visible
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    // ── Grid drag ─────────────────────────────────────────────

    pub fn is_dragging_grid(&self) -> bool {
        self.grid.as_ref().is_some_and(Grid::is_dragging)
    }

    pub fn begin_grid_drag(&mut self, pointer: Point2D) -> bool {
        let started = self
            .grid
            .as_mut()
            .is_some_and(|g| g.begin_drag(pointer));
        if started {
            tracing::debug!("Grid drag started at ({:.1}, {:.1})", pointer.x, pointer.y);
        }
        started
    }

    pub fn continue_grid_drag(&mut self, pointer: Point2D) -> bool {
        self.grid
            .as_mut()
            .is_some_and(|g| g.continue_drag(pointer))
    }

    pub fn end_grid_drag(&mut self) -> bool {
        let ended = self.grid.as_mut().is_some_and(Grid::end_drag);
        if ended {
            if let Some(offset) = self.grid.as_ref().map(Grid::offset) {
                tracing::debug!("Grid drag ended, offset ({:.1}, {:.1})", offset.x, offset.y);
            }
        }
        ended
    }

    pub fn cancel_grid_drag(&mut self) -> bool {
        let cancelled = self.grid.as_mut().is_some_and(Grid::cancel_drag);
        if cancelled {
            tracing::debug!("Grid drag cancelled");
        }
        cancelled
    }

    /// Back to the initial state: no scale, no grid, grid visible
    pub fn reset(&mut self) {
        self.scale = None;
        self.grid = None;
        self.grid_visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::polygon::InputKind;

    fn canvas() -> CanvasSize {
        CanvasSize::new(800.0, 600.0)
    }

    fn closed(points: &[(f64, f64)]) -> PolygonEditor {
        let mut e = PolygonEditor::new();
        for &(x, y) in points {
            e.add_point(Point2D::new(x, y), InputKind::Pointer);
        }
        e.close_polygon();
        e
    }

    fn square_100() -> PolygonEditor {
        closed(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)])
    }

    #[test]
    fn test_initial_state() {
        let s = ScaleEngine::new();
        assert!(!s.is_scale_set());
        assert!(s.grid().is_none());
        assert!(s.is_grid_visible());
        assert!(!s.grid_controls_visible());
    }

    #[test]
    fn test_square_meters() {
        let mut s = ScaleEngine::new();
        let scale = s.compute_scale(&square_100(), 4.0, AreaUnit::SquareMeters, canvas()).unwrap();
        assert!((scale.pixels_per_meter - 50.0).abs() < 1e-9);
        assert_eq!(scale.readout(), "1 meter = 50.00 pixels");
        assert!((s.grid().unwrap().spacing() - 50.0).abs() < 1e-9);
        assert!(s.grid_controls_visible());
    }

    #[test]
    fn test_tatami_conversion() {
        // 1620 px² triangle (base 90, height 36)
        let e = closed(&[(0.0, 0.0), (90.0, 0.0), (0.0, 36.0)]);
        assert!((e.area() - 1620.0).abs() < 1e-9);
        let mut s = ScaleEngine::new();
        let scale = s.compute_scale(&e, 10.0, AreaUnit::TatamiMat, canvas()).unwrap();
        assert!((scale.real_area_m2() - 16.2).abs() < 1e-9);
        assert!((scale.pixels_per_meter - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let e = square_100();
        let mut s = ScaleEngine::new();
        let first = s.compute_scale(&e, 12.5, AreaUnit::SquareMeters, canvas()).unwrap().pixels_per_meter;
        let second = s.compute_scale(&e, 12.5, AreaUnit::SquareMeters, canvas()).unwrap().pixels_per_meter;
        assert!((first - second).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recompute_resets_offset() {
        let e = square_100();
        let mut s = ScaleEngine::new();
        s.compute_scale(&e, 4.0, AreaUnit::SquareMeters, canvas()).unwrap();
        s.begin_grid_drag(Point2D::ZERO);
        s.continue_grid_drag(Point2D::new(12.0, 8.0));
        s.end_grid_drag();
        assert_eq!(s.grid().unwrap().offset(), Point2D::new(12.0, 8.0));

        s.compute_scale(&e, 1.0, AreaUnit::SquareMeters, canvas()).unwrap();
        assert_eq!(s.grid().unwrap().offset(), Point2D::ZERO);
        assert!((s.scale().unwrap().pixels_per_meter - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_open_polygon() {
        let mut e = PolygonEditor::new();
        e.add_point(Point2D::new(0.0, 0.0), InputKind::Pointer);
        e.add_point(Point2D::new(10.0, 0.0), InputKind::Pointer);
        e.add_point(Point2D::new(10.0, 10.0), InputKind::Pointer);
        let mut s = ScaleEngine::new();
        assert_eq!(
            s.compute_scale(&e, 4.0, AreaUnit::SquareMeters, canvas()),
            Err(ValidationError::PolygonNotClosed)
        );
        assert!(!s.is_scale_set());
    }

    #[test]
    fn test_rejects_bad_area_without_mutation() {
        let e = square_100();
        let mut s = ScaleEngine::new();
        s.compute_scale(&e, 4.0, AreaUnit::SquareMeters, canvas()).unwrap();

        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let err = s.compute_scale(&e, bad, AreaUnit::SquareMeters, canvas()).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidArea(_)));
        }
        assert!((s.scale().unwrap().pixels_per_meter - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_zero_area_polygon() {
        let e = closed(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let mut s = ScaleEngine::new();
        assert_eq!(
            s.compute_scale(&e, 4.0, AreaUnit::SquareMeters, canvas()),
            Err(ValidationError::DegeneratePolygon)
        );
    }

    #[test]
    fn test_vertex_move_invalidates() {
        let mut e = square_100();
        let mut s = ScaleEngine::new();
        s.compute_scale(&e, 4.0, AreaUnit::SquareMeters, canvas()).unwrap();
        let change = e.move_vertex(1, Point2D::new(150.0, 0.0)).unwrap();
        assert!(s.on_polygon_changed(change));
        assert!(s.scale().is_none());
        assert!(s.grid().is_none());
    }

    #[test]
    fn test_toggle_keeps_offset_and_spacing() {
        let mut s = ScaleEngine::new();
        s.compute_scale(&square_100(), 4.0, AreaUnit::SquareMeters, canvas()).unwrap();
        s.begin_grid_drag(Point2D::ZERO);
        s.continue_grid_drag(Point2D::new(3.0, 4.0));
        s.end_grid_drag();

        assert!(!s.toggle_grid());
        assert!(!s.is_grid_visible());
        let grid = s.grid().unwrap();
        assert_eq!(grid.offset(), Point2D::new(3.0, 4.0));
        assert!((grid.spacing() - 50.0).abs() < 1e-9);
        assert!(s.toggle_grid());
    }

    #[test]
    fn test_drag_without_grid_is_noop() {
        let mut s = ScaleEngine::new();
        assert!(!s.begin_grid_drag(Point2D::ZERO));
        assert!(!s.continue_grid_drag(Point2D::new(1.0, 1.0)));
        assert!(!s.end_grid_drag());
        assert!(!s.cancel_grid_drag());
    }

    #[test]
    fn test_cancel_drag_restores_offset() {
        let mut s = ScaleEngine::new();
        s.compute_scale(&square_100(), 4.0, AreaUnit::SquareMeters, canvas()).unwrap();
        s.begin_grid_drag(Point2D::new(10.0, 10.0));
        s.continue_grid_drag(Point2D::new(40.0, 70.0));
        assert!(s.is_dragging_grid());
        assert!(s.cancel_grid_drag());
        assert!(!s.is_dragging_grid());
        assert_eq!(s.grid().unwrap().offset(), Point2D::ZERO);
    }

    #[test]
    fn test_resize_extends_grid() {
        let mut s = ScaleEngine::new();
        s.compute_scale(&square_100(), 4.0, AreaUnit::SquareMeters, canvas()).unwrap();
        s.resize(CanvasSize::new(1000.0, 500.0));
        assert_eq!(s.grid().unwrap().extent(), CanvasSize::new(1000.0, 500.0));
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut configs = vec![ScaleEngine::new()];

        let mut with_scale = ScaleEngine::new();
        with_scale.compute_scale(&square_100(), 4.0, AreaUnit::TatamiMat, canvas()).unwrap();
        configs.push(with_scale.clone());

        let mut hidden_dragging = with_scale;
        hidden_dragging.toggle_grid();
        hidden_dragging.begin_grid_drag(Point2D::ZERO);
        hidden_dragging.continue_grid_drag(Point2D::new(9.0, 9.0));
        configs.push(hidden_dragging);

        for mut s in configs {
            s.reset();
            assert!(!s.is_scale_set());
            assert!(s.grid().is_none());
            assert!(s.is_grid_visible());
            assert!(!s.is_dragging_grid());
        }
    }
}

use shared::{polygon_area, polygon_centroid, Point2D};

use crate::i18n::t;
use crate::render::{DrawList, DrawRole};

/// Radius of the dot drawn on every placed point
const VERTEX_DOT_RADIUS: f64 = 4.0;
/// Label sits this far below the centroid
const AREA_LABEL_OFFSET_Y: f64 = 10.0;

// ============================================================================
// Input kind
// ============================================================================

/// How a point was placed. Touch input gets larger targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Pointer,
    TouchTap,
    TouchLongPress,
}

impl InputKind {
    pub fn is_touch(self) -> bool {
        !matches!(self, InputKind::Pointer)
    }

    /// Per-axis distance from point 0 that closes the polygon
    pub fn closing_radius(self) -> f64 {
        if self.is_touch() {
            30.0
        } else {
            20.0
        }
    }

    /// Radius of the first-point highlight
    pub fn first_point_radius(self) -> f64 {
        if self.is_touch() {
            12.0
        } else {
            8.0
        }
    }

    /// Radius of the "can close here" highlight
    pub fn closable_radius(self) -> f64 {
        if self.is_touch() {
            18.0
        } else {
            12.0
        }
    }

    /// Pick radius for grabbing a vertex of a closed polygon
    pub fn handle_radius(self) -> f64 {
        if self.is_touch() {
            20.0
        } else {
            10.0
        }
    }
}

// ============================================================================
// Editor
// ============================================================================

/// Lifecycle of the traced outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Empty,
    Drawing,
    Closed,
}

/// Result of `PolygonEditor::add_point`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPointOutcome {
    /// Point appended at this index
    Appended { index: usize },
    /// Point landed on the first point and sealed the loop
    Closed,
    /// Polygon already closed
    Rejected,
}

/// Mutation of a closed polygon that invalidates any derived scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonChange {
    VertexMoved { index: usize },
}

/// Room outline traced point by point
#[derive(Debug, Clone, Default)]
pub struct PolygonEditor {
    points: Vec<Point2D>,
    closed: bool,
    /// Pointer position while drawing (for the dashed preview segment)
    preview: Option<Point2D>,
    /// Pointer is close enough to point 0 to close
    closable: bool,
    /// Last input kind seen, drives marker sizes
    input: InputKind,
    /// Vertex being dragged
    dragging: Option<usize>,
    drawables: DrawList,
}

impl PolygonEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        if self.closed {
            EditorState::Closed
        } else if self.points.is_empty() {
            EditorState::Empty
        } else {
            EditorState::Drawing
        }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_closable(&self) -> bool {
        self.closable
    }

    pub fn preview(&self) -> Option<Point2D> {
        self.preview
    }

    pub fn dragging_vertex(&self) -> Option<usize> {
        self.dragging
    }

    /// Drawables for the current outline
    pub fn drawables(&self) -> &DrawList {
        &self.drawables
    }

    /// Pixel area of the outline (0 below 3 points)
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    pub fn centroid(&self) -> Point2D {
        polygon_centroid(&self.points)
    }

    fn near_first_point(&self, p: Point2D, input: InputKind) -> bool {
        self.points.len() >= 3 && p.within_box(self.points[0], input.closing_radius())
    }

    /// Place a point. Landing within the closing radius of point 0 with at
    /// least three points already placed closes the polygon instead.
    pub fn add_point(&mut self, p: Point2D, input: InputKind) -> AddPointOutcome {
        if self.closed {
            tracing::debug!("add_point ignored: polygon already closed");
            return AddPointOutcome::Rejected;
        }
        self.input = input;

        if self.near_first_point(p, input) {
            self.close_polygon();
            return AddPointOutcome::Closed;
        }

        self.points.push(p);
        let index = self.points.len() - 1;
        tracing::debug!("Point {index} placed at ({:.1}, {:.1})", p.x, p.y);
        self.rebuild_drawables();
        AddPointOutcome::Appended { index }
    }

    /// Seal the loop. Needs at least three points and an open polygon.
    pub fn close_polygon(&mut self) -> bool {
        if self.closed || self.points.len() < 3 {
            tracing::debug!(
                "close_polygon rejected ({} points, closed={})",
                self.points.len(),
                self.closed
            );
            return false;
        }
        self.closed = true;
        self.preview = None;
        self.closable = false;
        tracing::info!(
            "Polygon closed: {} points, {:.0} px²",
            self.points.len(),
            self.area()
        );
        self.rebuild_drawables();
        true
    }

    /// Track the pointer while drawing. Returns whether a click here would
    /// close the polygon.
    pub fn hover(&mut self, p: Point2D, input: InputKind) -> bool {
        if self.closed || self.points.is_empty() {
            return false;
        }
        self.input = input;
        self.preview = Some(p);
        self.closable = self.near_first_point(p, input);
        self.rebuild_drawables();
        self.closable
    }

    /// Pointer left the canvas: drop the preview segment
    pub fn clear_hover(&mut self) {
        if self.preview.is_some() || self.closable {
            self.preview = None;
            self.closable = false;
            self.rebuild_drawables();
        }
    }

    /// Nearest vertex of a closed polygon within the input's handle radius
    pub fn vertex_at(&self, p: Point2D, input: InputKind) -> Option<usize> {
        if !self.closed {
            return None;
        }
        let radius = input.handle_radius();
        self.points
            .iter()
            .enumerate()
            .map(|(i, v)| (i, v.distance_to(p)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Replace the point at `index` in place. Only valid once closed.
    pub fn move_vertex(&mut self, index: usize, position: Point2D) -> Option<PolygonChange> {
        if !self.closed {
            tracing::debug!("move_vertex rejected: polygon not closed");
            return None;
        }
        let slot = self.points.get_mut(index)?;
        *slot = position;
        tracing::debug!(
            "Vertex {index} moved to ({:.1}, {:.1})",
            position.x,
            position.y
        );
        self.rebuild_drawables();
        Some(PolygonChange::VertexMoved { index })
    }

    /// Start dragging the vertex at `index`
    pub fn begin_vertex_drag(&mut self, index: usize) -> bool {
        if !self.closed || index >= self.points.len() || self.dragging.is_some() {
            return false;
        }
        self.dragging = Some(index);
        true
    }

    /// Move the dragged vertex to `position`
    pub fn drag_vertex(&mut self, position: Point2D) -> Option<PolygonChange> {
        let index = self.dragging?;
        self.move_vertex(index, position)
    }

    pub fn end_vertex_drag(&mut self) {
        self.dragging = None;
    }

    /// Discard every point and return to `Empty`
    pub fn clear(&mut self) {
        self.points.clear();
        self.closed = false;
        self.preview = None;
        self.closable = false;
        self.dragging = None;
        self.drawables.clear();
    }

    pub fn reset(&mut self) {
        self.clear();
        self.input = InputKind::default();
    }

    fn rebuild_drawables(&mut self) {
        let list = &mut self.drawables;
        list.clear();

        let pts = &self.points;
        for w in pts.windows(2) {
            list.push_segment(w[0], w[1], DrawRole::Edge);
        }

        if self.closed {
            if let (Some(&first), Some(&last)) = (pts.first(), pts.last()) {
                list.push_segment(last, first, DrawRole::Edge);
            }
            list.fill = Some(pts.clone());
            let c = polygon_centroid(pts);
            list.labels.push(crate::render::Label {
                anchor: Point2D::new(c.x, c.y + AREA_LABEL_OFFSET_Y),
                text: format!("{}: {:.0}px²", t("label.selected_area"), polygon_area(pts)),
                role: DrawRole::AreaLabel,
            });
        } else if let (Some(&last), Some(preview)) = (pts.last(), self.preview) {
            list.push_segment(last, preview, DrawRole::Preview);
        }

        for p in pts {
            list.push_marker(*p, VERTEX_DOT_RADIUS, DrawRole::Vertex);
        }
        if let Some(&first) = pts.first() {
            list.push_marker(first, self.input.first_point_radius(), DrawRole::FirstPoint);
            if self.closable {
                list.push_marker(first, self.input.closable_radius(), DrawRole::Closable);
            }
        }
    }
}

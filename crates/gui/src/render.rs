//! Typed render model.
//!
//! Each component owns its own `DrawList` and rebuilds it after mutation;
//! the desktop canvas translates the lists into painter calls. Nothing is
//! looked up by tag on a shared surface.

use shared::Point2D;

/// What a drawable represents (the painter maps this to a style)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRole {
    /// Edge between two placed points
    Edge,
    /// Dashed segment from the last point to the pointer
    Preview,
    /// Placed vertex dot
    Vertex,
    /// Highlight ring on the first point
    FirstPoint,
    /// Highlight shown when the pointer can close the polygon
    Closable,
    /// Area readout at the polygon centroid
    AreaLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: Point2D,
    pub to: Point2D,
    pub role: DrawRole,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub center: Point2D,
    pub radius: f64,
    pub role: DrawRole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Top-center anchor of the text
    pub anchor: Point2D,
    pub text: String,
    pub role: DrawRole,
}

/// Drawables owned by one component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
    pub labels: Vec<Label>,
    /// Filled outline of a completed polygon
    pub fill: Option<Vec<Point2D>>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.segments.clear();
        self.markers.clear();
        self.labels.clear();
        self.fill = None;
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
            && self.markers.is_empty()
            && self.labels.is_empty()
            && self.fill.is_none()
    }

    pub fn push_segment(&mut self, from: Point2D, to: Point2D, role: DrawRole) {
        self.segments.push(Segment {
            from,
            to,
            role,
            dashed: role == DrawRole::Preview,
        });
    }

    pub fn push_marker(&mut self, center: Point2D, radius: f64, role: DrawRole) {
        self.markers.push(Marker { center, radius, role });
    }

    /// Markers with the given role
    pub fn markers_with(&self, role: DrawRole) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.role == role)
    }

    /// Segments with the given role
    pub fn segments_with(&self, role: DrawRole) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.role == role)
    }
}

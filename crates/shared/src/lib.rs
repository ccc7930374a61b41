use serde::{Deserialize, Serialize};

pub mod geometry;
pub mod parameters;

pub use geometry::{pixels_per_meter, polygon_area, polygon_centroid, polygon_signed_area};
pub use parameters::{parse_area_input, AreaInputError};

/// Area of one standard tatami mat (1.8 m x 0.9 m), in square meters.
pub const TATAMI_MAT_AREA_M2: f64 = 1.62;

/// 2D point in canvas pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`
    pub fn sub(self, other: Point2D) -> Point2D {
        Point2D::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum `self + other`
    pub fn add(self, other: Point2D) -> Point2D {
        Point2D::new(self.x + other.x, self.y + other.y)
    }

    pub fn distance_to(self, other: Point2D) -> f64 {
        let d = self.sub(other);
        (d.x * d.x + d.y * d.y).sqrt()
    }

    /// True if both axis distances to `other` are strictly below `radius`.
    pub fn within_box(self, other: Point2D, radius: f64) -> bool {
        (self.x - other.x).abs() < radius && (self.y - other.y).abs() < radius
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

/// Width and height of the drawing canvas in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Unit the user entered the known room area in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    #[default]
    SquareMeters,
    /// Count of standard tatami mats (jo)
    TatamiMat,
}

impl AreaUnit {
    /// Convert an area given in this unit to square meters
    pub fn to_square_meters(self, area: f64) -> f64 {
        match self {
            AreaUnit::SquareMeters => area,
            AreaUnit::TatamiMat => area * TATAMI_MAT_AREA_M2,
        }
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m²",
            AreaUnit::TatamiMat => "jo",
        }
    }

    pub fn all() -> &'static [AreaUnit] {
        &[AreaUnit::SquareMeters, AreaUnit::TatamiMat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    #[test]
    fn test_point_serde() {
        roundtrip(&Point2D::new(12.5, -3.0));
        let json = serde_json::to_string(&Point2D::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0}"#);
    }

    #[test]
    fn test_area_unit_serde_names() {
        let json = serde_json::to_string(&AreaUnit::TatamiMat).unwrap();
        assert_eq!(json, r#""tatami_mat""#);
        let unit: AreaUnit = serde_json::from_str(r#""square_meters""#).unwrap();
        assert_eq!(unit, AreaUnit::SquareMeters);
    }

    #[test]
    fn test_tatami_conversion() {
        assert!((AreaUnit::TatamiMat.to_square_meters(10.0) - 16.2).abs() < 1e-9);
        assert_eq!(AreaUnit::SquareMeters.to_square_meters(7.5), 7.5);
    }

    #[test]
    fn test_within_box_is_per_axis_and_strict() {
        let origin = Point2D::ZERO;
        assert!(Point2D::new(19.0, 19.0).within_box(origin, 20.0));
        // Euclidean distance ~26.9 but still inside the box
        assert!(Point2D::new(19.0, -19.0).within_box(origin, 20.0));
        assert!(!Point2D::new(20.0, 0.0).within_box(origin, 20.0));
        assert!(!Point2D::new(0.0, 25.0).within_box(origin, 20.0));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point2D::new(5.0, 7.0);
        let b = Point2D::new(2.0, 3.0);
        assert_eq!(a.sub(b), Point2D::new(3.0, 4.0));
        assert_eq!(a.add(b), Point2D::new(7.0, 10.0));
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_canvas_size_empty() {
        assert!(CanvasSize::default().is_empty());
        assert!(!CanvasSize::new(800.0, 600.0).is_empty());
    }
}

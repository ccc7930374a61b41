//! Polygon measurements over an ordered, implicitly closed point list.
//!
//! No simple-polygon validation is done: self-intersecting input still goes
//! through the same formulas.

use crate::Point2D;

/// Signed shoelace area. Positive for counter-clockwise traversal in a
/// y-up frame (clockwise on screen, where y grows downwards).
pub fn polygon_signed_area(points: &[Point2D]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum / 2.0
}

/// Unsigned shoelace area. Returns 0 for fewer than 3 points.
pub fn polygon_area(points: &[Point2D]) -> f64 {
    polygon_signed_area(points).abs()
}

/// Area-weighted centroid.
///
/// Both coordinates are returned as absolute values, which matches the
/// signed result only when the true centroid lies in the non-negative
/// quadrant (always the case for canvas coordinates).
/// Degenerate input (fewer than 3 points or zero area) falls back to the
/// vertex mean.
pub fn polygon_centroid(points: &[Point2D]) -> Point2D {
    if points.is_empty() {
        return Point2D::ZERO;
    }
    let n = points.len();
    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let f = points[i].x * points[j].y - points[j].x * points[i].y;
        cx += (points[i].x + points[j].x) * f;
        cy += (points[i].y + points[j].y) * f;
        area += f;
    }
    area /= 2.0;

    if n < 3 || area.abs() < f64::EPSILON {
        let sum = points.iter().fold(Point2D::ZERO, |acc, p| acc.add(*p));
        return Point2D::new(sum.x / n as f64, sum.y / n as f64);
    }

    cx /= 6.0 * area;
    cy /= 6.0 * area;
    Point2D::new(cx.abs(), cy.abs())
}

/// Linear scale from a pixel area and the matching real area in m².
///
/// Assumes the image is scaled uniformly in both axes; anisotropic
/// distortion cannot be recovered from a single area ratio.
pub fn pixels_per_meter(pixel_area: f64, real_area_m2: f64) -> f64 {
    (pixel_area / real_area_m2).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2D> {
        raw.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
    }

    fn square() -> Vec<Point2D> {
        pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
    }

    #[test]
    fn test_square_area() {
        assert!((polygon_area(&square()) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_needs_three_points() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&pts(&[(0.0, 0.0), (5.0, 5.0)])), 0.0);
    }

    #[test]
    fn test_area_invariant_under_rotation_and_reversal() {
        let poly = pts(&[(3.0, 1.0), (9.0, 2.0), (11.0, 8.0), (5.0, 12.0), (1.0, 6.0)]);
        let expected = polygon_area(&poly);
        for k in 0..poly.len() {
            let mut rotated = poly.clone();
            rotated.rotate_left(k);
            assert!((polygon_area(&rotated) - expected).abs() < 1e-9);
            rotated.reverse();
            assert!((polygon_area(&rotated) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_signed_area_flips_with_direction() {
        let mut poly = square();
        let forward = polygon_signed_area(&poly);
        poly.reverse();
        assert!((forward + polygon_signed_area(&poly)).abs() < 1e-9);
        assert!((forward.abs() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_l_shape_area() {
        // 20x20 square with a 10x10 notch removed
        let poly = pts(&[
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (0.0, 20.0),
        ]);
        assert!((polygon_area(&poly) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_bowtie_area_is_defined() {
        // Self-intersecting: the two lobes cancel
        let poly = pts(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(polygon_area(&poly).abs() < 1e-9);
    }

    #[test]
    fn test_square_centroid() {
        let c = polygon_centroid(&square());
        assert!((c.x - 5.0).abs() < 1e-9);
        assert!((c.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_same_for_both_windings() {
        let mut poly = pts(&[(100.0, 50.0), (300.0, 50.0), (300.0, 250.0)]);
        let a = polygon_centroid(&poly);
        poly.reverse();
        let b = polygon_centroid(&poly);
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
        assert!((a.x - 700.0 / 3.0).abs() < 1e-9);
        assert!((a.y - 350.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_takes_absolute_value() {
        let poly = pts(&[(-20.0, -20.0), (-10.0, -20.0), (-10.0, -10.0), (-20.0, -10.0)]);
        let c = polygon_centroid(&poly);
        assert!((c.x - 15.0).abs() < 1e-9);
        assert!((c.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_centroid_is_vertex_mean() {
        let line = pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let c = polygon_centroid(&line);
        assert!((c.x - 10.0).abs() < 1e-9);
        assert_eq!(c.y, 0.0);
        assert_eq!(polygon_centroid(&[]), Point2D::ZERO);
    }

    #[test]
    fn test_pixels_per_meter() {
        assert!((pixels_per_meter(1620.0, 16.2) - 10.0).abs() < 1e-9);
        assert!((pixels_per_meter(10_000.0, 4.0) - 50.0).abs() < 1e-9);
    }
}

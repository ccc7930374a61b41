//! Translate the render model and the grid into egui painter calls

use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};
use shared::Point2D;

use crate::render::{DrawList, DrawRole};
use crate::state::{Grid, GridStyle, PolygonStyle};

const EDGE_WIDTH: f32 = 2.0;
const DASH_LENGTH: f32 = 5.0;
const DASH_GAP: f32 = 5.0;
const FIRST_POINT_COLOR: Color32 = Color32::from_rgb(0, 200, 0);

fn to_screen(origin: Pos2, p: Point2D) -> Pos2 {
    Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32)
}

fn rgba(rgb: [u8; 3], alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], a)
}

/// Whether every turn of the closed outline has the same orientation
pub fn is_convex(points: &[Point2D]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0_f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross.abs() < f64::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Draw every grid line clipped to `rect`
pub fn paint_grid(painter: &Painter, rect: Rect, grid: &Grid, style: &GridStyle) {
    let stroke = Stroke::new(style.width, rgba(style.color, style.opacity));
    for x in grid.vertical_lines() {
        let x = rect.min.x + x as f32;
        painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
    }
    for y in grid.horizontal_lines() {
        let y = rect.min.y + y as f32;
        painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
    }
}

/// Draw the polygon editor's drawables
pub fn paint_draw_list(painter: &Painter, rect: Rect, list: &DrawList, style: &PolygonStyle) {
    let origin = rect.min;
    let color = rgba(style.color, 1.0);

    // egui only fills convex shapes correctly; concave outlines get edges only
    if let Some(fill) = list.fill.as_ref() {
        if style.fill_opacity > 0.0 && is_convex(fill) {
            let pts: Vec<Pos2> = fill.iter().map(|p| to_screen(origin, *p)).collect();
            painter.add(Shape::convex_polygon(
                pts,
                rgba(style.color, style.fill_opacity),
                Stroke::NONE,
            ));
        }
    }

    for seg in &list.segments {
        let a = to_screen(origin, seg.from);
        let b = to_screen(origin, seg.to);
        let stroke = Stroke::new(EDGE_WIDTH, color);
        if seg.dashed {
            painter.extend(Shape::dashed_line(&[a, b], stroke, DASH_LENGTH, DASH_GAP));
        } else {
            painter.line_segment([a, b], stroke);
        }
    }

    for marker in &list.markers {
        let center = to_screen(origin, marker.center);
        let r = marker.radius as f32;
        match marker.role {
            DrawRole::FirstPoint => {
                painter.circle(center, r, rgba([0, 200, 0], 0.3), Stroke::new(2.0, FIRST_POINT_COLOR));
            }
            DrawRole::Closable => {
                painter.circle_filled(center, r, rgba([0, 200, 0], 0.5));
            }
            _ => {
                painter.circle_filled(center, r, color);
            }
        }
    }

    for label in &list.labels {
        let pos = to_screen(origin, label.anchor);
        let galley = painter.layout_no_wrap(label.text.clone(), FontId::proportional(14.0), Color32::BLACK);
        let text_rect = Rect::from_center_size(pos, galley.size()).expand(3.0);
        painter.rect_filled(text_rect, 3.0, Color32::from_white_alpha(200));
        painter.galley(text_rect.min + egui::vec2(3.0, 3.0), galley, Color32::BLACK);
    }
}

use std::ops::Range;

use shared::{CanvasSize, Point2D};

/// Extra lines laid out past each canvas edge so dragging never shows an edge
pub const GRID_MARGIN_LINES: i64 = 10;

/// Upper bound on lines laid out across the canvas on one axis. A tiny scale
/// would otherwise produce millions of sub-pixel lines per frame.
pub const MAX_CANVAS_LINES: i64 = 4096;

/// Active grid drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridDrag {
    /// Pointer position at drag start
    origin: Point2D,
    /// Offset at drag start (restored on cancel)
    snapshot: Point2D,
}

/// Reference lattice spaced one meter apart, shifted by a free 2D offset
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    spacing: f64,
    offset: Point2D,
    extent: CanvasSize,
    drag: Option<GridDrag>,
}

impl Grid {
    /// New grid at `spacing` pixels covering `extent`, offset at origin
    pub fn new(spacing: f64, extent: CanvasSize) -> Self {
        Self {
            spacing,
            offset: Point2D::ZERO,
            extent,
            drag: None,
        }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn offset(&self) -> Point2D {
        self.offset
    }

    pub fn extent(&self) -> CanvasSize {
        self.extent
    }

    /// Canvas was resized: spacing and offset stay, coverage follows
    pub fn set_extent(&mut self, extent: CanvasSize) {
        self.extent = extent;
    }

    fn line_range(&self, length: f64) -> Range<i64> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return 0..0;
        }
        let count = ((length / self.spacing).ceil().max(0.0) as i64).min(MAX_CANVAS_LINES);
        -GRID_MARGIN_LINES..count + GRID_MARGIN_LINES
    }

    /// Indices of horizontal lines (y positions)
    pub fn horizontal_range(&self) -> Range<i64> {
        self.line_range(self.extent.height)
    }

    /// Indices of vertical lines (x positions)
    pub fn vertical_range(&self) -> Range<i64> {
        self.line_range(self.extent.width)
    }

    /// y coordinate of every horizontal line
    pub fn horizontal_lines(&self) -> impl Iterator<Item = f64> + '_ {
        self.horizontal_range()
            .map(move |i| i as f64 * self.spacing + self.offset.y)
    }

    /// x coordinate of every vertical line
    pub fn vertical_lines(&self) -> impl Iterator<Item = f64> + '_ {
        self.vertical_range()
            .map(move |i| i as f64 * self.spacing + self.offset.x)
    }

    // ── Drag protocol ─────────────────────────────────────────

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag at `pointer`. Ignored while another drag is active.
    pub fn begin_drag(&mut self, pointer: Point2D) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(GridDrag {
            origin: pointer,
            snapshot: self.offset,
        });
        true
    }

    /// Offset = snapshot + total displacement since drag start
    pub fn continue_drag(&mut self, pointer: Point2D) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        self.offset = drag.snapshot.add(pointer.sub(drag.origin));
        true
    }

    /// Keep the current offset and finish
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Restore the pre-drag offset and finish
    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) => {
                self.offset = drag.snapshot;
                true
            }
            None => false,
        }
    }
}

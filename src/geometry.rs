//! Unit-space geometry shared by the interaction controllers.
//!
//! Controllers reason in pixel-equivalent units so their constants stay
//! meaningful regardless of the terminal font. Rendering converts back to
//! cells through [`CellMetrics`].

use ratatui::layout::Rect;

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Strict overlap: boxes that only share an edge do not overlap, and any
    /// single axis of separation is enough to keep two boxes apart.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Express this box in the coordinate space whose origin is `origin`'s
    /// top-left corner.
    pub fn relative_to(&self, origin: &Bounds) -> Bounds {
        Bounds::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Uniform scale about the box center.
    pub fn scaled_about_center(&self, factor: f64) -> Bounds {
        let center = self.center();
        let width = self.width * factor;
        let height = self.height * factor;
        Bounds::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
        }
    }
}

impl CellMetrics {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width: cell_width.max(1.0),
            cell_height: cell_height.max(1.0),
        }
    }

    /// Ask the terminal for its pixel size. Terminals that report zero pixels
    /// get the default metrics.
    pub fn detect() -> Self {
        match crossterm::terminal::window_size() {
            Ok(size) if size.width > 0 && size.height > 0 && size.columns > 0 && size.rows > 0 => {
                Self::new(
                    f64::from(size.width) / f64::from(size.columns),
                    f64::from(size.height) / f64::from(size.rows),
                )
            }
            _ => Self::default(),
        }
    }

    pub fn rect_to_bounds(&self, rect: Rect) -> Bounds {
        Bounds::new(
            f64::from(rect.x) * self.cell_width,
            f64::from(rect.y) * self.cell_height,
            f64::from(rect.width) * self.cell_width,
            f64::from(rect.height) * self.cell_height,
        )
    }

    /// Pointer location of a mouse event: the center of the reported cell.
    pub fn pointer(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }

    pub fn columns(&self, units: f64) -> i32 {
        (units / self.cell_width).round() as i32
    }

    pub fn rows(&self, units: f64) -> i32 {
        (units / self.cell_height).round() as i32
    }

    /// Snap a unit-space box to the nearest cells, clipped to `clip`.
    pub fn bounds_to_rect(&self, bounds: Bounds, clip: Rect) -> Rect {
        let x0 = self.columns(bounds.left()).max(i32::from(clip.x));
        let y0 = self.rows(bounds.top()).max(i32::from(clip.y));
        let x1 = self.columns(bounds.right()).min(i32::from(clip.right()));
        let y1 = self.rows(bounds.bottom()).min(i32::from(clip.bottom()));
        if x1 <= x0 || y1 <= y0 {
            return Rect::new(clip.x, clip.y, 0, 0);
        }
        Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_requires_all_four_axes() {
        let safe = Bounds::new(100.0, 100.0, 50.0, 20.0);
        assert!(Bounds::new(120.0, 105.0, 10.0, 10.0).overlaps(&safe));
        // fully left, right, above, below
        assert!(!Bounds::new(0.0, 100.0, 50.0, 20.0).overlaps(&safe));
        assert!(!Bounds::new(200.0, 100.0, 50.0, 20.0).overlaps(&safe));
        assert!(!Bounds::new(100.0, 0.0, 50.0, 20.0).overlaps(&safe));
        assert!(!Bounds::new(100.0, 150.0, 50.0, 20.0).overlaps(&safe));
        // touching edges is not overlap
        assert!(!Bounds::new(50.0, 100.0, 50.0, 20.0).overlaps(&safe));
    }

    #[test]
    fn scale_about_center_keeps_center() {
        let b = Bounds::new(10.0, 10.0, 20.0, 10.0);
        let s = b.scaled_about_center(1.5);
        assert_eq!(s.center(), b.center());
        assert_eq!(s.width, 30.0);
        assert_eq!(s.height, 15.0);
    }

    #[test]
    fn cell_conversions_round_trip_for_whole_cells() {
        let metrics = CellMetrics::default();
        let rect = Rect::new(3, 2, 10, 4);
        let bounds = metrics.rect_to_bounds(rect);
        assert_eq!(bounds, Bounds::new(24.0, 32.0, 80.0, 64.0));
        let clip = Rect::new(0, 0, 80, 24);
        assert_eq!(metrics.bounds_to_rect(bounds, clip), rect);
    }

    #[test]
    fn bounds_to_rect_clips() {
        let metrics = CellMetrics::default();
        let clip = Rect::new(0, 0, 10, 5);
        let r = metrics.bounds_to_rect(Bounds::new(-40.0, -40.0, 400.0, 400.0), clip);
        assert_eq!(r, clip);
        let empty = metrics.bounds_to_rect(Bounds::new(1000.0, 0.0, 8.0, 16.0), clip);
        assert_eq!(empty.width, 0);
    }

    #[test]
    fn pointer_is_cell_center() {
        let metrics = CellMetrics::new(10.0, 20.0);
        assert_eq!(metrics.pointer(0, 0), Point::new(5.0, 10.0));
        assert_eq!(metrics.pointer(2, 1), Point::new(25.0, 30.0));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(2, 2, 3, 1);
        assert!(rect_contains(r, 2, 2));
        assert!(rect_contains(r, 4, 2));
        assert!(!rect_contains(r, 5, 2));
        assert!(!rect_contains(r, 2, 3));
    }
}

//! Basic geometry types and link focus geometry.
//!
//! Link spans can wrap across lines, so a single link occurrence maps to one
//! or more rectangles in view coordinates. Assistive technologies want a
//! single outline for focus highlighting and hit-testing, so the rectangles
//! are stitched into one enclosing [`FocusPath`] by walking the right-hand
//! corners top-to-bottom and the left-hand corners back up.

use std::ops::Range;

use crate::layout::LineLayout;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle from two corners (min and max points).
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self {
            origin: min,
            size: Size::new(max.x - min.x, max.y - min.y),
        }
    }

    /// Left edge.
    #[inline]
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    /// Top edge.
    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let min = Point::new(self.min_x().min(other.min_x()), self.min_y().min(other.min_y()));
        let max = Point::new(self.max_x().max(other.max_x()), self.max_y().max(other.max_y()));
        Rect::from_corners(min, max)
    }

    /// Check if the rectangle contains a point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}

/// A single command in a [`FocusPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Begin a new subpath at the given point.
    MoveTo(Point),
    /// Draw a straight line to the given point.
    LineTo(Point),
    /// Close the current subpath.
    Close,
}

/// An outline path in view coordinates.
///
/// Built from move/line commands only; line segments to the current point are
/// dropped so the path never contains zero-length segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusPath {
    commands: Vec<PathCommand>,
}

impl FocusPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the path commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path contains no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The current point of the path, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(|command| match command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Close => None,
        })
    }

    /// Begin a new subpath at `point`.
    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    /// Add a line to `point`, unless `point` equals the current point.
    pub fn line_to(&mut self, point: Point) {
        if self.current_point() == Some(point) {
            return;
        }
        self.commands.push(PathCommand::LineTo(point));
    }

    /// Close the current subpath.
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// The bounding box of all path points, or `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.commands.iter().filter_map(|command| match command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Close => None,
        });

        let first = points.next()?;
        let mut min = first;
        let mut max = first;
        for p in points {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Rect::from_corners(min, max))
    }
}

/// The on-screen geometry of a single link occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkGeometry {
    /// One rectangle per laid-out line fragment, in range order.
    pub rects: Vec<Rect>,
    /// The single enclosing outline of all fragments.
    pub path: FocusPath,
    /// Where a synthetic activation should land: the center of the
    /// fragments' bounding box.
    pub activation_point: Point,
}

impl LinkGeometry {
    /// The bounding box of the outline.
    pub fn bounds(&self) -> Rect {
        // The path is never empty: `link_geometry` returns None instead.
        self.path.bounds().unwrap_or_default()
    }
}

/// Map a text range onto its on-screen geometry.
///
/// Returns `None` when no non-empty rectangle intersects the range, which
/// callers must treat as "currently unrenderable" (for example scrolled out
/// of the viewport), not as an error.
pub fn link_geometry(layout: &LineLayout, range: Range<usize>) -> Option<LinkGeometry> {
    let rects: Vec<Rect> = layout
        .selection_rects(range.start, range.end)
        .into_iter()
        .filter(|rect| !rect.is_empty())
        .collect();

    let first = rects.first()?;

    let mut path = FocusPath::new();
    path.move_to(Point::new(first.min_x(), first.min_y()));
    for rect in &rects {
        path.line_to(Point::new(rect.max_x(), rect.min_y()));
        path.line_to(Point::new(rect.max_x(), rect.max_y()));
    }
    for rect in rects.iter().rev() {
        path.line_to(Point::new(rect.min_x(), rect.max_y()));
        path.line_to(Point::new(rect.min_x(), rect.min_y()));
    }
    path.close();

    let activation_point = path.bounds()?.center();

    Some(LinkGeometry {
        rects,
        path,
        activation_point,
    })
}

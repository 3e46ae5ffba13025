//! Core geometry types for inkwash.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! A point is just `{ x, y }`, but in Rust we spell out the field types.
//! `#[derive(Clone, Copy)]` makes it a plain value that is copied on
//! assignment, so passing a `Point` around never moves anything.

/// A 2D point in surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A closed polygon: an ordered vertex sequence whose last point
/// implicitly connects back to the first.
///
/// ## Rust Lesson #4: Ownership & Vec
///
/// The polygon OWNS its vertices. Functions that only look at the outline
/// take `&[Point]` (a borrowed slice), so the same code works for a
/// `Polygon`, a `Vec<Point>` or a stack array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point halfway between `self` and `other`.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Calculate signed area using the shoelace formula.
    ///
    /// Positive for counter-clockwise winding (in y-up space).
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.vertices)
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

/// Closing edges of a vertex slice as `(from, to)` pairs, the last vertex
/// wrapping to the first.
///
/// ## Rust Lesson #5: impl Iterator
///
/// Returning `impl Iterator` hides the concrete adapter chain from
/// callers while still compiling down to a plain loop.
pub fn edges_of(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Calculate signed area of a point sequence using the shoelace formula.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let area: f64 = edges_of(points)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    area / 2.0
}

// ============================================================================
// TESTS
// ============================================================================

//! Fundamental geometric types for road axes and section lines.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Absolute tolerance, in kernel length units, used for coincidence tests.
pub const TOLERANCE: f64 = 1.0e-9;

/// Position in three dimensional space measured in kernel length units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Translate the point by `direction * distance`.
    #[must_use]
    pub fn offset(self, direction: &Vector3<f64>, distance: f64) -> Point {
        Point::from(self.to_vector() + direction * distance)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point> for [f64; 3] {
    fn from(value: Point) -> Self {
        [value.x, value.y, value.z]
    }
}

/// Bounded straight line between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
}

impl Segment {
    /// Create a [`Segment`] from its endpoints.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`.
    #[must_use]
    pub fn delta(&self) -> Vector3<f64> {
        self.end.to_vector() - self.start.to_vector()
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    /// Unit direction from `start` to `end`, or `None` for a zero-length segment.
    #[must_use]
    pub fn direction(&self) -> Option<Vector3<f64>> {
        self.delta().try_normalize(TOLERANCE)
    }

    /// Point at fraction `t` of the way from `start` to `end`.
    #[must_use]
    pub fn lerp(&self, t: f64) -> Point {
        Point::from(self.start.to_vector() + self.delta() * t)
    }
}

/// Remove the component of `vector` along the unit vector `up`.
#[must_use]
pub fn project_to_plan(vector: &Vector3<f64>, up: &Vector3<f64>) -> Vector3<f64> {
    vector - up * vector.dot(up)
}

/// Parameters of the crossing of two lines in the plan perpendicular to `up`.
///
/// Each line is given as an origin and a direction vector. The returned pair
/// `(t, u)` satisfies `a_origin + a_dir * t == b_origin + b_dir * u` once both
/// sides are projected to plan. Parallel lines return `None`.
#[must_use]
pub fn plan_line_intersection(
    a_origin: &Vector3<f64>,
    a_dir: &Vector3<f64>,
    b_origin: &Vector3<f64>,
    b_dir: &Vector3<f64>,
    up: &Vector3<f64>,
) -> Option<(f64, f64)> {
    let d1 = project_to_plan(a_dir, up);
    let d2 = project_to_plan(b_dir, up);
    let d = project_to_plan(&(b_origin - a_origin), up);

    let cross = d1.cross(&d2).dot(up);
    if cross.abs() <= TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }

    let t = d.cross(&d2).dot(up) / cross;
    let u = d.cross(&d1).dot(up) / cross;
    Some((t, u))
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use beamaxis::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Convenience helper for creating [`Segment`] instances.
///
/// # Examples
/// ```
/// use beamaxis::{point, segment};
///
/// let line = segment(point(0.0, 0.0, 0.0), point(3.0, 4.0, 0.0));
/// assert_eq!(line.length(), 5.0);
/// ```
#[must_use]
pub const fn segment(start: Point, end: Point) -> Segment {
    Segment::new(start, end)
}

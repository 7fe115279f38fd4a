//! Smoothing of sampled stroke points into cubic bezier curves
//!
//! Each sampled point becomes an end point of a cubic segment. Control points are
//! estimated locally from the neighbouring samples: the tangent at a point is parallel
//! to the line between its previous and next samples and its length is a fixed fraction
//! (`SMOOTHING`) of the distance between them.
use crate::{PathCmd, PathData, Point, Scalar, PI};

/// Fraction of the neighbours distance used as the length of a control point tangent
pub const SMOOTHING: Scalar = 0.2;

/// Estimate control point for the `current` point
///
/// Missing neighbours default to the `current` point itself. With `reverse` set the
/// tangent is flipped, which is used for the control point that ends a segment.
pub fn control_point(
    current: Point,
    previous: Option<Point>,
    next: Option<Point>,
    reverse: bool,
) -> Point {
    let p = previous.unwrap_or(current);
    let n = next.unwrap_or(current);

    let angle = p.angle_to(n) + if reverse { PI } else { 0.0 };
    let length = p.dist(n) * SMOOTHING;

    Point::new(
        current.x() + angle.cos() * length,
        current.y() + angle.sin() * length,
    )
}

/// Cubic bezier curve
#[derive(Clone, Copy, PartialEq)]
pub struct Cubic(pub [Point; 4]);

impl std::fmt::Debug for Cubic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Cubic([p0, p1, p2, p3]) = self;
        write!(f, "Cubic {:?} {:?} {:?} {:?}", p0, p1, p2, p3)
    }
}

impl Cubic {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn points(&self) -> [Point; 4] {
        self.0
    }

    /// Point at which curve starts
    pub fn start(&self) -> Point {
        self.0[0]
    }

    /// Point at which curve ends
    pub fn end(&self) -> Point {
        self.0[3]
    }

    /// Evaluate curve at parameter value `t` in (0.0..=1.0)
    pub fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1, p2, p3]) = self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        let (t3, t_3) = (t2 * t1, t_2 * t_1);
        t_3 * *p0 + 3.0 * t1 * t_2 * *p1 + 3.0 * t2 * t_1 * *p2 + t3 * *p3
    }

    /// Path command drawing this curve from its start point
    pub fn to_cmd(&self) -> PathCmd {
        let Self([_, p1, p2, p3]) = *self;
        PathCmd::CubicTo(p1, p2, p3)
    }
}

/// Iterator over smoothed cubic segments of a sampled stroke
///
/// Yields `points.len() - 1` segments, segment `i - 1` ends at `points[i]`.
pub struct SmoothIter<'a> {
    points: &'a [Point],
    index: usize,
}

impl<'a> SmoothIter<'a> {
    pub fn new(points: &'a [Point]) -> Self {
        Self { points, index: 1 }
    }
}

impl Iterator for SmoothIter<'_> {
    type Item = Cubic;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.index;
        let a = self.points;
        let end = *a.get(i)?;
        let start = a[i - 1];
        self.index += 1;

        let previous = i.checked_sub(2).map(|j| a[j]);
        let start_ctrl = control_point(start, previous, Some(end), false);
        let end_ctrl = control_point(end, Some(start), a.get(i + 1).copied(), true);
        Some(Cubic([start, start_ctrl, end_ctrl, end]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.points.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SmoothIter<'_> {}

/// Smoothed curves of the sampled points
pub fn smooth(points: &[Point]) -> SmoothIter<'_> {
    SmoothIter::new(points)
}

/// Convert sampled stroke points into a smooth path
///
/// Produces one `MoveTo` to the first point followed by one `CubicTo` per every
/// other point. Empty input produces an empty path.
pub fn to_path_commands(points: &[Point]) -> PathData {
    let first = match points.first() {
        Some(first) => *first,
        None => return PathData::empty(),
    };
    let mut cmds = Vec::with_capacity(points.len());
    cmds.push(PathCmd::MoveTo(first));
    cmds.extend(smooth(points).map(|cubic| cubic.to_cmd()));
    PathData::new(cmds)
}

use std::{
    fmt,
    ops::{Add, Mul, Sub},
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;
pub const PI: f64 = std::f64::consts::PI;

/// Largest magnitude which is still written as an integer by `scalar_fmt`
const INTEGER_MAX: Scalar = 1e15;

/// Format floats in a compact way suitable for SVG path
///
/// Integral values are written without fraction, everything else is written as the
/// shortest decimal representation which parses back to exactly the same value.
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    if value.fract() == 0.0 && value.abs() < INTEGER_MAX {
        write!(f, "{}", value as i64)
    } else {
        let mut buffer = [0u8; lexical_core::BUFFER_SIZE];
        let digits = lexical_core::write(value, &mut buffer);
        f.write_str(std::str::from_utf8(digits).map_err(|_| fmt::Error)?)
    }
}

/// Point in the drawing surface coordinates
///
/// Origin is the top-left corner of the surface, units are surface pixels.
#[derive(Clone, Copy, PartialEq)]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)?;
        Ok(())
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Scalar {
        self.0[0]
    }

    /// Get `y` compenent of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Distance between two points
    ///
    /// Computed as `sqrt(dx^2 + dy^2)` (not `hypot`) so results are reproducible
    /// bit for bit by any other implementation of the smoothing formula.
    pub fn dist(self, other: Self) -> Scalar {
        let Self([dx, dy]) = other - self;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the vector pointing from self to the other
    pub fn angle_to(self, other: Self) -> Scalar {
        let Self([dx, dy]) = other - self;
        dy.atan2(dx)
    }

    /// Check if both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }

    /// Determine if self is close to the other within the marging of error
    pub fn is_close_to(self, other: Point, eps: Scalar) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < eps && (y0 - y1).abs() < eps
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

/// Bounding box with sides directed along the axes
#[derive(Clone, Copy, PartialEq)]
pub struct BBox {
    /// Point with minimal x and y values
    min: Point,
    /// Point with maximum x and y values
    max: Point,
}

impl BBox {
    /// Construct bounding box which includes points `p0` and `p1`
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min: Point([x0, y0]),
            max: Point([x1, y1]),
        }
    }

    /// Smallest bounding box containing all the points
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, |bbox, point| match bbox {
            None => Some(BBox::new(*point, *point)),
            Some(bbox) => Some(bbox.extend(*point)),
        })
    }

    /// Point with minmum values of x and y coordianetes
    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    /// Point with maximum values of x and y coordianetes
    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    /// `x` coordinate of the point with the minimal value
    #[inline]
    pub fn x(&self) -> Scalar {
        self.min.x()
    }

    /// `y` coordinate of the point with the minimal value
    #[inline]
    pub fn y(&self) -> Scalar {
        self.min.y()
    }

    /// Width of the bounding box
    #[inline]
    pub fn width(&self) -> Scalar {
        self.max.x() - self.min.x()
    }

    /// Hight of the bounding box
    #[inline]
    pub fn height(&self) -> Scalar {
        self.max.y() - self.min.y()
    }

    /// Determine if the point is inside of the bounding box
    pub fn contains(&self, point: Point) -> bool {
        let Point([x, y]) = point;
        self.min.x() <= x && x <= self.max.x() && self.min.y() <= y && y <= self.max.y()
    }

    /// Extend bounding box so it would contains provided point
    pub fn extend(&self, point: Point) -> Self {
        let Point([x, y]) = point;
        Self {
            min: Point([self.min.x().min(x), self.min.y().min(y)]),
            max: Point([self.max.x().max(x), self.max.y().max(y)]),
        }
    }

    /// Create bounding box the spans both bbox-es
    pub fn union(&self, other: BBox) -> Self {
        self.extend(other.min).extend(other.max)
    }

    pub fn union_opt(&self, other: Option<BBox>) -> Self {
        match other {
            Some(other) => self.union(other),
            None => *self,
        }
    }

    /// Grow bounding box by `margin` in every direction
    pub fn inflate(&self, margin: Scalar) -> Self {
        let margin = Point::new(margin, margin);
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }
}

impl fmt::Debug for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox x=")?;
        scalar_fmt(f, self.x())?;
        write!(f, ", y=")?;
        scalar_fmt(f, self.y())?;
        write!(f, ", w=")?;
        scalar_fmt(f, self.width())?;
        write!(f, ", h=")?;
        scalar_fmt(f, self.height())
    }
}

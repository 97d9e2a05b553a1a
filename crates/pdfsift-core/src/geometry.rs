//! Geometry primitives: points, axis-aligned rectangles, and affine
//! transforms.
//!
//! All PDF coordinate work in pdfsift is expressed through [`Mat3`], a
//! 3×3 homogeneous transform of the shape `[a b 0; c d 0; e f 1]` stored
//! as its six varying coefficients. Composition follows the PDF
//! convention: `new = operand × current`, i.e. the operand matrix is
//! pre-multiplied onto the current one.

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding rectangle.
///
/// Invariant: `min_x <= max_x` and `min_y <= max_y`. Depending on the
/// pipeline stage the y-axis is either PDF space (origin bottom-left) or
/// page-display space (origin top-left, `min_y` = distance from the top
/// edge); the type itself is agnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest rectangle enclosing all the given points.
    ///
    /// Returns `None` for an empty iterator.
    pub fn bounding<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in iter {
            rect.min_x = rect.min_x.min(p.x);
            rect.min_y = rect.min_y.min(p.y);
            rect.max_x = rect.max_x.max(p.x);
            rect.max_y = rect.max_y.max(p.y);
        }
        Some(rect)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Bounding rectangle of `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// Horizontal gap between the x-ranges of two rectangles.
    ///
    /// 0 when the ranges overlap or touch; otherwise the length of the
    /// empty interval between them.
    pub fn gap_x(&self, other: &Rect) -> f64 {
        axis_gap(self.min_x, self.max_x, other.min_x, other.max_x)
    }

    /// Vertical gap between the y-ranges of two rectangles (see [`Rect::gap_x`]).
    pub fn gap_y(&self, other: &Rect) -> f64 {
        axis_gap(self.min_y, self.max_y, other.min_y, other.max_y)
    }
}

fn axis_gap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    if a_max < b_min {
        b_min - a_max
    } else if b_max < a_min {
        a_min - b_max
    } else {
        0.0
    }
}

/// Affine 2D transform `[a b 0; c d 0; e f 1]`.
///
/// Used for the current transformation matrix, the text matrix, the text
/// line matrix, and the font-size scaling matrix alike.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Mat3 {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The neutral element of composition.
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Pure translation by `(tx, ty)`.
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Matrix product `self × other`.
    ///
    /// With row-vector points (`[x y 1] × M`), the result applies `self`
    /// first and `other` second — matching the PDF operand-times-current
    /// concatenation convention.
    pub fn concat(&self, other: &Mat3) -> Mat3 {
        Mat3 {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Map a point through this transform.
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: p.x * self.a + p.y * self.c + self.e,
            y: p.x * self.b + p.y * self.d + self.f,
        }
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

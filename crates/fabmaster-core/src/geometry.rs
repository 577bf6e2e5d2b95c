use serde::{Deserialize, Serialize};

/// Maximum coordinate difference at which two points are treated as the same
/// vertex when stitching shapes into a ring (board units).
pub const STITCH_TOLERANCE: f64 = 1e-6;

/// A 2D point in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Angle of the vector from `origin` to this point, in radians.
    pub fn angle_from(&self, origin: &Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// True when both coordinates agree within [`STITCH_TOLERANCE`].
    pub fn coincides(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= STITCH_TOLERANCE && (self.y - other.y).abs() <= STITCH_TOLERANCE
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotate(&self, degrees: f64) -> Self {
        let (sin_r, cos_r) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos_r - self.y * sin_r,
            y: self.x * sin_r + self.y * cos_r,
        }
    }

    /// Reflect across the Y axis.
    pub fn mirror(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
        }
    }

    pub fn scale(&self, rate: f64) -> Self {
        Self {
            x: self.x * rate,
            y: self.y * rate,
        }
    }
}

/// The in-place affine operations shared by every placed entity.
///
/// Implementors apply each operation to all the points they own (rings,
/// holes, pin coordinates) so that a package moves as one rigid body.
pub trait Transform2D {
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, degrees: f64);
    fn mirror(&mut self);
    fn scale(&mut self, rate: f64);
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = BBox::new(*first, *first);
        for p in points {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(&self.max)
    }

    pub fn union(&self, other: &BBox) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

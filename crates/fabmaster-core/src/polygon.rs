use serde::{Deserialize, Serialize};

use crate::geometry::{BBox, Point, Transform2D};

/// An ordered point sequence tracing a polygon boundary or a hole.
///
/// The ring is implicitly closed: the last point connects back to the first
/// without being repeated. Use [`Ring::closed_points`] when a consumer needs
/// the explicit closing vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a shape's points, stitching the seam with the current end.
    ///
    /// When the shape starts where the ring ends, the shared join point is
    /// dropped. When it also ends where the ring starts, its final point is
    /// dropped as well so the ring never repeats its first vertex. Returns the
    /// number of seams stitched (0, 1 or 2).
    pub fn append(&mut self, shape_points: &[Point]) -> usize {
        let (Some(first), Some(last)) = (shape_points.first(), shape_points.last()) else {
            return 0;
        };

        let (ring_first, ring_last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => {
                self.points.extend_from_slice(shape_points);
                return 0;
            }
        };

        if !ring_last.coincides(first) {
            self.points.extend_from_slice(shape_points);
            return 0;
        }

        let closes_loop =
            shape_points.len() > 1 && self.points.len() > 1 && last.coincides(&ring_first);
        if closes_loop {
            self.points
                .extend_from_slice(&shape_points[1..shape_points.len() - 1]);
            2
        } else {
            self.points.extend_from_slice(&shape_points[1..]);
            1
        }
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Cross product of the first two edges; positive for a counter-clockwise
    /// turn. `None` for rings with fewer than three points.
    pub fn leading_turn(&self) -> Option<f64> {
        match self.points.as_slice() {
            [p0, p1, p2, ..] => {
                Some((p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x))
            }
            _ => None,
        }
    }

    /// Reverse the ring if its leading turn is clockwise.
    pub fn normalize_winding(&mut self) {
        if let Some(turn) = self.leading_turn() {
            if turn < 0.0 {
                self.reverse();
            }
        }
    }

    /// The points with the first one repeated at the end, if not already.
    pub fn closed_points(&self) -> Vec<Point> {
        let mut points = self.points.clone();
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            if self.points.len() > 1 && !first.coincides(last) {
                points.push(*first);
            }
        }
        points
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.points)
    }
}

impl Transform2D for Ring {
    fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            *p = p.translate(dx, dy);
        }
    }

    fn rotate(&mut self, degrees: f64) {
        for p in &mut self.points {
            *p = p.rotate(degrees);
        }
    }

    fn mirror(&mut self) {
        for p in &mut self.points {
            *p = p.mirror();
        }
    }

    fn scale(&mut self, rate: f64) {
        for p in &mut self.points {
            *p = p.scale(rate);
        }
    }
}

/// A filled region: one outer ring plus any number of holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ring(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Append shape points to the outer boundary.
    pub fn append(&mut self, shape_points: &[Point]) -> usize {
        self.outer.append(shape_points)
    }

    /// Open a new, empty hole; it becomes the target of `append_hole_data`.
    pub fn add_hole(&mut self) {
        self.holes.push(Ring::new());
    }

    /// Append shape points to the most recently added hole.
    pub fn append_hole_data(&mut self, shape_points: &[Point]) -> usize {
        if self.holes.is_empty() {
            log::debug!("hole data without an open hole, starting one");
            self.add_hole();
        }
        match self.holes.last_mut() {
            Some(hole) => hole.append(shape_points),
            None => 0,
        }
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    pub fn normalize_winding(&mut self) {
        self.outer.normalize_winding();
    }

    pub fn reverse(&mut self) {
        self.outer.reverse();
    }

    pub fn bbox(&self) -> Option<BBox> {
        self.outer.bbox()
    }
}

impl Transform2D for Polygon {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.outer.translate(dx, dy);
        for hole in &mut self.holes {
            hole.translate(dx, dy);
        }
    }

    fn rotate(&mut self, degrees: f64) {
        self.outer.rotate(degrees);
        for hole in &mut self.holes {
            hole.rotate(degrees);
        }
    }

    fn mirror(&mut self) {
        self.outer.mirror();
        for hole in &mut self.holes {
            hole.mirror();
        }
    }

    fn scale(&mut self, rate: f64) {
        self.outer.scale(rate);
        for hole in &mut self.holes {
            hole.scale(rate);
        }
    }
}

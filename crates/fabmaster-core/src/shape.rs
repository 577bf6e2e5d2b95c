use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::polygon::Ring;

/// Tessellation steps for arcs spanning less than half a turn.
/// Wider arcs use twice as many.
pub const ARC_STEPS: usize = 6;

/// Tessellation steps for a full circle.
pub const CIRCLE_STEPS: usize = 12;

/// Orientation of a stadium (oblong) pad's straight sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StadiumAxis {
    X,
    Y,
}

/// A parametric 2D primitive. Each variant produces its point sequence on
/// demand through [`Shape::points`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line {
        start: Point,
        end: Point,
        width: f64,
    },
    Arc {
        start: Point,
        end: Point,
        center: Point,
        /// Non-positive radius means "derive from center and start".
        radius: f64,
        clockwise: bool,
        width: f64,
    },
    Circle {
        start: Point,
        center: Point,
        clockwise: bool,
    },
    Rectangle {
        start: Point,
        end: Point,
    },
    Stadium {
        axis: StadiumAxis,
        start: Point,
        end: Point,
    },
}

impl Shape {
    pub fn line(start: Point, end: Point) -> Self {
        Shape::Line {
            start,
            end,
            width: 0.0,
        }
    }

    pub fn arc(start: Point, end: Point, center: Point, radius: f64, clockwise: bool) -> Self {
        Shape::Arc {
            start,
            end,
            center,
            radius,
            clockwise,
            width: 0.0,
        }
    }

    /// Stroke width for lines and arcs; zero for closed shapes.
    pub fn width(&self) -> f64 {
        match self {
            Shape::Line { width, .. } | Shape::Arc { width, .. } => *width,
            _ => 0.0,
        }
    }

    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Line { start, end, .. } => vec![*start, *end],
            Shape::Arc {
                start,
                end,
                center,
                radius,
                clockwise,
                ..
            } => arc_points(*start, *end, *center, *radius, *clockwise),
            Shape::Circle {
                start,
                center,
                clockwise,
            } => circle_points(*start, *center, *clockwise),
            Shape::Rectangle { start, end } => vec![
                *start,
                Point::new(end.x, start.y),
                *end,
                Point::new(start.x, end.y),
            ],
            Shape::Stadium { axis, start, end } => stadium_ring(*axis, *start, *end).points().to_vec(),
        }
    }

    /// The shape's points as a standalone ring.
    pub fn to_ring(&self) -> Ring {
        Ring::from_points(self.points())
    }
}

fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Tessellate an arc, keeping both endpoints exact.
///
/// A coincident start and end describes a full loop. A degenerate arc whose
/// center sits on its start collapses onto that point instead of failing.
fn arc_points(start: Point, end: Point, center: Point, radius: f64, clockwise: bool) -> Vec<Point> {
    let radius = if radius <= 0.0 {
        center.distance_to(&start)
    } else {
        radius
    };

    let start_angle = start.angle_from(&center);
    let end_angle = if start.coincides(&end) {
        2.0 * PI - start_angle
    } else {
        end.angle_from(&center)
    };

    let span = (end_angle - start_angle).abs();
    let steps = if span < PI { ARC_STEPS } else { ARC_STEPS * 2 };
    let direction = if clockwise { -1.0 } else { 1.0 };
    let step_angle = span / steps as f64;

    let mut points = Vec::with_capacity(steps + 1);
    points.push(start);
    for n in 1..steps {
        let angle = start_angle + direction * n as f64 * step_angle;
        points.push(point_on_circle(center, radius, angle));
    }
    points.push(end);
    points
}

/// Tessellate a full circle. The start point is not repeated at the end.
fn circle_points(start: Point, center: Point, clockwise: bool) -> Vec<Point> {
    let radius = center.distance_to(&start);
    let start_angle = start.angle_from(&center);
    let direction = if clockwise { -1.0 } else { 1.0 };
    let step_angle = 2.0 * PI / CIRCLE_STEPS as f64;

    let mut points = Vec::with_capacity(CIRCLE_STEPS);
    points.push(start);
    for n in 1..CIRCLE_STEPS {
        points.push(point_on_circle(
            center,
            radius,
            start_angle + direction * n as f64 * step_angle,
        ));
    }
    points
}

/// Build a stadium counter-clockwise from two straight sides and two
/// half-circle caps.
fn stadium_ring(axis: StadiumAxis, start: Point, end: Point) -> Ring {
    let mut ring = Ring::new();
    match axis {
        StadiumAxis::X => {
            let mid_y = (start.y + end.y) / 2.0;
            let lower_right = Point::new(end.x, start.y);
            let upper_left = Point::new(start.x, end.y);
            ring.append(&Shape::line(start, lower_right).points());
            ring.append(&Shape::arc(lower_right, end, Point::new(end.x, mid_y), 0.0, false).points());
            ring.append(&Shape::line(end, upper_left).points());
            ring.append(&Shape::arc(upper_left, start, Point::new(start.x, mid_y), 0.0, false).points());
        }
        StadiumAxis::Y => {
            let mid_x = (start.x + end.x) / 2.0;
            let lower_right = Point::new(end.x, start.y);
            let upper_left = Point::new(start.x, end.y);
            ring.append(&Shape::arc(start, lower_right, Point::new(mid_x, start.y), 0.0, false).points());
            ring.append(&Shape::line(lower_right, end).points());
            ring.append(&Shape::arc(end, upper_left, Point::new(mid_x, end.y), 0.0, false).points());
            ring.append(&Shape::line(upper_left, start).points());
        }
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_points() {
        let line = Shape::line(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(line.points(), vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn test_quarter_arc_uses_six_steps() {
        let arc = Shape::arc(
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
            1.0,
            false,
        );
        let points = arc.points();
        assert_eq!(points.len(), ARC_STEPS + 1);
        assert_eq!(points[0], Point::new(1.0, 0.0));
        assert_eq!(points[ARC_STEPS], Point::new(0.0, 1.0));
        for p in &points {
            assert!((p.distance_to(&Point::new(0.0, 0.0)) - 1.0).abs() < 1e-10);
        }
        // Interior points stay in the first quadrant.
        assert!(points[3].x > 0.0 && points[3].y > 0.0);
    }

    #[test]
    fn test_full_loop_arc_endpoints_exact() {
        let start = Point::new(2.0, 0.0);
        let arc = Shape::arc(start, start, Point::new(0.0, 0.0), 0.0, false);
        let points = arc.points();
        assert_eq!(points.len(), 2 * ARC_STEPS + 1);
        assert_eq!(points[0], start);
        assert_eq!(*points.last().unwrap(), start);
        // Radius derived from center and start.
        assert!((points[6].x + 2.0).abs() < 1e-10);
        assert!(points[6].y.abs() < 1e-10);
    }

    #[test]
    fn test_clockwise_arc_walks_negative_direction() {
        let arc = Shape::arc(
            Point::new(0.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
            1.0,
            true,
        );
        let points = arc.points();
        assert_eq!(points.len(), ARC_STEPS + 1);
        assert!(points[3].x > 0.0 && points[3].y > 0.0);
    }

    #[test]
    fn test_degenerate_arc_collapses() {
        let p = Point::new(5.0, 5.0);
        let arc = Shape::arc(p, Point::new(5.0, 5.0), p, 0.0, false);
        let points = arc.points();
        assert!(points.iter().all(|q| q.x.is_finite() && q.y.is_finite()));
        assert!(points.iter().all(|q| q.coincides(&p)));
    }

    #[test]
    fn test_circle_has_twelve_points_without_closure() {
        let circle = Shape::Circle {
            start: Point::new(-1.0, 0.0),
            center: Point::new(0.0, 0.0),
            clockwise: false,
        };
        let points = circle.points();
        assert_eq!(points.len(), CIRCLE_STEPS);
        assert_eq!(points[0], Point::new(-1.0, 0.0));
        assert!(!points[CIRCLE_STEPS - 1].coincides(&points[0]));
        // Counter-clockwise from the left-most point heads downwards.
        assert!(points[1].y < 0.0);
    }

    #[test]
    fn test_rectangle_corners_counter_clockwise() {
        let rect = Shape::Rectangle {
            start: Point::new(0.0, 0.0),
            end: Point::new(2.0, 1.0),
        };
        let ring = rect.to_ring();
        assert_eq!(
            ring.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(2.0, 1.0),
                Point::new(0.0, 1.0)
            ]
        );
        assert!(ring.leading_turn().unwrap() > 0.0);
    }

    #[test]
    fn test_stadium_x_is_closed_and_counter_clockwise() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(4.0, 2.0);
        let ring = Shape::Stadium {
            axis: StadiumAxis::X,
            start,
            end,
        }
        .to_ring();
        let points = ring.points();
        assert_eq!(points[0], start);
        assert!(!points.last().unwrap().coincides(&start));
        assert!(ring.leading_turn().unwrap() > 0.0);
        // Right cap bulges past the box.
        let max_x = points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!((max_x - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_stadium_y_caps_extend_vertically() {
        let ring = Shape::Stadium {
            axis: StadiumAxis::Y,
            start: Point::new(0.0, 0.0),
            end: Point::new(2.0, 4.0),
        }
        .to_ring();
        let bb = ring.bbox().unwrap();
        assert!((bb.min.y + 1.0).abs() < 1e-10);
        assert!((bb.max.y - 5.0).abs() < 1e-10);
        assert!(ring.leading_turn().unwrap() > 0.0);
    }
}

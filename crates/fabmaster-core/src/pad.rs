use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Transform2D};
use crate::layer::Layer;
use crate::polygon::Polygon;
use crate::shape::{Shape, StadiumAxis};

/// One layer of a pad stack definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub name: String,
    pub layer: Layer,
    /// Raw `PADSHAPE1` value.
    pub shape_name: String,
    pub width: f64,
    pub height: f64,
    pub offset: Point,
    /// Outline of the pad; `None` for shapes without a geometric model.
    pub geometry: Option<Polygon>,
}

impl Pad {
    pub fn new(
        name: &str,
        layer: Layer,
        shape_name: &str,
        width: f64,
        height: f64,
        offset: Point,
    ) -> Self {
        let geometry = pad_shape(shape_name, width, height, offset)
            .map(|shape| Polygon::from_ring(shape.to_ring()));
        Self {
            name: name.to_string(),
            layer,
            shape_name: shape_name.to_string(),
            width,
            height,
            offset,
            geometry,
        }
    }
}

/// The parametric shape of a pad centred on `offset`.
pub fn pad_shape(shape_name: &str, width: f64, height: f64, offset: Point) -> Option<Shape> {
    let lower_left = Point::new(offset.x - width / 2.0, offset.y - height / 2.0);
    let upper_right = Point::new(offset.x + width / 2.0, offset.y + height / 2.0);
    match shape_name {
        "CIRCLE" => Some(Shape::Circle {
            start: Point::new(offset.x - width / 2.0, offset.y),
            center: offset,
            clockwise: false,
        }),
        "RECTANGLE" | "SQUARE" => Some(Shape::Rectangle {
            start: lower_left,
            end: upper_right,
        }),
        "OBLONG_X" => Some(Shape::Stadium {
            axis: StadiumAxis::X,
            start: lower_left,
            end: upper_right,
        }),
        "OBLONG_Y" => Some(Shape::Stadium {
            axis: StadiumAxis::Y,
            start: lower_left,
            end: upper_right,
        }),
        _ => None,
    }
}

impl Transform2D for Pad {
    fn translate(&mut self, dx: f64, dy: f64) {
        if let Some(geometry) = &mut self.geometry {
            geometry.translate(dx, dy);
        }
    }

    fn rotate(&mut self, degrees: f64) {
        if let Some(geometry) = &mut self.geometry {
            geometry.rotate(degrees);
        }
    }

    fn mirror(&mut self) {
        if let Some(geometry) = &mut self.geometry {
            geometry.mirror();
        }
    }

    fn scale(&mut self, rate: f64) {
        if let Some(geometry) = &mut self.geometry {
            geometry.scale(rate);
        }
    }
}

//! # Fabmaster Core
//!
//! Board geometry model for FABMASTER extracts: points and rings, the
//! parametric shapes carried by graphic records, and the tag-continuity
//! assemblers that rebuild copper zones, board outlines and package
//! footprints from a flat record stream.
//!
//! This crate knows nothing about the text format; `fabmaster-io` feeds it.

pub mod board;
pub mod component;
pub mod copper;
pub mod geometry;
pub mod height;
pub mod layer;
pub mod package;
pub mod pad;
pub mod placement;
pub mod polygon;
pub mod settings;
pub mod shape;
pub mod tag;

pub use board::{Board, GeometryClass, Via};
pub use component::{Component, ComponentPin};
pub use copper::{CopperEntity, CopperKind, CopperLayers, EtchAssembler, NetBucket, Outline, OutlineAssembler};
pub use geometry::{BBox, Point, Transform2D, STITCH_TOLERANCE};
pub use height::ComponentClass;
pub use layer::Layer;
pub use package::{Package, PackageAssembler, PackagePin};
pub use pad::Pad;
pub use placement::{placements_to_json, ComponentPlacement};
pub use polygon::{Polygon, Ring};
pub use settings::BoardSettings;
pub use shape::{Shape, StadiumAxis};
pub use tag::RecordTag;

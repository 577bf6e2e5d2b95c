use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Transform2D};
use crate::layer::Layer;
use crate::polygon::{Polygon, Ring};
use crate::shape::Shape;
use crate::tag::RecordTag;

/// Bucket key used when a copper record has no `NET_NAME` column at all.
pub const MISSING_NET: &str = "###";
/// Bucket key used when the `NET_NAME` column is present but empty.
pub const UNNAMED_NET: &str = "===";

/// Resolve the bucket key for a record's net name.
pub fn net_key(net_name: Option<&str>) -> &str {
    match net_name {
        None => MISSING_NET,
        Some("") => UNNAMED_NET,
        Some(name) => name,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopperKind {
    /// A routed trace with a stroke width.
    Line,
    /// A filled zone, possibly with holes.
    Polygon,
}

/// One piece of copper: a standalone trace or a filled zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopperEntity {
    pub kind: CopperKind,
    pub width: f64,
    pub polygon: Polygon,
}

impl CopperEntity {
    pub fn line(width: f64, points: &[Point]) -> Self {
        let mut polygon = Polygon::new();
        polygon.append(points);
        Self {
            kind: CopperKind::Line,
            width,
            polygon,
        }
    }

    pub fn zone(points: &[Point]) -> Self {
        let mut polygon = Polygon::new();
        polygon.append(points);
        Self {
            kind: CopperKind::Polygon,
            width: 0.0,
            polygon,
        }
    }

    pub fn append(&mut self, points: &[Point]) {
        self.polygon.append(points);
    }

    /// Holes only exist on zones; this is a no-op for traces.
    pub fn add_hole(&mut self) {
        if self.kind == CopperKind::Polygon {
            self.polygon.add_hole();
        }
    }

    /// Holes only exist on zones; this is a no-op for traces.
    pub fn append_hole_data(&mut self, points: &[Point]) {
        if self.kind == CopperKind::Polygon {
            self.polygon.append_hole_data(points);
        }
    }
}

impl Transform2D for CopperEntity {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.polygon.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.polygon.rotate(degrees);
    }

    fn mirror(&mut self) {
        self.polygon.mirror();
    }

    fn scale(&mut self, rate: f64) {
        self.polygon.scale(rate);
        self.width *= rate;
    }
}

/// All copper of one net on one layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetBucket {
    pub lines: Vec<CopperEntity>,
    pub polygons: Vec<CopperEntity>,
}

impl NetBucket {
    fn entities_mut(&mut self) -> impl Iterator<Item = &mut CopperEntity> {
        self.lines.iter_mut().chain(self.polygons.iter_mut())
    }
}

/// Copper grouped by layer, then by net name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopperLayers {
    layers: BTreeMap<Layer, BTreeMap<String, NetBucket>>,
}

impl CopperLayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, layer: Layer, net: &str) -> Option<&NetBucket> {
        self.layers.get(&layer).and_then(|nets| nets.get(net))
    }

    fn bucket_entry(&mut self, layer: Layer, net: &str) -> &mut NetBucket {
        self.layers
            .entry(layer)
            .or_default()
            .entry(net.to_string())
            .or_default()
    }

    /// Iterate `(layer, net, bucket)` in layer then net order.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &str, &NetBucket)> {
        self.layers.iter().flat_map(|(layer, nets)| {
            nets.iter()
                .map(move |(net, bucket)| (*layer, net.as_str(), bucket))
        })
    }

    pub fn net_count(&self) -> usize {
        self.layers.values().map(|nets| nets.len()).sum()
    }

    pub fn polygon_count(&self) -> usize {
        self.iter().map(|(_, _, b)| b.polygons.len()).sum()
    }

    pub fn line_count(&self) -> usize {
        self.iter().map(|(_, _, b)| b.lines.len()).sum()
    }

    fn for_each_entity(&mut self, mut f: impl FnMut(&mut CopperEntity)) {
        for nets in self.layers.values_mut() {
            for bucket in nets.values_mut() {
                bucket.entities_mut().for_each(&mut f);
            }
        }
    }
}

impl Transform2D for CopperLayers {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.for_each_entity(|e| e.translate(dx, dy));
    }

    fn rotate(&mut self, degrees: f64) {
        self.for_each_entity(|e| e.rotate(degrees));
    }

    fn mirror(&mut self) {
        self.for_each_entity(|e| e.mirror());
    }

    fn scale(&mut self, rate: f64) {
        self.for_each_entity(|e| e.scale(rate));
    }
}

// ── Etch assembly ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct ActiveZone {
    layer: Layer,
    net: String,
    tag_id: String,
    sub_id: String,
}

/// Groups the flat etch record stream into traces and zones with holes.
///
/// Zero-width records sharing the active tag extend the most recent zone of
/// their bucket: boundary records (`sub_id` absent or `"0"`) extend its
/// outline, records repeating the active `sub_id` extend the current hole, and
/// a new `sub_id` opens a new hole. A new tag, or a record for a different
/// layer/net bucket, starts a new zone. Records with a positive width always
/// become standalone traces and leave the grouping state untouched.
#[derive(Debug, Default)]
pub struct EtchAssembler {
    copper: CopperLayers,
    active: Option<ActiveZone>,
}

impl EtchAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer, net_name: Option<&str>, tag: &RecordTag, shape: &Shape) {
        let net = net_key(net_name);
        let points = shape.points();
        let width = shape.width();
        let bucket = self.copper.bucket_entry(layer, net);

        if width > 0.0 {
            bucket.lines.push(CopperEntity::line(width, &points));
            return;
        }

        let continuing = self.active.as_ref().is_some_and(|active| {
            active.tag_id == tag.tag_id && active.layer == layer && active.net == net
        });

        if continuing {
            if let (Some(zone), Some(active)) = (bucket.polygons.last_mut(), self.active.as_mut()) {
                match tag.sub_id.as_deref() {
                    None | Some("0") => zone.append(&points),
                    Some(sub_id) if sub_id == active.sub_id => zone.append_hole_data(&points),
                    Some(sub_id) => {
                        log::trace!("zone {} opens hole {}", active.tag_id, sub_id);
                        zone.add_hole();
                        zone.append_hole_data(&points);
                        active.sub_id = sub_id.to_string();
                    }
                }
                return;
            }
        }

        log::trace!("new zone {} on {}/{}", tag.tag_id, layer, net);
        bucket.polygons.push(CopperEntity::zone(&points));
        self.active = Some(ActiveZone {
            layer,
            net: net.to_string(),
            tag_id: tag.tag_id.clone(),
            sub_id: "0".to_string(),
        });
    }

    pub fn copper(&self) -> &CopperLayers {
        &self.copper
    }

    pub fn finish(self) -> CopperLayers {
        log::debug!(
            "etch assembled: {} nets, {} zones, {} traces",
            self.copper.net_count(),
            self.copper.polygon_count(),
            self.copper.line_count()
        );
        self.copper
    }
}

// ── Board outline ────────────────────────────────────────────────────

/// The board's outer boundary, plus its extent once normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub ring: Ring,
    offset: Option<Point>,
    width: f64,
    height: f64,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Scale the outline and re-normalize it to the origin.
    pub fn scale(&mut self, rate: f64) {
        self.ring.scale(rate);
        self.normalize();
    }

    /// Move the bounding box's minimum corner to the origin, recording the
    /// removed offset and the board size. Returns `None` for an empty outline.
    pub fn normalize(&mut self) -> Option<Point> {
        let bbox = self.ring.bbox()?;
        self.width = bbox.width();
        self.height = bbox.height();
        self.offset = Some(bbox.min);
        self.ring.translate(-bbox.min.x, -bbox.min.y);
        self.offset
    }

    /// The offset removed by the last [`Outline::normalize`].
    pub fn offset(&self) -> Option<Point> {
        self.offset
    }

    /// Board `(width, height)` recorded by the last normalization.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// Collects board-outline records into the single global outline ring.
#[derive(Debug, Default)]
pub struct OutlineAssembler {
    outline: Outline,
    last_tag_id: Option<String>,
}

impl OutlineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: &RecordTag, shape: &Shape) {
        if self.last_tag_id.as_deref() != Some(tag.tag_id.as_str()) {
            log::trace!("outline figure {}", tag.tag_id);
            self.last_tag_id = Some(tag.tag_id.clone());
        }
        self.outline.ring.append(&shape.points());
    }

    pub fn finish(self) -> Outline {
        self.outline
    }
}

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::geometry::{BBox, Point, Transform2D};
use crate::layer::Layer;
use crate::polygon::Polygon;

/// Where a pin of a package sits, relative to the package's own origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagePin {
    pub pin_number: String,
    pub pin_name: String,
    pub position: Point,
    /// Pin rotation in degrees.
    pub rotation: f64,
    /// Name of the pad stack; resolved against the board's pad table.
    pub pad_stack_name: String,
}

/// Footprint geometry of one placed component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub sym_name: String,
    pub refdes: String,
    pub layer: Option<Layer>,
    /// Disjoint outline regions, in arrival order.
    pub geometries: Vec<Polygon>,
    /// Explicit body-center segment; its midpoint overrides the bbox center.
    pub body_center: Option<[Point; 2]>,
    pub pins: BTreeMap<String, PackagePin>,
}

impl Package {
    pub fn new(sym_name: &str, refdes: &str) -> Self {
        Self {
            sym_name: sym_name.to_string(),
            refdes: refdes.to_string(),
            ..Default::default()
        }
    }

    /// Open a new, empty outline region and return it.
    pub fn add_geometry(&mut self) -> &mut Polygon {
        self.geometries.push(Polygon::new());
        let last = self.geometries.len() - 1;
        &mut self.geometries[last]
    }

    pub fn add_pin(&mut self, pin: PackagePin) {
        self.pins.insert(pin.pin_number.clone(), pin);
    }

    /// Record the body-center marker. Only the first marker is kept.
    pub fn update_body_center(&mut self, start: Point, end: Point) {
        if self.body_center.is_none() {
            self.body_center = Some([start, end]);
        }
    }

    pub fn bbox(&self) -> Option<BBox> {
        self.geometries
            .iter()
            .filter_map(|g| g.bbox())
            .reduce(|a, b| a.union(&b))
    }

    /// The body-center midpoint when present, otherwise the center of the
    /// bounding box of all outline points.
    pub fn center(&self) -> Option<Point> {
        match self.body_center {
            Some([start, end]) => Some(start.midpoint(&end)),
            None => self.bbox().map(|bb| bb.center()),
        }
    }

    /// Make every outline region counter-clockwise.
    pub fn normalize_winding(&mut self) {
        for geometry in &mut self.geometries {
            geometry.normalize_winding();
        }
    }

    pub fn reverse(&mut self) {
        for geometry in &mut self.geometries {
            geometry.reverse();
        }
    }

    fn for_each_point(&mut self, f: impl Fn(&Point) -> Point) {
        for pin in self.pins.values_mut() {
            pin.position = f(&pin.position);
        }
        if let Some(segment) = &mut self.body_center {
            for p in segment.iter_mut() {
                *p = f(p);
            }
        }
    }
}

impl Transform2D for Package {
    fn translate(&mut self, dx: f64, dy: f64) {
        for geometry in &mut self.geometries {
            geometry.translate(dx, dy);
        }
        self.for_each_point(|p| p.translate(dx, dy));
    }

    fn rotate(&mut self, degrees: f64) {
        for geometry in &mut self.geometries {
            geometry.rotate(degrees);
        }
        self.for_each_point(|p| p.rotate(degrees));
    }

    fn mirror(&mut self) {
        for geometry in &mut self.geometries {
            geometry.mirror();
        }
        self.for_each_point(|p| p.mirror());
    }

    fn scale(&mut self, rate: f64) {
        for geometry in &mut self.geometries {
            geometry.scale(rate);
        }
        self.for_each_point(|p| p.scale(rate));
    }
}

// ── Package geometry assembly ────────────────────────────────────────

/// Groups package-outline records into regions by tag continuity.
///
/// State is kept per component: a record extends the component's latest
/// region while its tag matches the previous record's tag for that same
/// component, and opens a new region otherwise.
#[derive(Debug, Default)]
pub struct PackageAssembler {
    last_tag_ids: HashMap<String, String>,
}

impl PackageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    fn package_of<'a>(component: &'a mut Component, sym_name: &str) -> &'a mut Package {
        let refdes = component.refdes.clone();
        component
            .package
            .get_or_insert_with(|| Package::new(sym_name, &refdes))
    }

    /// Feed one outline stroke for `component`.
    pub fn push_geometry(
        &mut self,
        component: &mut Component,
        sym_name: &str,
        layer: Option<Layer>,
        tag_id: &str,
        points: &[Point],
    ) {
        let package = Self::package_of(component, sym_name);
        if package.sym_name.is_empty() {
            package.sym_name = sym_name.to_string();
        }
        if package.layer.is_none() {
            package.layer = layer;
        }

        let continues = !package.geometries.is_empty()
            && self.last_tag_ids.get(&package.refdes).map(String::as_str) == Some(tag_id);
        if !continues {
            log::trace!("package {} opens region for tag {}", package.refdes, tag_id);
            package.add_geometry();
        }
        if let Some(region) = package.geometries.last_mut() {
            region.append(points);
        }
        self.last_tag_ids
            .insert(package.refdes.clone(), tag_id.to_string());
    }

    /// Feed a body-center marker for `component`. Does not affect grouping.
    pub fn push_body_center(
        &mut self,
        component: &mut Component,
        sym_name: &str,
        start: Point,
        end: Point,
    ) {
        Self::package_of(component, sym_name).update_body_center(start, end);
    }
}

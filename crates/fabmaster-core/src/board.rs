use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::copper::{CopperLayers, Outline};
use crate::geometry::Point;
use crate::pad::Pad;
use crate::placement::ComponentPlacement;

/// A plated via from the `vias` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Via {
    pub position: Point,
    pub pad_stack_name: String,
    pub net_name: String,
    pub mirror: bool,
    /// Rotation in degrees.
    pub rotation: f64,
}

/// A `CLASS`/`SUBCLASS` pair declared in the `geometry_classes` section.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeometryClass {
    pub class: String,
    pub subclass: String,
}

/// Everything assembled from one FABMASTER stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    /// Components keyed by reference designator.
    components: BTreeMap<String, Component>,
    /// Pad stack layers keyed by pad name.
    pads: BTreeMap<String, Vec<Pad>>,
    pub vias: Vec<Via>,
    pub copper: CopperLayers,
    pub outline: Outline,
    pub geometry_classes: Vec<GeometryClass>,
    /// Rows read from the miscellaneous package line sections.
    pub misc_line_count: usize,
    /// Set once the board has been moved into placement coordinates.
    pub(crate) placed: bool,
    pub(crate) placements: BTreeMap<String, ComponentPlacement>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Components ───────────────────────────────────────────────────

    /// Insert a component, replacing any earlier one with the same refdes.
    pub fn add_component(&mut self, component: Component) -> Option<Component> {
        self.components.insert(component.refdes.clone(), component)
    }

    pub fn component(&self, refdes: &str) -> Option<&Component> {
        self.components.get(refdes)
    }

    pub fn component_mut(&mut self, refdes: &str) -> Option<&mut Component> {
        self.components.get_mut(refdes)
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub(crate) fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.components.values_mut()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // ── Pads ─────────────────────────────────────────────────────────

    pub fn add_pad(&mut self, pad: Pad) {
        self.pads.entry(pad.name.clone()).or_default().push(pad);
    }

    /// Pad layers for a pad stack name; empty when the name is unknown.
    pub fn pads_for(&self, pad_stack_name: &str) -> &[Pad] {
        self.pads
            .get(pad_stack_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn pad_names(&self) -> impl Iterator<Item = &str> {
        self.pads.keys().map(String::as_str)
    }

    pub(crate) fn pads_mut(&mut self) -> impl Iterator<Item = &mut Pad> {
        self.pads.values_mut().flatten()
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

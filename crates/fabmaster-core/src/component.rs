use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::height::ComponentClass;
use crate::package::Package;
use crate::settings::BoardSettings;

/// A net connection of one component pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentPin {
    pub pin_number: String,
    pub pin_name: String,
    pub net_name: String,
}

/// A placed part, keyed on the board by its reference designator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub refdes: String,
    pub comp_class: String,
    pub part_number: String,
    /// Body height in board units, when the source declares one.
    pub comp_height: Option<f64>,
    pub device_label: String,
    pub insertion_code: String,
    pub sym_type: String,
    pub sym_name: String,
    pub mirror: bool,
    /// Placement rotation in degrees.
    pub rotation: f64,
    pub position: Point,
    pub value: String,
    pub tolerance: String,
    pub voltage: String,
    pub pins: BTreeMap<String, ComponentPin>,
    pub package: Option<Package>,
}

impl Component {
    pub fn new(refdes: &str) -> Self {
        Self {
            refdes: refdes.to_string(),
            ..Default::default()
        }
    }

    pub fn add_pin(&mut self, pin: ComponentPin) {
        self.pins.insert(pin.pin_number.clone(), pin);
    }

    pub fn class(&self) -> ComponentClass {
        ComponentClass::classify(&self.comp_class, &self.device_label)
    }

    /// Body height in metres.
    pub fn height(&self, settings: &BoardSettings) -> f64 {
        match self.comp_height {
            Some(height) => height * settings.scale_rate,
            None => self
                .class()
                .height(&self.sym_name, settings.default_component_height),
        }
    }
}

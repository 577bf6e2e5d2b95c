//! Component body heights.
//!
//! A component's class selects a table of symbol-name substrings; the first
//! entry whose key occurs in the symbol name gives the height in metres.

use serde::{Deserialize, Serialize};

/// Case-size heights shared by chip resistors and inductors.
const CHIP_HEIGHTS: &[(&str, f64)] = &[
    ("01005", 0.00013),
    ("0201", 0.00023),
    ("0402", 0.00035),
    ("0603", 0.00045),
    ("0805", 0.0006),
    ("1206", 0.0006),
    ("1210", 0.0006),
    ("1812", 0.0006),
    ("2010", 0.0006),
    ("2512", 0.0006),
];

const CAPACITOR_HEIGHTS: &[(&str, f64)] = &[
    ("01005", 0.00025),
    ("0201", 0.0003),
    ("0402", 0.0004),
    ("0603", 0.0005),
    ("0805", 0.0006),
    ("1008", 0.00065),
    ("1206", 0.0007),
    ("1210", 0.0007),
    ("1806", 0.00075),
    ("1812", 0.0008),
    ("2010", 0.0008),
    ("2512", 0.0008),
    ("2920", 0.0008),
    ("3216", 0.0016),
    ("3812", 0.00127),
    ("3528", 0.0019),
    ("3825", 0.00127),
    ("5012", 0.00127),
    ("5025", 0.00127),
    ("5634", 0.0018),
    ("6032", 0.0025),
    ("6738", 0.0028),
    ("7338", 0.0028),
    ("7343", 0.0028),
    ("A-Case", 0.0016),
    ("B-Case", 0.0019),
    ("C-Case", 0.0025),
    ("D-Case", 0.0028),
];

const IC_HEIGHTS: &[(&str, f64)] = &[
    ("SOIC", 0.00175),
    ("SOT", 0.00111),
    ("TSOP", 0.0012),
    ("PSOP", 0.00295),
    ("SSOP", 0.0019),
    ("BGA", 0.001),
    ("DFN", 0.0005),
    ("QFN", 0.001),
    ("QFP", 0.0016),
    ("SON", 0.0008),
    ("SO-", 0.00175),
];

const IO_HEIGHTS: &[(&str, f64)] = &[("USB", 0.003), ("COAX", 0.003), ("HDR", 0.005)];

const NO_TABLE: &[(&str, f64)] = &[];

/// Fallback when a table has no match.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Fallback {
    Fixed(f64),
    /// The board-wide default component height.
    Board,
}

/// The closed set of component classes with their own height rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentClass {
    Default,
    Resistor,
    Capacitor,
    Diode,
    Discrete,
    Inductor,
    Thermistor,
    Zener,
    Fuse,
    Ic,
    Io,
}

impl ComponentClass {
    /// Classify from `COMP_CLASS`, refining `DISCRETE` parts by their
    /// `COMP_DEVICE_LABEL`.
    pub fn classify(comp_class: &str, device_label: &str) -> Self {
        let key = if comp_class == "DISCRETE" && !device_label.is_empty() {
            device_label
        } else {
            comp_class
        };
        Self::from_name(key)
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "RESISTOR" => ComponentClass::Resistor,
            "CAPACITOR" => ComponentClass::Capacitor,
            "DIODE" => ComponentClass::Diode,
            "DISCRETE" => ComponentClass::Discrete,
            "INDUCTOR" => ComponentClass::Inductor,
            "THERMISTOR" => ComponentClass::Thermistor,
            "ZENER" => ComponentClass::Zener,
            "FUSE" => ComponentClass::Fuse,
            "IC" => ComponentClass::Ic,
            "IO" => ComponentClass::Io,
            _ => ComponentClass::Default,
        }
    }

    fn rule(&self) -> (&'static [(&'static str, f64)], Fallback) {
        match self {
            ComponentClass::Resistor | ComponentClass::Inductor => {
                (CHIP_HEIGHTS, Fallback::Fixed(0.0006))
            }
            ComponentClass::Capacitor => (CAPACITOR_HEIGHTS, Fallback::Board),
            ComponentClass::Ic => (IC_HEIGHTS, Fallback::Board),
            ComponentClass::Io => (IO_HEIGHTS, Fallback::Fixed(0.015)),
            ComponentClass::Diode | ComponentClass::Zener => (NO_TABLE, Fallback::Fixed(0.00229)),
            ComponentClass::Fuse => (NO_TABLE, Fallback::Fixed(0.00269)),
            ComponentClass::Default | ComponentClass::Discrete | ComponentClass::Thermistor => {
                (NO_TABLE, Fallback::Board)
            }
        }
    }

    /// Look up the body height for a part with the given symbol name.
    pub fn height(&self, sym_name: &str, board_default: f64) -> f64 {
        let (table, fallback) = self.rule();
        table
            .iter()
            .find(|(key, _)| sym_name.contains(key))
            .map(|(_, height)| *height)
            .unwrap_or(match fallback {
                Fallback::Fixed(height) => height,
                Fallback::Board => board_default,
            })
    }
}

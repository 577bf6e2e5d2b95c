//! The ten FABMASTER sections, their field schemas and typed records.
//!
//! A data row arrives as positional values bound to the field names of the
//! active section header. [`Row`] pairs them up; each section then converts
//! the row into a fixed record type through [`SectionRecord`].

use std::collections::HashMap;
use std::fmt;

use fabmaster_core::board::{GeometryClass, Via};
use fabmaster_core::component::{Component, ComponentPin};
use fabmaster_core::geometry::Point;
use fabmaster_core::layer::Layer;
use fabmaster_core::package::PackagePin;
use fabmaster_core::pad::Pad;
use fabmaster_core::shape::Shape;
use fabmaster_core::tag::RecordTag;

use crate::error::RecordError;

// ── Sections ─────────────────────────────────────────────────────────

/// Known sections, in the order their headers appear in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Components,
    ComponentPin,
    GeometryClasses,
    PadDefinition,
    PackageGeometry,
    PackagePins,
    Vias,
    CopperEtch,
    MiscPkgLines,
    MiscPkgLines2,
}

const GRAPHIC_FIELDS: &[&str] = &[
    "GRAPHIC_DATA_NAME",
    "GRAPHIC_DATA_NUMBER",
    "RECORD_TAG",
    "GRAPHIC_DATA_1",
    "GRAPHIC_DATA_2",
    "GRAPHIC_DATA_3",
    "GRAPHIC_DATA_4",
    "GRAPHIC_DATA_5",
    "GRAPHIC_DATA_6",
    "GRAPHIC_DATA_7",
    "GRAPHIC_DATA_8",
    "GRAPHIC_DATA_9",
];

impl SectionKind {
    pub const ALL: [SectionKind; 10] = [
        SectionKind::Components,
        SectionKind::ComponentPin,
        SectionKind::GeometryClasses,
        SectionKind::PadDefinition,
        SectionKind::PackageGeometry,
        SectionKind::PackagePins,
        SectionKind::Vias,
        SectionKind::CopperEtch,
        SectionKind::MiscPkgLines,
        SectionKind::MiscPkgLines2,
    ];

    /// The section bound by the `index`-th header (0-based), if any.
    pub fn nth(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Components => "components",
            SectionKind::ComponentPin => "component_pin",
            SectionKind::GeometryClasses => "geometry_classes",
            SectionKind::PadDefinition => "pad_definition",
            SectionKind::PackageGeometry => "package_geometry",
            SectionKind::PackagePins => "package_pins",
            SectionKind::Vias => "vias",
            SectionKind::CopperEtch => "copper_etch",
            SectionKind::MiscPkgLines => "misc_pkg_lines",
            SectionKind::MiscPkgLines2 => "misc_pkg_lines2",
        }
    }

    /// Whether `field` belongs to this section's schema.
    pub fn knows_field(&self, field: &str) -> bool {
        let graphic = matches!(
            self,
            SectionKind::PackageGeometry
                | SectionKind::CopperEtch
                | SectionKind::MiscPkgLines
                | SectionKind::MiscPkgLines2
        );
        self.own_fields().contains(&field) || (graphic && GRAPHIC_FIELDS.contains(&field))
    }

    fn own_fields(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Components => &[
                "REFDES",
                "COMP_CLASS",
                "COMP_PART_NUMBER",
                "COMP_HEIGHT",
                "COMP_DEVICE_LABEL",
                "COMP_INSERTION_CODE",
                "SYM_TYPE",
                "SYM_NAME",
                "SYM_MIRROR",
                "SYM_ROTATE",
                "SYM_X",
                "SYM_Y",
                "COMP_VALUE",
                "COMP_TOL",
                "COMP_VOLTAGE",
            ],
            SectionKind::ComponentPin => &[
                "NET_NAME",
                "REFDES",
                "PIN_NUMBER",
                "PIN_NAME",
                "PIN_GROUND",
                "PIN_POWER",
            ],
            SectionKind::GeometryClasses => &["CLASS", "SUBCLASS"],
            SectionKind::PadDefinition => &[
                "PAD_NAME",
                "REC_NUMBER",
                "LAYER",
                "FIXFLAG",
                "VIAFLAG",
                "PADSHAPE1",
                "PADWIDTH",
                "PADHGHT",
                "PADXOFF",
                "PADYOFF",
                "PADFLASH",
                "PADSHAPENAME",
                "TRELSHAPE1",
                "TRELWIDTH",
                "TRELHGHT",
                "TRELXOFF",
                "TRELYOFF",
                "TRELFLASH",
                "TRELSHAPENAME",
                "APADSHAPE1",
                "APADWIDTH",
                "APADHGHT",
                "APADXOFF",
                "APADYOFF",
                "APADFLASH",
                "APADSHAPENAME",
            ],
            SectionKind::PackageGeometry => &["SUBCLASS", "SYM_NAME", "REFDES"],
            SectionKind::PackagePins => &[
                "SYM_NAME",
                "SYM_MIRROR",
                "PIN_NAME",
                "PIN_NUMBER",
                "PIN_X",
                "PIN_Y",
                "PAD_STACK_NAME",
                "REFDES",
                "PIN_ROTATION",
                "TEST_POINT",
            ],
            SectionKind::Vias => &[
                "VIA_X",
                "VIA_Y",
                "PAD_STACK_NAME",
                "NET_NAME",
                "TEST_POINT",
                "VIA_MIRROR",
                "VIA_ROTATION",
            ],
            SectionKind::CopperEtch => &["CLASS", "SUBCLASS", "NET_NAME"],
            SectionKind::MiscPkgLines => &[
                "SUBCLASS",
                "PAD_SHAPE_NAME",
                "PAD_STACK_NAME",
                "REFDES",
                "PIN_NUMBER",
            ],
            SectionKind::MiscPkgLines2 => &["SUBCLASS", "PAD_SHAPE_NAME", "PAD_STACK_NAME"],
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Rows ─────────────────────────────────────────────────────────────

/// A data row keyed by the active header's field names.
#[derive(Debug, Clone, Default)]
pub struct Row<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> Row<'a> {
    /// Pair field names with values positionally. Surplus names or values
    /// on either side are dropped.
    pub fn zip(fields: &'a [String], values: &[&'a str]) -> Self {
        Self {
            values: fields
                .iter()
                .map(String::as_str)
                .zip(values.iter().copied())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw value, or `None` when the column is absent.
    pub fn get(&self, field: &str) -> Option<&'a str> {
        self.values.get(field).copied()
    }

    /// The value, or an empty string when the column is absent.
    pub fn text(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    pub fn require(&self, field: &str) -> Result<&'a str, RecordError> {
        self.get(field)
            .ok_or_else(|| RecordError::MissingField(field.to_string()))
    }

    pub fn number(&self, field: &str) -> Result<f64, RecordError> {
        parse_number(field, self.require(field)?)
    }

    /// A numeric column that may be absent or blank.
    pub fn optional_number(&self, field: &str) -> Result<Option<f64>, RecordError> {
        match self.get(field).map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_number(field, value).map(Some),
        }
    }

    pub fn number_or_zero(&self, field: &str) -> Result<f64, RecordError> {
        Ok(self.optional_number(field)?.unwrap_or(0.0))
    }

    pub fn point(&self, x: &str, y: &str) -> Result<Point, RecordError> {
        Ok(Point::new(self.number(x)?, self.number(y)?))
    }

    fn flag(&self, field: &str) -> bool {
        self.get(field) == Some("YES")
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, RecordError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RecordError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}

// ── Records ──────────────────────────────────────────────────────────

/// A fixed record type built from one data row.
pub trait SectionRecord: Sized {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError>;
}

impl SectionRecord for Component {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        let mut component = Component::new(row.require("REFDES")?);
        component.comp_class = row.text("COMP_CLASS");
        component.part_number = row.text("COMP_PART_NUMBER");
        component.comp_height = row.optional_number("COMP_HEIGHT")?;
        component.device_label = row.text("COMP_DEVICE_LABEL");
        component.insertion_code = row.text("COMP_INSERTION_CODE");
        component.sym_type = row.text("SYM_TYPE");
        component.sym_name = row.text("SYM_NAME");
        component.mirror = row.flag("SYM_MIRROR");
        component.rotation = row.number_or_zero("SYM_ROTATE")?;
        component.position = Point::new(
            row.number_or_zero("SYM_X")?,
            row.number_or_zero("SYM_Y")?,
        );
        component.value = row.text("COMP_VALUE");
        component.tolerance = row.text("COMP_TOL");
        component.voltage = row.text("COMP_VOLTAGE");
        Ok(component)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentPinRecord {
    pub refdes: String,
    pub pin: ComponentPin,
}

impl SectionRecord for ComponentPinRecord {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        Ok(Self {
            refdes: row.require("REFDES")?.to_string(),
            pin: ComponentPin {
                pin_number: row.require("PIN_NUMBER")?.to_string(),
                pin_name: row.text("PIN_NAME"),
                net_name: row.text("NET_NAME"),
            },
        })
    }
}

impl SectionRecord for GeometryClass {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        Ok(GeometryClass {
            class: row.require("CLASS")?.to_string(),
            subclass: row.text("SUBCLASS"),
        })
    }
}

/// One row of the pad stack table. Only the primary pad shape is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct PadRecord {
    pub name: String,
    pub layer: String,
    pub shape_name: String,
    pub width: f64,
    pub height: f64,
    pub offset: Point,
}

impl PadRecord {
    /// The pad for an outer copper layer; `None` for inner layers.
    pub fn into_pad(self) -> Option<Pad> {
        let layer = Layer::from_name(&self.layer)?;
        Some(Pad::new(
            &self.name,
            layer,
            &self.shape_name,
            self.width,
            self.height,
            self.offset,
        ))
    }
}

impl SectionRecord for PadRecord {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        Ok(Self {
            name: row.require("PAD_NAME")?.to_string(),
            layer: row.text("LAYER"),
            shape_name: row.text("PADSHAPE1"),
            width: row.number_or_zero("PADWIDTH")?,
            height: row.number_or_zero("PADHGHT")?,
            offset: Point::new(
                row.number_or_zero("PADXOFF")?,
                row.number_or_zero("PADYOFF")?,
            ),
        })
    }
}

/// The primitive carried by a graphic row, plus its grouping tag.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicRecord {
    /// `GRAPHIC_DATA_NAME`, e.g. `LINE`, `ARC`, `TEXT`.
    pub kind: String,
    pub tag: RecordTag,
    /// `None` for kinds with no geometric model, such as `TEXT`.
    pub shape: Option<Shape>,
}

fn data_field(index: usize) -> String {
    format!("GRAPHIC_DATA_{}", index)
}

impl SectionRecord for GraphicRecord {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        let kind = row.text("GRAPHIC_DATA_NAME");
        let tag = RecordTag::parse(row.get("RECORD_TAG").unwrap_or_default());
        let data = |i: usize| row.number(&data_field(i));
        let optional = |i: usize| row.number_or_zero(&data_field(i));

        let shape = match kind.as_str() {
            "LINE" => Some(Shape::Line {
                start: Point::new(data(1)?, data(2)?),
                end: Point::new(data(3)?, data(4)?),
                width: optional(5)?,
            }),
            "ARC" => Some(Shape::Arc {
                start: Point::new(data(1)?, data(2)?),
                end: Point::new(data(3)?, data(4)?),
                center: Point::new(data(5)?, data(6)?),
                radius: optional(7)?,
                width: optional(8)?,
                clockwise: row.get(&data_field(9)) == Some("CLOCKWISE"),
            }),
            "RECTANGLE" => Some(Shape::Rectangle {
                start: Point::new(data(1)?, data(2)?),
                end: Point::new(data(3)?, data(4)?),
            }),
            _ => None,
        };
        Ok(Self { kind, tag, shape })
    }
}

pub const BODY_CENTER: &str = "BODY_CENTER";

#[derive(Debug, Clone, PartialEq)]
pub struct PackageGeometryRecord {
    pub graphic: GraphicRecord,
    pub subclass: String,
    pub sym_name: String,
    pub refdes: String,
}

impl PackageGeometryRecord {
    /// Whether the row contributes to a package outline or its center.
    pub fn is_assembly(&self) -> bool {
        matches!(
            self.subclass.as_str(),
            "ASSEMBLY_TOP" | "ASSEMBLY_BOTTOM" | BODY_CENTER
        )
    }

    pub fn is_body_center(&self) -> bool {
        self.subclass == BODY_CENTER
    }
}

impl SectionRecord for PackageGeometryRecord {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        Ok(Self {
            graphic: GraphicRecord::from_row(row)?,
            subclass: row.text("SUBCLASS"),
            sym_name: row.text("SYM_NAME"),
            refdes: row.text("REFDES"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackagePinRecord {
    pub refdes: String,
    pub sym_name: String,
    pub pin: PackagePin,
}

impl SectionRecord for PackagePinRecord {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        Ok(Self {
            refdes: row.text("REFDES"),
            sym_name: row.text("SYM_NAME"),
            pin: PackagePin {
                pin_number: row.require("PIN_NUMBER")?.to_string(),
                pin_name: row.text("PIN_NAME"),
                position: row.point("PIN_X", "PIN_Y")?,
                rotation: row.number_or_zero("PIN_ROTATION")?,
                pad_stack_name: row.text("PAD_STACK_NAME"),
            },
        })
    }
}

impl SectionRecord for Via {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        Ok(Via {
            position: row.point("VIA_X", "VIA_Y")?,
            pad_stack_name: row.text("PAD_STACK_NAME"),
            net_name: row.text("NET_NAME"),
            mirror: row.flag("VIA_MIRROR"),
            rotation: row.number_or_zero("VIA_ROTATION")?,
        })
    }
}

/// Where a copper_etch row is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtchTarget {
    Outline,
    Etch(Layer),
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CopperEtchRecord {
    pub graphic: GraphicRecord,
    pub class: String,
    pub subclass: String,
    /// `None` when the header has no `NET_NAME` column.
    pub net_name: Option<String>,
}

impl CopperEtchRecord {
    pub fn target(&self) -> EtchTarget {
        match (self.class.as_str(), self.subclass.as_str()) {
            ("BOARD GEOMETRY", "OUTLINE") => EtchTarget::Outline,
            ("ETCH", side) => Layer::from_name(side)
                .map(EtchTarget::Etch)
                .unwrap_or(EtchTarget::Ignored),
            _ => EtchTarget::Ignored,
        }
    }
}

impl SectionRecord for CopperEtchRecord {
    fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        Ok(Self {
            graphic: GraphicRecord::from_row(row)?,
            class: row.text("CLASS"),
            subclass: row.text("SUBCLASS"),
            net_name: row.get("NET_NAME").map(str::to_string),
        })
    }
}

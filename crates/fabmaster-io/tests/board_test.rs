use std::io::Cursor;

use fabmaster_core::copper::MISSING_NET;
use fabmaster_core::{placements_to_json, Board, BoardSettings, CopperKind, Layer, Point};
use fabmaster_io::{DiagnosticKind, FabmasterReader};

const COMPONENTS: &str = "A!REFDES!COMP_CLASS!SYM_NAME!SYM_MIRROR!SYM_ROTATE!SYM_X!SYM_Y!";
const COMPONENT_PIN: &str = "A!NET_NAME!REFDES!PIN_NUMBER!PIN_NAME!";
const GEOMETRY_CLASSES: &str = "A!CLASS!SUBCLASS!";
const PAD_DEFINITION: &str = "A!PAD_NAME!REC_NUMBER!LAYER!FIXFLAG!VIAFLAG!PADSHAPE1!PADWIDTH!PADHGHT!PADXOFF!PADYOFF!";
const PACKAGE_GEOMETRY: &str = "A!GRAPHIC_DATA_NAME!GRAPHIC_DATA_NUMBER!RECORD_TAG!GRAPHIC_DATA_1!GRAPHIC_DATA_2!GRAPHIC_DATA_3!GRAPHIC_DATA_4!GRAPHIC_DATA_5!GRAPHIC_DATA_6!GRAPHIC_DATA_7!GRAPHIC_DATA_8!GRAPHIC_DATA_9!SUBCLASS!SYM_NAME!REFDES!";
const PACKAGE_PINS: &str = "A!SYM_NAME!SYM_MIRROR!PIN_NAME!PIN_NUMBER!PIN_X!PIN_Y!PAD_STACK_NAME!REFDES!PIN_ROTATION!TEST_POINT!";
const VIAS: &str = "A!VIA_X!VIA_Y!PAD_STACK_NAME!NET_NAME!TEST_POINT!VIA_MIRROR!VIA_ROTATION!";
const COPPER_ETCH: &str = "A!CLASS!SUBCLASS!GRAPHIC_DATA_NAME!GRAPHIC_DATA_NUMBER!RECORD_TAG!GRAPHIC_DATA_1!GRAPHIC_DATA_2!GRAPHIC_DATA_3!GRAPHIC_DATA_4!GRAPHIC_DATA_5!GRAPHIC_DATA_6!GRAPHIC_DATA_7!GRAPHIC_DATA_8!GRAPHIC_DATA_9!NET_NAME!";

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a file from `(header, rows)` pairs in section order.
fn board_file(sections: &[(&str, Vec<String>)]) -> String {
    let mut out = String::from("J!test.brd!\n");
    for (header, rows) in sections {
        out.push_str(header);
        out.push('\n');
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
    }
    out
}

fn read(input: &str) -> (Board, FabmasterReader<Cursor<String>>) {
    init();
    let mut reader = FabmasterReader::new(Cursor::new(input.to_string()));
    let board = reader.read().unwrap();
    (board, reader)
}

fn component_row(refdes: &str, class: &str, sym: &str, mirror: &str, rotate: f64) -> String {
    format!("S!{}!{}!{}!{}!{}!0!0!", refdes, class, sym, mirror, rotate)
}

fn package_line(tag: &str, a: (f64, f64), b: (f64, f64), subclass: &str, refdes: &str) -> String {
    format!(
        "S!LINE!1!{}!{}!{}!{}!{}!0!!!!!{}!R0402!{}!",
        tag, a.0, a.1, b.0, b.1, subclass, refdes
    )
}

fn etch_line(subclass: &str, tag: &str, a: (f64, f64), b: (f64, f64), width: f64, net: &str) -> String {
    format!(
        "S!ETCH!{}!LINE!1!{}!{}!{}!{}!{}!{}!!!!!{}!",
        subclass, tag, a.0, a.1, b.0, b.1, width, net
    )
}

fn outline_line(tag: &str, a: (f64, f64), b: (f64, f64)) -> String {
    format!(
        "S!BOARD GEOMETRY!OUTLINE!LINE!1!{}!{}!{}!{}!{}!0!!!!!!",
        tag, a.0, a.1, b.0, b.1
    )
}

fn empty(header: &str) -> (&str, Vec<String>) {
    (header, Vec::new())
}

#[test]
fn test_resistor_package_box() {
    let input = board_file(&[
        (COMPONENTS, vec![component_row("R1", "RESISTOR", "R0402", "NO", 0.0)]),
        empty(COMPONENT_PIN),
        empty(GEOMETRY_CLASSES),
        empty(PAD_DEFINITION),
        (
            PACKAGE_GEOMETRY,
            vec![
                package_line("7 1", (0.0, 0.0), (40.0, 0.0), "ASSEMBLY_TOP", "R1"),
                package_line("7 2", (40.0, 0.0), (40.0, 20.0), "ASSEMBLY_TOP", "R1"),
                package_line("7 3", (40.0, 20.0), (0.0, 20.0), "ASSEMBLY_TOP", "R1"),
                package_line("7 4", (0.0, 20.0), (0.0, 0.0), "ASSEMBLY_TOP", "R1"),
            ],
        ),
    ]);
    let (board, reader) = read(&input);
    assert!(reader.diagnostics().is_empty());

    let component = board.component("R1").unwrap();
    assert_eq!(component.comp_class, "RESISTOR");
    let package = component.package.as_ref().unwrap();
    assert_eq!(package.geometries.len(), 1);
    assert_eq!(package.geometries[0].outer.len(), 4);
    assert_eq!(package.layer, Some(Layer::Top));
    assert_eq!(package.center(), Some(Point::new(20.0, 10.0)));
}

#[test]
fn test_package_regions_and_filters() {
    let input = board_file(&[
        (COMPONENTS, vec![component_row("U1", "IC", "SOIC8", "NO", 0.0)]),
        empty(COMPONENT_PIN),
        empty(GEOMETRY_CLASSES),
        empty(PAD_DEFINITION),
        (
            PACKAGE_GEOMETRY,
            vec![
                package_line("1 1", (0.0, 0.0), (10.0, 0.0), "ASSEMBLY_TOP", "U1"),
                package_line("1 2", (10.0, 0.0), (10.0, 10.0), "ASSEMBLY_TOP", "U1"),
                package_line("2 1", (20.0, 0.0), (30.0, 0.0), "ASSEMBLY_TOP", "U1"),
                package_line("3 1", (0.0, 0.0), (99.0, 99.0), "SILKSCREEN_TOP", "U1"),
                package_line("4 1", (0.0, 0.0), (99.0, 99.0), "ASSEMBLY_TOP", ""),
                package_line("5 1", (2.0, 2.0), (4.0, 4.0), "BODY_CENTER", "U1"),
                package_line("6 1", (0.0, 0.0), (1.0, 1.0), "ASSEMBLY_TOP", "U9"),
            ],
        ),
    ]);
    let (board, reader) = read(&input);

    let package = board.component("U1").unwrap().package.as_ref().unwrap();
    assert_eq!(package.geometries.len(), 2);
    assert_eq!(package.geometries[0].outer.len(), 3);
    assert_eq!(package.geometries[1].outer.len(), 2);
    assert_eq!(package.center(), Some(Point::new(3.0, 3.0)));

    let diags = reader.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::MissingReference);
}

#[test]
fn test_etch_zone_with_holes() {
    let input = board_file(&[
        empty(COMPONENTS),
        empty(COMPONENT_PIN),
        empty(GEOMETRY_CLASSES),
        empty(PAD_DEFINITION),
        empty(PACKAGE_GEOMETRY),
        empty(PACKAGE_PINS),
        empty(VIAS),
        (
            COPPER_ETCH,
            vec![
                etch_line("TOP", "5 1", (0.0, 0.0), (10.0, 0.0), 0.0, "GND"),
                etch_line("TOP", "5 2", (10.0, 0.0), (10.0, 10.0), 0.0, "GND"),
                etch_line("TOP", "5 3 1", (2.0, 2.0), (4.0, 2.0), 0.0, "GND"),
                etch_line("TOP", "5 4 1", (4.0, 2.0), (4.0, 4.0), 0.0, "GND"),
                etch_line("TOP", "5 5 2", (6.0, 6.0), (8.0, 6.0), 0.0, "GND"),
                etch_line("TOP", "9 1", (0.0, 0.0), (5.0, 5.0), 0.25, "GND"),
                etch_line("INNER1", "10 1", (0.0, 0.0), (5.0, 5.0), 0.0, "GND"),
            ],
        ),
    ]);
    let (board, reader) = read(&input);
    assert!(reader.diagnostics().is_empty());

    let bucket = board.copper.bucket(Layer::Top, "GND").unwrap();
    assert_eq!(bucket.polygons.len(), 1);
    let zone = &bucket.polygons[0];
    assert_eq!(zone.kind, CopperKind::Polygon);
    assert_eq!(zone.polygon.outer.len(), 3);
    assert_eq!(zone.polygon.hole_count(), 2);
    assert_eq!(zone.polygon.holes[0].len(), 3);
    assert_eq!(zone.polygon.holes[1].len(), 2);

    assert_eq!(bucket.lines.len(), 1);
    assert!((bucket.lines[0].width - 0.25).abs() < 1e-12);
    assert_eq!(board.copper.net_count(), 1);
}

#[test]
fn test_etch_without_net_column() {
    let header = "A!CLASS!SUBCLASS!GRAPHIC_DATA_NAME!GRAPHIC_DATA_NUMBER!RECORD_TAG!GRAPHIC_DATA_1!GRAPHIC_DATA_2!GRAPHIC_DATA_3!GRAPHIC_DATA_4!GRAPHIC_DATA_5!";
    let input = board_file(&[
        empty(COMPONENTS),
        empty(COMPONENT_PIN),
        empty(GEOMETRY_CLASSES),
        empty(PAD_DEFINITION),
        empty(PACKAGE_GEOMETRY),
        empty(PACKAGE_PINS),
        empty(VIAS),
        (
            header,
            vec!["S!ETCH!BOTTOM!LINE!1!3 1!0!0!1!0!0!".to_string()],
        ),
    ]);
    let (board, _) = read(&input);
    let bucket = board.copper.bucket(Layer::Bottom, MISSING_NET).unwrap();
    assert_eq!(bucket.polygons.len(), 1);
}

#[test]
fn test_outline_from_copper_etch() {
    let input = board_file(&[
        empty(COMPONENTS),
        empty(COMPONENT_PIN),
        empty(GEOMETRY_CLASSES),
        empty(PAD_DEFINITION),
        empty(PACKAGE_GEOMETRY),
        empty(PACKAGE_PINS),
        empty(VIAS),
        (
            COPPER_ETCH,
            vec![
                outline_line("1 1", (100.0, 100.0), (500.0, 100.0)),
                outline_line("1 2", (500.0, 100.0), (500.0, 300.0)),
                outline_line("1 3", (500.0, 300.0), (100.0, 300.0)),
                outline_line("1 4", (100.0, 300.0), (100.0, 100.0)),
            ],
        ),
    ]);
    let (mut board, _) = read(&input);
    assert_eq!(board.outline.ring.len(), 4);

    board.outline.normalize();
    assert_eq!(board.outline.offset(), Some(Point::new(100.0, 100.0)));
    assert_eq!(board.outline.size(), (400.0, 200.0));
}

#[test]
fn test_pads_pins_and_placement() {
    let input = board_file(&[
        (COMPONENTS, vec![component_row("C1", "CAPACITOR", "C0603", "YES", 90.0)]),
        (COMPONENT_PIN, vec!["S!VCC!C1!1!1!".to_string(), "S!GND!C1!2!2!".to_string()]),
        (GEOMETRY_CLASSES, vec!["S!ETCH!TOP!".to_string()]),
        (
            PAD_DEFINITION,
            vec![
                "S!SMD!1!TOP!0!0!RECTANGLE!20!30!0!0!".to_string(),
                "S!SMD!2!INTERNAL_PAD_DEF!0!0!RECTANGLE!20!30!0!0!".to_string(),
            ],
        ),
        (
            PACKAGE_GEOMETRY,
            vec![
                package_line("3 1", (1000.0, 1000.0), (1060.0, 1000.0), "ASSEMBLY_TOP", "C1"),
                package_line("3 2", (1060.0, 1000.0), (1060.0, 1030.0), "ASSEMBLY_TOP", "C1"),
                package_line("3 3", (1060.0, 1030.0), (1000.0, 1030.0), "ASSEMBLY_TOP", "C1"),
                package_line("3 4", (1000.0, 1030.0), (1000.0, 1000.0), "ASSEMBLY_TOP", "C1"),
            ],
        ),
        (
            PACKAGE_PINS,
            vec![
                "S!C0603!YES!1!1!1010!1015!SMD!C1!0!!".to_string(),
                "S!C0603!YES!2!2!1050!1015!SMD!C1!0!!".to_string(),
            ],
        ),
        (VIAS, vec!["S!500!500!VIA10!GND!!NO!0!".to_string()]),
        (
            COPPER_ETCH,
            vec![
                outline_line("1 1", (0.0, 0.0), (2000.0, 0.0)),
                outline_line("1 2", (2000.0, 0.0), (2000.0, 2000.0)),
                outline_line("1 3", (2000.0, 2000.0), (0.0, 2000.0)),
                outline_line("1 4", (0.0, 2000.0), (0.0, 0.0)),
            ],
        ),
        ("A!SUBCLASS!PAD_SHAPE_NAME!", vec!["S!PIN!X!".to_string()]),
        ("A!SUBCLASS!PAD_SHAPE_NAME!", vec!["S!PIN!Y!".to_string(), "S!PIN!Z!".to_string()]),
    ]);
    let (mut board, reader) = read(&input);
    assert!(reader.diagnostics().is_empty(), "{:?}", reader.diagnostics());

    let component = board.component("C1").unwrap();
    assert_eq!(component.pins.len(), 2);
    assert!(component.mirror);
    let package = component.package.as_ref().unwrap();
    assert_eq!(package.pins.len(), 2);
    let pin = &package.pins["1"];
    assert_eq!(board.pads_for(&pin.pad_stack_name).len(), 1);
    assert_eq!(board.vias.len(), 1);
    assert_eq!(board.geometry_classes.len(), 1);
    assert_eq!(board.misc_line_count, 3);

    let settings = BoardSettings { scale_rate: 0.001, ..Default::default() };
    let placements = board.place_components(&settings);
    let placed = &placements["C1"];
    assert!((placed.center.x - 1.03).abs() < 1e-9);
    assert!((placed.center.y - 1.015).abs() < 1e-9);
    assert!(placed.mirror);
    assert!((placed.rotation_degrees - 90.0).abs() < 1e-12);
    assert_eq!(placed.symbol_name, "C0603");

    let package = board.component("C1").unwrap().package.as_ref().unwrap();
    let bb = package.bbox().unwrap();
    assert!((bb.width() - 0.03).abs() < 1e-9);
    assert!((bb.height() - 0.06).abs() < 1e-9);

    let json = placements_to_json(&placements).unwrap();
    assert!(json.contains("C0603"));
    let restored = Board::from_json(&board.to_json().unwrap()).unwrap();
    assert_eq!(restored.component_count(), 1);
    assert!(restored.is_placed());
}

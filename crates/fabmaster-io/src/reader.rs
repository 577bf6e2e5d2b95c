//! FABMASTER text stream reader.
//!
//! The format is line oriented with `!`-delimited fields. The first field
//! selects the record kind:
//!
//! - `R` / `R\` comment or continuation, ignored
//! - `J` job marker, ignored
//! - `A` section header; the remaining fields name the section's columns
//! - `S` data row for the active section
//!
//! Section headers bind the known sections in a fixed order. Rows are
//! handed to the geometry assemblers in arrival order.

use std::io::BufRead;

use fabmaster_core::board::{Board, GeometryClass, Via};
use fabmaster_core::component::Component;
use fabmaster_core::copper::{EtchAssembler, OutlineAssembler};
use fabmaster_core::package::PackageAssembler;
use fabmaster_core::layer::Layer;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::FabmasterError;
use crate::section::{
    ComponentPinRecord, CopperEtchRecord, EtchTarget, PackageGeometryRecord, PackagePinRecord,
    PadRecord, Row, SectionKind, SectionRecord,
};

// ── Dispatcher state ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum SectionState {
    NoSection,
    Active {
        kind: SectionKind,
        fields: Vec<String>,
    },
    /// A header past the known sections; its rows are dropped.
    Unbound,
}

/// Owns everything built during one pass.
#[derive(Debug, Default)]
struct Assembly {
    board: Board,
    etch: EtchAssembler,
    outline: OutlineAssembler,
    packages: PackageAssembler,
    diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    fn report(&mut self, line: usize, kind: DiagnosticKind, message: String) {
        let diagnostic = Diagnostic::new(line, kind, message);
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn record<T: SectionRecord>(&mut self, line: usize, row: &Row<'_>) -> Option<T> {
        match T::from_row(row) {
            Ok(record) => Some(record),
            Err(err) => {
                self.report(line, DiagnosticKind::InvalidRecord, err.to_string());
                None
            }
        }
    }

    fn missing_component(&mut self, line: usize, section: SectionKind, refdes: &str) {
        self.report(
            line,
            DiagnosticKind::MissingReference,
            format!("{} row refers to unknown component '{}'", section, refdes),
        );
    }

    fn dispatch(&mut self, line: usize, kind: SectionKind, row: &Row<'_>) {
        match kind {
            SectionKind::Components => self.read_component(line, row),
            SectionKind::ComponentPin => self.read_component_pin(line, row),
            SectionKind::GeometryClasses => {
                if let Some(class) = self.record::<GeometryClass>(line, row) {
                    self.board.geometry_classes.push(class);
                }
            }
            SectionKind::PadDefinition => self.read_pad(line, row),
            SectionKind::PackageGeometry => self.read_package_geometry(line, row),
            SectionKind::PackagePins => self.read_package_pin(line, row),
            SectionKind::Vias => {
                if let Some(via) = self.record::<Via>(line, row) {
                    self.board.vias.push(via);
                }
            }
            SectionKind::CopperEtch => self.read_copper_etch(line, row),
            SectionKind::MiscPkgLines | SectionKind::MiscPkgLines2 => {
                self.board.misc_line_count += 1;
            }
        }
    }

    fn read_component(&mut self, line: usize, row: &Row<'_>) {
        let Some(component) = self.record::<Component>(line, row) else {
            return;
        };
        if let Some(previous) = self.board.add_component(component) {
            log::debug!("line {}: component {} redefined", line, previous.refdes);
        }
    }

    fn read_component_pin(&mut self, line: usize, row: &Row<'_>) {
        let Some(record) = self.record::<ComponentPinRecord>(line, row) else {
            return;
        };
        match self.board.component_mut(&record.refdes) {
            Some(component) => component.add_pin(record.pin),
            None => self.missing_component(line, SectionKind::ComponentPin, &record.refdes),
        }
    }

    fn read_pad(&mut self, line: usize, row: &Row<'_>) {
        let Some(record) = self.record::<PadRecord>(line, row) else {
            return;
        };
        let name = record.name.clone();
        match record.into_pad() {
            Some(pad) => {
                if pad.geometry.is_none() {
                    log::debug!("line {}: pad {} shape '{}' has no outline", line, name, pad.shape_name);
                }
                self.board.add_pad(pad);
            }
            None => log::trace!("line {}: pad {} on inner layer skipped", line, name),
        }
    }

    fn read_package_geometry(&mut self, line: usize, row: &Row<'_>) {
        let Some(record) = self.record::<PackageGeometryRecord>(line, row) else {
            return;
        };
        if record.graphic.kind == "TEXT" || !record.is_assembly() || record.refdes.is_empty() {
            log::trace!("line {}: package row skipped", line);
            return;
        }
        let Some(shape) = record.graphic.shape.as_ref() else {
            log::debug!("line {}: unsupported package graphic '{}'", line, record.graphic.kind);
            return;
        };

        let Some(component) = self.board.component_mut(&record.refdes) else {
            self.missing_component(line, SectionKind::PackageGeometry, &record.refdes);
            return;
        };

        if record.is_body_center() {
            let points = shape.points();
            if let (Some(start), Some(end)) = (points.first(), points.last()) {
                self.packages
                    .push_body_center(component, &record.sym_name, *start, *end);
            }
        } else {
            let layer = Layer::from_assembly_subclass(&record.subclass);
            self.packages.push_geometry(
                component,
                &record.sym_name,
                layer,
                &record.graphic.tag.tag_id,
                &shape.points(),
            );
        }
    }

    fn read_package_pin(&mut self, line: usize, row: &Row<'_>) {
        let Some(record) = self.record::<PackagePinRecord>(line, row) else {
            return;
        };
        let Some(component) = self.board.component_mut(&record.refdes) else {
            self.missing_component(line, SectionKind::PackagePins, &record.refdes);
            return;
        };
        match component.package.as_mut() {
            Some(package) => package.add_pin(record.pin),
            None => self.report(
                line,
                DiagnosticKind::MissingReference,
                format!("pin {} of {} has no package geometry", record.pin.pin_number, record.refdes),
            ),
        }
    }

    fn read_copper_etch(&mut self, line: usize, row: &Row<'_>) {
        let Some(record) = self.record::<CopperEtchRecord>(line, row) else {
            return;
        };
        let target = record.target();
        let Some(shape) = record.graphic.shape.as_ref() else {
            if target != EtchTarget::Ignored {
                log::trace!("line {}: {} graphic dropped", line, record.graphic.kind);
            }
            return;
        };
        match target {
            EtchTarget::Outline => self.outline.push(&record.graphic.tag, shape),
            EtchTarget::Etch(layer) => {
                self.etch
                    .push(layer, record.net_name.as_deref(), &record.graphic.tag, shape)
            }
            EtchTarget::Ignored => {}
        }
    }

    fn finish(self) -> (Board, Vec<Diagnostic>) {
        let mut board = self.board;
        board.copper = self.etch.finish();
        board.outline = self.outline.finish();
        (board, self.diagnostics)
    }
}

// ── Reader ───────────────────────────────────────────────────────────

/// Split a raw line into its fields, dropping the line ending and the
/// terminating `!`.
fn split_fields(line: &str) -> Vec<&str> {
    let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    let line = line.strip_suffix('!').unwrap_or(line);
    line.split('!').collect()
}

pub struct FabmasterReader<R: BufRead> {
    reader: R,
    diagnostics: Vec<Diagnostic>,
}

impl<R: BufRead> FabmasterReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            diagnostics: Vec::new(),
        }
    }

    /// Conditions reported by the last [`FabmasterReader::read`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Read the whole stream into a board. Only I/O failures are fatal.
    pub fn read(&mut self) -> Result<Board, FabmasterError> {
        let mut assembly = Assembly::default();
        let mut state = SectionState::NoSection;
        let mut opened = 0usize;
        let mut buf = Vec::new();
        let mut line_num = 0usize;

        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;

            let text = String::from_utf8_lossy(&buf);
            if text.trim().is_empty() {
                continue;
            }
            let fields = split_fields(&text);

            match fields[0] {
                "R" | "R\\" | "J" => {}
                "A" => {
                    state = Self::open_section(&mut assembly, line_num, opened, &fields[1..]);
                    opened += 1;
                }
                "S" => match &state {
                    SectionState::Active { kind, fields: names } => {
                        let row = Row::zip(names, &fields[1..]);
                        assembly.dispatch(line_num, *kind, &row);
                    }
                    SectionState::Unbound | SectionState::NoSection => {
                        log::trace!("line {}: row outside a known section dropped", line_num);
                    }
                },
                other => assembly.report(
                    line_num,
                    DiagnosticKind::MalformedLine,
                    format!("unknown record type '{}'", other),
                ),
            }
        }

        let (board, diagnostics) = assembly.finish();
        log::info!(
            "Read {} lines, {} sections: {} components, {} pad stacks, {} vias, {} copper nets. {} diagnostics.",
            line_num,
            opened,
            board.component_count(),
            board.pad_names().count(),
            board.vias.len(),
            board.copper.net_count(),
            diagnostics.len()
        );
        self.diagnostics = diagnostics;
        Ok(board)
    }

    fn open_section(
        assembly: &mut Assembly,
        line: usize,
        index: usize,
        names: &[&str],
    ) -> SectionState {
        let Some(kind) = SectionKind::nth(index) else {
            assembly.report(
                line,
                DiagnosticKind::UnexpectedSection,
                format!("unexpected section #{}", index + 1),
            );
            return SectionState::Unbound;
        };

        log::info!("Section {}: {} ({} fields)", index + 1, kind, names.len());
        for name in names.iter().filter(|name| !kind.knows_field(name)) {
            let diagnostic = Diagnostic::new(
                line,
                DiagnosticKind::UnknownField,
                format!("{} has no field '{}'", kind, name),
            );
            log::debug!("{}", diagnostic);
            assembly.diagnostics.push(diagnostic);
        }

        SectionState::Active {
            kind,
            fields: names.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Convenience for callers holding the whole file in memory.
pub fn read_str(input: &str) -> Result<(Board, Vec<Diagnostic>), FabmasterError> {
    let mut reader = FabmasterReader::new(input.as_bytes());
    let board = reader.read()?;
    Ok((board, reader.diagnostics().to_vec()))
}

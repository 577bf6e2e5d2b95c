//! Moving assembled geometry into metre-scale placement coordinates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::geometry::{Point, Transform2D};
use crate::settings::BoardSettings;

/// Where an exporter should drop a component's package model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentPlacement {
    /// Package center in board coordinates relative to the outline origin.
    pub center: Point,
    pub rotation_degrees: f64,
    pub mirror: bool,
    pub symbol_name: String,
}

impl Board {
    /// Scale every assembled entity by `settings.scale_rate` and move each
    /// package so its center sits at the origin, rotated and mirrored as
    /// placed. Copper is shifted onto the normalized outline.
    ///
    /// The board is transformed only once; later calls return the
    /// placements computed by the first.
    pub fn place_components(
        &mut self,
        settings: &BoardSettings,
    ) -> BTreeMap<String, ComponentPlacement> {
        if self.placed {
            log::debug!("board already placed");
            return self.placements.clone();
        }

        let s = settings.scale_rate;
        if self.outline.is_empty() {
            log::warn!("board has no outline; placing relative to the origin");
        }
        self.outline.scale(s);
        let offset = self.outline.offset().unwrap_or_default();

        let mut placements = BTreeMap::new();
        for component in self.components_mut() {
            let Some(package) = component.package.as_mut() else {
                log::debug!("{} has no package geometry", component.refdes);
                continue;
            };
            let Some(center) = package.center() else {
                log::debug!("{} package is empty", component.refdes);
                continue;
            };

            let scaled = center.scale(s);
            package.scale(s);
            package.translate(-scaled.x, -scaled.y);
            if component.rotation > 0.0 {
                package.rotate(component.rotation);
            }
            if component.mirror {
                package.mirror();
            }
            package.normalize_winding();

            placements.insert(
                component.refdes.clone(),
                ComponentPlacement {
                    center: scaled.translate(-offset.x, -offset.y),
                    rotation_degrees: component.rotation,
                    mirror: component.mirror,
                    symbol_name: component.sym_name.clone(),
                },
            );
        }

        self.copper.scale(s);
        self.copper.translate(-offset.x, -offset.y);
        for pad in self.pads_mut() {
            pad.scale(s);
        }

        log::info!(
            "placed {} of {} components",
            placements.len(),
            self.component_count()
        );
        self.placed = true;
        self.placements = placements.clone();
        placements
    }

    /// Placements from the last [`Board::place_components`] call.
    pub fn placements(&self) -> &BTreeMap<String, ComponentPlacement> {
        &self.placements
    }
}

pub fn placements_to_json(
    placements: &BTreeMap<String, ComponentPlacement>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(placements)
}

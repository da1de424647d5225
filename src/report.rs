//! Printable snapshots of maps for the command line

use std::fmt::Write as _;

use serde::Serialize;

use crate::keymap::{Keybinding, KeymapKind};
use crate::variant::{Altmap, MapState, VariantSlot};

/// Snapshot of one map's active contents and variants
#[derive(Debug, Clone, Serialize)]
pub struct MapReport {
    pub name: String,
    pub state: MapState,
    pub doc: Option<String>,
    pub kind: Option<KeymapKind>,
    pub bindings: Vec<Keybinding>,
    /// Variable names of the variants that exist
    pub variants: Vec<String>,
}

impl MapReport {
    pub fn capture(altmap: &Altmap, name: &str) -> Self {
        let active = altmap.active(name);
        let (kind, bindings) = match &active {
            Some(value) => {
                let contents = value.contents();
                (Some(contents.kind()), contents.bindings().to_vec())
            }
            None => (None, Vec::new()),
        };

        let variants = VariantSlot::ALL
            .into_iter()
            .filter(|slot| altmap.store().exists(name, *slot))
            .map(|slot| altmap.config().variable_name(name, slot))
            .collect();

        Self {
            name: name.to_string(),
            state: altmap.state(name),
            doc: altmap
                .documentation(name, VariantSlot::Active)
                .map(str::to_string),
            kind,
            bindings,
            variants,
        }
    }

    /// Human-readable rendering, one binding per line
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} [{:?}]", self.name, self.state);
        if let Some(doc) = &self.doc {
            let _ = writeln!(out, "  {}", doc);
        }
        if !self.variants.is_empty() {
            let _ = writeln!(out, "  variants: {}", self.variants.join(", "));
        }
        for binding in &self.bindings {
            let _ = writeln!(out, "  {:<20} {}", binding.key_string(), binding.command);
        }
        out
    }
}

/// Reports for `names`, or for every stored map when `names` is empty
pub fn capture_all(altmap: &Altmap, names: &[String]) -> Vec<MapReport> {
    if names.is_empty() {
        altmap
            .store()
            .map_names()
            .into_iter()
            .map(|name| MapReport::capture(altmap, name))
            .collect()
    } else {
        names
            .iter()
            .map(|name| MapReport::capture(altmap, name))
            .collect()
    }
}

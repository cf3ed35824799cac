//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Display color assignment for a sub-contract card and its chart segment.
///
/// `border`, `dot` and `text` are utility-class names consumed by the
/// dashboard; `fill` is the hex value used for SVG segment fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayColor {
    pub border: String,
    pub dot: String,
    pub text: String,
    pub fill: String,
}

struct PaletteEntry {
    border: &'static str,
    dot: &'static str,
    text: &'static str,
    fill: &'static str,
}

const PALETTE: [PaletteEntry; 10] = [
    PaletteEntry {
        border: "border-l-blue-500",
        dot: "bg-blue-500",
        text: "text-blue-600",
        fill: "#3b82f6",
    },
    PaletteEntry {
        border: "border-l-green-500",
        dot: "bg-green-500",
        text: "text-green-600",
        fill: "#22c55e",
    },
    PaletteEntry {
        border: "border-l-purple-500",
        dot: "bg-purple-500",
        text: "text-purple-600",
        fill: "#a855f7",
    },
    PaletteEntry {
        border: "border-l-orange-500",
        dot: "bg-orange-500",
        text: "text-orange-600",
        fill: "#f97316",
    },
    PaletteEntry {
        border: "border-l-red-500",
        dot: "bg-red-500",
        text: "text-red-600",
        fill: "#ef4444",
    },
    PaletteEntry {
        border: "border-l-pink-500",
        dot: "bg-pink-500",
        text: "text-pink-600",
        fill: "#ec4899",
    },
    PaletteEntry {
        border: "border-l-yellow-500",
        dot: "bg-yellow-500",
        text: "text-yellow-600",
        fill: "#eab308",
    },
    PaletteEntry {
        border: "border-l-indigo-500",
        dot: "bg-indigo-500",
        text: "text-indigo-600",
        fill: "#6366f1",
    },
    PaletteEntry {
        border: "border-l-cyan-500",
        dot: "bg-cyan-500",
        text: "text-cyan-600",
        fill: "#06b6d4",
    },
    PaletteEntry {
        border: "border-l-emerald-500",
        dot: "bg-emerald-500",
        text: "text-emerald-600",
        fill: "#10b981",
    },
];

/// Number of entries in the fixed display palette.
pub const PALETTE_SIZE: usize = PALETTE.len();

impl DisplayColor {
    fn from_entry(entry: &PaletteEntry) -> Self {
        Self {
            border: entry.border.to_string(),
            dot: entry.dot.to_string(),
            text: entry.text.to_string(),
            fill: entry.fill.to_string(),
        }
    }
}

/// Color for a record by its position in the list. Cycles through the fixed
/// palette, so a given ordering always produces the same assignment.
/// Reordering the input changes colors; callers needing reorder-stable
/// identity should use [`color_for_id`] instead.
pub fn palette_color(index: usize) -> DisplayColor {
    DisplayColor::from_entry(&PALETTE[index % PALETTE.len()])
}

/// Color for a record keyed by its id, stable across reorderings.
pub fn color_for_id(id: &str) -> DisplayColor {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    palette_color(hasher.finish() as usize % PALETTE.len())
}

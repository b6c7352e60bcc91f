//! Cell fill decision.
//!
//! A cell's look is a pure function of its content, the view mode and the
//! print settings: empty cells take the configured grey, non-empty cells are
//! tinted from their color key when colors are on, and plain white otherwise.

use serde::{Deserialize, Serialize};

use crate::config::PrintSettings;
use crate::grid::Cell;
use crate::models::ViewMode;

/// Fill used for non-empty cells when colors are off.
pub const PLAIN_FILL: &str = "#ffffff";

/// How a cell is painted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStyle {
    /// Nothing to display.
    Empty { fill: String },
    /// Tinted by subject (or class, in teacher view).
    Keyed { fill: String },
    Plain,
}

impl CellStyle {
    /// Background color, `#rrggbb`.
    pub fn fill(&self) -> &str {
        match self {
            CellStyle::Empty { fill } | CellStyle::Keyed { fill } => fill,
            CellStyle::Plain => PLAIN_FILL,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellStyle::Empty { .. })
    }
}

/// Decides the style of one grid cell.
pub fn cell_style(cell: &Cell, mode: ViewMode, print: &PrintSettings) -> CellStyle {
    if cell.is_empty(mode) {
        return CellStyle::Empty {
            fill: print.empty_fill.clone(),
        };
    }
    if print.enable_colors {
        let key = cell
            .entries
            .first()
            .map(|e| mode.color_key().value(e).trim())
            .unwrap_or_default();
        if !key.is_empty() {
            return CellStyle::Keyed {
                fill: pastel_color(key),
            };
        }
    }
    CellStyle::Plain
}

/// Hue in `0..360` derived from a string hash over UTF-16 code units.
pub fn pastel_hue(key: &str) -> u32 {
    let hash = key.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    (hash % 360).unsigned_abs()
}

/// Pastel tint of a key: `hsl(hue, 70%, 85%)` as `#rrggbb`.
pub fn pastel_color(key: &str) -> String {
    hsl_to_hex(f64::from(pastel_hue(key)), 0.70, 0.85)
}

fn hsl_to_hex(hue: f64, saturation: f64, lightness: f64) -> String {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

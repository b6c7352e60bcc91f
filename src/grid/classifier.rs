//! Entry classifier.
//!
//! Decides whether the entries in one grid cell have anything to display in
//! the current view mode, and whether two cells show the same thing.
//!
//! # Emptiness
//! A cell is empty iff it has no entries, or every entry leaves every
//! content field of the view mode blank (whitespace counts as blank). The
//! field set differs per mode, see [`ViewMode::content_fields`].
//!
//! # Value Equality
//! Two cells are value-equal iff neither is empty, both hold the same number
//! of entries, and entries at the same position agree on subject, teacher,
//! subgroup and room. Equality compares all four fields in every mode so a
//! merge never hides a field that differs, even one the mode does not print.
//! An empty cell is never equal to anything, including another empty cell.

use crate::models::{Field, ScheduleEntry, ViewMode};

/// Whether a single entry has displayable content in `mode`.
#[inline]
pub fn has_content(entry: &ScheduleEntry, mode: ViewMode) -> bool {
    mode.content_fields().iter().any(|f| f.is_filled(entry))
}

/// Whether a cell's entries are empty in `mode`.
pub fn is_empty(entries: &[ScheduleEntry], mode: ViewMode) -> bool {
    !entries.iter().any(|e| has_content(e, mode))
}

/// Whether two cells may be merged into one span in `mode`.
pub fn values_equal(a: &[ScheduleEntry], b: &[ScheduleEntry], mode: ViewMode) -> bool {
    if is_empty(a, mode) || is_empty(b, mode) {
        return false;
    }
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b)
        .all(|(x, y)| Field::ALL.iter().all(|f| f.value(x) == f.value(y)))
}

//! Grid builder.
//!
//! Buckets entries into a 6 × 8 day/slot grid for one subject of interest.
//! An entry covering several lessons is appended to every slot it covers, so
//! the span compositor can fuse the copies back into one visual cell.
//!
//! Malformed entries (see [`PlacementError`](crate::models::PlacementError))
//! are dropped and counted; they never abort the build.

use log::{debug, warn};

use super::classifier;
use crate::models::{place_entry, Day, ScheduleEntry, ViewMode, DAY_COUNT, SLOTS_PER_DAY};

/// The entries occupying one (day, slot) coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub entries: Vec<ScheduleEntry>,
}

impl Cell {
    /// Creates a cell holding the given entries.
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Whether the cell has nothing to display in `mode`.
    #[inline]
    pub fn is_empty(&self, mode: ViewMode) -> bool {
        classifier::is_empty(&self.entries, mode)
    }

    /// Whether this cell and `other` may share one span in `mode`.
    #[inline]
    pub fn value_eq(&self, other: &Cell, mode: ViewMode) -> bool {
        classifier::values_equal(&self.entries, &other.entries, mode)
    }

    /// Entries of this cell.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }
}

/// A week of cells for one subject, indexed `[day][slot]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    mode: ViewMode,
    cells: Vec<Vec<Cell>>,
    dropped: usize,
}

impl Grid {
    /// An all-empty grid.
    pub fn empty(mode: ViewMode) -> Self {
        Self {
            mode,
            cells: vec![vec![Cell::default(); SLOTS_PER_DAY]; DAY_COUNT],
            dropped: 0,
        }
    }

    /// View mode the grid was built for.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Cell at a (day, slot) coordinate, `None` past the last slot.
    pub fn cell(&self, day: Day, slot: usize) -> Option<&Cell> {
        self.cells.get(day.index()).and_then(|row| row.get(slot))
    }

    /// Cells of one day, slot order.
    pub fn day(&self, day: Day) -> &[Cell] {
        &self.cells[day.index()]
    }

    /// All rows, Monday first.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Number of entries that could not be placed.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Whether every cell is empty in the grid's mode.
    pub fn is_blank(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|cell| cell.is_empty(self.mode))
    }

    /// Every entry in the grid, in day/slot order. An entry spanning several
    /// slots appears once per slot.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.cells.iter().flatten().flat_map(|c| c.entries.iter())
    }
}

/// Builds the grid for one subject of interest.
pub fn build_grid(entries: &[ScheduleEntry], mode: ViewMode) -> Grid {
    let mut grid = Grid::empty(mode);

    for entry in entries {
        match place_entry(entry) {
            Ok(placement) => {
                let row = &mut grid.cells[placement.day.index()];
                for slot in placement.slots.iter() {
                    row[slot].entries.push(entry.clone());
                }
            }
            Err(err) => {
                warn!("dropping schedule entry: {err}");
                grid.dropped += 1;
            }
        }
    }

    debug!(
        "built {:?} grid from {} entries ({} dropped)",
        mode,
        entries.len(),
        grid.dropped
    );
    grid
}

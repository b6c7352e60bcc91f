//! Multi-axis aggregator.
//!
//! Lays out every teacher's week in one grid.
//!
//! # Orientations
//! - [`Orientation::TeachersAsRows`]: one row per teacher, 48 columns (day
//!   major, then slot). Composed horizontally.
//! - [`Orientation::DaysAsRows`]: 48 rows, one column per teacher. Composed
//!   vertically.
//!
//! In both cases runs are bounded to 4-position blocks, i.e. one period of
//! one day. Entries are fetched once per teacher, concurrently, and nothing is
//! composed until every fetch has succeeded.

use futures::future::try_join_all;
use log::debug;

use super::builder::{build_grid, Cell, Grid};
use super::compositor::{compose_matrix, SpanCell};
use crate::models::{
    Axis, EntityKind, Orientation, ScheduleEntry, ViewMode, SLOTS_PER_PERIOD, WEEK_SLOTS,
};
use crate::source::{ScheduleSource, SourceError, SourceResult};

/// One teacher's fetched entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherSchedule {
    pub teacher: String,
    pub entries: Vec<ScheduleEntry>,
}

impl TeacherSchedule {
    pub fn new(teacher: impl Into<String>, entries: Vec<ScheduleEntry>) -> Self {
        Self {
            teacher: teacher.into(),
            entries,
        }
    }
}

/// All teachers' weeks, composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalAggregateGrid {
    orientation: Orientation,
    teachers: Vec<String>,
    cells: Vec<Vec<Cell>>,
    spans: Vec<Vec<SpanCell>>,
}

impl GlobalAggregateGrid {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Teacher names in row (A) or column (B) order.
    pub fn teachers(&self) -> &[String] {
        &self.teachers
    }

    /// Uncomposed cells, `[row][column]`.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Composed cells, `[row][column]`.
    pub fn spans(&self) -> &[Vec<SpanCell>] {
        &self.spans
    }

    /// Number of rows: teachers in A, 48 in B.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns: 48 in A, teachers in B.
    pub fn column_count(&self) -> usize {
        match self.orientation {
            Orientation::TeachersAsRows => WEEK_SLOTS,
            Orientation::DaysAsRows => self.teachers.len(),
        }
    }
}

/// A teacher's week as a 48-position line, day major.
fn week_line(grid: &Grid) -> Vec<Cell> {
    grid.rows().iter().flatten().cloned().collect()
}

/// Builds and composes the all-teachers grid from already-fetched entries.
///
/// Row (A) or column (B) order follows `schedules`.
pub fn build_global_aggregate(
    orientation: Orientation,
    schedules: &[TeacherSchedule],
) -> GlobalAggregateGrid {
    let mode = ViewMode::Global;
    let lines: Vec<Vec<Cell>> = schedules
        .iter()
        .map(|s| week_line(&build_grid(&s.entries, mode)))
        .collect();

    let (cells, axis) = match orientation {
        Orientation::TeachersAsRows => (lines, Axis::Horizontal),
        Orientation::DaysAsRows => {
            let rows = (0..WEEK_SLOTS)
                .map(|pos| lines.iter().map(|line| line[pos].clone()).collect())
                .collect();
            (rows, Axis::Vertical)
        }
    };

    let spans = compose_matrix(&cells, axis, SLOTS_PER_PERIOD, mode);

    debug!(
        "global aggregate {:?}: {} teachers, {} merged runs",
        orientation,
        schedules.len(),
        spans
            .iter()
            .flatten()
            .filter(|s| s.render && s.span > 1)
            .count()
    );

    GlobalAggregateGrid {
        orientation,
        teachers: schedules.iter().map(|s| s.teacher.clone()).collect(),
        cells,
        spans,
    }
}

/// Fetches every teacher's entries concurrently.
///
/// Results come back in teacher-list order regardless of completion order.
/// Any failure fails the whole collection.
pub async fn collect_teacher_schedules(
    source: &dyn ScheduleSource,
) -> SourceResult<Vec<TeacherSchedule>> {
    let teachers = source.list_entities(EntityKind::Teacher).await?;
    let fetches = teachers.iter().map(|t| async move {
        let entries = source.list_entries_for(EntityKind::Teacher, t).await?;
        Ok::<_, SourceError>(TeacherSchedule::new(t.clone(), entries))
    });
    try_join_all(fetches).await
}

/// Fetches all teachers, then builds the aggregate.
pub async fn fetch_global_aggregate(
    source: &dyn ScheduleSource,
    orientation: Orientation,
) -> SourceResult<GlobalAggregateGrid> {
    let schedules = collect_teacher_schedules(source).await?;
    Ok(build_global_aggregate(orientation, &schedules))
}

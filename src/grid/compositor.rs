//! Span compositor.
//!
//! Run-length encodes a line of cells: adjacent value-equal, non-empty cells
//! fuse into one [`SpanCell`] whose `span` is the run length. Every merge
//! site in the crate (single-entity grids, both global orientations, export)
//! goes through [`compose_line`].
//!
//! # Segments
//! A line is cut into fixed-length segments and no run crosses a segment
//! boundary. With a segment of [`SLOTS_PER_PERIOD`] this keeps merges
//! inside one period: slots 3 and 4 of a day never share a span, and in a
//! 48-position week line no span bridges two days either.
//!
//! # Invariants
//! For every composed line:
//! - the spans of rendered cells sum to the line length;
//! - empty cells always render with span 1;
//! - composing the [`expand`]ed line again yields the same sequence.

use super::builder::{Cell, Grid};
use crate::models::{Axis, ViewMode, SLOTS_PER_DAY, SLOTS_PER_PERIOD};

/// One position of a composed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanCell {
    /// Whether this position starts a run and is drawn.
    pub render: bool,
    /// Run length for rendered cells, 0 for covered ones.
    pub span: usize,
    /// The cell at this position.
    pub content: Cell,
}

impl SpanCell {
    fn start(content: Cell, span: usize) -> Self {
        Self {
            render: true,
            span,
            content,
        }
    }

    fn covered(content: Cell) -> Self {
        Self {
            render: false,
            span: 0,
            content,
        }
    }
}

/// Composes one line of cells.
///
/// `segment_len` of 0 is treated as a single segment covering the line.
pub fn compose_line(cells: &[Cell], segment_len: usize, mode: ViewMode) -> Vec<SpanCell> {
    let segment_len = if segment_len == 0 {
        cells.len().max(1)
    } else {
        segment_len
    };

    let mut out = Vec::with_capacity(cells.len());
    let mut i = 0;
    while i < cells.len() {
        let head = &cells[i];
        if head.is_empty(mode) {
            out.push(SpanCell::start(head.clone(), 1));
            i += 1;
            continue;
        }

        let segment_end = (i / segment_len + 1) * segment_len;
        let limit = segment_end.min(cells.len());
        let mut j = i + 1;
        while j < limit && head.value_eq(&cells[j], mode) {
            j += 1;
        }

        out.push(SpanCell::start(head.clone(), j - i));
        out.extend(cells[i + 1..j].iter().cloned().map(SpanCell::covered));
        i = j;
    }
    out
}

/// Composes a matrix of cells along `axis`.
///
/// Horizontal composes each row; vertical composes each column. The result
/// has the shape of `matrix`, indexed `[row][column]`. Ragged rows are
/// composed vertically only as far as every row reaches.
pub fn compose_matrix(
    matrix: &[Vec<Cell>],
    axis: Axis,
    segment_len: usize,
    mode: ViewMode,
) -> Vec<Vec<SpanCell>> {
    match axis {
        Axis::Horizontal => matrix
            .iter()
            .map(|row| compose_line(row, segment_len, mode))
            .collect(),
        Axis::Vertical => {
            let width = matrix.iter().map(Vec::len).min().unwrap_or(0);
            let columns: Vec<Vec<SpanCell>> = (0..width)
                .map(|c| {
                    let column: Vec<Cell> = matrix.iter().map(|row| row[c].clone()).collect();
                    compose_line(&column, segment_len, mode)
                })
                .collect();
            transpose(columns, matrix.len())
        }
    }
}

fn transpose(columns: Vec<Vec<SpanCell>>, height: usize) -> Vec<Vec<SpanCell>> {
    let mut rows: Vec<Vec<SpanCell>> = (0..height)
        .map(|_| Vec::with_capacity(columns.len()))
        .collect();
    for column in columns {
        for (r, cell) in column.into_iter().enumerate() {
            rows[r].push(cell);
        }
    }
    rows
}

/// Composes a single-entity grid.
///
/// - [`Axis::Horizontal`]: rows are days, columns the 8 slots.
/// - [`Axis::Vertical`]: rows are the 8 slots, columns are days; merges run
///   down each day.
///
/// Either way runs stay inside one period of one day.
pub fn compose_spans(grid: &Grid, axis: Axis, mode: ViewMode) -> Vec<Vec<SpanCell>> {
    match axis {
        Axis::Horizontal => compose_matrix(grid.rows(), axis, SLOTS_PER_PERIOD, mode),
        Axis::Vertical => {
            let by_slot: Vec<Vec<Cell>> = (0..SLOTS_PER_DAY)
                .map(|slot| grid.rows().iter().map(|day| day[slot].clone()).collect())
                .collect();
            compose_matrix(&by_slot, axis, SLOTS_PER_PERIOD, mode)
        }
    }
}

/// Recovers the per-position cells of a composed line.
pub fn expand(line: &[SpanCell]) -> Vec<Cell> {
    line.iter().map(|s| s.content.clone()).collect()
}

/// Sum of spans over rendered cells; equals the line length when composed.
pub fn covered_len(line: &[SpanCell]) -> usize {
    line.iter().filter(|s| s.render).map(|s| s.span).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use crate::models::{Day, Period, ScheduleEntry, DAY_COUNT, WEEK_SLOTS};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn cell(subject: &str, teacher: &str) -> Cell {
        if subject.is_empty() && teacher.is_empty() {
            return Cell::default();
        }
        Cell::new(vec![ScheduleEntry::default()
            .with_subject(subject)
            .with_teacher(teacher)
            .with_room("S1")
            .with_subgroup("3A")])
    }

    fn spans(line: &[SpanCell]) -> Vec<(bool, usize)> {
        line.iter().map(|s| (s.render, s.span)).collect()
    }

    #[test]
    fn test_scenario_double_lesson_merges() {
        let entries = vec![ScheduleEntry::new(Day::Monday, "H1-H2", Period::Morning)
            .with_subject("Math")
            .with_teacher("A")
            .with_room("S1")];
        let grid = build_grid(&entries, ViewMode::Subgroup);
        let composed = compose_spans(&grid, Axis::Horizontal, ViewMode::Subgroup);

        assert_eq!(
            spans(&composed[0]),
            vec![
                (true, 2),
                (false, 0),
                (true, 1),
                (true, 1),
                (true, 1),
                (true, 1),
                (true, 1),
                (true, 1),
            ]
        );
        for row in &composed[1..] {
            assert!(row.iter().all(|s| s.render && s.span == 1));
        }
    }

    #[test]
    fn test_period_boundary_respected() {
        let row: Vec<Cell> = (0..SLOTS_PER_DAY).map(|_| cell("Math", "A")).collect();
        let line = compose_line(&row, SLOTS_PER_PERIOD, ViewMode::Subgroup);
        assert_eq!(
            spans(&line),
            vec![
                (true, 4),
                (false, 0),
                (false, 0),
                (false, 0),
                (true, 4),
                (false, 0),
                (false, 0),
                (false, 0),
            ]
        );
    }

    #[test]
    fn test_empty_cells_never_merge() {
        let row = vec![Cell::default(); 4];
        let line = compose_line(&row, 4, ViewMode::Teacher);
        assert!(line.iter().all(|s| s.render && s.span == 1));
    }

    #[test]
    fn test_different_teacher_not_merged() {
        let row = vec![cell("Math", "A"), cell("Math", "B"), cell("Math", "B")];
        let line = compose_line(&row, 4, ViewMode::Room);
        assert_eq!(spans(&line), vec![(true, 1), (true, 2), (false, 0)]);
    }

    #[test]
    fn test_concurrent_teacher_sets_not_merged() {
        let two = Cell::new(vec![
            ScheduleEntry::default().with_subject("Math").with_teacher("A"),
            ScheduleEntry::default().with_subject("Physics").with_teacher("B"),
        ]);
        let other = Cell::new(vec![
            ScheduleEntry::default().with_subject("Math").with_teacher("A"),
            ScheduleEntry::default().with_subject("Physics").with_teacher("C"),
        ]);
        let line = compose_line(&[two.clone(), other], 4, ViewMode::Room);
        assert_eq!(spans(&line), vec![(true, 1), (true, 1)]);

        let line = compose_line(&[two.clone(), two], 4, ViewMode::Room);
        assert_eq!(spans(&line), vec![(true, 2), (false, 0)]);
    }

    #[test]
    fn test_run_restarts_after_empty() {
        let row = vec![cell("Math", "A"), Cell::default(), cell("Math", "A")];
        let line = compose_line(&row, 0, ViewMode::Subgroup);
        assert_eq!(spans(&line), vec![(true, 1), (true, 1), (true, 1)]);
    }

    #[test]
    fn test_zero_segment_is_whole_line() {
        let row: Vec<Cell> = (0..6).map(|_| cell("Math", "A")).collect();
        let line = compose_line(&row, 0, ViewMode::Subgroup);
        assert_eq!(line[0].span, 6);
        assert!(compose_line(&[], 0, ViewMode::Subgroup).is_empty());
    }

    #[test]
    fn test_vertical_grid_composition() {
        let entries = vec![
            ScheduleEntry::new(Day::Wednesday, "H3-H4", Period::Morning).with_subgroup("3A"),
            ScheduleEntry::new(Day::Wednesday, "H1", Period::Afternoon).with_subgroup("3A"),
        ];
        let grid = build_grid(&entries, ViewMode::Teacher);
        let composed = compose_spans(&grid, Axis::Vertical, ViewMode::Teacher);

        assert_eq!(composed.len(), SLOTS_PER_DAY);
        assert!(composed.iter().all(|r| r.len() == DAY_COUNT));
        let wed = Day::Wednesday.index();
        assert_eq!((composed[2][wed].render, composed[2][wed].span), (true, 2));
        assert!(!composed[3][wed].render);
        // Slot 4 holds the same content but starts the afternoon.
        assert_eq!((composed[4][wed].render, composed[4][wed].span), (true, 1));
    }

    #[test]
    fn test_vertical_matrix_merges_down_columns() {
        let m = vec![
            vec![cell("Math", "A"), Cell::default()],
            vec![cell("Math", "A"), Cell::default()],
        ];
        let composed = compose_matrix(&m, Axis::Vertical, 4, ViewMode::Subgroup);
        assert_eq!(composed[0][0].span, 2);
        assert!(!composed[1][0].render);
        assert!(composed[0][1].render && composed[1][1].render);
    }

    fn random_line(rng: &mut SmallRng, len: usize) -> Vec<Cell> {
        const SUBJECTS: [&str; 3] = ["", "Math", "Art"];
        const TEACHERS: [&str; 2] = ["A", "B"];
        (0..len)
            .map(|_| {
                let subject = SUBJECTS[rng.random_range(0..SUBJECTS.len())];
                if subject.is_empty() {
                    Cell::default()
                } else {
                    cell(subject, TEACHERS[rng.random_range(0..TEACHERS.len())])
                }
            })
            .collect()
    }

    #[test]
    fn test_random_lines_hold_invariants() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let len = if rng.random_bool(0.5) {
                SLOTS_PER_DAY
            } else {
                WEEK_SLOTS
            };
            let row = random_line(&mut rng, len);
            let line = compose_line(&row, SLOTS_PER_PERIOD, ViewMode::Subgroup);

            assert_eq!(line.len(), len);
            assert_eq!(covered_len(&line), len);

            for (i, s) in line.iter().enumerate() {
                if s.content.is_empty(ViewMode::Subgroup) {
                    assert!(s.render && s.span == 1, "empty cell merged at {i}");
                }
                if s.render {
                    let last = i + s.span - 1;
                    assert_eq!(
                        i / SLOTS_PER_PERIOD,
                        last / SLOTS_PER_PERIOD,
                        "span crosses a period at {i}"
                    );
                }
            }

            let again = compose_line(&expand(&line), SLOTS_PER_PERIOD, ViewMode::Subgroup);
            assert_eq!(again, line);
        }
    }
}

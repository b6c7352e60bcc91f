//! Tabular export projector.
//!
//! Converts composed grids into header rows and body rows with explicit
//! column and row spans, ready for any [`DocumentSink`](super::DocumentSink).
//!
//! # Layout
//! Rows are *logical*: a cell covered by a row span from an earlier row is
//! omitted, the way HTML tables and most PDF table writers expect.
//! [`ExportTable::place`] resolves logical rows to physical coordinates.
//!
//! # Direction
//! LTR tables put the label column first. RTL tables are the exact mirror of
//! every row, headers included, and show clock labels reversed
//! (`"09:30 - 08:30"`). Spans come from the compositor and are never
//! recomputed here, so mirroring moves a span but never changes it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::style::{cell_style, CellStyle};
use super::text::{
    clean_label, clean_teacher_name, reverse_time_range, shape_for_export, strip_direction_marks,
    TextDirection,
};
use crate::config::ExportConfig;
use crate::grid::{Cell, GlobalAggregateGrid, SpanCell};
use crate::models::{
    slot_label, slot_period, split_week_index, Axis, Day, Orientation, Period, ScheduleEntry,
    ViewMode, SLOTS_PER_DAY, SLOTS_PER_PERIOD,
};

/// What an exported cell is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellRole {
    /// Column header.
    Header,
    /// Row label (day, clock time, teacher name).
    Label,
    /// Schedule content.
    Body(CellStyle),
}

/// One cell of an exported table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCell {
    pub text: String,
    pub col_span: usize,
    pub row_span: usize,
    pub role: CellRole,
}

impl ExportCell {
    fn new(text: impl Into<String>, role: CellRole) -> Self {
        Self {
            text: shape_for_export(&strip_direction_marks(&text.into())),
            col_span: 1,
            row_span: 1,
            role,
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self::new(text, CellRole::Header)
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(text, CellRole::Label)
    }

    pub fn body(text: impl Into<String>, style: CellStyle) -> Self {
        Self::new(text, CellRole::Body(style))
    }

    pub fn with_col_span(mut self, span: usize) -> Self {
        self.col_span = span.max(1);
        self
    }

    pub fn with_row_span(mut self, span: usize) -> Self {
        self.row_span = span.max(1);
        self
    }

    /// Whether this is a body cell with nothing to display.
    pub fn is_empty(&self) -> bool {
        matches!(&self.role, CellRole::Body(style) if style.is_empty())
    }
}

/// A cell resolved to physical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCell<'a> {
    pub row: usize,
    pub col: usize,
    pub cell: &'a ExportCell,
}

/// Header rows and body rows of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTable {
    pub headers: Vec<Vec<ExportCell>>,
    pub rows: Vec<Vec<ExportCell>>,
}

impl ExportTable {
    /// Resolves logical rows to physical (row, column) positions.
    ///
    /// Header rows come first. Each cell lands on the leftmost column of its
    /// row not already covered by a span from an earlier row.
    pub fn place(&self) -> Vec<PlacedCell<'_>> {
        let mut occupied: Vec<Vec<bool>> = Vec::new();
        let mut placed = Vec::new();

        for (r, row) in self.headers.iter().chain(&self.rows).enumerate() {
            let mut c = 0;
            for cell in row {
                while is_occupied(&occupied, r, c) {
                    c += 1;
                }
                for rr in r..r + cell.row_span {
                    if occupied.len() <= rr {
                        occupied.resize_with(rr + 1, Vec::new);
                    }
                    let line = &mut occupied[rr];
                    if line.len() < c + cell.col_span {
                        line.resize(c + cell.col_span, false);
                    }
                    for slot in &mut line[c..c + cell.col_span] {
                        *slot = true;
                    }
                }
                placed.push(PlacedCell { row: r, col: c, cell });
                c += cell.col_span;
            }
        }
        placed
    }

    /// Number of physical columns.
    pub fn width(&self) -> usize {
        self.place()
            .iter()
            .map(|p| p.col + p.cell.col_span)
            .max()
            .unwrap_or(0)
    }

    /// Number of header rows.
    pub fn header_rows(&self) -> usize {
        self.headers.len()
    }

    pub(crate) fn mirror(mut self) -> Self {
        for row in self.headers.iter_mut().chain(self.rows.iter_mut()) {
            row.reverse();
        }
        self
    }
}

fn is_occupied(occupied: &[Vec<bool>], r: usize, c: usize) -> bool {
    occupied
        .get(r)
        .and_then(|line| line.get(c))
        .copied()
        .unwrap_or(false)
}

/// Text shown for one cell in `mode`.
///
/// Empty cells render as blank text.
pub fn cell_text(cell: &Cell, mode: ViewMode) -> String {
    if cell.is_empty(mode) {
        return String::new();
    }
    let entries = cell.entries();
    match mode {
        ViewMode::Teacher => teacher_text(entries),
        ViewMode::Subgroup => subgroup_text(entries),
        ViewMode::Room => room_text(entries),
        ViewMode::Vacant => vacant_text(entries),
        ViewMode::Global => global_text(entries),
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

fn join_lines(lines: Vec<String>) -> String {
    lines
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn teacher_text(entries: &[ScheduleEntry]) -> String {
    let mut classes = Vec::new();
    let mut rooms = Vec::new();
    for e in entries {
        let label = match e.group_tag() {
            Some(tag) => format!("{} ({tag})", e.class_name()),
            None => e.class_name().to_string(),
        };
        push_unique(&mut classes, label.trim().to_string());
        push_unique(&mut rooms, e.room.trim().to_string());
    }
    classes.push(rooms.join(", "));
    join_lines(classes)
}

/// Subject/teacher lines then a room line.
fn lesson_block<'a>(entries: impl Iterator<Item = &'a ScheduleEntry>) -> String {
    let mut lines = Vec::new();
    let mut rooms = Vec::new();
    for e in entries {
        lines.push(clean_label(&e.subject));
        lines.push(clean_label(&e.teacher));
        push_unique(&mut rooms, e.room.trim().to_string());
    }
    lines.push(rooms.join(", "));
    join_lines(lines)
}

/// `(G<n>)` marker of a subject, if any.
fn subject_group(subject: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"(?i)\(G(\d+)\)").expect("group pattern is valid"));
    pattern.captures(subject).map(|caps| format!("G{}", &caps[1]))
}

fn subgroup_text(entries: &[ScheduleEntry]) -> String {
    let mut groups: Vec<(Option<String>, Vec<&ScheduleEntry>)> = Vec::new();
    for e in entries {
        let key = subject_group(&clean_label(&e.subject));
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(e),
            None => groups.push((key, vec![e])),
        }
    }
    if groups.len() <= 1 {
        return lesson_block(entries.iter());
    }
    groups
        .into_iter()
        .map(|(_, members)| lesson_block(members.into_iter()))
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n────────\n")
}

fn room_text(entries: &[ScheduleEntry]) -> String {
    let lines = entries
        .iter()
        .flat_map(|e| [&e.subgroup, &e.subject, &e.teacher])
        .map(|s| s.trim().to_string())
        .collect();
    join_lines(lines)
}

fn vacant_text(entries: &[ScheduleEntry]) -> String {
    let mut rooms = Vec::new();
    for e in entries {
        let room = if e.room.trim().is_empty() {
            &e.subgroup
        } else {
            &e.room
        };
        push_unique(&mut rooms, room.trim().to_string());
    }
    rooms.join(", ")
}

fn global_text(entries: &[ScheduleEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            join_lines(
                [&e.subgroup, &e.subject, &e.room]
                    .iter()
                    .map(|s| s.trim().to_string())
                    .collect(),
            )
        })
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn time_label(slot: usize, direction: TextDirection) -> String {
    let label = slot_label(slot);
    match direction {
        TextDirection::Rtl => reverse_time_range(label),
        TextDirection::Ltr => label.to_string(),
    }
}

fn body_cell(span: &SpanCell, mode: ViewMode, config: &ExportConfig) -> ExportCell {
    ExportCell::body(
        cell_text(&span.content, mode),
        cell_style(&span.content, mode, &config.print),
    )
}

/// Projects a composed single-entity grid.
///
/// `composed` comes from [`compose_spans`](crate::grid::compose_spans) with
/// the same `axis`:
/// - horizontal: one body row per day, one column per slot, spans become
///   column spans;
/// - vertical: one body row per slot, one column per day, spans become row
///   spans.
pub fn project_for_export(
    composed: &[Vec<SpanCell>],
    axis: Axis,
    direction: TextDirection,
    mode: ViewMode,
    config: &ExportConfig,
) -> ExportTable {
    let labels = &config.labels;
    let mut table = ExportTable::default();

    match axis {
        Axis::Horizontal => {
            let mut header = vec![ExportCell::header(&labels.day_hour)];
            header.extend((0..SLOTS_PER_DAY).map(|s| ExportCell::header(time_label(s, direction))));
            table.headers.push(header);

            for (d, line) in composed.iter().enumerate() {
                let day = Day::from_index(d).map(|day| labels.day(day)).unwrap_or_default();
                let mut row = vec![ExportCell::label(day)];
                row.extend(
                    line.iter()
                        .filter(|s| s.render)
                        .map(|s| body_cell(s, mode, config).with_col_span(s.span)),
                );
                table.rows.push(row);
            }
        }
        Axis::Vertical => {
            let mut header = vec![ExportCell::header(&labels.day_hour)];
            header.extend(
                composed
                    .first()
                    .map(Vec::len)
                    .into_iter()
                    .flat_map(|w| 0..w)
                    .filter_map(Day::from_index)
                    .map(|day| ExportCell::header(labels.day(day))),
            );
            table.headers.push(header);

            for (slot, line) in composed.iter().enumerate() {
                let mut row = vec![ExportCell::label(time_label(slot, direction))];
                row.extend(
                    line.iter()
                        .filter(|s| s.render)
                        .map(|s| body_cell(s, mode, config).with_row_span(s.span)),
                );
                table.rows.push(row);
            }
        }
    }

    match direction {
        TextDirection::Rtl => table.mirror(),
        TextDirection::Ltr => table,
    }
}

/// Projects the all-teachers grid.
///
/// Teachers-as-rows gets three header rows (day, period, slot number) under a
/// teacher corner spanning all three. Days-as-rows gets one header row and
/// day/period/slot label columns spanning 8, 4 and 1 rows.
pub fn project_global(
    grid: &GlobalAggregateGrid,
    direction: TextDirection,
    config: &ExportConfig,
) -> ExportTable {
    let labels = &config.labels;
    let mode = ViewMode::Global;
    let mut table = ExportTable::default();

    match grid.orientation() {
        Orientation::TeachersAsRows => {
            let mut days = vec![ExportCell::header(&labels.teacher).with_row_span(3)];
            let mut periods = Vec::new();
            let mut slots = Vec::new();
            for day in Day::ALL {
                days.push(ExportCell::header(labels.day(day)).with_col_span(SLOTS_PER_DAY));
                for period in Period::ALL {
                    periods.push(
                        ExportCell::header(labels.period(period)).with_col_span(SLOTS_PER_PERIOD),
                    );
                    slots.extend((1..=SLOTS_PER_PERIOD).map(|n| ExportCell::header(n.to_string())));
                }
            }
            table.headers = vec![days, periods, slots];

            for (teacher, line) in grid.teachers().iter().zip(grid.spans()) {
                let mut row = vec![ExportCell::label(clean_teacher_name(teacher))];
                row.extend(
                    line.iter()
                        .filter(|s| s.render)
                        .map(|s| body_cell(s, mode, config).with_col_span(s.span)),
                );
                table.rows.push(row);
            }
        }
        Orientation::DaysAsRows => {
            let mut header = vec![ExportCell::header(&labels.day_period_hour).with_col_span(3)];
            header.extend(
                grid.teachers()
                    .iter()
                    .map(|t| ExportCell::header(clean_teacher_name(t))),
            );
            table.headers.push(header);

            for (pos, line) in grid.spans().iter().enumerate() {
                let Some((day, slot)) = split_week_index(pos) else {
                    continue;
                };
                let mut row = Vec::new();
                if slot == 0 {
                    row.push(ExportCell::label(labels.day(day)).with_row_span(SLOTS_PER_DAY));
                }
                if slot % SLOTS_PER_PERIOD == 0 {
                    let period = labels.period(slot_period(slot));
                    row.push(ExportCell::label(period).with_row_span(SLOTS_PER_PERIOD));
                }
                row.push(ExportCell::label((slot % SLOTS_PER_PERIOD + 1).to_string()));
                row.extend(
                    line.iter()
                        .filter(|s| s.render)
                        .map(|s| body_cell(s, mode, config).with_row_span(s.span)),
                );
                table.rows.push(row);
            }
        }
    }

    match direction {
        TextDirection::Rtl => table.mirror(),
        TextDirection::Ltr => table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Labels;
    use crate::grid::{build_global_aggregate, build_grid, compose_spans, TeacherSchedule};
    use crate::models::WEEK_SLOTS;

    fn class_entries() -> Vec<ScheduleEntry> {
        vec![ScheduleEntry::new(Day::Monday, "H1-H2", Period::Morning)
            .with_subject("Math")
            .with_teacher("A")
            .with_room("S1")]
    }

    fn rtl_config() -> ExportConfig {
        ExportConfig {
            labels: Labels::arabic(),
            ..ExportConfig::default()
        }
    }

    fn physical(table: &ExportTable) -> Vec<(usize, usize, usize, usize, String)> {
        table
            .place()
            .into_iter()
            .map(|p| (p.row, p.col, p.cell.col_span, p.cell.row_span, p.cell.text.clone()))
            .collect()
    }

    #[test]
    fn test_horizontal_projection_ltr() {
        let grid = build_grid(&class_entries(), ViewMode::Subgroup);
        let composed = compose_spans(&grid, Axis::Horizontal, ViewMode::Subgroup);
        let config = ExportConfig::default();
        let table = project_for_export(
            &composed,
            Axis::Horizontal,
            TextDirection::Ltr,
            ViewMode::Subgroup,
            &config,
        );

        assert_eq!(table.headers[0][0].text, "Jour / Heure");
        assert_eq!(table.headers[0][1].text, "08:30 - 09:30");
        assert_eq!(table.rows.len(), 6);

        let monday = &table.rows[0];
        assert_eq!(monday[0].text, "Lundi");
        assert_eq!(monday[1].col_span, 2);
        assert_eq!(monday[1].text, "Math\nA\nS1");
        // Day label + merged cell + 6 singles.
        assert_eq!(monday.len(), 8);
        assert!(monday[2].is_empty());
        assert_eq!(table.width(), 9);
    }

    #[test]
    fn test_rtl_mirrors_without_remerging() {
        let grid = build_grid(&class_entries(), ViewMode::Subgroup);
        let composed = compose_spans(&grid, Axis::Horizontal, ViewMode::Subgroup);
        let ltr = project_for_export(
            &composed,
            Axis::Horizontal,
            TextDirection::Ltr,
            ViewMode::Subgroup,
            &ExportConfig::default(),
        );
        let rtl = project_for_export(
            &composed,
            Axis::Horizontal,
            TextDirection::Rtl,
            ViewMode::Subgroup,
            &rtl_config(),
        );

        // Same spans, reversed order.
        let ltr_spans: Vec<usize> = ltr.rows[0].iter().map(|c| c.col_span).collect();
        let mut rtl_spans: Vec<usize> = rtl.rows[0].iter().map(|c| c.col_span).collect();
        rtl_spans.reverse();
        assert_eq!(ltr_spans, rtl_spans);

        // The merged cell covers slots 0-1, now physical columns 6-7.
        let placed = physical(&rtl);
        let merged = placed
            .iter()
            .find(|(row, _, span, _, _)| *row == 1 && *span == 2)
            .unwrap();
        assert_eq!(merged.1, 6);

        let last_header = rtl.headers[0].last().unwrap();
        assert_eq!(last_header.role, CellRole::Header);
        assert_eq!(rtl.headers[0][0].text, "18:30 - 17:30");
        // Day label sits rightmost.
        assert!(placed.iter().any(|(row, col, ..)| *row == 1 && *col == 8));
    }

    #[test]
    fn test_vertical_projection_row_spans() {
        let grid = build_grid(&class_entries(), ViewMode::Subgroup);
        let composed = compose_spans(&grid, Axis::Vertical, ViewMode::Subgroup);
        let table = project_for_export(
            &composed,
            Axis::Vertical,
            TextDirection::Ltr,
            ViewMode::Subgroup,
            &ExportConfig::default(),
        );

        assert_eq!(table.headers[0].len(), 7);
        assert_eq!(table.rows.len(), SLOTS_PER_DAY);
        assert_eq!(table.rows[0][1].row_span, 2);
        // Slot 1 omits Monday, covered from above.
        assert_eq!(table.rows[1].len(), 6);

        let placed = physical(&table);
        let slot1_cells: Vec<usize> = placed
            .iter()
            .filter(|p| p.0 == 2)
            .map(|p| p.1)
            .collect();
        assert_eq!(slot1_cells, vec![0, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_vertical_rtl_placement() {
        let grid = build_grid(&class_entries(), ViewMode::Subgroup);
        let composed = compose_spans(&grid, Axis::Vertical, ViewMode::Subgroup);
        let table = project_for_export(
            &composed,
            Axis::Vertical,
            TextDirection::Rtl,
            ViewMode::Subgroup,
            &rtl_config(),
        );
        let placed = physical(&table);
        // Monday is the rightmost day column (5), left of the time labels (6).
        let merged = placed.iter().find(|p| p.3 == 2).unwrap();
        assert_eq!((merged.0, merged.1), (1, 5));
        let slot1: Vec<usize> = placed.iter().filter(|p| p.0 == 2).map(|p| p.1).collect();
        assert_eq!(slot1, vec![0, 1, 2, 3, 4, 6]);
    }

    #[test]
    fn test_cell_text_per_mode() {
        let e = ScheduleEntry::default()
            .with_subject("Math_Sup")
            .with_teacher("Alami")
            .with_room("S1")
            .with_subgroup("3A:G1");
        let other = ScheduleEntry::default()
            .with_subject("Math_Sup")
            .with_teacher("Alami")
            .with_room("S2")
            .with_subgroup("3A:G1");
        let cell = Cell::new(vec![e.clone(), other]);

        assert_eq!(cell_text(&cell, ViewMode::Teacher), "3A (G1)\nS1, S2");
        assert_eq!(
            cell_text(&Cell::new(vec![e.clone()]), ViewMode::Room),
            "3A:G1\nMath_Sup\nAlami"
        );
        assert_eq!(
            cell_text(&Cell::new(vec![e.clone()]), ViewMode::Subgroup),
            "Math Sup\nAlami\nS1"
        );
        assert_eq!(
            cell_text(&Cell::new(vec![e.clone(), e.clone()]), ViewMode::Global),
            "3A:G1\nMath_Sup\nS1\n---\n3A:G1\nMath_Sup\nS1"
        );
        assert_eq!(cell_text(&Cell::default(), ViewMode::Teacher), "");
    }

    #[test]
    fn test_subgroup_text_splits_groups() {
        let g1 = ScheduleEntry::default()
            .with_subject("Info (G1)")
            .with_teacher("A")
            .with_room("L1");
        let g2 = ScheduleEntry::default()
            .with_subject("Info (G2)")
            .with_teacher("B")
            .with_room("L2");
        let text = cell_text(&Cell::new(vec![g1, g2]), ViewMode::Subgroup);
        assert_eq!(text, "Info (G1)\nA\nL1\n────────\nInfo (G2)\nB\nL2");
    }

    #[test]
    fn test_vacant_text() {
        let cell = Cell::new(vec![
            ScheduleEntry::default().with_subgroup("S3"),
            ScheduleEntry::default().with_subgroup("S3"),
            ScheduleEntry::default().with_room("S4").with_subgroup("S4"),
        ]);
        assert_eq!(cell_text(&cell, ViewMode::Vacant), "S3, S4");
    }

    #[test]
    fn test_arabic_cell_text_is_shaped() {
        let cell = Cell::new(vec![ScheduleEntry::default()
            .with_subject("تربية إسلامية")
            .with_teacher("B")]);
        assert_eq!(cell_text(&cell, ViewMode::Subgroup), "تربية إسلامية\nB");
        let exported = ExportCell::body(cell_text(&cell, ViewMode::Subgroup), CellStyle::Plain);
        assert_eq!(exported.text, "إسلامية تربية\nB");
    }

    #[test]
    fn test_export_text_drops_direction_marks() {
        let cell = ExportCell::label("\u{200F}الاثنين\u{200F}");
        assert_eq!(cell.text, "الاثنين");
        let cell = ExportCell::body("Math\u{200E}\nS1", CellStyle::Plain);
        assert_eq!(cell.text, "Math\nS1");
    }

    fn global_fixture(orientation: Orientation) -> GlobalAggregateGrid {
        let a = vec![ScheduleEntry::new(Day::Monday, "H1-H2", Period::Morning)
            .with_subgroup("3A")
            .with_subject("Math")
            .with_room("S1")];
        let b = vec![ScheduleEntry::new(Day::Tuesday, "H4", Period::Afternoon)
            .with_subgroup("2B")
            .with_subject("SVT")];
        build_global_aggregate(
            orientation,
            &[
                TeacherSchedule::new("Alami_Said__T1", a),
                TeacherSchedule::new("Benani", b),
            ],
        )
    }

    #[test]
    fn test_global_teachers_as_rows_headers() {
        let grid = global_fixture(Orientation::TeachersAsRows);
        let table = project_global(&grid, TextDirection::Ltr, &ExportConfig::default());

        assert_eq!(table.header_rows(), 3);
        assert_eq!(table.headers[0][0].row_span, 3);
        assert_eq!(table.headers[0][1].col_span, 8);
        assert_eq!(table.headers[1].len(), 12);
        assert_eq!(table.headers[1][1].text, "Après-midi");
        assert_eq!(table.headers[2].len(), WEEK_SLOTS);
        assert_eq!(table.headers[2][4].text, "1");

        assert_eq!(table.rows[0][0].text, "Alami Said");
        assert_eq!(table.rows[0][1].col_span, 2);
        assert_eq!(table.width(), WEEK_SLOTS + 1);

        // Slot-number row starts right of the corner.
        let placed = physical(&table);
        assert!(placed.iter().any(|p| p.0 == 2 && p.1 == 1 && p.4 == "1"));
    }

    #[test]
    fn test_global_days_as_rows_labels() {
        let grid = global_fixture(Orientation::DaysAsRows);
        let table = project_global(&grid, TextDirection::Ltr, &ExportConfig::default());

        assert_eq!(table.headers[0][0].col_span, 3);
        assert_eq!(table.headers[0][1].text, "Alami Said");
        assert_eq!(table.rows.len(), WEEK_SLOTS);

        let first = &table.rows[0];
        assert_eq!(first[0].row_span, 8);
        assert_eq!(first[1].row_span, 4);
        assert_eq!(first[2].text, "1");
        assert_eq!(first[3].row_span, 2);
        // Row 1: slot number + teacher B (teacher A covered).
        assert_eq!(table.rows[1].len(), 2);
        assert_eq!(table.width(), 5);
    }

    #[test]
    fn test_global_rtl_mirror() {
        let grid = global_fixture(Orientation::DaysAsRows);
        let table = project_global(&grid, TextDirection::Rtl, &rtl_config());
        let placed = physical(&table);

        // Teacher columns now 0..2 (B then A), labels at 2..5.
        let day_label = placed.iter().find(|p| p.3 == 8).unwrap();
        assert_eq!(day_label.1, 4);
        let merged = placed.iter().find(|p| p.3 == 2).unwrap();
        assert_eq!((merged.0, merged.1), (1, 1));
        assert_eq!(table.headers[0].last().unwrap().col_span, 3);
    }
}

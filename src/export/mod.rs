//! Export of composed grids to paginated documents.
//!
//! # Pipeline
//! 1. [`project_for_export`] / [`project_global`]: composed spans to an
//!    [`ExportTable`] with explicit column and row spans
//! 2. [`Exporter`]: page composition (identity, title, table, summary)
//! 3. [`DocumentSink`]: [`MemorySink`] records pages, [`XlsxSink`] writes a
//!    workbook
//!
//! Text direction, labels and cell fills are decided here, never by the
//! compositor.

mod exporter;
mod labels;
mod projector;
mod sink;
mod style;
mod summary;
mod text;
mod xlsx;

pub use exporter::{ExportError, ExportReport, ExportResult, Exporter};
pub use labels::Labels;
pub use projector::{
    cell_text, project_for_export, project_global, CellRole, ExportCell, ExportTable, PlacedCell,
};
pub use sink::{
    Align, DocumentSink, MemorySink, PageSetup, PaperSize, RecordedPage, SinkError, TableStyle,
    TextRun,
};
pub use style::{cell_style, pastel_color, pastel_hue, CellStyle, PLAIN_FILL};
pub use summary::{
    group_pairs, main_subject, subject_teacher_pairs, teacher_classes, SubjectTeacher,
};
pub use text::{
    classify_direction, clean_label, clean_teacher_name, normalize_key, reverse_time_range,
    shape_for_export, strip_direction_marks, TextDirection,
};
pub use xlsx::XlsxSink;

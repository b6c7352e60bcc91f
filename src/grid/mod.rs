//! Grid compositor.
//!
//! Turns a flat list of entries into a composed day × slot layout:
//!
//! 1. [`build_grid`] places entries on the 6 × 8 time axis.
//! 2. [`classifier`] decides per view mode whether a cell shows anything.
//! 3. [`compose_spans`] fuses identical neighbours into [`SpanCell`]s,
//!    never across a period.
//! 4. [`build_global_aggregate`] does the same for all teachers at once.
//!
//! Everything here is pure and synchronous except the fetch helpers in
//! [`aggregate`].

pub mod aggregate;
pub mod builder;
pub mod classifier;
pub mod compositor;

pub use aggregate::{
    build_global_aggregate, collect_teacher_schedules, fetch_global_aggregate,
    GlobalAggregateGrid, TeacherSchedule,
};
pub use builder::{build_grid, Cell, Grid};
pub use classifier::{has_content, is_empty, values_equal};
pub use compositor::{compose_line, compose_matrix, compose_spans, covered_len, expand, SpanCell};

//! Timetable domain models.
//!
//! Provides the data vocabulary shared by the grid compositor and the
//! exporter: schedule entries, the fixed day × slot time axis, and the view
//! modes and orientations a grid can be displayed in.
//!
//! # Axis Layout
//!
//! | | slots 0-3 | slots 4-7 |
//! |---|---|---|
//! | Monday .. Saturday | morning (H1-H4) | afternoon (H1-H4) |

mod entry;
mod time_axis;
mod view;

pub use entry::{Day, Period, ScheduleEntry};
pub use time_axis::{
    period_base, place_entry, slot_label, slot_period, split_week_index, week_index, HourRange,
    Placement, PlacementError, SlotRange, DAY_COUNT, SLOTS_PER_DAY, SLOTS_PER_PERIOD, SLOT_LABELS,
    WEEK_SLOTS,
};
pub use view::{Axis, EntityKind, Field, Orientation, ViewMode};

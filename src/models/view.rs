//! View vocabulary: what is being displayed and along which axis.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ScheduleEntry;

/// Kind of entity a per-entity timetable is shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Teacher,
    Subgroup,
    Room,
}

impl EntityKind {
    /// View mode used to display one entity of this kind.
    pub fn view_mode(self) -> ViewMode {
        match self {
            EntityKind::Teacher => ViewMode::Teacher,
            EntityKind::Subgroup => ViewMode::Subgroup,
            EntityKind::Room => ViewMode::Room,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Teacher => "teacher",
            EntityKind::Subgroup => "subgroup",
            EntityKind::Room => "room",
        })
    }
}

/// A descriptive field of a [`ScheduleEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Subject,
    Teacher,
    Room,
    Subgroup,
}

impl Field {
    /// Every descriptive field.
    pub const ALL: [Field; 4] = [Field::Subject, Field::Teacher, Field::Room, Field::Subgroup];

    /// Reads this field from an entry.
    #[inline]
    pub fn value(self, entry: &ScheduleEntry) -> &str {
        match self {
            Field::Subject => &entry.subject,
            Field::Teacher => &entry.teacher,
            Field::Room => &entry.room,
            Field::Subgroup => &entry.subgroup,
        }
    }

    /// Whether the field holds non-whitespace text.
    #[inline]
    pub fn is_filled(self, entry: &ScheduleEntry) -> bool {
        !self.value(entry).trim().is_empty()
    }
}

/// What the grid is currently showing.
///
/// The view mode decides which entry fields count as displayable content
/// (see [`ViewMode::content_fields`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// One teacher's week.
    #[default]
    Teacher,
    /// One class or class sub-group's week.
    Subgroup,
    /// One room's week.
    Room,
    /// Free rooms per slot; the room name travels in the subgroup field.
    Vacant,
    /// All teachers at once.
    Global,
}

impl ViewMode {
    /// Fields whose presence makes a cell non-empty in this mode.
    ///
    /// | mode | fields |
    /// |------|--------|
    /// | Teacher | subgroup, room |
    /// | Subgroup | subject, teacher, room |
    /// | Room | subgroup, subject, teacher |
    /// | Vacant | subgroup |
    /// | Global | subgroup, subject, room |
    pub fn content_fields(self) -> &'static [Field] {
        match self {
            ViewMode::Teacher => &[Field::Subgroup, Field::Room],
            ViewMode::Subgroup => &[Field::Subject, Field::Teacher, Field::Room],
            ViewMode::Room => &[Field::Subgroup, Field::Subject, Field::Teacher],
            ViewMode::Vacant => &[Field::Subgroup],
            ViewMode::Global => &[Field::Subgroup, Field::Subject, Field::Room],
        }
    }

    /// Field whose value picks a cell's tint when colors are enabled.
    pub fn color_key(self) -> Field {
        match self {
            ViewMode::Teacher => Field::Subgroup,
            _ => Field::Subject,
        }
    }
}

/// Which entity forms the rows of the all-teachers grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Rows = teachers, columns = 48 day/slot positions.
    #[default]
    TeachersAsRows,
    /// Rows = 48 day/slot positions, columns = teachers.
    DaysAsRows,
}

/// Direction the span compositor merges in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Along each row (column spans).
    Horizontal,
    /// Down each column (row spans).
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_fields_per_mode() {
        assert_eq!(
            ViewMode::Teacher.content_fields(),
            &[Field::Subgroup, Field::Room]
        );
        assert!(!ViewMode::Room.content_fields().contains(&Field::Room));
        assert_eq!(ViewMode::Vacant.content_fields(), &[Field::Subgroup]);
        assert!(!ViewMode::Global.content_fields().contains(&Field::Teacher));
    }

    #[test]
    fn test_field_is_filled() {
        let e = ScheduleEntry::default().with_subject("  ").with_room("S1");
        assert!(!Field::Subject.is_filled(&e));
        assert!(Field::Room.is_filled(&e));
        assert_eq!(Field::Room.value(&e), "S1");
    }

    #[test]
    fn test_entity_kind_view_mode() {
        assert_eq!(EntityKind::Teacher.view_mode(), ViewMode::Teacher);
        assert_eq!(EntityKind::Room.view_mode(), ViewMode::Room);
        assert_eq!(EntityKind::Subgroup.to_string(), "subgroup");
    }

    #[test]
    fn test_color_key() {
        assert_eq!(ViewMode::Teacher.color_key(), Field::Subgroup);
        assert_eq!(ViewMode::Subgroup.color_key(), Field::Subject);
    }
}

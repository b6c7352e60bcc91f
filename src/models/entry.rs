//! Schedule entry model.
//!
//! A schedule entry is one resolved lesson occurrence as delivered by the
//! data source: a day, a lesson-number range within a period, and the four
//! descriptive fields (subject, teacher, room, subgroup).
//!
//! # Wire Format
//! Entries keep the raw strings they were delivered with. Day, period and
//! hour range are only interpreted when the entry is placed on the time axis
//! (see [`crate::models::place_entry`]), so a malformed entry survives
//! retrieval and is dropped at grid-build time instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six school days, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All days in axis order.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Position on the day axis (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at a given axis position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical wire name, as emitted by the timetable backend.
    pub fn wire_name(self) -> &'static str {
        match self {
            Day::Monday => "Lundi",
            Day::Tuesday => "Mardi",
            Day::Wednesday => "Mercredi",
            Day::Thursday => "Jeudi",
            Day::Friday => "Vendredi",
            Day::Saturday => "Samedi",
        }
    }

    /// Parses a raw day name.
    ///
    /// Matching is case-insensitive and by prefix, so `"lundi 12/09"` and
    /// `"MONDAY"` both resolve to Monday. French and English names are
    /// accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        let low = raw.trim().to_lowercase();
        const NAMES: [(&str, &str, Day); 6] = [
            ("lundi", "monday", Day::Monday),
            ("mardi", "tuesday", Day::Tuesday),
            ("mercredi", "wednesday", Day::Wednesday),
            ("jeudi", "thursday", Day::Thursday),
            ("vendredi", "friday", Day::Friday),
            ("samedi", "saturday", Day::Saturday),
        ];
        NAMES
            .iter()
            .find(|(fr, en, _)| low.starts_with(fr) || low.starts_with(en))
            .map(|(_, _, day)| *day)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Half of a school day. Each period holds four lesson slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    /// Both periods in axis order.
    pub const ALL: [Period; 2] = [Period::Morning, Period::Afternoon];

    /// Canonical wire name.
    pub fn wire_name(self) -> &'static str {
        match self {
            Period::Morning => "matin",
            Period::Afternoon => "soir",
        }
    }

    /// Parses a raw period tag (`matin`, `soir`, `morning`, `afternoon`, ...).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "matin" | "morning" | "am" => Some(Period::Morning),
            "soir" | "apres-midi" | "après-midi" | "afternoon" | "evening" | "pm" => {
                Some(Period::Afternoon)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s).ok_or_else(|| format!("unknown period: {s}"))
    }
}

/// A resolved lesson occurrence.
///
/// Immutable once retrieved; the compositor only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Raw day name (e.g. `"Lundi"`).
    #[serde(default)]
    pub day: String,
    /// Raw lesson range (e.g. `"H1"` or `"H1-H2"`).
    #[serde(default, rename = "hourId")]
    pub hour_range: String,
    /// Raw period tag (`"matin"` / `"soir"`).
    #[serde(default)]
    pub period: String,
    /// Subject taught.
    #[serde(default)]
    pub subject: String,
    /// Teacher name.
    #[serde(default)]
    pub teacher: String,
    /// Room name. The vacant-room listing carries the free room here too.
    #[serde(default)]
    pub room: String,
    /// Class with an optional sub-group tag, e.g. `"3A:G1"`.
    #[serde(default)]
    pub subgroup: String,
}

impl ScheduleEntry {
    /// Creates an entry on a day, lesson range and period with blank
    /// descriptive fields.
    pub fn new(day: Day, hour_range: impl Into<String>, period: Period) -> Self {
        Self {
            day: day.wire_name().to_string(),
            hour_range: hour_range.into(),
            period: period.wire_name().to_string(),
            ..Default::default()
        }
    }

    /// Creates an entry from raw, uninterpreted strings.
    pub fn raw(
        day: impl Into<String>,
        hour_range: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            hour_range: hour_range.into(),
            period: period.into(),
            ..Default::default()
        }
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Sets the subgroup.
    pub fn with_subgroup(mut self, subgroup: impl Into<String>) -> Self {
        self.subgroup = subgroup.into();
        self
    }

    /// Class part of the subgroup (`"3A:G1"` → `"3A"`).
    pub fn class_name(&self) -> &str {
        self.subgroup
            .split(':')
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// Sub-group tag of the subgroup (`"3A:G1"` → `Some("G1")`).
    pub fn group_tag(&self) -> Option<&str> {
        self.subgroup
            .split_once(':')
            .map(|(_, tag)| tag.trim())
            .filter(|tag| !tag.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parse_prefix_and_case() {
        assert_eq!(Day::parse("Lundi"), Some(Day::Monday));
        assert_eq!(Day::parse("mercredi 14"), Some(Day::Wednesday));
        assert_eq!(Day::parse("  SATURDAY "), Some(Day::Saturday));
        assert_eq!(Day::parse("Dimanche"), None);
        assert_eq!(Day::parse(""), None);
    }

    #[test]
    fn test_day_index_roundtrip() {
        for (i, day) in Day::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(Day::from_index(i), Some(*day));
        }
        assert_eq!(Day::from_index(6), None);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(Period::parse("matin"), Some(Period::Morning));
        assert_eq!(Period::parse("Soir"), Some(Period::Afternoon));
        assert_eq!(Period::parse("après-midi"), Some(Period::Afternoon));
        assert_eq!(Period::parse("night"), None);
        assert!("noon".parse::<Period>().is_err());
    }

    #[test]
    fn test_entry_builder() {
        let e = ScheduleEntry::new(Day::Tuesday, "H1-H2", Period::Afternoon)
            .with_subject("Math")
            .with_teacher("A")
            .with_room("S1")
            .with_subgroup("3A:G1");
        assert_eq!(e.day, "Mardi");
        assert_eq!(e.period, "soir");
        assert_eq!(e.class_name(), "3A");
        assert_eq!(e.group_tag(), Some("G1"));
    }

    #[test]
    fn test_group_tag_absent() {
        let e = ScheduleEntry::new(Day::Monday, "H1", Period::Morning).with_subgroup("3A");
        assert_eq!(e.class_name(), "3A");
        assert_eq!(e.group_tag(), None);

        let blank = ScheduleEntry::new(Day::Monday, "H1", Period::Morning).with_subgroup("3A:");
        assert_eq!(blank.group_tag(), None);
    }

    #[test]
    fn test_entry_wire_names() {
        let json = r#"{"day":"Jeudi","hourId":"H3","period":"soir","subject":"SVT","teacher":"B","room":"Lab","subgroup":"2B"}"#;
        let e: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.hour_range, "H3");
        assert_eq!(e.subgroup, "2B");

        let partial: ScheduleEntry = serde_json::from_str(r#"{"day":"Lundi"}"#).unwrap();
        assert!(partial.subject.is_empty());
    }
}

//! Time axis model.
//!
//! The week is a fixed grid of 6 days × 8 lesson slots. Slots 0..4 are the
//! morning period, slots 4..8 the afternoon period.
//!
//! # Placement
//! An entry's hour range names lesson numbers *within its period*
//! (`H1`..`H4`). Placement adds the period base (0 for morning, 4 for
//! afternoon) and returns the inclusive slot range the entry covers, so a
//! double lesson `H1-H2` in the morning occupies slots 0 and 1.
//!
//! A slot range never crosses the period boundary: indices that fall outside
//! the entry's own period are dropped. An entry left with no slot at all is
//! malformed and is reported as a [`PlacementError`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::OnceLock;

use super::{Day, Period, ScheduleEntry};

/// Number of school days on the axis.
pub const DAY_COUNT: usize = 6;
/// Lesson slots per period.
pub const SLOTS_PER_PERIOD: usize = 4;
/// Lesson slots per day (morning + afternoon).
pub const SLOTS_PER_DAY: usize = 2 * SLOTS_PER_PERIOD;
/// Day/slot positions in one week.
pub const WEEK_SLOTS: usize = DAY_COUNT * SLOTS_PER_DAY;

/// Clock labels of the eight daily slots.
pub const SLOT_LABELS: [&str; SLOTS_PER_DAY] = [
    "08:30 - 09:30",
    "09:30 - 10:30",
    "10:30 - 11:30",
    "11:30 - 12:30",
    "14:30 - 15:30",
    "15:30 - 16:30",
    "16:30 - 17:30",
    "17:30 - 18:30",
];

/// Why an entry could not be placed on the time axis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("unknown day: {0:?}")]
    UnknownDay(String),
    #[error("unknown period: {0:?}")]
    UnknownPeriod(String),
    #[error("unparseable hour range: {0:?}")]
    UnparseableHours(String),
    #[error("hour range {hours:?} has no slot inside the {period} period")]
    OutsidePeriod { hours: String, period: Period },
}

/// A lesson-number range within one period, e.g. `H1-H2` → 1..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    /// First lesson number (1-based).
    pub start: u32,
    /// Last lesson number (inclusive). Equals `start` for single lessons.
    pub end: u32,
}

fn hour_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*[Hh]?(\d+)(?:\s*-\s*[Hh]?(\d+))?\s*$").expect("hour pattern is valid")
    })
}

impl FromStr for HourRange {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || PlacementError::UnparseableHours(s.to_string());
        let caps = hour_pattern().captures(s).ok_or_else(unparseable)?;
        let start: u32 = caps[1].parse().map_err(|_| unparseable())?;
        let end: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| unparseable())?,
            None => start,
        };
        Ok(Self { start, end })
    }
}

/// An inclusive range of slot indices within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    /// First slot index (inclusive).
    pub first: usize,
    /// Last slot index (inclusive).
    pub last: usize,
}

impl SlotRange {
    /// Number of slots covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.last + 1 - self.first
    }

    /// Always false; a placed range covers at least one slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether a slot index lies in this range.
    #[inline]
    pub fn contains(&self, slot: usize) -> bool {
        slot >= self.first && slot <= self.last
    }

    /// Slot indices covered.
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Where an entry lands on the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub day: Day,
    pub period: Period,
    pub slots: SlotRange,
}

/// First slot index of a period.
#[inline]
pub fn period_base(period: Period) -> usize {
    match period {
        Period::Morning => 0,
        Period::Afternoon => SLOTS_PER_PERIOD,
    }
}

/// Period a daily slot index belongs to.
#[inline]
pub fn slot_period(slot: usize) -> Period {
    if slot < SLOTS_PER_PERIOD {
        Period::Morning
    } else {
        Period::Afternoon
    }
}

/// Clock label of a daily slot index.
pub fn slot_label(slot: usize) -> &'static str {
    SLOT_LABELS.get(slot).copied().unwrap_or("")
}

/// Flattened day-major position of a (day, slot) pair, in `0..WEEK_SLOTS`.
#[inline]
pub fn week_index(day: Day, slot: usize) -> usize {
    day.index() * SLOTS_PER_DAY + slot
}

/// Inverse of [`week_index`].
pub fn split_week_index(index: usize) -> Option<(Day, usize)> {
    Day::from_index(index / SLOTS_PER_DAY).map(|day| (day, index % SLOTS_PER_DAY))
}

/// Places an entry on the time axis.
///
/// Returns the entry's day, period and the inclusive slot range
/// `[base + start - 1, base + end - 1]`, clipped to the entry's own period.
///
/// A blank period tag means morning.
///
/// # Errors
/// Unknown day or period, an unparseable hour range, or a range with no
/// slot left inside its period.
pub fn place_entry(entry: &ScheduleEntry) -> Result<Placement, PlacementError> {
    let day = Day::parse(&entry.day).ok_or_else(|| PlacementError::UnknownDay(entry.day.clone()))?;
    // An untagged entry belongs to the morning.
    let period = if entry.period.trim().is_empty() {
        Period::Morning
    } else {
        Period::parse(&entry.period)
            .ok_or_else(|| PlacementError::UnknownPeriod(entry.period.clone()))?
    };
    let hours: HourRange = entry.hour_range.parse()?;

    let base = period_base(period) as i64;
    let lo = base;
    let hi = base + SLOTS_PER_PERIOD as i64 - 1;
    let first = (base + i64::from(hours.start) - 1).max(lo);
    let last = (base + i64::from(hours.end) - 1).min(hi);

    if first > last {
        return Err(PlacementError::OutsidePeriod {
            hours: entry.hour_range.clone(),
            period,
        });
    }

    Ok(Placement {
        day,
        period,
        slots: SlotRange {
            first: first as usize,
            last: last as usize,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: Day, hours: &str, period: Period) -> ScheduleEntry {
        ScheduleEntry::new(day, hours, period)
    }

    #[test]
    fn test_hour_range_parse() {
        assert_eq!("H1".parse::<HourRange>().unwrap(), HourRange { start: 1, end: 1 });
        assert_eq!("H1-H2".parse::<HourRange>().unwrap(), HourRange { start: 1, end: 2 });
        assert_eq!("H2-4".parse::<HourRange>().unwrap(), HourRange { start: 2, end: 4 });
        assert_eq!(" 3 ".parse::<HourRange>().unwrap(), HourRange { start: 3, end: 3 });
        assert!("".parse::<HourRange>().is_err());
        assert!("H1,H2".parse::<HourRange>().is_err());
        assert!("lesson".parse::<HourRange>().is_err());
    }

    #[test]
    fn test_double_lesson_fans_out() {
        let p = place_entry(&entry(Day::Monday, "H1-H2", Period::Morning)).unwrap();
        assert_eq!(p.day, Day::Monday);
        assert_eq!(p.slots, SlotRange { first: 0, last: 1 });
        assert_eq!(p.slots.iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_afternoon_base() {
        let p = place_entry(&entry(Day::Friday, "H3", Period::Afternoon)).unwrap();
        assert_eq!(p.slots, SlotRange { first: 6, last: 6 });
        assert_eq!(p.period, Period::Afternoon);
    }

    #[test]
    fn test_range_clipped_to_period() {
        // H3-H6 in the morning must not spill into the afternoon.
        let p = place_entry(&entry(Day::Monday, "H3-H6", Period::Morning)).unwrap();
        assert_eq!(p.slots, SlotRange { first: 2, last: 3 });

        let p = place_entry(&entry(Day::Monday, "H0-H1", Period::Afternoon)).unwrap();
        assert_eq!(p.slots, SlotRange { first: 4, last: 4 });
    }

    #[test]
    fn test_range_outside_period_rejected() {
        let err = place_entry(&entry(Day::Monday, "H5", Period::Morning)).unwrap_err();
        assert!(matches!(err, PlacementError::OutsidePeriod { .. }));

        // Reversed range is empty.
        let err = place_entry(&entry(Day::Monday, "H3-H1", Period::Morning)).unwrap_err();
        assert!(matches!(err, PlacementError::OutsidePeriod { .. }));
    }

    #[test]
    fn test_malformed_entries() {
        let no_day = ScheduleEntry::raw("", "H1", "matin");
        assert!(matches!(place_entry(&no_day), Err(PlacementError::UnknownDay(_))));

        let bad_period = ScheduleEntry::raw("Lundi", "H1", "noon");
        assert!(matches!(
            place_entry(&bad_period),
            Err(PlacementError::UnknownPeriod(_))
        ));

        let untagged = place_entry(&ScheduleEntry::raw("Lundi", "H2", "  ")).unwrap();
        assert_eq!(untagged.period, Period::Morning);
        assert_eq!(untagged.slots.first, 1);

        let bad_hours = ScheduleEntry::raw("Lundi", "first", "matin");
        assert!(matches!(
            place_entry(&bad_hours),
            Err(PlacementError::UnparseableHours(_))
        ));
    }

    #[test]
    fn test_slot_period_boundary() {
        for slot in 0..SLOTS_PER_DAY {
            let expected = if slot < 4 { Period::Morning } else { Period::Afternoon };
            assert_eq!(slot_period(slot), expected);
        }
        assert_eq!(period_base(Period::Afternoon), 4);
    }

    #[test]
    fn test_week_index_roundtrip() {
        assert_eq!(week_index(Day::Tuesday, 3), 11);
        assert_eq!(split_week_index(11), Some((Day::Tuesday, 3)));
        assert_eq!(split_week_index(WEEK_SLOTS), None);
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(slot_label(0), "08:30 - 09:30");
        assert_eq!(slot_label(4), "14:30 - 15:30");
        assert_eq!(slot_label(8), "");
    }
}

//! Summary tables printed under a schedule.
//!
//! Summaries scan the composed grid rather than the raw source list, so they
//! only mention what the page actually shows. A lesson spanning several
//! slots is counted once per slot.

use std::collections::{BTreeSet, HashMap};

use super::text::normalize_key;
use crate::models::ScheduleEntry;

/// A subject and the teacher who teaches it most often.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubjectTeacher {
    pub subject: String,
    pub teacher: String,
}

/// Per normalized subject, the most frequent normalized teacher.
///
/// Ties go to the teacher seen first. Sorted by subject, then teacher.
pub fn subject_teacher_pairs<'a>(
    entries: impl IntoIterator<Item = &'a ScheduleEntry>,
) -> Vec<SubjectTeacher> {
    let mut subjects: Vec<String> = Vec::new();
    let mut counts: HashMap<String, Vec<(String, usize)>> = HashMap::new();

    for e in entries {
        let subject = normalize_key(&e.subject);
        let teacher = normalize_key(&e.teacher);
        if subject.is_empty() && teacher.is_empty() {
            continue;
        }
        let tally = counts.entry(subject.clone()).or_insert_with(|| {
            subjects.push(subject.clone());
            Vec::new()
        });
        match tally.iter_mut().find(|(t, _)| *t == teacher) {
            Some((_, n)) => *n += 1,
            None => tally.push((teacher, 1)),
        }
    }

    let mut pairs: Vec<SubjectTeacher> = subjects
        .into_iter()
        .map(|subject| {
            let teacher = counts
                .get(&subject)
                .and_then(|tally| {
                    tally
                        .iter()
                        .fold(None::<&(String, usize)>, |best, cur| match best {
                            Some(b) if b.1 >= cur.1 => Some(b),
                            _ => Some(cur),
                        })
                })
                .map(|(t, _)| t.clone())
                .unwrap_or_default();
            SubjectTeacher { subject, teacher }
        })
        .collect();
    pairs.sort();
    pairs
}

/// Lays pairs out `per_row` to a row, padding the last row with `None`.
///
/// Always returns at least one row so the summary table keeps its shape.
pub fn group_pairs(pairs: &[SubjectTeacher], per_row: usize) -> Vec<Vec<Option<SubjectTeacher>>> {
    let per_row = per_row.max(1);
    let mut rows: Vec<Vec<Option<SubjectTeacher>>> = pairs
        .chunks(per_row)
        .map(|chunk| {
            let mut row: Vec<Option<SubjectTeacher>> = chunk.iter().cloned().map(Some).collect();
            row.resize(per_row, None);
            row
        })
        .collect();
    if rows.is_empty() {
        rows.push(vec![None; per_row]);
    }
    rows
}

/// Sorted unique base class names (`"3A:G1"` → `"3A"`).
pub fn teacher_classes<'a>(entries: impl IntoIterator<Item = &'a ScheduleEntry>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.class_name().to_string())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The most frequent normalized subject; first seen wins ties.
pub fn main_subject<'a>(entries: impl IntoIterator<Item = &'a ScheduleEntry>) -> Option<String> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for e in entries {
        let subject = normalize_key(&e.subject);
        if subject.is_empty() {
            continue;
        }
        match tally.iter_mut().find(|(s, _)| *s == subject) {
            Some((_, n)) => *n += 1,
            None => tally.push((subject, 1)),
        }
    }
    let mut best: Option<(String, usize)> = None;
    for (subject, n) in tally {
        if best.as_ref().map_or(true, |(_, m)| n > *m) {
            best = Some((subject, n));
        }
    }
    best.map(|(s, _)| s)
}

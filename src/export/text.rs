//! Text direction and label cleanup.
//!
//! Document sinks without bidi support print Arabic words left to right.
//! [`shape_for_export`] compensates by reversing word order of text that
//! [`classify_direction`] marks as right-to-left. Everything else in the
//! projector goes through the same two functions, so direction is decided in
//! one place.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Reading direction of a piece of text or of a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        self == TextDirection::Rtl
    }
}

/// Arabic and Arabic Supplement blocks.
#[inline]
fn is_arabic(c: char) -> bool {
    matches!(c, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}')
}

/// Right-to-left iff the text contains any Arabic-script character.
pub fn classify_direction(text: &str) -> TextDirection {
    if text.chars().any(is_arabic) {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}

/// Prepares text for a sink that lays glyphs out left to right.
///
/// Each line classified RTL has its words reversed; line order and LTR lines
/// are kept.
pub fn shape_for_export(text: &str) -> String {
    text.split('\n')
        .map(|line| match classify_direction(line) {
            TextDirection::Rtl => line.split_whitespace().rev().collect::<Vec<_>>().join(" "),
            TextDirection::Ltr => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Underscores to spaces, whitespace collapsed.
pub fn clean_label(text: &str) -> String {
    text.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes Arabic diacritics, tatweel and LRM/RLM marks.
pub fn strip_direction_marks(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                c,
                '\u{064B}'..='\u{0652}' | '\u{0670}' | '\u{0640}' | '\u{200E}' | '\u{200F}'
            )
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// `"08:30 - 09:30"` → `"09:30 - 08:30"`. Anything else is returned as is.
pub fn reverse_time_range(label: &str) -> String {
    let parts: Vec<&str> = label.split(" - ").collect();
    match parts.as_slice() {
        [start, end] => format!("{end} - {start}"),
        _ => label.to_string(),
    }
}

fn group_marker() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)[\s:()\-]*G\d+\b").expect("group marker pattern is valid")
    })
}

/// Deduplication key for subjects and teachers.
///
/// Strips group markers (`(G1)`, `:G2`, `-G3`), leftover parentheses and
/// underscores, then collapses whitespace.
pub fn normalize_key(text: &str) -> String {
    let stripped = group_marker().replace_all(text, "");
    clean_label(&stripped.replace(['(', ')'], ""))
}

/// Teacher display name: a trailing `__CODE` suffix is dropped.
pub fn clean_teacher_name(name: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let suffix = PATTERN
        .get_or_init(|| Regex::new(r"__[A-Z0-9]+$").expect("teacher suffix pattern is valid"));
    clean_label(&suffix.replace(name.trim(), ""))
}

//! Input validation for timetable data and export configuration.
//!
//! Checks structural integrity before the data is used. Detects:
//! - Entries that cannot be placed on the time axis (unknown day or period,
//!   unparseable or out-of-period hour ranges)
//! - Out-of-range print settings (margins, padding, logo size)
//! - Malformed colors and school-year strings
//!
//! All issues are collected; validation never stops at the first one.

use crate::config::ExportConfig;
use crate::models::{place_entry, PlacementError, ScheduleEntry};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An entry's day name is not a school day.
    UnknownDay,
    /// An entry's period tag is neither morning nor afternoon.
    UnknownPeriod,
    /// An entry's hour range cannot be read.
    UnparseableHours,
    /// An entry's hour range has no slot inside its period.
    OutsidePeriod,
    /// A numeric setting is outside its allowed range.
    OutOfRange,
    /// A string setting does not have the required shape.
    InvalidFormat,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&PlacementError> for ValidationErrorKind {
    fn from(err: &PlacementError) -> Self {
        match err {
            PlacementError::UnknownDay(_) => ValidationErrorKind::UnknownDay,
            PlacementError::UnknownPeriod(_) => ValidationErrorKind::UnknownPeriod,
            PlacementError::UnparseableHours(_) => ValidationErrorKind::UnparseableHours,
            PlacementError::OutsidePeriod { .. } => ValidationErrorKind::OutsidePeriod,
        }
    }
}

/// Validates that every entry can be placed on the time axis.
///
/// The grid builder drops such entries on its own; this check lets a data
/// source report them up front.
///
/// # Returns
/// `Ok(())` if all entries place, `Err(errors)` with one error per
/// malformed entry (indexed by position).
pub fn validate_entries(entries: &[ScheduleEntry]) -> ValidationResult {
    let errors: Vec<ValidationError> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            place_entry(entry).err().map(|err| {
                ValidationError::new(
                    ValidationErrorKind::from(&err),
                    format!("Entry #{i}: {err}"),
                )
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Maximum margin on any side, in centimetres.
const MAX_MARGIN_CM: f64 = 5.0;
/// Maximum cell padding, in millimetres.
const MAX_CELL_PADDING_MM: f64 = 5.0;

/// Validates an export configuration.
///
/// Checks:
/// 1. Every margin lies in `0..=5` cm
/// 2. Cell padding lies in `0..=5` mm
/// 3. The empty-cell fill is a `#rrggbb` color
/// 4. Logo width and height are positive
/// 5. The school year is empty or shaped `YYYY-YYYY`
pub fn validate_export_config(config: &ExportConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let m = &config.print.margins;
    for (side, value) in [
        ("top", m.top_cm),
        ("right", m.right_cm),
        ("bottom", m.bottom_cm),
        ("left", m.left_cm),
    ] {
        if !(0.0..=MAX_MARGIN_CM).contains(&value) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!("margins.{side}_cm must be within 0..={MAX_MARGIN_CM}, got {value}"),
            ));
        }
    }

    let padding = config.print.cell_padding_mm;
    if !(0.0..=MAX_CELL_PADDING_MM).contains(&padding) {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("cell_padding_mm must be within 0..={MAX_CELL_PADDING_MM}, got {padding}"),
        ));
    }

    if !is_hex_color(&config.print.empty_fill) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidFormat,
            format!(
                "empty_fill must be a #rrggbb color, got {:?}",
                config.print.empty_fill
            ),
        ));
    }

    let school = &config.school;
    if school.logo_width_cm <= 0.0 || school.logo_height_cm <= 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!(
                "logo size must be positive, got {}x{} cm",
                school.logo_width_cm, school.logo_height_cm
            ),
        ));
    }

    if !school.school_year.is_empty() && !is_school_year(&school.school_year) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidFormat,
            format!(
                "school_year must look like 2024-2025, got {:?}",
                school.school_year
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn is_school_year(s: &str) -> bool {
    match s.split_once('-') {
        Some((a, b)) => {
            a.len() == 4
                && b.len() == 4
                && a.chars().all(|c| c.is_ascii_digit())
                && b.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

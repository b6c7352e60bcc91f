//! Export configuration.
//!
//! Print preferences, school identity and display labels, bundled into one
//! [`ExportConfig`] that the exporter receives explicitly at call time.
//!
//! Missing keys take their defaults once, at load time; [`ExportConfig::validate`]
//! checks the result before it is used. The exporter then holds the config as
//! an immutable snapshot for the whole export.
//!
//! # File Format
//! ```toml
//! [print]
//! font_size = "large"
//! enable_colors = false
//! orientation = "landscape"
//!
//! [print.margins]
//! top_cm = 1.0
//!
//! [school]
//! establishment = "Lycée Ibn Sina"
//! school_year = "2025-2026"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::Labels;
use crate::validation::{validate_export_config, ValidationError, ValidationResult};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Page margins in centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top_cm: f64,
    pub right_cm: f64,
    pub bottom_cm: f64,
    pub left_cm: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top_cm: 0.6,
            right_cm: 0.3,
            bottom_cm: 0.6,
            left_cm: 0.6,
        }
    }
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(cm: f64) -> Self {
        Self {
            top_cm: cm,
            right_cm: cm,
            bottom_cm: cm,
            left_cm: cm,
        }
    }

    /// Margins in inches, ordered left, right, top, bottom.
    pub fn to_inches(&self) -> (f64, f64, f64, f64) {
        const CM_PER_INCH: f64 = 2.54;
        (
            self.left_cm / CM_PER_INCH,
            self.right_cm / CM_PER_INCH,
            self.top_cm / CM_PER_INCH,
            self.bottom_cm / CM_PER_INCH,
        )
    }
}

/// Font size tier of exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSizeTier {
    Small,
    #[default]
    Medium,
    Large,
}

/// Point sizes for body and header cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub body: f64,
    pub header: f64,
}

impl FontSizeTier {
    /// Point sizes for this tier.
    pub fn sizes(self) -> FontSizes {
        match self {
            FontSizeTier::Small => FontSizes { body: 6.0, header: 7.0 },
            FontSizeTier::Medium => FontSizes { body: 8.0, header: 9.0 },
            FontSizeTier::Large => FontSizes { body: 10.0, header: 11.0 },
        }
    }
}

/// Paper orientation for single-entity pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// Print preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    pub margins: Margins,
    pub font_size: FontSizeTier,
    /// Tint non-empty cells by subject (or class, in teacher view).
    pub enable_colors: bool,
    /// Fill of empty cells, `#rrggbb`.
    pub empty_fill: String,
    pub orientation: PageOrientation,
    pub thick_borders: bool,
    pub cell_padding_mm: f64,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            font_size: FontSizeTier::default(),
            enable_colors: true,
            empty_fill: "#e0e0e0".to_string(),
            orientation: PageOrientation::default(),
            thick_borders: false,
            cell_padding_mm: 0.3,
        }
    }
}

impl PrintSettings {
    /// Table border width in millimetres.
    pub fn border_width_mm(&self) -> f64 {
        if self.thick_borders {
            0.5
        } else {
            0.1
        }
    }
}

/// School identity printed in page headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolIdentity {
    pub academy: String,
    pub direction: String,
    pub establishment: String,
    /// Logo image file. A missing or unreadable file is skipped at export.
    pub logo: Option<PathBuf>,
    pub logo_width_cm: f64,
    pub logo_height_cm: f64,
    pub school_year: String,
}

impl Default for SchoolIdentity {
    fn default() -> Self {
        Self {
            academy: String::new(),
            direction: String::new(),
            establishment: String::new(),
            logo: None,
            logo_width_cm: 11.0,
            logo_height_cm: 2.0,
            school_year: "2024-2025".to_string(),
        }
    }
}

/// Everything the exporter reads from the outside world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub print: PrintSettings,
    pub school: SchoolIdentity,
    pub labels: Labels,
}

impl ExportConfig {
    /// Parses a TOML document, filling missing keys with defaults, and
    /// validates the result.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ExportConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges and formats.
    pub fn validate(&self) -> ValidationResult {
        validate_export_config(self)
    }
}

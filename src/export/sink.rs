//! Document sink abstraction.
//!
//! The exporter writes pages as a sequence of text runs, images and tables.
//! How they turn into bytes is up to the sink: [`MemorySink`] records them,
//! [`XlsxSink`](super::XlsxSink) writes a workbook.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::projector::ExportTable;
use crate::config::{FontSizes, Margins, PageOrientation};

/// Errors raised by a document sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("no page is open")]
    NoOpenPage,
    #[error("image {path} unavailable: {message}")]
    Image { path: PathBuf, message: String },
    #[error("document write failed: {0}")]
    Write(String),
}

/// Paper format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
}

/// Setup of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Page name; worksheet name in workbook sinks.
    pub name: String,
    pub paper: PaperSize,
    pub orientation: PageOrientation,
    pub margins: Margins,
}

/// Horizontal placement of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A line of text above or below a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub size: f64,
    pub bold: bool,
    pub align: Align,
}

/// Table appearance shared by every table of an export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub fonts: FontSizes,
    pub border_mm: f64,
    pub padding_mm: f64,
}

/// Receives exported pages.
pub trait DocumentSink {
    fn begin_page(&mut self, setup: &PageSetup) -> Result<(), SinkError>;

    fn write_text(&mut self, run: &TextRun) -> Result<(), SinkError>;

    /// Places an image. Failure leaves the page usable.
    fn write_image(&mut self, path: &Path, width_cm: f64, height_cm: f64)
        -> Result<(), SinkError>;

    fn write_table(&mut self, table: &ExportTable, style: &TableStyle) -> Result<(), SinkError>;

    fn end_page(&mut self) -> Result<(), SinkError>;
}

/// Content of one recorded page.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPage {
    pub setup: PageSetup,
    pub texts: Vec<TextRun>,
    pub images: Vec<PathBuf>,
    pub tables: Vec<ExportTable>,
    pub closed: bool,
}

/// Sink that keeps pages in memory.
///
/// Images are accepted only if the file exists.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pages: Vec<RecordedPage>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    fn open_page(&mut self) -> Result<&mut RecordedPage, SinkError> {
        match self.pages.last_mut() {
            Some(page) if !page.closed => Ok(page),
            _ => Err(SinkError::NoOpenPage),
        }
    }
}

impl DocumentSink for MemorySink {
    fn begin_page(&mut self, setup: &PageSetup) -> Result<(), SinkError> {
        self.pages.push(RecordedPage {
            setup: setup.clone(),
            texts: Vec::new(),
            images: Vec::new(),
            tables: Vec::new(),
            closed: false,
        });
        Ok(())
    }

    fn write_text(&mut self, run: &TextRun) -> Result<(), SinkError> {
        self.open_page()?.texts.push(run.clone());
        Ok(())
    }

    fn write_image(
        &mut self,
        path: &Path,
        _width_cm: f64,
        _height_cm: f64,
    ) -> Result<(), SinkError> {
        let page = self.open_page()?;
        if !path.is_file() {
            return Err(SinkError::Image {
                path: path.to_path_buf(),
                message: "file not found".into(),
            });
        }
        page.images.push(path.to_path_buf());
        Ok(())
    }

    fn write_table(&mut self, table: &ExportTable, _style: &TableStyle) -> Result<(), SinkError> {
        self.open_page()?.tables.push(table.clone());
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), SinkError> {
        self.open_page()?.closed = true;
        Ok(())
    }
}

//! Workbook sink.
//!
//! Each page becomes one worksheet. Text runs and the logo stack above the
//! table, spans become merged ranges, and the page setup carries paper size,
//! orientation and margins into the print settings of the sheet.

use log::debug;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Image, Workbook, XlsxError};
use std::collections::BTreeSet;
use std::path::Path;

use super::projector::{CellRole, ExportCell, ExportTable};
use super::sink::{Align, DocumentSink, PageSetup, PaperSize, SinkError, TableStyle, TextRun};
use crate::config::PageOrientation;

const SHEET_NAME_MAX: usize = 31;
/// Default row height in pixels.
const ROW_HEIGHT_PX: f64 = 20.0;
const PX_PER_CM: f64 = 96.0 / 2.54;

fn xlsx_error(err: XlsxError) -> SinkError {
    SinkError::Write(format!("xlsx write error: {err}"))
}

fn cast_row(value: usize) -> Result<u32, SinkError> {
    u32::try_from(value).map_err(|_| SinkError::Write(format!("row index overflow: {value}")))
}

fn cast_col(value: usize) -> Result<u16, SinkError> {
    u16::try_from(value).map_err(|_| SinkError::Write(format!("column index overflow: {value}")))
}

/// Excel forbids `[]:*?/\` in sheet names and caps them at 31 characters.
fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '_' } else { c })
        .take(SHEET_NAME_MAX)
        .collect();
    let trimmed = cleaned.trim_matches('\'').trim();
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed.to_string()
    }
}

/// [`DocumentSink`] writing an `.xlsx` workbook.
pub struct XlsxSink {
    workbook: Workbook,
    sheet_names: BTreeSet<String>,
    sheet: Option<usize>,
    sheet_count: usize,
    cursor: usize,
}

impl Default for XlsxSink {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxSink {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            sheet_names: BTreeSet::new(),
            sheet: None,
            sheet_count: 0,
            cursor: 0,
        }
    }

    /// Number of worksheets written so far.
    pub fn page_count(&self) -> usize {
        self.sheet_count
    }

    /// Writes the workbook to a file.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SinkError> {
        self.workbook.save(path.as_ref()).map_err(xlsx_error)
    }

    /// Serializes the workbook to memory.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, SinkError> {
        self.workbook.save_to_buffer().map_err(xlsx_error)
    }

    /// Sheet names compare case-insensitively in Excel.
    fn unique_sheet_name(&mut self, name: &str) -> String {
        let base = sanitize_sheet_name(name);
        if self.sheet_names.insert(base.to_lowercase()) {
            return base;
        }
        let mut n = 2usize;
        loop {
            let suffix = format!("__{n}");
            let stem: String = base
                .chars()
                .take(SHEET_NAME_MAX - suffix.chars().count())
                .collect();
            let candidate = format!("{stem}{suffix}");
            if self.sheet_names.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn worksheet(&mut self) -> Result<&mut rust_xlsxwriter::Worksheet, SinkError> {
        let index = self.sheet.ok_or(SinkError::NoOpenPage)?;
        self.workbook
            .worksheet_from_index(index)
            .map_err(xlsx_error)
    }
}

fn cell_format(cell: &ExportCell, style: &TableStyle) -> Format {
    let border = if style.border_mm >= 0.5 {
        FormatBorder::Medium
    } else {
        FormatBorder::Thin
    };
    let format = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(border);
    match &cell.role {
        CellRole::Header => format.set_bold().set_font_size(style.fonts.header),
        CellRole::Label => format.set_bold().set_font_size(style.fonts.body),
        CellRole::Body(fill) => format
            .set_font_size(style.fonts.body)
            .set_background_color(fill.fill()),
    }
}

impl DocumentSink for XlsxSink {
    fn begin_page(&mut self, setup: &PageSetup) -> Result<(), SinkError> {
        let name = self.unique_sheet_name(&setup.name);
        let (left, right, top, bottom) = setup.margins.to_inches();

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&name).map_err(xlsx_error)?;
        worksheet.set_paper_size(match setup.paper {
            PaperSize::A4 => 9,
            PaperSize::A3 => 8,
        });
        match setup.orientation {
            PageOrientation::Landscape => worksheet.set_landscape(),
            PageOrientation::Portrait => worksheet.set_portrait(),
        };
        worksheet.set_margins(left, right, top, bottom, 0.3, 0.3);

        self.sheet = Some(self.sheet_count);
        self.sheet_count += 1;
        self.cursor = 0;
        debug!("xlsx page {name}");
        Ok(())
    }

    fn write_text(&mut self, run: &TextRun) -> Result<(), SinkError> {
        let row = cast_row(self.cursor)?;
        let mut format = Format::new().set_font_size(run.size).set_align(match run.align {
            Align::Left => FormatAlign::Left,
            Align::Center => FormatAlign::Center,
            Align::Right => FormatAlign::Right,
        });
        if run.bold {
            format = format.set_bold();
        }
        self.worksheet()?
            .write_string_with_format(row, 0, &run.text, &format)
            .map_err(xlsx_error)?;
        self.cursor += 1;
        Ok(())
    }

    fn write_image(
        &mut self,
        path: &Path,
        width_cm: f64,
        height_cm: f64,
    ) -> Result<(), SinkError> {
        let row = cast_row(self.cursor)?;
        let image = Image::new(path)
            .map_err(|e| SinkError::Image {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .set_scale_to_size(width_cm * PX_PER_CM, height_cm * PX_PER_CM, true);
        self.worksheet()?
            .insert_image(row, 0, &image)
            .map_err(xlsx_error)?;
        self.cursor += (height_cm * PX_PER_CM / ROW_HEIGHT_PX).ceil() as usize;
        Ok(())
    }

    fn write_table(&mut self, table: &ExportTable, style: &TableStyle) -> Result<(), SinkError> {
        let origin = self.cursor;
        let placed = table.place();
        let worksheet = self.worksheet()?;

        let mut last_row = origin;
        for p in &placed {
            let format = cell_format(p.cell, style);
            let first_row = cast_row(origin + p.row)?;
            let first_col = cast_col(p.col)?;
            let end_row = origin + p.row + p.cell.row_span - 1;
            last_row = last_row.max(end_row + 1);

            if p.cell.col_span > 1 || p.cell.row_span > 1 {
                worksheet
                    .merge_range(
                        first_row,
                        first_col,
                        cast_row(end_row)?,
                        cast_col(p.col + p.cell.col_span - 1)?,
                        &p.cell.text,
                        &format,
                    )
                    .map_err(xlsx_error)?;
            } else if p.cell.text.is_empty() {
                worksheet
                    .write_blank(first_row, first_col, &format)
                    .map_err(xlsx_error)?;
            } else {
                worksheet
                    .write_string_with_format(first_row, first_col, &p.cell.text, &format)
                    .map_err(xlsx_error)?;
            }
        }

        // One blank row between consecutive blocks.
        self.cursor = last_row + 1;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), SinkError> {
        self.sheet.take().ok_or(SinkError::NoOpenPage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FontSizes, Margins};
    use crate::export::style::CellStyle;

    fn setup(name: &str) -> PageSetup {
        PageSetup {
            name: name.into(),
            paper: PaperSize::A3,
            orientation: PageOrientation::Landscape,
            margins: Margins::default(),
        }
    }

    fn table_style() -> TableStyle {
        TableStyle {
            fonts: FontSizes {
                body: 8.0,
                header: 9.0,
            },
            border_mm: 0.1,
            padding_mm: 0.3,
        }
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("3A:G1 [lab]"), "3A_G1 _lab_");
        assert_eq!(sanitize_sheet_name(""), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).chars().count(), 31);
    }

    #[test]
    fn test_unique_sheet_names() {
        let mut sink = XlsxSink::new();
        assert_eq!(sink.unique_sheet_name("A"), "A");
        assert_eq!(sink.unique_sheet_name("A"), "A__2");
        assert_eq!(sink.unique_sheet_name("A"), "A__3");
    }

    #[test]
    fn test_sheet_names_ignore_case() {
        let mut sink = XlsxSink::new();
        assert_eq!(sink.unique_sheet_name("3a"), "3a");
        assert_eq!(sink.unique_sheet_name("3A"), "3A__2");
        assert_eq!(sink.unique_sheet_name("3a__2"), "3a__2__2");

        for name in ["3a", "3A"] {
            sink.begin_page(&setup(name)).unwrap();
            sink.end_page().unwrap();
        }
        assert!(sink.save_to_buffer().unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_long_names_keep_suffix_within_limit() {
        let mut sink = XlsxSink::new();
        let long = "x".repeat(40);
        for _ in 0..120 {
            let name = sink.unique_sheet_name(&long);
            assert!(name.chars().count() <= SHEET_NAME_MAX, "{name}");
        }
        assert!(sink.sheet_names.contains(&format!("{}__120", "x".repeat(26))));
    }

    #[test]
    fn test_writes_workbook_with_merges() {
        let table = ExportTable {
            headers: vec![vec![
                ExportCell::header("Jour / Heure"),
                ExportCell::header("08:30 - 09:30"),
                ExportCell::header("09:30 - 10:30"),
            ]],
            rows: vec![vec![
                ExportCell::label("Lundi"),
                ExportCell::body("Math", CellStyle::Plain).with_col_span(2),
            ]],
        };

        let mut sink = XlsxSink::new();
        sink.begin_page(&setup("Alami")).unwrap();
        sink.write_text(&TextRun {
            text: "Emploi du temps".into(),
            size: 12.0,
            bold: true,
            align: Align::Center,
        })
        .unwrap();
        sink.write_table(&table, &table_style()).unwrap();
        sink.end_page().unwrap();

        sink.begin_page(&setup("Alami")).unwrap();
        sink.end_page().unwrap();

        assert_eq!(sink.page_count(), 2);
        let bytes = sink.save_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_missing_logo_is_an_image_error() {
        let mut sink = XlsxSink::new();
        sink.begin_page(&setup("p")).unwrap();
        let err = sink
            .write_image(Path::new("/nonexistent/logo.png"), 11.0, 2.0)
            .unwrap_err();
        assert!(matches!(err, SinkError::Image { .. }));
        assert!(sink.end_page().is_ok());
    }

    #[test]
    fn test_write_without_page() {
        let mut sink = XlsxSink::new();
        let err = sink.write_table(&ExportTable::default(), &table_style());
        assert!(matches!(err, Err(SinkError::NoOpenPage)));
    }
}

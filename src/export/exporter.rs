//! Page composition and export runs.
//!
//! An [`Exporter`] holds a validated configuration snapshot and turns fetched
//! entries into pages on a [`DocumentSink`]:
//!
//! 1. school identity line
//! 2. title line (view prefix, entity name, main subject for teachers)
//! 3. school-year line
//! 4. logo, when configured and readable
//! 5. the schedule table
//! 6. a summary table (classes of a teacher, subject/teacher pairs of a class)
//!
//! # Failures
//! A single-entity export surfaces a source failure as an error. "Export all"
//! keeps going: the failing entity gets a page built from an empty grid and
//! the failure is listed in the [`ExportReport`]. The all-teachers export is
//! all or nothing.

use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use super::projector::{project_for_export, project_global, ExportCell, ExportTable};
use super::sink::{Align, DocumentSink, PageSetup, PaperSize, SinkError, TableStyle, TextRun};
use super::style::CellStyle;
use super::summary::{group_pairs, main_subject, subject_teacher_pairs, teacher_classes};
use super::text::{clean_label, clean_teacher_name, TextDirection};
use crate::config::{ExportConfig, PageOrientation};
use crate::grid::{build_grid, compose_spans, fetch_global_aggregate, Grid};
use crate::models::{Axis, EntityKind, Orientation, ScheduleEntry, ViewMode};
use crate::source::{ScheduleSource, SourceError};
use crate::validation::ValidationError;

/// Subject/teacher pairs per summary row.
const PAIRS_PER_ROW: usize = 3;

/// Errors raised by an export run.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export: no {0} found")]
    NothingToExport(EntityKind),
    #[error("data source failed: {0}")]
    Source(#[from] SourceError),
    #[error("document sink failed: {0}")]
    Sink(#[from] SinkError),
    #[error("invalid export configuration ({} issues)", .0.len())]
    InvalidConfig(Vec<ValidationError>),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Outcome of an "export all" run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Pages written, failed entities included.
    pub pages: usize,
    /// Entities whose entries could not be fetched.
    pub failures: Vec<(String, SourceError)>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// What one page shows.
struct Page {
    name: String,
    title: String,
    paper: PaperSize,
    orientation: PageOrientation,
    table: ExportTable,
    summary: Option<ExportTable>,
}

/// Writes schedule pages with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: Arc<ExportConfig>,
    settle: Option<Duration>,
}

impl Exporter {
    /// Validates `config` and freezes it for every later export.
    pub fn new(config: ExportConfig) -> ExportResult<Self> {
        Self::from_shared(Arc::new(config))
    }

    /// Same as [`Exporter::new`] for an already shared snapshot.
    pub fn from_shared(config: Arc<ExportConfig>) -> ExportResult<Self> {
        config.validate().map_err(ExportError::InvalidConfig)?;
        Ok(Self {
            config,
            settle: None,
        })
    }

    /// Pause between pages of an "export all" run.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle = Some(delay);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    fn direction(&self) -> TextDirection {
        self.config.labels.direction
    }

    /// Exports one teacher, class or room.
    pub async fn export_entity(
        &self,
        source: &dyn ScheduleSource,
        kind: EntityKind,
        key: &str,
        sink: &mut dyn DocumentSink,
    ) -> ExportResult<()> {
        let entries = source
            .list_entries_for(kind, key)
            .await
            .inspect_err(|err| warn!("export {kind} {key}: fetch failed: {err}"))?;
        let page = self.entity_page(kind, key, &entries);
        self.write_page(&page, sink)?;
        info!("exported {kind} {key}");
        Ok(())
    }

    /// Exports every entity of `kind`, one page each, in list order.
    ///
    /// # Returns
    /// * `Ok(report)` - every page was written; fetch failures are in the report
    /// * `Err(ExportError::NothingToExport)` - the entity list is empty
    /// * `Err(ExportError)` - the entity list could not be fetched or the sink failed
    pub async fn export_all(
        &self,
        source: &dyn ScheduleSource,
        kind: EntityKind,
        sink: &mut dyn DocumentSink,
    ) -> ExportResult<ExportReport> {
        let keys = source.list_entities(kind).await?;
        if keys.is_empty() {
            return Err(ExportError::NothingToExport(kind));
        }

        let mut report = ExportReport::default();
        for (i, key) in keys.iter().enumerate() {
            let entries = match source.list_entries_for(kind, key).await {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("export {kind} {key}: fetch failed, writing an empty page: {err}");
                    report.failures.push((key.clone(), err));
                    Vec::new()
                }
            };
            let page = self.entity_page(kind, key, &entries);
            self.write_page(&page, sink)?;
            report.pages += 1;
            info!("exported {kind} {key} ({}/{})", i + 1, keys.len());

            if let Some(delay) = self.settle {
                if i + 1 < keys.len() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
        Ok(report)
    }

    /// Exports the free-room grid.
    pub async fn export_vacant(
        &self,
        source: &dyn ScheduleSource,
        sink: &mut dyn DocumentSink,
    ) -> ExportResult<()> {
        let entries = source
            .list_vacant_slots()
            .await
            .inspect_err(|err| warn!("export vacant rooms: fetch failed: {err}"))?;
        let mode = ViewMode::Vacant;
        let grid = build_grid(&entries, mode);
        let labels = &self.config.labels;
        let page = Page {
            name: labels.vacant_title.clone(),
            title: join_parts(&[labels.schedule_title.as_str(), labels.vacant_title.as_str()]),
            paper: PaperSize::A4,
            orientation: self.config.print.orientation,
            table: self.grid_table(&grid, mode),
            summary: None,
        };
        self.write_page(&page, sink)?;
        info!("exported vacant rooms");
        Ok(())
    }

    /// Exports all teachers on one A3 landscape page.
    ///
    /// Nothing is written unless every teacher's entries were fetched.
    pub async fn export_global(
        &self,
        source: &dyn ScheduleSource,
        orientation: Orientation,
        sink: &mut dyn DocumentSink,
    ) -> ExportResult<()> {
        let grid = fetch_global_aggregate(source, orientation)
            .await
            .inspect_err(|err| warn!("export global grid: fetch failed: {err}"))?;
        let labels = &self.config.labels;
        let page = Page {
            name: labels.global_title.clone(),
            title: labels.global_title.clone(),
            paper: PaperSize::A3,
            orientation: PageOrientation::Landscape,
            table: project_global(&grid, self.direction(), &self.config),
            summary: None,
        };
        self.write_page(&page, sink)?;
        info!(
            "exported global grid {:?} ({} teachers)",
            orientation,
            grid.teachers().len()
        );
        Ok(())
    }

    fn grid_table(&self, grid: &Grid, mode: ViewMode) -> ExportTable {
        let composed = compose_spans(grid, Axis::Horizontal, mode);
        project_for_export(
            &composed,
            Axis::Horizontal,
            self.direction(),
            mode,
            &self.config,
        )
    }

    fn entity_page(&self, kind: EntityKind, key: &str, entries: &[ScheduleEntry]) -> Page {
        let mode = kind.view_mode();
        let grid = build_grid(entries, mode);
        let labels = &self.config.labels;

        let (title, summary) = match kind {
            EntityKind::Teacher => {
                let prof = main_subject(grid.entries())
                    .map(|subject| format!("{} {subject}", labels.teacher_prefix))
                    .unwrap_or_default();
                let title = join_parts(&[
                    labels.schedule_title.as_str(),
                    clean_teacher_name(key).as_str(),
                    prof.as_str(),
                ]);
                (title, Some(self.classes_summary(&grid)))
            }
            EntityKind::Subgroup => {
                let title = join_parts(&[labels.schedule_title.as_str(), key.trim()]);
                (title, Some(self.pairs_summary(&grid)))
            }
            EntityKind::Room => {
                let room = format!("{} {}", labels.room_prefix, key.trim());
                (join_parts(&[labels.schedule_title.as_str(), room.as_str()]), None)
            }
        };

        Page {
            name: key.to_string(),
            title,
            paper: PaperSize::A4,
            orientation: self.config.print.orientation,
            table: self.grid_table(&grid, mode),
            summary,
        }
    }

    fn classes_summary(&self, grid: &Grid) -> ExportTable {
        let classes = teacher_classes(grid.entries());
        let table = ExportTable {
            headers: vec![vec![ExportCell::header(&self.config.labels.classes)]],
            rows: vec![vec![ExportCell::body(classes.join(", "), CellStyle::Plain)]],
        };
        self.directed(table)
    }

    fn pairs_summary(&self, grid: &Grid) -> ExportTable {
        let labels = &self.config.labels;
        let pairs = subject_teacher_pairs(grid.entries());

        let header = (0..PAIRS_PER_ROW)
            .flat_map(|_| {
                [
                    ExportCell::header(&labels.subject),
                    ExportCell::header(&labels.teacher),
                ]
            })
            .collect();
        let rows = group_pairs(&pairs, PAIRS_PER_ROW)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .flat_map(|pair| {
                        let (subject, teacher) = pair
                            .map(|p| (p.subject, p.teacher))
                            .unwrap_or_default();
                        [
                            ExportCell::body(subject, CellStyle::Plain),
                            ExportCell::body(teacher, CellStyle::Plain),
                        ]
                    })
                    .collect()
            })
            .collect();

        self.directed(ExportTable {
            headers: vec![header],
            rows,
        })
    }

    fn directed(&self, table: ExportTable) -> ExportTable {
        match self.direction() {
            TextDirection::Rtl => table.mirror(),
            TextDirection::Ltr => table,
        }
    }

    fn write_page(&self, page: &Page, sink: &mut dyn DocumentSink) -> ExportResult<()> {
        let print = &self.config.print;
        let school = &self.config.school;
        let labels = &self.config.labels;

        sink.begin_page(&PageSetup {
            name: page.name.clone(),
            paper: page.paper,
            orientation: page.orientation,
            margins: print.margins.clone(),
        })?;

        let identity: Vec<String> = [&school.academy, &school.direction, &school.establishment]
            .into_iter()
            .map(|part| clean_label(part))
            .collect();
        let identity: Vec<&str> = identity.iter().map(String::as_str).collect();
        let identity = join_parts(&identity);
        if !identity.is_empty() {
            sink.write_text(&text_run(identity, 10.0, false))?;
        }
        sink.write_text(&text_run(page.title.clone(), 12.0, true))?;
        let year = format!("{} {}", labels.school_year, clean_label(&school.school_year));
        sink.write_text(&text_run(year, 10.0, false))?;

        if let Some(logo) = &school.logo {
            match sink.write_image(logo, school.logo_width_cm, school.logo_height_cm) {
                Ok(()) => {}
                Err(err @ SinkError::Image { .. }) => {
                    warn!("page {}: logo skipped: {err}", page.name);
                }
                Err(err) => return Err(err.into()),
            }
        }

        let style = TableStyle {
            fonts: print.font_size.sizes(),
            border_mm: print.border_width_mm(),
            padding_mm: print.cell_padding_mm,
        };
        sink.write_table(&page.table, &style)?;
        if let Some(summary) = &page.summary {
            sink.write_table(summary, &style)?;
        }
        sink.end_page()?;
        Ok(())
    }
}

fn text_run(text: String, size: f64, bold: bool) -> TextRun {
    TextRun {
        text,
        size,
        bold,
        align: Align::Center,
    }
}

/// Joins the non-blank parts with `" - "`.
fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

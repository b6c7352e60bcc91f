//! Displayed-state session.
//!
//! A [`ViewSession`] owns the data source and what is currently on screen.
//! Every [`ViewSession::show`] call takes a ticket before fetching; when the
//! build finishes it is committed only if no newer ticket was issued in the
//! meantime. A slow fetch for an old selection can therefore never overwrite
//! the result of a newer one.
//!
//! # Failures
//! - Entity and vacant views: the fetch error is committed together with an
//!   empty grid, so stale content never stays on screen.
//! - All-teachers view: no grid is committed, only the error.

use log::{debug, warn};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::grid::{
    build_grid, compose_spans, fetch_global_aggregate, GlobalAggregateGrid, Grid, SpanCell,
};
use crate::models::{Axis, EntityKind, Orientation, ScheduleEntry, ViewMode};
use crate::source::{ScheduleSource, SourceError, SourceResult};

/// What the user asked to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Teacher(String),
    Subgroup(String),
    Room(String),
    Vacant,
    Global(Orientation),
}

impl Selection {
    pub fn view_mode(&self) -> ViewMode {
        match self {
            Selection::Teacher(_) => ViewMode::Teacher,
            Selection::Subgroup(_) => ViewMode::Subgroup,
            Selection::Room(_) => ViewMode::Room,
            Selection::Vacant => ViewMode::Vacant,
            Selection::Global(_) => ViewMode::Global,
        }
    }
}

/// A composed view ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayedView {
    /// One entity or the vacant-room grid.
    Grid {
        grid: Grid,
        spans: Vec<Vec<SpanCell>>,
    },
    /// All teachers.
    Global(GlobalAggregateGrid),
}

/// The committed display state.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    /// Ticket of the build that produced this state; 0 before the first commit.
    pub ticket: u64,
    pub selection: Option<Selection>,
    pub view: Option<DisplayedView>,
    /// Fetch failure of the committed build.
    pub error: Option<SourceError>,
}

/// Last-write-wins holder of the displayed grid.
pub struct ViewSession {
    source: Arc<dyn ScheduleSource>,
    axis: Axis,
    generation: AtomicU64,
    state: RwLock<DisplayState>,
}

impl ViewSession {
    pub fn new(source: Arc<dyn ScheduleSource>) -> Self {
        Self {
            source,
            axis: Axis::Horizontal,
            generation: AtomicU64::new(0),
            state: RwLock::new(DisplayState::default()),
        }
    }

    /// Merge axis of single-entity grids.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Snapshot of the displayed state.
    pub fn state(&self) -> DisplayState {
        self.state.read().clone()
    }

    /// Ticket of the most recent request.
    pub fn latest_ticket(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetches, builds and composes `selection`, then commits it unless a
    /// newer request was made meanwhile.
    ///
    /// # Returns
    /// `true` if the result was committed, `false` if it was discarded as stale.
    pub async fn show(&self, selection: Selection) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("build #{ticket}: {selection:?}");

        let next = match &selection {
            Selection::Global(orientation) => {
                match fetch_global_aggregate(self.source.as_ref(), *orientation).await {
                    Ok(grid) => DisplayState {
                        ticket,
                        selection: Some(selection.clone()),
                        view: Some(DisplayedView::Global(grid)),
                        error: None,
                    },
                    Err(err) => {
                        warn!("build #{ticket}: all-teachers fetch failed: {err}");
                        DisplayState {
                            ticket,
                            selection: Some(selection.clone()),
                            view: None,
                            error: Some(err),
                        }
                    }
                }
            }
            _ => {
                let mode = selection.view_mode();
                let (entries, error) = match self.fetch(&selection).await {
                    Ok(entries) => (entries, None),
                    Err(err) => {
                        warn!("build #{ticket}: fetch failed, showing an empty grid: {err}");
                        (Vec::new(), Some(err))
                    }
                };
                let grid = build_grid(&entries, mode);
                let spans = compose_spans(&grid, self.axis, mode);
                DisplayState {
                    ticket,
                    selection: Some(selection.clone()),
                    view: Some(DisplayedView::Grid { grid, spans }),
                    error,
                }
            }
        };

        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != ticket {
            warn!("build #{ticket} discarded: a newer build was requested");
            return false;
        }
        *state = next;
        true
    }

    async fn fetch(&self, selection: &Selection) -> SourceResult<Vec<ScheduleEntry>> {
        let source = self.source.as_ref();
        match selection {
            Selection::Teacher(key) => source.list_entries_for(EntityKind::Teacher, key).await,
            Selection::Subgroup(key) => source.list_entries_for(EntityKind::Subgroup, key).await,
            Selection::Room(key) => source.list_entries_for(EntityKind::Room, key).await,
            Selection::Vacant => source.list_vacant_slots().await,
            Selection::Global(_) => Ok(Vec::new()),
        }
    }
}

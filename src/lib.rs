//! Weekly timetable grid compositor.
//!
//! Places resolved lesson entries on a fixed day × slot axis, merges
//! identical neighbouring cells into spans and projects the result to
//! paginated tables. Fetching and rendering stay outside the crate, behind
//! the [`source::ScheduleSource`] and [`export::DocumentSink`] traits.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ScheduleEntry`, `Day`, `Period`, the
//!   48-slot time axis, view modes and orientations
//! - **`grid`**: Entry classifier, grid builder, span compositor and the
//!   all-teachers aggregator
//! - **`export`**: Export projector, page composition, summary tables,
//!   memory and workbook sinks
//! - **`source`**: Data-source trait and an in-memory implementation
//! - **`session`**: Last-write-wins displayed state
//! - **`config`**: Print settings, school identity and labels from TOML
//! - **`validation`**: Entry and configuration integrity checks
//!
//! # Pipeline
//!
//! ```text
//! entries ─▶ build_grid ─▶ compose_spans ─▶ project_for_export ─▶ DocumentSink
//!                 ▲                                    ▲
//!          place_entry (time axis)         ExportConfig (snapshot)
//! ```
//!
//! The compositor is synchronous and pure; suspension points exist only at
//! the data-source boundary.

pub mod config;
pub mod export;
pub mod grid;
pub mod models;
pub mod session;
pub mod source;
pub mod validation;

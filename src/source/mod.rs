//! Schedule data source.
//!
//! The compositor never fetches anything itself. Entry lists come from a
//! [`ScheduleSource`], usually a thin client over the timetable backend;
//! [`InMemorySource`] serves snapshots and tests.

mod error;
mod memory;

pub use error::{SourceError, SourceResult};
pub use memory::InMemorySource;

use async_trait::async_trait;

use crate::models::{EntityKind, ScheduleEntry};

/// Read-only access to resolved schedule entries.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; the aggregator issues one fetch
/// per teacher concurrently.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Entries of one teacher, subgroup or room.
    ///
    /// # Returns
    /// * `Ok(entries)` - possibly empty
    /// * `Err(SourceError::NotFound)` - unknown key
    /// * `Err(SourceError)` - the source could not answer
    async fn list_entries_for(&self, kind: EntityKind, key: &str)
        -> SourceResult<Vec<ScheduleEntry>>;

    /// Names of every entity of a kind, in display order.
    async fn list_entities(&self, kind: EntityKind) -> SourceResult<Vec<String>>;

    /// Free rooms per slot; the room name travels in the subgroup field.
    async fn list_vacant_slots(&self) -> SourceResult<Vec<ScheduleEntry>>;
}

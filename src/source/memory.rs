//! In-memory schedule source.
//!
//! Holds a snapshot of entity lists and entries, loadable from JSON. Tests
//! use the failure and latency knobs to simulate an unreliable backend.
//!
//! # Snapshot Format
//! ```json
//! {
//!   "teachers": [{ "name": "A", "entries": [{ "day": "Lundi", "hourId": "H1", ... }] }],
//!   "subgroups": [],
//!   "rooms": [],
//!   "vacant": []
//! }
//! ```

use async_trait::async_trait;
use log::warn;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use super::{ScheduleSource, SourceError, SourceResult};
use crate::models::{EntityKind, ScheduleEntry};
use crate::validation::validate_entries;

/// One entity and its entries in a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    teachers: Vec<EntitySnapshot>,
    #[serde(default)]
    subgroups: Vec<EntitySnapshot>,
    #[serde(default)]
    rooms: Vec<EntitySnapshot>,
    #[serde(default)]
    vacant: Vec<ScheduleEntry>,
}

#[derive(Default)]
struct MemoryData {
    order: HashMap<EntityKind, Vec<String>>,
    entries: HashMap<(EntityKind, String), Vec<ScheduleEntry>>,
    vacant: Vec<ScheduleEntry>,
    failing: HashSet<(EntityKind, String)>,
    latency: HashMap<(EntityKind, String), Duration>,
    unreachable: bool,
}

/// In-memory [`ScheduleSource`].
///
/// Cloning shares the underlying data.
#[derive(Clone, Default)]
pub struct InMemorySource {
    data: Arc<RwLock<MemoryData>>,
}

impl InMemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON snapshot.
    ///
    /// Entries that cannot be placed on the time axis are kept (the grid
    /// builder drops them) but logged here.
    pub fn from_json_str(json: &str) -> SourceResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let source = Self::new();

        for (kind, list) in [
            (EntityKind::Teacher, snapshot.teachers),
            (EntityKind::Subgroup, snapshot.subgroups),
            (EntityKind::Room, snapshot.rooms),
        ] {
            for entity in list {
                if let Err(errors) = validate_entries(&entity.entries) {
                    for e in errors {
                        warn!("{kind} {}: {}", entity.name, e.message);
                    }
                }
                source.insert(kind, entity.name, entity.entries);
            }
        }
        source.set_vacant(snapshot.vacant);
        Ok(source)
    }

    /// Adds or replaces one entity's entries. New names are appended to the
    /// entity list.
    pub fn insert(&self, kind: EntityKind, name: impl Into<String>, entries: Vec<ScheduleEntry>) {
        let name = name.into();
        let mut data = self.data.write();
        let order = data.order.entry(kind).or_default();
        if !order.contains(&name) {
            order.push(name.clone());
        }
        data.entries.insert((kind, name), entries);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_entity(
        self,
        kind: EntityKind,
        name: impl Into<String>,
        entries: Vec<ScheduleEntry>,
    ) -> Self {
        self.insert(kind, name, entries);
        self
    }

    /// Replaces the vacant-room listing.
    pub fn set_vacant(&self, entries: Vec<ScheduleEntry>) {
        self.data.write().vacant = entries;
    }

    /// Makes every call fail as unreachable.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.data.write().unreachable = unreachable;
    }

    /// Makes fetches of one entity fail.
    pub fn fail_entity(&self, kind: EntityKind, name: impl Into<String>) {
        self.data.write().failing.insert((kind, name.into()));
    }

    /// Delays fetches of one entity.
    pub fn set_latency(&self, kind: EntityKind, name: impl Into<String>, delay: Duration) {
        self.data.write().latency.insert((kind, name.into()), delay);
    }

    fn check_reachable(&self) -> SourceResult<()> {
        if self.data.read().unreachable {
            return Err(SourceError::Unreachable("in-memory source offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleSource for InMemorySource {
    async fn list_entries_for(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> SourceResult<Vec<ScheduleEntry>> {
        self.check_reachable()?;
        let id = (kind, key.to_string());

        let delay = self.data.read().latency.get(&id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let data = self.data.read();
        if data.failing.contains(&id) {
            return Err(SourceError::Unreachable(format!("{kind} {key}")));
        }
        data.entries
            .get(&id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("{kind} {key}")))
    }

    async fn list_entities(&self, kind: EntityKind) -> SourceResult<Vec<String>> {
        self.check_reachable()?;
        Ok(self.data.read().order.get(&kind).cloned().unwrap_or_default())
    }

    async fn list_vacant_slots(&self) -> SourceResult<Vec<ScheduleEntry>> {
        self.check_reachable()?;
        Ok(self.data.read().vacant.clone())
    }
}

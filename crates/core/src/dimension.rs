//! In-memory counting set for one dimension table.
//!
//! Maps each distinct value to its row id and occurrence count so that the
//! batch writer only touches the database for values it has never seen and,
//! once per batch, for counts that changed. The upsert-or-increment contract
//! is the same as the table's: first sighting gets count 1, every further
//! sighting adds exactly 1, the id never changes.

use std::collections::{HashMap, HashSet};

use crate::attribute::Attribute;
use crate::types::DbId;

/// Id and counts for one distinct value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountEntry {
    pub id: DbId,
    /// Current occurrence count, including unflushed increments.
    pub count: i64,
    /// Count last written to the database.
    persisted: i64,
}

impl CountEntry {
    pub fn is_dirty(&self) -> bool {
        self.count != self.persisted
    }
}

#[derive(Debug, Default)]
pub struct DimensionCounter {
    entries: HashMap<String, CountEntry>,
    /// Values counted since the last [`mark_persisted`](Self::mark_persisted).
    touched: HashSet<String>,
}

impl DimensionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of a cached value and return its id.
    ///
    /// Returns `None` if the value is not cached; the caller must then look it
    /// up in storage and [`seed`](Self::seed) or [`insert_new`](Self::insert_new) it.
    pub fn increment(&mut self, value: &str) -> Option<DbId> {
        let entry = self.entries.get_mut(value)?;
        entry.count += 1;
        if !self.touched.contains(value) {
            self.touched.insert(value.to_string());
        }
        Some(entry.id)
    }

    /// Cache a value that already exists in storage with `stored_count`, then
    /// count this occurrence. Returns the id.
    pub fn seed(&mut self, value: &str, id: DbId, stored_count: i64) -> DbId {
        self.entries.insert(
            value.to_string(),
            CountEntry {
                id,
                count: stored_count + 1,
                persisted: stored_count,
            },
        );
        self.touched.insert(value.to_string());
        id
    }

    /// Cache a value that was just inserted into storage with count 1.
    pub fn insert_new(&mut self, value: &str, id: DbId) -> DbId {
        self.entries.insert(
            value.to_string(),
            CountEntry {
                id,
                count: 1,
                persisted: 1,
            },
        );
        id
    }

    pub fn get(&self, value: &str) -> Option<CountEntry> {
        self.entries.get(value).copied()
    }

    /// `(id, count)` for every entry whose count differs from storage.
    ///
    /// Only values counted since the last flush are visited.
    pub fn dirty(&self) -> Vec<(DbId, i64)> {
        let mut dirty: Vec<_> = self
            .touched
            .iter()
            .filter_map(|value| self.entries.get(value))
            .filter(|e| e.is_dirty())
            .map(|e| (e.id, e.count))
            .collect();
        dirty.sort_unstable();
        dirty
    }

    /// Record that every current count has been written to storage.
    pub fn mark_persisted(&mut self) {
        for value in self.touched.drain() {
            if let Some(entry) = self.entries.get_mut(&value) {
                entry.persisted = entry.count;
            }
        }
    }

    /// Number of values counted since the last flush.
    pub fn touched_len(&self) -> usize {
        self.touched.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.touched.clear();
    }
}

/// One [`DimensionCounter`] per [`Attribute`], each its own namespace.
#[derive(Debug)]
pub struct DimensionCounters {
    counters: [DimensionCounter; Attribute::COUNT],
}

impl Default for DimensionCounters {
    fn default() -> Self {
        Self {
            counters: std::array::from_fn(|_| DimensionCounter::new()),
        }
    }
}

impl DimensionCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attr: Attribute) -> &DimensionCounter {
        &self.counters[attr.index()]
    }

    pub fn get_mut(&mut self, attr: Attribute) -> &mut DimensionCounter {
        &mut self.counters[attr.index()]
    }

    pub fn mark_persisted(&mut self) {
        self.counters.iter_mut().for_each(DimensionCounter::mark_persisted);
    }

    /// Forget everything, e.g. after a rolled-back batch left ids that no
    /// longer exist.
    pub fn clear(&mut self) {
        self.counters.iter_mut().for_each(DimensionCounter::clear);
    }
}

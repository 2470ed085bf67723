//! Per-listing availability index
//!
//! Holds the confirmed bookings and manual blocks for each listing and
//! answers buffered overlap queries. Pending bookings never enter the
//! index: they do not block other pending requests, and only get indexed
//! at the moment of confirmation.
//!
//! The index is an in-process working set in front of the injected
//! repository; [`crate::manager::BookingManager`] hydrates a listing from
//! storage on first touch and maintains it incrementally afterwards.

use chrono::{DateTime, Duration, Utc};
use staybook_core::models::CalendarEntry;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::trace;
use uuid::Uuid;

/// An occupied interval on a listing's calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<&CalendarEntry> for IndexEntry {
    fn from(entry: &CalendarEntry) -> Self {
        Self {
            id: entry.id,
            start_time: entry.start_time,
            end_time: entry.end_time,
        }
    }
}

/// In-memory overlap index keyed by listing id.
#[derive(Debug, Default)]
pub struct AvailabilityIndex {
    inner: RwLock<HashMap<String, Vec<IndexEntry>>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this listing's entries have been loaded.
    pub fn is_hydrated(&self, listing_id: &str) -> bool {
        self.read().contains_key(listing_id)
    }

    /// Replace a listing's entries wholesale from storage.
    pub fn hydrate(&self, listing_id: &str, entries: Vec<IndexEntry>) {
        trace!(listing_id, count = entries.len(), "hydrating listing index");
        self.write().insert(listing_id.to_string(), entries);
    }

    /// Record a newly confirmed booking or manual block.
    pub fn insert(&self, listing_id: &str, entry: IndexEntry) {
        self.write()
            .entry(listing_id.to_string())
            .or_default()
            .push(entry);
    }

    /// Drop an entry on cancellation or block removal. Returns false if
    /// the entry was not indexed.
    pub fn remove(&self, listing_id: &str, entry_id: Uuid) -> bool {
        let mut map = self.write();
        match map.get_mut(listing_id) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|e| e.id != entry_id);
                entries.len() < before
            }
            None => false,
        }
    }

    /// True if any indexed entry, padded by `buffer` on both sides,
    /// intersects the half-open interval `[start, end)`.
    ///
    /// Intervals are half-open, so back-to-back entries touching exactly
    /// at the (buffered) boundary do not conflict.
    pub fn conflicts(
        &self,
        listing_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        buffer: Duration,
    ) -> bool {
        self.read()
            .get(listing_id)
            .map(|entries| {
                entries
                    .iter()
                    .any(|e| e.start_time - buffer < end && start < e.end_time + buffer)
            })
            .unwrap_or(false)
    }

    /// Number of indexed entries for a listing.
    pub fn entry_count(&self, listing_id: &str) -> usize {
        self.read().get(listing_id).map(Vec::len).unwrap_or(0)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<IndexEntry>>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<IndexEntry>>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

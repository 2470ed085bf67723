//! In-memory repository implementation
//!
//! Backs all repository traits with `RwLock<HashMap>` maps. Bookings are
//! upserted and never deleted, matching the audit-trail requirement of
//! the durable stores this stands in for.

use async_trait::async_trait;
use staybook_core::models::{Booking, BookingStatus, CalendarEntry, Listing, ManualBlock};
use staybook_core::traits::{BookingRepository, ListingRepository};
use staybook_core::EngineError;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
    listings: RwLock<HashMap<String, Listing>>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
    blocks: RwLock<HashMap<Uuid, ManualBlock>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a listing (listings are created outside the engine).
    pub fn insert_listing(&self, listing: Listing) {
        self.listings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(listing.id.clone(), listing);
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, EngineError> {
        Ok(self
            .listings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, EngineError> {
        Ok(self
            .bookings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }

    async fn save(&self, booking: &Booking) -> Result<(), EngineError> {
        self.bookings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(booking.id, booking.clone());
        Ok(())
    }

    async fn active_entries(&self, listing_id: &str) -> Result<Vec<CalendarEntry>, EngineError> {
        let mut entries: Vec<CalendarEntry> = self
            .bookings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|b| b.listing_id == listing_id && b.status == BookingStatus::Confirmed)
            .map(CalendarEntry::from_booking)
            .collect();

        entries.extend(
            self.blocks
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .values()
                .filter(|b| b.listing_id == listing_id)
                .map(CalendarEntry::from_block),
        );

        Ok(entries)
    }

    async fn save_block(&self, block: &ManualBlock) -> Result<(), EngineError> {
        self.blocks
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(block.id, block.clone());
        Ok(())
    }

    async fn find_block(&self, id: Uuid) -> Result<Option<ManualBlock>, EngineError> {
        Ok(self
            .blocks
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }

    async fn delete_block(&self, id: Uuid) -> Result<bool, EngineError> {
        Ok(self
            .blocks
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use staybook_core::models::{EntryKind, PayoutStatus, RefundStatus};

    fn booking(listing_id: &str, status: BookingStatus) -> Booking {
        let start = Utc.with_ymd_and_hms(2026, 8, 17, 10, 0, 0).unwrap();
        Booking {
            id: Uuid::new_v4(),
            listing_id: listing_id.to_string(),
            guest_id: "guest_1".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(3),
            guest_count: 2,
            children_count: 0,
            pet_count: 0,
            add_ons: vec![],
            status,
            total_price: 1000,
            payout_status: PayoutStatus::Unpaid,
            refund_status: RefundStatus::None,
            created_at: start,
            updated_at: start,
        }
    }

    #[tokio::test]
    async fn test_booking_roundtrip() {
        let store = MemoryStore::new();
        let b = booking("lst_1", BookingStatus::Pending);
        store.save(&b).await.unwrap();

        let found = BookingRepository::find_by_id(&store, b.id).await.unwrap().unwrap();
        assert_eq!(found.id, b.id);
        assert_eq!(found.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_active_entries_exclude_pending() {
        let store = MemoryStore::new();
        store.save(&booking("lst_1", BookingStatus::Pending)).await.unwrap();
        store.save(&booking("lst_1", BookingStatus::Confirmed)).await.unwrap();
        store.save(&booking("lst_1", BookingStatus::Cancelled)).await.unwrap();
        store.save(&booking("lst_2", BookingStatus::Confirmed)).await.unwrap();

        let entries = store.active_entries("lst_1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Booking);
    }

    #[tokio::test]
    async fn test_blocks_appear_in_active_entries() {
        let store = MemoryStore::new();
        let start = Utc.with_ymd_and_hms(2026, 8, 17, 10, 0, 0).unwrap();
        let block = ManualBlock {
            id: Uuid::new_v4(),
            listing_id: "lst_1".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(2),
            created_at: start,
        };
        store.save_block(&block).await.unwrap();

        let entries = store.active_entries("lst_1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Block);

        assert!(store.delete_block(block.id).await.unwrap());
        assert!(!store.delete_block(block.id).await.unwrap());
        assert!(store.active_entries("lst_1").await.unwrap().is_empty());
    }
}

//! Repository traits for the injected persistence boundary
//!
//! The engine never reaches out to a global client; all state enters and
//! exits through these traits. The real system's backing store is a hosted
//! document database; any key-value or relational store satisfies the
//! contract.

use crate::error::EngineError;
use crate::models::{Booking, CalendarEntry, Listing, ManualBlock};
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to listings (created and edited outside the engine).
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Find a listing by its opaque id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, EngineError>;
}

/// Persistence for bookings and host calendar blocks.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, EngineError>;

    /// Insert or update a booking. Bookings are never deleted.
    async fn save(&self, booking: &Booking) -> Result<(), EngineError>;

    /// All entries that occupy a listing's calendar: confirmed bookings
    /// plus manual blocks. Pending bookings are excluded.
    async fn active_entries(&self, listing_id: &str) -> Result<Vec<CalendarEntry>, EngineError>;

    /// Persist a host calendar block.
    async fn save_block(&self, block: &ManualBlock) -> Result<(), EngineError>;

    /// Find a calendar block by id.
    async fn find_block(&self, id: Uuid) -> Result<Option<ManualBlock>, EngineError>;

    /// Remove a calendar block. Returns false if it did not exist.
    async fn delete_block(&self, id: Uuid) -> Result<bool, EngineError>;
}

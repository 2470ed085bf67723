//! Booking lifecycle orchestration
//!
//! `BookingManager` ties the operating-window check, the rate card, the
//! availability index, and the refund calculator together over injected
//! repositories. It owns the one critical section in the engine: a
//! per-listing mutex held across the overlap check, persistence, and
//! index update during confirmation, so two racing confirms for
//! overlapping slots can never both win.

use crate::availability::{AvailabilityIndex, IndexEntry};
use crate::operating_window::OperatingWindow;
use crate::rate_card::RateCard;
use crate::refund::RefundCalculator;
use chrono::{DateTime, Utc};
use staybook_core::models::{
    AddOn, Booking, BookingStatus, GuestCounts, Listing, ManualBlock, PayoutStatus, Quote,
    RefundResult, RefundStatus,
};
use staybook_core::traits::{BookingRepository, ListingRepository};
use staybook_core::{EngineError, EngineResult, RefundPolicy};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct BookingManager<L, B> {
    listings: Arc<L>,
    bookings: Arc<B>,
    index: AvailabilityIndex,
    policy: RefundPolicy,
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<L, B> BookingManager<L, B>
where
    L: ListingRepository,
    B: BookingRepository,
{
    pub fn new(listings: Arc<L>, bookings: Arc<B>, policy: RefundPolicy) -> Self {
        Self {
            listings,
            bookings,
            index: AvailabilityIndex::new(),
            policy,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Price a prospective slot without creating a booking.
    #[instrument(skip(self))]
    pub async fn quote(
        &self,
        listing_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        add_on_names: &[String],
    ) -> EngineResult<Quote> {
        let listing = self.load_listing(listing_id).await?;
        RateCard::price(&listing, start, end, add_on_names)
    }

    /// Create a booking in `pending` state.
    ///
    /// Validates capacity, operating hours, and pricing, and snapshots the
    /// agreed add-on prices. Deliberately does not consult availability:
    /// multiple guests may hold overlapping pending requests, and the
    /// conflict is resolved at confirmation time.
    #[instrument(skip(self))]
    pub async fn create_booking(
        &self,
        listing_id: &str,
        guest_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        counts: GuestCounts,
        add_on_names: &[String],
    ) -> EngineResult<Booking> {
        if end <= start {
            return Err(EngineError::InvalidRequest(
                "Booking end must be after start".to_string(),
            ));
        }

        let listing = self.load_listing(listing_id).await?;
        Self::check_capacity(&listing, &counts)?;

        if !OperatingWindow::is_within_hours(&listing, start, end) {
            warn!(listing_id, "booking request outside operating hours");
            return Err(EngineError::OutsideOperatingHours);
        }

        let quote = RateCard::price(&listing, start, end, add_on_names)?;

        // Snapshot the agreed add-on prices; later listing edits must not
        // change this booking retroactively.
        let add_ons = add_on_names
            .iter()
            .map(|name| {
                listing
                    .add_on_price(name)
                    .map(|price| AddOn {
                        name: name.clone(),
                        price,
                    })
                    .ok_or_else(|| EngineError::UnknownAddOn(name.clone()))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            listing_id: listing.id.clone(),
            guest_id: guest_id.to_string(),
            start_time: start,
            end_time: end,
            guest_count: counts.guests,
            children_count: counts.children,
            pet_count: counts.pets,
            add_ons,
            status: BookingStatus::Pending,
            total_price: quote.total,
            payout_status: PayoutStatus::Unpaid,
            refund_status: RefundStatus::None,
            created_at: now,
            updated_at: now,
        };
        self.bookings.save(&booking).await?;

        info!(
            booking_id = %booking.id,
            listing_id,
            total = booking.total_price,
            "booking created"
        );
        Ok(booking)
    }

    /// Confirm a pending booking. First-confirmed-wins: if an overlapping
    /// entry was confirmed first, fails with `SlotNoLongerAvailable` and
    /// the booking stays pending (the host may reject it instead).
    #[instrument(skip(self))]
    pub async fn confirm_booking(&self, booking_id: Uuid) -> EngineResult<Booking> {
        let mut booking = self.load_booking(booking_id).await?;
        if booking.status != BookingStatus::Pending {
            return Err(EngineError::InvalidStateTransition {
                from: booking.status,
                to: BookingStatus::Confirmed,
            });
        }
        let listing = self.load_listing(&booking.listing_id).await?;

        let lock = self.listing_lock(&booking.listing_id);
        let _guard = lock.lock().await;

        self.ensure_hydrated(&booking.listing_id).await?;
        if self.index.conflicts(
            &booking.listing_id,
            booking.start_time,
            booking.end_time,
            listing.buffer(),
        ) {
            warn!(
                booking_id = %booking.id,
                listing_id = %booking.listing_id,
                "slot taken before confirmation"
            );
            return Err(EngineError::SlotNoLongerAvailable);
        }

        booking.status = BookingStatus::Confirmed;
        booking.updated_at = Utc::now();
        self.bookings.save(&booking).await?;
        self.index.insert(
            &booking.listing_id,
            IndexEntry {
                id: booking.id,
                start_time: booking.start_time,
                end_time: booking.end_time,
            },
        );

        info!(booking_id = %booking.id, listing_id = %booking.listing_id, "booking confirmed");
        Ok(booking)
    }

    /// Reject a pending booking. Pending bookings were never indexed, so
    /// no availability mutation is needed.
    #[instrument(skip(self))]
    pub async fn reject_booking(&self, booking_id: Uuid) -> EngineResult<Booking> {
        let mut booking = self.load_booking(booking_id).await?;
        if booking.status != BookingStatus::Pending {
            return Err(EngineError::InvalidStateTransition {
                from: booking.status,
                to: BookingStatus::Rejected,
            });
        }

        booking.status = BookingStatus::Rejected;
        booking.updated_at = Utc::now();
        self.bookings.save(&booking).await?;

        info!(booking_id = %booking.id, "booking rejected");
        Ok(booking)
    }

    /// Cancel a confirmed booking and free its slot.
    #[instrument(skip(self))]
    pub async fn cancel_booking(&self, booking_id: Uuid) -> EngineResult<Booking> {
        let mut booking = self.load_booking(booking_id).await?;
        if booking.status != BookingStatus::Confirmed {
            return Err(EngineError::InvalidStateTransition {
                from: booking.status,
                to: BookingStatus::Cancelled,
            });
        }

        let lock = self.listing_lock(&booking.listing_id);
        let _guard = lock.lock().await;

        self.ensure_hydrated(&booking.listing_id).await?;
        booking.status = BookingStatus::Cancelled;
        booking.updated_at = Utc::now();
        self.bookings.save(&booking).await?;
        self.index.remove(&booking.listing_id, booking.id);

        info!(booking_id = %booking.id, listing_id = %booking.listing_id, "booking cancelled");
        Ok(booking)
    }

    /// Settlement amounts for a rejected or cancelled booking. Pure:
    /// payout/refund status bookkeeping stays with the caller.
    #[instrument(skip(self))]
    pub async fn settle_refund(&self, booking_id: Uuid) -> EngineResult<RefundResult> {
        let booking = self.load_booking(booking_id).await?;
        RefundCalculator::settle(&booking, &self.policy)
    }

    /// Host-created calendar block. Goes through the same critical
    /// section and overlap check as confirmation, so a block can never
    /// land over a confirmed booking.
    #[instrument(skip(self))]
    pub async fn block_calendar(
        &self,
        listing_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<ManualBlock> {
        if end <= start {
            return Err(EngineError::InvalidRequest(
                "Block end must be after start".to_string(),
            ));
        }
        let listing = self.load_listing(listing_id).await?;

        let lock = self.listing_lock(listing_id);
        let _guard = lock.lock().await;

        self.ensure_hydrated(listing_id).await?;
        if self
            .index
            .conflicts(listing_id, start, end, listing.buffer())
        {
            return Err(EngineError::SlotNoLongerAvailable);
        }

        let block = ManualBlock {
            id: Uuid::new_v4(),
            listing_id: listing_id.to_string(),
            start_time: start,
            end_time: end,
            created_at: Utc::now(),
        };
        self.bookings.save_block(&block).await?;
        self.index.insert(
            listing_id,
            IndexEntry {
                id: block.id,
                start_time: block.start_time,
                end_time: block.end_time,
            },
        );

        info!(block_id = %block.id, listing_id, "calendar blocked");
        Ok(block)
    }

    /// Remove a host calendar block and free its slot.
    #[instrument(skip(self))]
    pub async fn unblock_calendar(&self, block_id: Uuid) -> EngineResult<()> {
        let block = self
            .bookings
            .find_block(block_id)
            .await?
            .ok_or_else(|| EngineError::BlockNotFound(block_id.to_string()))?;

        let lock = self.listing_lock(&block.listing_id);
        let _guard = lock.lock().await;

        if !self.bookings.delete_block(block_id).await? {
            return Err(EngineError::BlockNotFound(block_id.to_string()));
        }
        self.index.remove(&block.listing_id, block_id);

        info!(%block_id, listing_id = %block.listing_id, "calendar unblocked");
        Ok(())
    }

    /// Read-only availability probe for calendar rendering.
    #[instrument(skip(self))]
    pub async fn is_slot_available(
        &self,
        listing_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<bool> {
        let listing = self.load_listing(listing_id).await?;

        let lock = self.listing_lock(listing_id);
        let _guard = lock.lock().await;

        self.ensure_hydrated(listing_id).await?;
        Ok(!self
            .index
            .conflicts(listing_id, start, end, listing.buffer()))
    }

    // ==================== internals ====================

    async fn load_listing(&self, listing_id: &str) -> EngineResult<Listing> {
        self.listings
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| EngineError::ListingNotFound(listing_id.to_string()))
    }

    async fn load_booking(&self, booking_id: Uuid) -> EngineResult<Booking> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| EngineError::BookingNotFound(booking_id.to_string()))
    }

    fn check_capacity(listing: &Listing, counts: &GuestCounts) -> EngineResult<()> {
        if counts.guests > listing.max_guests {
            return Err(EngineError::InvalidCapacity {
                kind: "guest",
                requested: counts.guests,
                limit: listing.max_guests,
            });
        }
        if counts.children > listing.max_children {
            return Err(EngineError::InvalidCapacity {
                kind: "children",
                requested: counts.children,
                limit: listing.max_children,
            });
        }
        if counts.pets > listing.max_pets {
            return Err(EngineError::InvalidCapacity {
                kind: "pet",
                requested: counts.pets,
                limit: listing.max_pets,
            });
        }
        Ok(())
    }

    /// Load a listing's occupied entries from storage on first touch.
    /// Callers hold the listing lock, so hydration runs at most once.
    async fn ensure_hydrated(&self, listing_id: &str) -> EngineResult<()> {
        if self.index.is_hydrated(listing_id) {
            return Ok(());
        }
        let entries = self.bookings.active_entries(listing_id).await?;
        debug!(listing_id, count = entries.len(), "hydrating from storage");
        self.index
            .hydrate(listing_id, entries.iter().map(IndexEntry::from).collect());
        Ok(())
    }

    fn listing_lock(&self, listing_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(listing_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

//! Booking, manual block, and calendar entry models

use crate::models::listing::AddOn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Booking lifecycle state.
///
/// `pending -> {confirmed, rejected}`, `confirmed -> cancelled`;
/// `rejected` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Rejected | BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payout state, owned by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Unpaid,
    Paid,
}

/// Refund state, owned by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    None,
    Processed,
}

/// Guest headcounts attached to a booking request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCounts {
    pub guests: u32,
    pub children: u32,
    pub pets: u32,
}

/// A guest's reservation against a listing.
///
/// Add-on prices are snapshotted at creation time and never change if the
/// host later edits the listing. `total_price` is immutable once the
/// status leaves `pending`. Bookings are never physically deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub listing_id: String,
    pub guest_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub guest_count: u32,
    pub children_count: u32,
    pub pet_count: u32,
    pub add_ons: Vec<AddOn>,
    pub status: BookingStatus,
    pub total_price: i64,
    pub payout_status: PayoutStatus,
    pub refund_status: RefundStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_pending(&self) -> bool {
        self.status == BookingStatus::Pending
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// A host-created calendar block with no guest or price.
///
/// Occupies availability exactly like a confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualBlock {
    pub id: Uuid,
    pub listing_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// What kind of entry occupies the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Booking,
    Block,
}

/// The union the availability index stores: a confirmed booking or a
/// manual block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub kind: EntryKind,
}

impl CalendarEntry {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            start_time: booking.start_time,
            end_time: booking.end_time,
            kind: EntryKind::Booking,
        }
    }

    pub fn from_block(block: &ManualBlock) -> Self {
        Self {
            id: block.id,
            start_time: block.start_time,
            end_time: block.end_time,
            kind: EntryKind::Block,
        }
    }
}

//! Domain models for the staybook engine
//!
//! This module contains all the core domain models used throughout the engine.

pub mod booking;
pub mod listing;
pub mod quote;

pub use booking::{
    Booking, BookingStatus, CalendarEntry, EntryKind, GuestCounts, ManualBlock, PayoutStatus,
    RefundStatus,
};
pub use listing::{AddOn, DurationBucket, Listing, TimeOfDay};
pub use quote::{Quote, RefundResult};

//! Staybook booking engine
//!
//! Availability and pricing core for a property-rental marketplace: given
//! a listing's operating hours, buffer time, duration-based rate card,
//! weekend surcharge, and existing bookings, decide whether a proposed
//! reservation is valid and at what price, and compute refund settlement
//! on rejection or cancellation.
//!
//! The engine is a library with no server or wire protocol of its own;
//! persistence is injected through the repository traits in
//! [`staybook_core::traits`].

pub mod availability;
pub mod manager;
pub mod operating_window;
pub mod rate_card;
pub mod refund;

pub use availability::{AvailabilityIndex, IndexEntry};
pub use manager::BookingManager;
pub use operating_window::OperatingWindow;
pub use rate_card::RateCard;
pub use refund::RefundCalculator;

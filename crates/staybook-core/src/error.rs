//! Unified error handling for the staybook engine
//!
//! Every engine operation returns a typed success value or one of these
//! variants. All domain variants are expected, recoverable-by-caller
//! conditions; the embedding application translates them into user-facing
//! messages or retries.

use crate::models::BookingStatus;
use thiserror::Error;

/// Main engine error type
///
/// All failures in the engine should be converted to this type. Each
/// variant carries a stable `error_code()` for API responses and logs.
#[derive(Error, Debug)]
pub enum EngineError {
    // ==================== Lookup Errors ====================
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Calendar block not found: {0}")]
    BlockNotFound(String),

    // ==================== Request-Shape Errors ====================
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{kind} count {requested} exceeds listing limit {limit}")]
    InvalidCapacity {
        kind: &'static str,
        requested: u32,
        limit: u32,
    },

    #[error("Requested slot falls outside the listing's operating hours")]
    OutsideOperatingHours,

    #[error("No offered duration bucket covers a booking of {minutes} minutes")]
    UnsupportedDuration { minutes: i64 },

    #[error("Add-on not offered by this listing: {0}")]
    UnknownAddOn(String),

    // ==================== Lifecycle Errors ====================
    #[error("Slot no longer available: an overlapping entry was confirmed first")]
    SlotNoLongerAvailable,

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Booking in state {0} is not refundable")]
    NotRefundable(BookingStatus),

    // ==================== Internal Errors ====================
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EngineError {
    /// Returns the error code for API responses and structured logs
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::ListingNotFound(_) => "listing_not_found",
            EngineError::BookingNotFound(_) => "booking_not_found",
            EngineError::BlockNotFound(_) => "block_not_found",
            EngineError::InvalidRequest(_) => "invalid_request",
            EngineError::InvalidCapacity { .. } => "invalid_capacity",
            EngineError::OutsideOperatingHours => "outside_operating_hours",
            EngineError::UnsupportedDuration { .. } => "unsupported_duration",
            EngineError::UnknownAddOn(_) => "unknown_add_on",
            EngineError::SlotNoLongerAvailable => "slot_no_longer_available",
            EngineError::InvalidStateTransition { .. } => "invalid_state_transition",
            EngineError::NotRefundable(_) => "not_refundable",
            EngineError::Storage(_) => "storage_error",
            EngineError::Config(_) => "config_error",
            EngineError::Serialization(_) => "serialization_error",
        }
    }

    /// True for request-shape failures surfaced at booking creation time;
    /// the caller shows a validation message, no retry needed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidRequest(_)
                | EngineError::InvalidCapacity { .. }
                | EngineError::OutsideOperatingHours
                | EngineError::UnsupportedDuration { .. }
                | EngineError::UnknownAddOn(_)
        )
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

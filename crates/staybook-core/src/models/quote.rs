//! Pricing and settlement result types

use serde::{Deserialize, Serialize};

/// Priced breakdown of a booking request.
///
/// All amounts are non-negative plain integers in the marketplace's
/// currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Bucket price, with the weekend surcharge already applied when the
    /// booking is weekend-priced.
    pub base_price: i64,
    pub surcharge_applied: bool,
    pub add_ons_total: i64,
    pub total: i64,
}

/// Settlement amounts for a rejected or cancelled booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundResult {
    pub refund_amount: i64,
    pub refund_reason: String,
    pub host_share: i64,
}

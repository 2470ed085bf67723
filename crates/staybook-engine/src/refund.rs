//! Refund settlement
//!
//! Pure mapping from a terminal booking snapshot to settlement amounts.
//! The function never mutates payout or refund status; the caller records
//! those after a successful settle.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use staybook_core::models::{Booking, BookingStatus, RefundResult};
use staybook_core::{EngineError, EngineResult, RefundPolicy};

pub struct RefundCalculator;

impl RefundCalculator {
    /// Settle a rejected or cancelled booking.
    ///
    /// Host rejection refunds the full amount with no host share. A
    /// guest cancellation of a confirmed booking refunds
    /// `floor(total * cancellation_refund_percent / 100)`; the retained
    /// remainder is split per the policy's host retention share.
    /// Idempotent for a given booking snapshot.
    pub fn settle(booking: &Booking, policy: &RefundPolicy) -> EngineResult<RefundResult> {
        match booking.status {
            BookingStatus::Rejected => Ok(RefundResult {
                refund_amount: booking.total_price,
                refund_reason: "Host Rejected (100% Refund)".to_string(),
                host_share: 0,
            }),
            BookingStatus::Cancelled => {
                let total = Decimal::from(booking.total_price);
                let pct = policy.cancellation_refund_percent;
                let refund_amount = (total * pct / Decimal::from(100))
                    .floor()
                    .to_i64()
                    .unwrap_or(0);

                let retained = booking.total_price - refund_amount;
                let host_share = (Decimal::from(retained) * policy.host_retention_percent
                    / Decimal::from(100))
                .floor()
                .to_i64()
                .unwrap_or(0);

                Ok(RefundResult {
                    refund_amount,
                    refund_reason: format!("User Cancelled ({}% Refund)", pct.normalize()),
                    host_share,
                })
            }
            status => Err(EngineError::NotRefundable(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use staybook_core::models::{PayoutStatus, RefundStatus};
    use uuid::Uuid;

    fn booking(status: BookingStatus, total_price: i64) -> Booking {
        let start = Utc.with_ymd_and_hms(2026, 8, 17, 10, 0, 0).unwrap();
        Booking {
            id: Uuid::new_v4(),
            listing_id: "lst_1".to_string(),
            guest_id: "guest_1".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(3),
            guest_count: 2,
            children_count: 0,
            pet_count: 0,
            add_ons: vec![],
            status,
            total_price,
            payout_status: PayoutStatus::Unpaid,
            refund_status: RefundStatus::None,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_rejection_refunds_everything() {
        let result =
            RefundCalculator::settle(&booking(BookingStatus::Rejected, 1000), &RefundPolicy::default())
                .unwrap();
        assert_eq!(result.refund_amount, 1000);
        assert_eq!(result.host_share, 0);
        assert_eq!(result.refund_reason, "Host Rejected (100% Refund)");
    }

    #[test]
    fn test_cancellation_refunds_ninety_percent() {
        let policy = RefundPolicy::default();
        let result =
            RefundCalculator::settle(&booking(BookingStatus::Cancelled, 1000), &policy).unwrap();
        assert_eq!(result.refund_amount, 900);
        assert_eq!(result.host_share, 100);
        assert_eq!(result.refund_reason, "User Cancelled (90% Refund)");

        let result =
            RefundCalculator::settle(&booking(BookingStatus::Cancelled, 500), &policy).unwrap();
        assert_eq!(result.refund_amount, 450);
        assert_eq!(result.host_share, 50);
    }

    #[test]
    fn test_refund_floors_fractions() {
        // 90% of 999 is 899.1
        let result = RefundCalculator::settle(
            &booking(BookingStatus::Cancelled, 999),
            &RefundPolicy::default(),
        )
        .unwrap();
        assert_eq!(result.refund_amount, 899);
        assert_eq!(result.host_share, 100);
    }

    #[test]
    fn test_policy_is_a_parameter() {
        let policy = RefundPolicy {
            cancellation_refund_percent: dec!(80),
            host_retention_percent: dec!(0),
        };
        let result =
            RefundCalculator::settle(&booking(BookingStatus::Cancelled, 1000), &policy).unwrap();
        assert_eq!(result.refund_amount, 800);
        // Retention accrues to the platform under this policy
        assert_eq!(result.host_share, 0);
        assert_eq!(result.refund_reason, "User Cancelled (80% Refund)");
    }

    #[test]
    fn test_non_terminal_states_not_refundable() {
        let policy = RefundPolicy::default();
        for status in [BookingStatus::Pending, BookingStatus::Confirmed] {
            let err = RefundCalculator::settle(&booking(status, 1000), &policy).unwrap_err();
            assert!(matches!(err, EngineError::NotRefundable(s) if s == status));
        }
    }

    #[test]
    fn test_settle_is_idempotent() {
        let b = booking(BookingStatus::Cancelled, 1234);
        let policy = RefundPolicy::default();
        let first = RefundCalculator::settle(&b, &policy).unwrap();
        let second = RefundCalculator::settle(&b, &policy).unwrap();
        assert_eq!(first, second);
    }
}

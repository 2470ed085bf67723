//! Duration-bucket pricing with weekend surcharge and add-ons
//!
//! A listing offers flat prices for a subset of the discrete duration
//! buckets (1h/3h/6h/12h/24h). A request is priced at the smallest offered
//! bucket covering its elapsed time; a request longer than the largest
//! offered bucket cannot be priced.

use crate::operating_window::OperatingWindow;
use chrono::{DateTime, Utc};
use staybook_core::models::{DurationBucket, Listing, Quote};
use staybook_core::{EngineError, EngineResult};
use tracing::debug;

pub struct RateCard;

impl RateCard {
    /// Price a booking request against a listing's rate table.
    ///
    /// Pure function of its inputs: identical calls yield identical
    /// quotes. Weekend pricing is governed solely by the start instant's
    /// local calendar day.
    pub fn price(
        listing: &Listing,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        add_on_names: &[String],
    ) -> EngineResult<Quote> {
        let elapsed_secs = (end - start).num_seconds();
        if elapsed_secs <= 0 {
            return Err(EngineError::InvalidRequest(
                "Booking end must be after start".to_string(),
            ));
        }
        let elapsed_minutes = (elapsed_secs + 59) / 60;

        let (bucket, bucket_price) = Self::select_bucket(listing, elapsed_minutes)?;

        let weekend = OperatingWindow::is_weekend_start(listing, start);
        let base_price = if weekend {
            Self::apply_surcharge(bucket_price, listing.weekend_surcharge_percent)
        } else {
            bucket_price
        };

        let mut add_ons_total: i64 = 0;
        for name in add_on_names {
            let price = listing
                .add_on_price(name)
                .ok_or_else(|| EngineError::UnknownAddOn(name.clone()))?;
            add_ons_total += price;
        }

        debug!(
            listing_id = %listing.id,
            %bucket,
            weekend,
            base_price,
            add_ons_total,
            "priced booking request"
        );

        Ok(Quote {
            base_price,
            surcharge_applied: weekend,
            add_ons_total,
            total: base_price + add_ons_total,
        })
    }

    /// Smallest offered bucket covering the elapsed time (round up, never
    /// down). Prices iterate in bucket order, so the first fit wins.
    fn select_bucket(
        listing: &Listing,
        elapsed_minutes: i64,
    ) -> EngineResult<(DurationBucket, i64)> {
        listing
            .prices
            .iter()
            .find(|(bucket, _)| bucket.minutes() >= elapsed_minutes)
            .map(|(bucket, price)| (*bucket, *price))
            .ok_or(EngineError::UnsupportedDuration {
                minutes: elapsed_minutes,
            })
    }

    /// `round(price * (100 + percent) / 100)`, rounding half up.
    fn apply_surcharge(price: i64, percent: u32) -> i64 {
        let scaled = price.saturating_mul(100 + percent as i64);
        (scaled + 50) / 100
    }
}

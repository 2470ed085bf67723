//! Operating-hours checks
//!
//! A listing carries separate weekday and weekend open/close pairs in its
//! local time. A close time numerically at or before the open time means
//! the window spans midnight into the next calendar day.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use staybook_core::models::Listing;

const SECONDS_PER_DAY: i64 = 86_400;

pub struct OperatingWindow;

impl OperatingWindow {
    /// True if the start instant falls on Saturday or Sunday in the
    /// listing's local calendar. The start date alone governs which
    /// ruleset (and which pricing) applies, even for overnight spans.
    pub fn is_weekend_start(listing: &Listing, start: DateTime<Utc>) -> bool {
        let local = start.with_timezone(&listing.local_offset());
        matches!(local.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Whether `[start, end)` lies within the listing's allowed hours.
    ///
    /// The ruleset is selected by the start's local weekday; both
    /// endpoints, measured from that day's local midnight, must fall in
    /// `[open, effective_close]` where a midnight-spanning close is
    /// extended by 24h. Returns false (never errors) for out-of-window
    /// requests.
    pub fn is_within_hours(listing: &Listing, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if end <= start {
            return false;
        }

        let weekend = Self::is_weekend_start(listing, start);
        let (open, close) = listing.hours_for(weekend);

        let open_secs = open.minutes_from_midnight() * 60;
        let mut close_secs = close.minutes_from_midnight() * 60;
        if close_secs <= open_secs {
            close_secs += SECONDS_PER_DAY;
        }

        let local_start = start.with_timezone(&listing.local_offset());
        let start_rel = local_start.time().num_seconds_from_midnight() as i64;
        let end_rel = start_rel + (end - start).num_seconds();

        start_rel >= open_secs && end_rel <= close_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use staybook_core::models::AddOn;
    use std::collections::BTreeMap;

    fn listing(weekend_open: &str, weekend_close: &str) -> Listing {
        Listing {
            id: "lst_hours".to_string(),
            max_guests: 4,
            max_children: 2,
            max_infants: 1,
            max_pets: 1,
            weekday_open: "09:00".parse().unwrap(),
            weekday_close: "21:00".parse().unwrap(),
            weekend_open: weekend_open.parse().unwrap(),
            weekend_close: weekend_close.parse().unwrap(),
            buffer_minutes: 30,
            prices: BTreeMap::new(),
            weekend_surcharge_percent: 0,
            add_ons: Vec::<AddOn>::new(),
            utc_offset_minutes: 0,
        }
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    // 2026-08-17 is a Monday, 2026-08-22 a Saturday, 2026-08-23 a Sunday.

    #[test]
    fn test_weekday_booking_within_hours() {
        let l = listing("10:00", "22:00");
        assert!(OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 17, 10, 0),
            utc(2026, 8, 17, 13, 0)
        ));
    }

    #[test]
    fn test_weekday_booking_outside_hours() {
        let l = listing("10:00", "22:00");
        // Before open
        assert!(!OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 17, 8, 0),
            utc(2026, 8, 17, 11, 0)
        ));
        // Runs past close
        assert!(!OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 17, 19, 0),
            utc(2026, 8, 17, 22, 0)
        ));
    }

    #[test]
    fn test_endpoints_at_window_edges_allowed() {
        let l = listing("10:00", "22:00");
        assert!(OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 17, 9, 0),
            utc(2026, 8, 17, 21, 0)
        ));
    }

    #[test]
    fn test_weekend_ruleset_selected_by_start_day() {
        let l = listing("10:00", "22:00");
        // Saturday 09:00 is inside weekday hours but before weekend open.
        assert!(!OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 22, 9, 0),
            utc(2026, 8, 22, 12, 0)
        ));
        assert!(OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 22, 10, 0),
            utc(2026, 8, 22, 13, 0)
        ));
    }

    #[test]
    fn test_overnight_weekend_window() {
        // weekend_close 02:00 < weekend_open 10:00 spans midnight
        let l = listing("10:00", "02:00");
        // Sat 23:00 - Sun 01:30 stays inside Saturday's extended window
        assert!(OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 22, 23, 0),
            utc(2026, 8, 23, 1, 30)
        ));
        // Sun 01:30 end exactly beyond effective close fails
        assert!(!OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 22, 23, 0),
            utc(2026, 8, 23, 2, 30)
        ));
    }

    #[test]
    fn test_spillover_start_judged_by_its_own_day() {
        let l = listing("10:00", "02:00");
        // Sunday 01:00 start is evaluated against Sunday's window,
        // not Saturday's spill past midnight.
        assert!(!OperatingWindow::is_within_hours(
            &l,
            utc(2026, 8, 23, 1, 0),
            utc(2026, 8, 23, 2, 0)
        ));
    }

    #[test]
    fn test_degenerate_interval_rejected() {
        let l = listing("10:00", "22:00");
        let t = utc(2026, 8, 17, 10, 0);
        assert!(!OperatingWindow::is_within_hours(&l, t, t));
    }

    #[test]
    fn test_local_offset_shifts_weekday() {
        let mut l = listing("10:00", "22:00");
        l.utc_offset_minutes = 330;
        // Fri 19:00 UTC is Sat 00:30 at +05:30
        assert!(OperatingWindow::is_weekend_start(
            &l,
            utc(2026, 8, 21, 19, 0)
        ));
        assert!(!OperatingWindow::is_weekend_start(
            &l,
            utc(2026, 8, 21, 18, 0)
        ));
    }
}

//! Listing model: capacity ceilings, operating hours, rate table, add-ons
//!
//! A listing is owned by a host and is read-only to the engine; it enters
//! through the injected [`crate::traits::ListingRepository`].

use crate::error::EngineError;
use chrono::offset::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default listing UTC offset: +05:30, the marketplace's home market.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// A discrete offered booking duration with its own flat price.
///
/// Ordered so that "smallest bucket covering a duration" is a range scan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DurationBucket {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "3h")]
    ThreeHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "24h")]
    TwentyFourHours,
}

impl DurationBucket {
    /// All buckets a listing may offer, smallest first.
    pub const ALL: [DurationBucket; 5] = [
        DurationBucket::OneHour,
        DurationBucket::ThreeHours,
        DurationBucket::SixHours,
        DurationBucket::TwelveHours,
        DurationBucket::TwentyFourHours,
    ];

    pub fn hours(&self) -> i64 {
        match self {
            DurationBucket::OneHour => 1,
            DurationBucket::ThreeHours => 3,
            DurationBucket::SixHours => 6,
            DurationBucket::TwelveHours => 12,
            DurationBucket::TwentyFourHours => 24,
        }
    }

    pub fn minutes(&self) -> i64 {
        self.hours() * 60
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::OneHour => "1h",
            DurationBucket::ThreeHours => "3h",
            DurationBucket::SixHours => "6h",
            DurationBucket::TwelveHours => "12h",
            DurationBucket::TwentyFourHours => "24h",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local time of day, parsed from "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, EngineError> {
        if hour > 23 || minute > 59 {
            return Err(EngineError::InvalidRequest(format!(
                "Invalid time of day: {:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Minutes elapsed since local midnight.
    pub fn minutes_from_midnight(&self) -> i64 {
        self.hour as i64 * 60 + self.minute as i64
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidRequest(format!("Invalid HH:MM time: {}", s));
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Host-defined optional extra with a flat price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    pub name: String,
    pub price: i64,
}

/// A bookable property listing.
///
/// `weekday_close`/`weekend_close` may be numerically earlier than the
/// matching open time, meaning the window spans midnight into the next
/// calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Opaque identifier assigned by the surrounding application.
    pub id: String,

    // Capacity ceilings
    pub max_guests: u32,
    pub max_children: u32,
    pub max_infants: u32,
    pub max_pets: u32,

    // Operating hours, listing-local
    pub weekday_open: TimeOfDay,
    pub weekday_close: TimeOfDay,
    pub weekend_open: TimeOfDay,
    pub weekend_close: TimeOfDay,

    /// Mandatory idle minutes between consecutive bookings (turnover).
    pub buffer_minutes: u32,

    /// Offered duration buckets and their flat prices. Absent bucket means
    /// that duration is not offered.
    pub prices: BTreeMap<DurationBucket, i64>,

    /// Integer percentage surcharge applied to weekend-priced bookings.
    pub weekend_surcharge_percent: u32,

    /// Host-defined optional extras, in display order.
    #[serde(default)]
    pub add_ons: Vec<AddOn>,

    /// UTC offset of the listing's local calendar, in minutes.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

fn default_utc_offset() -> i32 {
    DEFAULT_UTC_OFFSET_MINUTES
}

impl Listing {
    /// The listing's local-time offset. Falls back to UTC if the stored
    /// offset is out of chrono's accepted range.
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Open/close pair for a weekend or weekday local start date.
    pub fn hours_for(&self, weekend: bool) -> (TimeOfDay, TimeOfDay) {
        if weekend {
            (self.weekend_open, self.weekend_close)
        } else {
            (self.weekday_open, self.weekday_close)
        }
    }

    /// Price of a host-defined add-on, if offered.
    pub fn add_on_price(&self, name: &str) -> Option<i64> {
        self.add_ons.iter().find(|a| a.name == name).map(|a| a.price)
    }

    /// Buffer time as a chrono duration.
    pub fn buffer(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.buffer_minutes as i64)
    }
}

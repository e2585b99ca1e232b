//! Booking domain entity and the fixed slot calendar

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, DomainResult};
use crate::shared::non_blank;

/// One of the eight bookable 60-minute windows of the academic day.
///
/// Declaration order is chronological, so `Ord` sorts slots by start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum TimeSlot {
    #[serde(rename = "08:30-09:30")]
    At0830,
    #[serde(rename = "09:30-10:30")]
    At0930,
    #[serde(rename = "10:45-11:45")]
    At1045,
    #[serde(rename = "11:45-12:45")]
    At1145,
    #[serde(rename = "13:30-14:30")]
    At1330,
    #[serde(rename = "14:30-15:30")]
    At1430,
    #[serde(rename = "15:30-16:30")]
    At1530,
    #[serde(rename = "16:30-17:30")]
    At1630,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 8] = [
        Self::At0830,
        Self::At0930,
        Self::At1045,
        Self::At1145,
        Self::At1330,
        Self::At1430,
        Self::At1530,
        Self::At1630,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::At0830 => "08:30-09:30",
            Self::At0930 => "09:30-10:30",
            Self::At1045 => "10:45-11:45",
            Self::At1145 => "11:45-12:45",
            Self::At1330 => "13:30-14:30",
            Self::At1430 => "14:30-15:30",
            Self::At1530 => "15:30-16:30",
            Self::At1630 => "16:30-17:30",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| DomainError::InvalidSlot(s.to_string()))
    }
}

/// Reduce a client-supplied date to calendar-day granularity.
///
/// Accepts `YYYY-MM-DD`, naive `YYYY-MM-DDTHH:MM:SS[.fff]` and RFC 3339
/// timestamps. The calendar date as written is kept; the time of day and
/// any offset are discarded.
pub fn normalize_booking_date(raw: &str) -> DomainResult<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(DomainError::Validation(format!("Invalid date: {}", raw)))
}

/// A reservation of one classroom for one slot on one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: String,
    pub date: NaiveDate,
    pub classroom: String,
    pub time_slot: TimeSlot,
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_user_id == user_id
    }
}

/// Validated insert payload for the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub date: NaiveDate,
    pub classroom: String,
    pub time_slot: TimeSlot,
    pub owner_user_id: String,
}

impl NewBooking {
    /// Validate raw request fields. Missing or blank fields fail with
    /// `Validation`; an unknown slot fails with `InvalidSlot`.
    pub fn parse(
        date: Option<&str>,
        classroom: Option<&str>,
        time: Option<&str>,
        owner_user_id: &str,
    ) -> DomainResult<Self> {
        let (Some(date), Some(classroom), Some(time)) =
            (non_blank(date), non_blank(classroom), non_blank(time))
        else {
            return Err(DomainError::Validation(
                "Date, classroom, and time are required".into(),
            ));
        };

        Ok(Self {
            date: normalize_booking_date(date)?,
            classroom: classroom.to_string(),
            time_slot: time.parse()?,
            owner_user_id: owner_user_id.to_string(),
        })
    }

    pub fn into_booking(self, id: String, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            date: self.date,
            classroom: self.classroom,
            time_slot: self.time_slot,
            owner_user_id: self.owner_user_id,
            created_at,
        }
    }

    pub fn slot_taken(&self) -> DomainError {
        DomainError::SlotTaken {
            classroom: self.classroom.clone(),
            date: self.date.to_string(),
            slot: self.time_slot.to_string(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_slots_in_chronological_order() {
        let mut sorted = TimeSlot::ALL;
        sorted.sort();
        assert_eq!(sorted, TimeSlot::ALL);
        assert_eq!(TimeSlot::ALL.len(), 8);
    }

    #[test]
    fn parses_known_slot_strings() {
        for slot in TimeSlot::ALL {
            assert_eq!(slot.as_str().parse::<TimeSlot>().unwrap(), slot);
        }
        assert_eq!(" 08:30-09:30 ".parse::<TimeSlot>().unwrap(), TimeSlot::At0830);
    }

    #[test]
    fn rejects_unknown_slot() {
        let err = "12:45-13:30".parse::<TimeSlot>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidSlot(s) if s == "12:45-13:30"));
    }

    #[test]
    fn slot_serializes_as_window_string() {
        let json = serde_json::to_string(&TimeSlot::At1045).unwrap();
        assert_eq!(json, "\"10:45-11:45\"");
    }

    #[test]
    fn different_time_of_day_serializations_collide() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for raw in [
            "2024-01-01",
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:00.000Z",
            "2024-01-01T15:42:10+05:30",
            "2024-01-01T09:00:00",
            "2024-01-01T09:00:00.250",
        ] {
            assert_eq!(normalize_booking_date(raw).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(normalize_booking_date("tomorrow").is_err());
        assert!(normalize_booking_date("2024-02-30").is_err());
    }

    #[test]
    fn new_booking_requires_all_fields() {
        let err = NewBooking::parse(Some("2024-03-01"), Some("  "), Some("08:30-09:30"), "u1")
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = NewBooking::parse(None, Some("A-101"), Some("08:30-09:30"), "u1").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn new_booking_trims_classroom_and_parses_slot() {
        let b = NewBooking::parse(Some("2024-03-01"), Some(" A-101 "), Some("13:30-14:30"), "u1")
            .unwrap();
        assert_eq!(b.classroom, "A-101");
        assert_eq!(b.time_slot, TimeSlot::At1330);
        assert_eq!(b.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn new_booking_with_bad_slot_is_invalid_slot() {
        let err = NewBooking::parse(Some("2024-03-01"), Some("A-101"), Some("07:00-08:00"), "u1")
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidSlot(_)));
    }
}

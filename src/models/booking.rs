use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booking joined with the display name of its field.
#[derive(Debug, Deserialize, Serialize, Clone, FromRow)]
pub struct BookingDetails {
    pub booking_id: i32,
    pub user_id: i32,
    pub field_id: i32,
    pub field_name: String,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub total_price: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of a booking: `pending -> paid`.
///
/// `Confirmed` is accepted by the payment transition but nothing in this
/// service ever writes it. `Cancelled` is only written by outside tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Paid,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that hold their slot against new bookings.
    pub const LIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Paid => "paid",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_payable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "paid" => Ok(BookingStatus::Paid),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", true)]
    #[case("confirmed", true)]
    #[case("paid", false)]
    #[case("cancelled", false)]
    fn payable_statuses(#[case] raw: &str, #[case] payable: bool) {
        let status: BookingStatus = raw.parse().unwrap();
        assert_eq!(status.is_payable(), payable);
        assert_eq!(status.to_string(), raw);
    }

    #[rstest]
    fn live_statuses_hold_slots() {
        assert!(BookingStatus::LIVE.contains(&BookingStatus::Pending));
        assert!(BookingStatus::LIVE.contains(&BookingStatus::Paid));
        assert!(!BookingStatus::LIVE.contains(&BookingStatus::Cancelled));
    }
}

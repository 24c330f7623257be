use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::info;

use crate::database::{self, PostgreDatabase};
use crate::models::{
    dto::{BookingResponse, NewBooking},
    BookingStatus, Error,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DATE_SHAPE: &str = "dddd-dd-dd";
const TIME_SHAPE: &str = "dd:dd";

/// Half-open interval `[start, end)` a booking occupies on its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Slot {
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}

/// A booking request that passed every syntactic and temporal check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub field_id: i32,
    pub date: NaiveDate,
    pub slot: Slot,
}

/// Checks a request in a fixed order, stopping at the first failure.
///
/// Only the start instant is compared against `now`.
pub fn validate(request: &NewBooking, now: NaiveDateTime) -> Result<ValidBooking, Error> {
    if request.field_id <= 0 {
        return Err(Error::invalid_input("Invalid field ID"));
    }

    let date = parse_strict(&request.booking_date, DATE_SHAPE, |raw| {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
    })
    .ok_or_else(|| Error::invalid_input("Invalid booking date format. Use YYYY-MM-DD"))?;
    let start = parse_strict(&request.start_time, TIME_SHAPE, |raw| {
        NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
    })
    .ok_or_else(|| Error::invalid_input("Invalid start time format. Use HH:MM"))?;
    let end = parse_strict(&request.end_time, TIME_SHAPE, |raw| {
        NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
    })
    .ok_or_else(|| Error::invalid_input("Invalid end time format. Use HH:MM"))?;

    if end <= start {
        return Err(Error::invalid_input("End time must be after start time"));
    }

    if date.and_time(start) < now {
        return Err(Error::invalid_input("Cannot book in the past"));
    }

    Ok(ValidBooking {
        field_id: request.field_id,
        date,
        slot: Slot { start, end },
    })
}

/// Parses `raw` only when it matches `shape` exactly, `d` standing for one ASCII digit.
///
/// chrono alone accepts signed years, single-digit components and padding.
fn parse_strict<T>(raw: &str, shape: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let matches = raw.len() == shape.len()
        && raw.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            _ => c == s,
        });
    if matches {
        parse(raw)
    } else {
        None
    }
}

/// `hours * price_per_hour`, truncated toward zero.
///
/// Totals that do not fit the stored integer are rejected rather than clamped.
pub fn total_price(slot: &Slot, price_per_hour: i32) -> Result<i32, Error> {
    let exact = (slot.duration_hours() * f64::from(price_per_hour)) as i64;
    i32::try_from(exact)
        .map_err(|_| Error::invalid_input("Total price exceeds the supported range"))
}

pub fn format_duration(hours: f64) -> String {
    format!("{hours:.1} hours")
}

/// Validates, checks availability, prices and stores a booking owned by `caller_id`.
///
/// The field row is locked before the overlap check so the check and the
/// insert commit as one unit.
pub async fn create_booking(
    db: &PostgreDatabase,
    caller_id: i32,
    request: &NewBooking,
    now: NaiveDateTime,
) -> Result<BookingResponse, Error> {
    let booking = validate(request, now)?;

    let mut tx = db.begin().await?;

    let field = database::find_field_for_update(&mut tx, booking.field_id)
        .await?
        .ok_or_else(|| Error::not_found("Field not found"))?;

    let taken = database::find_live_slots(&mut tx, booking.field_id, booking.date).await?;
    if taken.iter().any(|slot| booking.slot.overlaps(slot)) {
        return Err(Error::conflict("Field is already booked at the selected time"));
    }

    let price = total_price(&booking.slot, field.price_per_hour)?;
    let booking_id = database::insert_booking(&mut tx, caller_id, &booking, price).await?;
    tx.commit().await?;

    info!(
        booking_id,
        field_id = field.field_id,
        user_id = caller_id,
        total_price = price,
        "booking created"
    );

    Ok(BookingResponse {
        booking_id,
        field_id: field.field_id,
        field_name: field.name,
        location: field.location,
        booking_date: booking.date.format(DATE_FORMAT).to_string(),
        start_time: booking.slot.start.format(TIME_FORMAT).to_string(),
        end_time: booking.slot.end.format(TIME_FORMAT).to_string(),
        duration: format_duration(booking.slot.duration_hours()),
        total_price: price,
        status: BookingStatus::Pending.to_string(),
    })
}

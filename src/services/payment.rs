use tracing::info;

use crate::database::{self, PostgreDatabase};
use crate::models::{BookingDetails, BookingStatus, Error};

/// Rejects every status the payment transition may not start from.
pub fn ensure_payable(raw_status: &str) -> Result<BookingStatus, Error> {
    match raw_status.parse::<BookingStatus>() {
        Ok(status) if status.is_payable() => Ok(status),
        _ => Err(Error::invalid_input(&format!(
            "Cannot update payment for booking with status: {raw_status}. Only 'confirmed' or 'pending' bookings can be paid."
        ))),
    }
}

/// Moves a booking to `paid` and returns it joined with its field's name.
pub async fn mark_paid(db: &PostgreDatabase, booking_id: i32) -> Result<BookingDetails, Error> {
    if booking_id <= 0 {
        return Err(Error::invalid_input("Invalid booking ID"));
    }

    let mut tx = db.begin().await?;

    let current = database::find_booking_status_for_update(&mut tx, booking_id)
        .await?
        .ok_or_else(|| Error::not_found("Booking not found"))?;
    let previous = ensure_payable(&current)?;

    let details = database::mark_paid(&mut tx, booking_id).await?;
    tx.commit().await?;

    info!(booking_id, from = %previous, "booking paid");
    Ok(details)
}

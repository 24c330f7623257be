use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgConnection, Result};

use crate::services::booking::{Slot, ValidBooking};
use crate::models::{BookingDetails, BookingStatus};

/// Slots held on `field_id` and `date` by bookings that are still live.
pub async fn find_live_slots(
    conn: &mut PgConnection,
    field_id: i32,
    date: NaiveDate,
) -> Result<Vec<Slot>> {
    let live: Vec<&str> = BookingStatus::LIVE.iter().map(|s| s.as_str()).collect();
    let rows: Vec<(NaiveTime, NaiveTime)> = sqlx::query_as(
        r#"
        SELECT start_time, end_time
        FROM bookings
        WHERE field_id = $1
          AND booking_date = $2
          AND status = ANY($3)
        ORDER BY start_time
        "#,
    )
    .bind(field_id)
    .bind(date)
    .bind(&live[..])
    .fetch_all(conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(start, end)| Slot { start, end })
        .collect())
}

/// Inserts a `pending` booking and returns its id
pub async fn insert_booking(
    conn: &mut PgConnection,
    user_id: i32,
    booking: &ValidBooking,
    total_price: i32,
) -> Result<i32> {
    let (booking_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO bookings (user_id, field_id, booking_date, start_time, end_time, total_price, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING booking_id
        "#,
    )
    .bind(user_id)
    .bind(booking.field_id)
    .bind(booking.date)
    .bind(booking.slot.start)
    .bind(booking.slot.end)
    .bind(total_price)
    .bind(BookingStatus::Pending.as_str())
    .fetch_one(conn)
    .await?;
    Ok(booking_id)
}

/// Current raw status of a booking, locking its row for the rest of the transaction
pub async fn find_booking_status_for_update(
    conn: &mut PgConnection,
    booking_id: i32,
) -> Result<Option<String>> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT status FROM bookings WHERE booking_id = $1 FOR UPDATE")
            .bind(booking_id)
            .fetch_optional(conn)
            .await?;
    Ok(row.map(|(status,)| status))
}

/// Sets the booking to `paid` and returns it joined with its field's name
pub async fn mark_paid(conn: &mut PgConnection, booking_id: i32) -> Result<BookingDetails> {
    sqlx::query_as::<_, BookingDetails>(
        r#"
        WITH updated AS (
            UPDATE bookings
            SET status = $2
            WHERE booking_id = $1
            RETURNING booking_id, user_id, field_id, booking_date, start_time, end_time,
                      total_price, status, created_at
        )
        SELECT u.booking_id, u.user_id, u.field_id, f.name AS field_name,
               u.booking_date, u.start_time, u.end_time,
               u.total_price, u.status, u.created_at
        FROM updated u
        JOIN fields f ON f.field_id = u.field_id
        "#,
    )
    .bind(booking_id)
    .bind(BookingStatus::Paid.as_str())
    .fetch_one(conn)
    .await
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::BookingDetails;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewPayment {
    pub booking_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub booking_id: i32,
    pub user_id: i32,
    pub field_id: i32,
    pub field_name: String,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub total_price: i32,
    pub status: String,
}

impl From<BookingDetails> for PaymentResponse {
    fn from(details: BookingDetails) -> Self {
        Self {
            booking_id: details.booking_id,
            user_id: details.user_id,
            field_id: details.field_id,
            field_name: details.field_name,
            booking_date: details.booking_date.format("%Y-%m-%d").to_string(),
            start_time: details.start_time.format("%H:%M").to_string(),
            end_time: details.end_time.format("%H:%M").to_string(),
            total_price: details.total_price,
            status: details.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentEnvelope {
    pub message: String,
    pub payment: PaymentResponse,
}

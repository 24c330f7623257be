use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewBooking {
    pub field_id: i32,
    #[schema(example = "2025-06-01")]
    pub booking_date: String,
    #[schema(example = "18:00")]
    pub start_time: String,
    #[schema(example = "20:00")]
    pub end_time: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub booking_id: i32,
    pub field_id: i32,
    pub field_name: String,
    pub location: String,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    #[schema(example = "2.0 hours")]
    pub duration: String,
    pub total_price: i32,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingEnvelope {
    pub message: String,
    pub booking: BookingResponse,
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use chrono::Local;
use tracing::debug;
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{BookingEnvelope, ErrorMessage, NewBooking},
        Error,
    },
    services::booking,
    AppState,
};

use super::middlewares::{auth_guard, CurrentUser};

#[derive(OpenApi)]
#[openapi(paths(create_booking_handler))]
/// Defines the OpenAPI spec for booking endpoints
pub struct BookingsApi;

/// Used to group booking endpoints together in the OpenAPI documentation
pub const BOOKING_API_GROUP: &str = "BOOKING";

/// Builds a router for booking routes
pub fn booking_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_booking_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
}

/// Create booking handler function
#[utoipa::path(
    post,
    path = "/bookings",
    tag = BOOKING_API_GROUP,
    request_body = NewBooking,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 201, description = "Booking successfully created", body = BookingEnvelope),
        (status = 400, description = "Invalid booking request", body = ErrorMessage),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 404, description = "Field not found", body = ErrorMessage),
        (status = 409, description = "Slot overlaps an existing booking", body = ErrorMessage),
    )
)]
pub async fn create_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<NewBooking>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = body?;
    debug!(user_id = user.user_id, email = %user.email, role = %user.role, "booking requested");
    let now = Local::now().naive_local();
    let booking = booking::create_booking(&state.db, user.user_id, &body, now).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingEnvelope {
            message: "Booking created successfully".to_owned(),
            booking,
        }),
    ))
}

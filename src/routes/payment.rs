use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::post,
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{ErrorMessage, NewPayment, PaymentEnvelope, PaymentResponse},
        Error,
    },
    services::payment,
    AppState,
};

use super::middlewares::auth_guard;

#[derive(OpenApi)]
#[openapi(paths(pay_booking_handler))]
/// Defines the OpenAPI spec for payment endpoints
pub struct PaymentsApi;

/// Used to group payment endpoints together in the OpenAPI documentation
pub const PAYMENT_API_GROUP: &str = "PAYMENT";

/// Builds a router for payment routes
pub fn payment_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(pay_booking_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
}

/// Marks a booking as paid
#[utoipa::path(
    post,
    path = "/payments",
    tag = PAYMENT_API_GROUP,
    request_body = NewPayment,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Booking paid", body = PaymentEnvelope),
        (status = 400, description = "Invalid id or booking not payable", body = ErrorMessage),
        (status = 404, description = "Booking not found", body = ErrorMessage),
    )
)]
pub async fn pay_booking_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewPayment>, JsonRejection>,
) -> Result<Json<PaymentEnvelope>, Error> {
    let Json(body) = body?;
    let details = payment::mark_paid(&state.db, body.booking_id).await?;

    Ok(Json(PaymentEnvelope {
        message: "Payment completed successfully".to_owned(),
        payment: PaymentResponse::from(details),
    }))
}

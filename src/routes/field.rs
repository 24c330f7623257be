use std::sync::Arc;

use crate::{
    models::{
        dto::{ErrorMessage, FieldEnvelope, FieldInfo, FieldListResponse, FieldResponse, Message},
        Error,
    },
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::info;
use utoipa::OpenApi;

use super::middlewares::admin_guard;

#[derive(OpenApi)]
#[openapi(paths(
    list_fields_handler,
    get_field_handler,
    create_field_handler,
    update_field_handler,
    delete_field_handler
))]
/// Defines the OpenAPI spec for field endpoints
pub struct FieldsApi;

/// Used to group field endpoints together in the OpenAPI documentation
pub const FIELD_API_GROUP: &str = "FIELD";

/// Builds a router for all the field routes; reads are public, writes need an admin
pub fn field_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin_only = || middleware::from_fn_with_state(state.clone(), admin_guard);
    Router::new()
        .route(
            "/",
            get(list_fields_handler).merge(post(create_field_handler).route_layer(admin_only())),
        )
        .route(
            "/:id",
            get(get_field_handler)
                .merge(put(update_field_handler).route_layer(admin_only()))
                .merge(delete(delete_field_handler).route_layer(admin_only())),
        )
}

/// Parses a path id; non-numeric ids are rejected with a JSON error body
pub fn parse_field_id(raw: &str) -> Result<i32, Error> {
    raw.parse::<i32>()
        .map_err(|_| Error::invalid_input("Invalid field ID"))
}

/// Validates a create/update payload
pub fn validate_field(body: &FieldInfo) -> Result<(), Error> {
    if body.name.trim().is_empty() {
        return Err(Error::invalid_input("Field name is required"));
    }
    if body.price_per_hour <= 0 {
        return Err(Error::invalid_input(
            "Price per hour must be greater than 0",
        ));
    }
    if body.location.trim().is_empty() {
        return Err(Error::invalid_input("Location is required"));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/fields",
    tag = FIELD_API_GROUP,
    responses(
        (status = 200, description = "All fields", body = FieldListResponse),
    )
)]
pub async fn list_fields_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FieldListResponse>, Error> {
    let fields: Vec<FieldResponse> = state
        .db
        .list_fields()
        .await?
        .into_iter()
        .map(FieldResponse::from)
        .collect();

    Ok(Json(FieldListResponse {
        message: "Fields retrieved successfully".to_owned(),
        count: fields.len(),
        fields,
    }))
}

#[utoipa::path(
    get,
    path = "/fields/{id}",
    tag = FIELD_API_GROUP,
    params(
        ("id" = i32, Path, description = "Field ID")
    ),
    responses(
        (status = 200, description = "Field found", body = FieldEnvelope),
        (status = 400, description = "Invalid field ID", body = ErrorMessage),
        (status = 404, description = "Field not found", body = ErrorMessage),
    )
)]
pub async fn get_field_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FieldEnvelope>, Error> {
    let id = parse_field_id(&id)?;
    let field = state.db.get_field_by_id(id).await?;
    let field = field.ok_or((StatusCode::NOT_FOUND, "Field not found"))?;

    Ok(Json(FieldEnvelope {
        message: "Field retrieved successfully".to_owned(),
        field: FieldResponse::from(field),
    }))
}

#[utoipa::path(
    post,
    path = "/fields",
    tag = FIELD_API_GROUP,
    request_body = FieldInfo,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 201, description = "Field successfully created", body = FieldEnvelope),
        (status = 400, description = "Invalid field data", body = ErrorMessage),
        (status = 401, description = "Missing or invalid token", body = ErrorMessage),
        (status = 403, description = "Admin role required", body = ErrorMessage),
    )
)]
pub async fn create_field_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FieldInfo>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = body?;
    validate_field(&body)?;

    let field = state.db.create_field(&body).await?;
    info!(field_id = field.field_id, "field created");

    Ok((
        StatusCode::CREATED,
        Json(FieldEnvelope {
            message: "Field created successfully".to_owned(),
            field: FieldResponse::from(field),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/fields/{id}",
    tag = FIELD_API_GROUP,
    params(
        ("id" = i32, Path, description = "Field ID")
    ),
    request_body = FieldInfo,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Field successfully updated", body = FieldEnvelope),
        (status = 400, description = "Invalid field data", body = ErrorMessage),
        (status = 404, description = "Field not found", body = ErrorMessage),
    )
)]
pub async fn update_field_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<FieldInfo>, JsonRejection>,
) -> Result<Json<FieldEnvelope>, Error> {
    let id = parse_field_id(&id)?;
    let Json(body) = body?;
    validate_field(&body)?;

    let field = state
        .db
        .update_field(id, &body)
        .await?
        .ok_or_else(|| Error::not_found("Field not found"))?;

    Ok(Json(FieldEnvelope {
        message: "Field updated successfully".to_owned(),
        field: FieldResponse::from(field),
    }))
}

#[utoipa::path(
    delete,
    path = "/fields/{id}",
    tag = FIELD_API_GROUP,
    params(
        ("id" = i32, Path, description = "Field ID")
    ),
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Field deleted", body = Message),
        (status = 404, description = "Field not found", body = ErrorMessage),
        (status = 409, description = "Field still has bookings", body = ErrorMessage),
    )
)]
pub async fn delete_field_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, Error> {
    let id = parse_field_id(&id)?;
    if !state.db.delete_field(id).await? {
        return Err(Error::not_found("Field not found"));
    }
    info!(field_id = id, "field deleted");
    Ok(Json(Message::new("Field deleted successfully")))
}

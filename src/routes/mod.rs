mod booking;
mod field;
mod health;
mod middlewares;
mod payment;
mod swagger;
mod user;
use crate::database;
use health::{health_checker_handler, root_handler};
use tracing::info;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, Config};

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::get,
    Router,
};
use std::sync::Arc;

/// Connects to PostgreSQL, applies migrations and wires every route onto a shared state.
pub async fn make_app(config: Config) -> anyhow::Result<Router> {
    info!("Connecting to PostgreSQL...");
    let sqlx_db_connection = database::connect_sqlx(&config).await?;
    info!("Connected to PostgreSQL!");
    database::migrate(&sqlx_db_connection).await?;
    info!("Schema is up to date");

    let db = database::PostgreDatabase::new(sqlx_db_connection);
    let state = Arc::new(AppState { db, config });
    Ok(router(state))
}

/// Builds the full router over an already constructed state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_checker_handler))
        .nest("/auth", user::user_routes())
        .nest("/admin/auth", user::admin_routes())
        .nest("/fields", field::field_routes(state.clone()))
        .nest("/bookings", booking::booking_routes(state.clone()))
        .nest("/payments", payment::payment_routes(state.clone()))
        .merge(swagger::build_documentation())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{AuthResponse, AuthUser, ErrorMessage, LoginInfo, RegisterInfo},
        Error, NewUser, Role, TokenClaim,
    },
    AppState,
};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(OpenApi)]
#[openapi(paths(register_user_handler, register_admin_handler, login_handler))]
/// Defines the OpenAPI spec for authentication endpoints
pub struct UsersApi;

/// Used to group auth endpoints together in the OpenAPI documentation
pub const AUTH_API_GROUP: &str = "AUTH";

/// Routes mounted under `/auth`
pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register_user_handler))
        .route("/login", get(login_handler).post(login_handler))
}

/// Routes mounted under `/admin/auth`
pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/register", post(register_admin_handler))
}

// Register user handler function
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = AUTH_API_GROUP,
    request_body = RegisterInfo,
    responses(
        (status = 201, description = "User successfully created", body = AuthResponse),
        (status = 400, description = "Invalid registration data", body = ErrorMessage),
        (status = 409, description = "Email already registered", body = ErrorMessage),
    )
)]
pub async fn register_user_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterInfo>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = body?;
    register(&state, body, Role::User).await
}

// Register admin handler function
#[utoipa::path(
    post,
    path = "/admin/auth/register",
    tag = AUTH_API_GROUP,
    request_body = RegisterInfo,
    responses(
        (status = 201, description = "Admin successfully created", body = AuthResponse),
        (status = 400, description = "Invalid registration data", body = ErrorMessage),
        (status = 409, description = "Email already registered", body = ErrorMessage),
    )
)]
pub async fn register_admin_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterInfo>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = body?;
    register(&state, body, Role::Admin).await
}

/// Checks the registration payload and returns the normalized email.
pub fn validate_registration(body: &RegisterInfo) -> Result<String, Error> {
    if body.username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(Error::invalid_input(
            "Username must be at least 3 characters",
        ));
    }
    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::invalid_input(
            "Password must be at least 6 characters",
        ));
    }
    let email = normalize_email(&body.email);
    if email.is_empty() {
        return Err(Error::invalid_input("Email is required"));
    }
    Ok(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

async fn register(
    state: &AppState,
    body: RegisterInfo,
    role: Role,
) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    let email = validate_registration(&body)?;

    if state.db.email_exists(&email).await? {
        return Err(Error::conflict("Email already registered"));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(body.password.as_bytes(), &salt)?
        .to_string();

    let user = state
        .db
        .create_user(&NewUser {
            username: body.username.trim().to_owned(),
            email,
            password_hash,
            role,
        })
        .await?;

    let token = TokenClaim::new(user.user_id, &user.email, role).encode(&state.config.jwt_secret)?;
    info!(user_id = user.user_id, %role, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_owned(),
            user: AuthUser {
                email: user.email,
                token,
            },
        }),
    ))
}

// Login handler function
#[utoipa::path(
    get,
    path = "/auth/login",
    tag = AUTH_API_GROUP,
    request_body = LoginInfo,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 401, description = "Invalid email or password", body = ErrorMessage),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginInfo>, JsonRejection>,
) -> Result<Json<AuthResponse>, Error> {
    let Json(body) = body?;
    let rejected = || Error::unauthorized("Invalid email or password");

    let email = normalize_email(&body.email);
    let Some(user) = state.db.get_user_by_email(&email).await? else {
        warn!("login attempt for unknown email");
        return Err(rejected());
    };

    let hash = PasswordHash::new(&user.password_hash)?;
    if Argon2::default()
        .verify_password(body.password.as_bytes(), &hash)
        .is_err()
    {
        warn!(user_id = user.user_id, "login attempt with wrong password");
        return Err(rejected());
    }

    let role: Role = user
        .role
        .parse()
        .map_err(|e: String| Error::internal(&e))?;
    let token = TokenClaim::new(user.user_id, &user.email, role).encode(&state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_owned(),
        user: AuthUser {
            email: user.email,
            token,
        },
    }))
}

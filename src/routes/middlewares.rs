use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    models::{Error, Role, TokenClaim},
    AppState,
};

/// Identity resolved from a verified bearer token, stored as a request extension.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

/// Resolves the caller from the `Authorization` header and checks it holds `required`.
pub fn authorize(headers: &HeaderMap, secret: &str, required: Role) -> Result<CurrentUser, Error> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("unauthorized"))?
        .to_str()
        .map_err(|_| Error::unauthorized("invalid token"))?;

    let token = match header.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => token.trim(),
        Some((_, _)) | None => return Err(Error::unauthorized("invalid token")),
    };

    let claims = TokenClaim::decode(secret, token)?;
    let role: Role = claims.role.parse().map_err(|_| forbidden(required))?;
    if !role.satisfies(required) {
        return Err(forbidden(required));
    }

    Ok(CurrentUser {
        user_id: claims.user_id,
        email: claims.email,
        role,
    })
}

fn forbidden(required: Role) -> Error {
    Error::forbidden(&format!("access forbidden - {required} role required"))
}

async fn guard(state: &AppState, required: Role, mut req: Request, next: Next) -> Result<Response, Error> {
    let user = authorize(req.headers(), &state.config.jwt_secret, required)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Admits any authenticated caller (`user` or `admin`).
pub async fn auth_guard(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, Error> {
    guard(&state, Role::User, req, next).await
}

/// Admits only callers holding the `admin` role.
pub async fn admin_guard(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, Error> {
    guard(&state, Role::Admin, req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use rstest::rstest;

    const SECRET: &str = "guard-secret";

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        map
    }

    fn bearer(role: Role) -> HeaderMap {
        let token = TokenClaim::new(42, "kim@example.com", role).encode(SECRET).unwrap();
        headers(&format!("Bearer {token}"))
    }

    #[rstest]
    fn missing_header_is_unauthorized() {
        let err = authorize(&HeaderMap::new(), SECRET, Role::User).unwrap_err();
        assert_eq!(err.code, StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("Bearer")]
    #[case("Bearer ")]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("Token abc")]
    #[case("Bearer not.a.jwt")]
    fn garbled_header_is_unauthorized(#[case] value: &str) {
        let err = authorize(&headers(value), SECRET, Role::User).unwrap_err();
        assert_eq!(err.code, StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    fn user_token_resolves_identity() {
        let user = authorize(&bearer(Role::User), SECRET, Role::User).unwrap();
        assert_eq!(
            user,
            CurrentUser {
                user_id: 42,
                email: "kim@example.com".to_owned(),
                role: Role::User,
            }
        );
    }

    #[rstest]
    fn admin_passes_user_gate() {
        let user = authorize(&bearer(Role::Admin), SECRET, Role::User).unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[rstest]
    fn user_is_forbidden_from_admin_gate() {
        let err = authorize(&bearer(Role::User), SECRET, Role::Admin).unwrap_err();
        assert_eq!(err.code, StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "access forbidden - admin role required");
    }

    #[rstest]
    fn unknown_role_is_forbidden() {
        let mut claims = TokenClaim::new(1, "x@y.z", Role::User);
        claims.role = "guest".to_owned();
        let token = claims.encode(SECRET).unwrap();

        let err = authorize(&headers(&format!("Bearer {token}")), SECRET, Role::User).unwrap_err();
        assert_eq!(err.code, StatusCode::FORBIDDEN);
    }

    #[rstest]
    fn token_signed_elsewhere_is_unauthorized() {
        let token = TokenClaim::new(1, "x@y.z", Role::Admin)
            .encode("someone-else")
            .unwrap();
        let err = authorize(&headers(&format!("Bearer {token}")), SECRET, Role::Admin).unwrap_err();
        assert_eq!(err.code, StatusCode::UNAUTHORIZED);
    }
}

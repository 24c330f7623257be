//! Shared fixtures for unit tests.
//!
//! `test_state` owns a lazily connected pool, so router tests can exercise
//! the access gate and request validation without a live database. The
//! seeding helpers run against the per-test database `#[sqlx::test]` provides.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::PostgresConfig;
use crate::database::PostgreDatabase;
use crate::models::{
    dto::{BookingResponse, FieldInfo, NewBooking},
    Error, Field, NewUser, Role, TokenClaim,
};
use crate::services::booking::create_booking;
use crate::{AppState, Config};

pub const TEST_SECRET: &str = "unit-test-secret";

pub fn test_config() -> Config {
    Config {
        app_port: 0,
        jwt_secret: TEST_SECRET.to_owned(),
        postgres: PostgresConfig {
            host: "127.0.0.1".to_owned(),
            port: 1,
            db_name: "field_booking_test".to_owned(),
            username: "postgres".to_owned(),
            password: "postgres".to_owned(),
        },
    }
}

/// Must be called inside a Tokio runtime.
pub fn test_state() -> Arc<AppState> {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(config.pg_connect_options());
    Arc::new(AppState {
        db: PostgreDatabase::new(pool),
        config,
    })
}

pub fn bearer(user_id: i32, role: Role) -> String {
    let token = TokenClaim::new(user_id, "tester@example.com", role)
        .encode(TEST_SECRET)
        .expect("token encodes");
    format!("Bearer {token}")
}

pub fn state_with_pool(pool: PgPool) -> Arc<AppState> {
    Arc::new(AppState {
        db: PostgreDatabase::new(pool),
        config: test_config(),
    })
}

pub async fn seed_user(db: &PostgreDatabase, email: &str) -> sqlx::Result<i32> {
    let user = db
        .create_user(&NewUser {
            username: "tester".to_owned(),
            email: email.to_owned(),
            password_hash: "not-a-real-hash".to_owned(),
            role: Role::User,
        })
        .await?;
    Ok(user.user_id)
}

pub async fn seed_field(db: &PostgreDatabase, price_per_hour: i32) -> sqlx::Result<Field> {
    db.create_field(&FieldInfo {
        name: "Court A".to_owned(),
        price_per_hour,
        location: "Senayan".to_owned(),
    })
    .await
}

/// Books `start..end` on 2025-06-02, as seen from the day before.
pub async fn seed_booking(
    db: &PostgreDatabase,
    user_id: i32,
    field_id: i32,
    start: &str,
    end: &str,
) -> Result<BookingResponse, Error> {
    let now = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|day| day.and_hms_opt(12, 0, 0))
        .expect("valid timestamp");
    let request = NewBooking {
        field_id,
        booking_date: "2025-06-02".to_owned(),
        start_time: start.to_owned(),
        end_time: end.to_owned(),
    };
    create_booking(db, user_id, &request, now).await
}

mod bookings;
mod fields;
mod users;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Result, Transaction};

use crate::Config;

pub use bookings::{find_booking_status_for_update, find_live_slots, insert_booking, mark_paid};
pub use fields::find_field_for_update;

/// Connects to PostgreSQL with the configured credentials, returning a connection pool for accessing it
pub async fn connect_sqlx(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(Duration::from_secs(30))
        .max_connections(32)
        .min_connections(4)
        .connect_with(config.pg_connect_options())
        .await
}

/// Applies the embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub struct PostgreDatabase {
    sqlx_db: PgPool,
}

impl PostgreDatabase {
    pub fn new(sqlx_db: PgPool) -> Self {
        PostgreDatabase { sqlx_db }
    }

    /// Opens a transaction; callers run the multi-statement flows of the
    /// booking core through it.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.sqlx_db.begin().await
    }
}

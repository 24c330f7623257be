use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Deserialize, Serialize, Clone, FromRow)]
pub struct Field {
    pub field_id: i32,
    pub name: String,
    pub price_per_hour: i32,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

use sqlx::{PgConnection, Result};

use super::PostgreDatabase;
use crate::models::{dto::FieldInfo, Field};

impl PostgreDatabase {
    pub async fn create_field(&self, field: &FieldInfo) -> Result<Field> {
        sqlx::query_as::<_, Field>(
            r#"
            INSERT INTO fields (name, price_per_hour, location)
            VALUES ($1, $2, $3)
            RETURNING field_id, name, price_per_hour, location, created_at
            "#,
        )
        .bind(&field.name)
        .bind(field.price_per_hour)
        .bind(&field.location)
        .fetch_one(&self.sqlx_db)
        .await
    }

    pub async fn list_fields(&self) -> Result<Vec<Field>> {
        sqlx::query_as::<_, Field>(
            r#"
            SELECT field_id, name, price_per_hour, location, created_at
            FROM fields
            ORDER BY field_id
            "#,
        )
        .fetch_all(&self.sqlx_db)
        .await
    }

    /// Get a field by ID
    pub async fn get_field_by_id(&self, field_id: i32) -> Result<Option<Field>> {
        sqlx::query_as::<_, Field>(
            r#"
            SELECT field_id, name, price_per_hour, location, created_at
            FROM fields
            WHERE field_id = $1
            "#,
        )
        .bind(field_id)
        .fetch_optional(&self.sqlx_db)
        .await
    }

    /// Replace every attribute of a field; `None` when the field does not exist
    pub async fn update_field(&self, field_id: i32, field: &FieldInfo) -> Result<Option<Field>> {
        sqlx::query_as::<_, Field>(
            r#"
            UPDATE fields
            SET name = $1,
                price_per_hour = $2,
                location = $3
            WHERE field_id = $4
            RETURNING field_id, name, price_per_hour, location, created_at
            "#,
        )
        .bind(&field.name)
        .bind(field.price_per_hour)
        .bind(&field.location)
        .bind(field_id)
        .fetch_optional(&self.sqlx_db)
        .await
    }

    /// Returns whether a row was removed
    pub async fn delete_field(&self, field_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM fields WHERE field_id = $1")
            .bind(field_id)
            .execute(&self.sqlx_db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Reads a field and holds a row lock on it until the transaction ends.
///
/// Booking creation takes this lock first, so concurrent bookings of one field
/// run their availability check and insert one after another.
pub async fn find_field_for_update(conn: &mut PgConnection, field_id: i32) -> Result<Option<Field>> {
    sqlx::query_as::<_, Field>(
        r#"
        SELECT field_id, name, price_per_hour, location, created_at
        FROM fields
        WHERE field_id = $1
        FOR UPDATE
        "#,
    )
    .bind(field_id)
    .fetch_optional(conn)
    .await
}

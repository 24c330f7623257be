use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Field;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct FieldInfo {
    pub name: String,
    #[schema(example = 100000)]
    pub price_per_hour: i32,
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldResponse {
    pub field_id: i32,
    pub name: String,
    pub price_per_hour: i32,
    pub location: String,
}

impl From<Field> for FieldResponse {
    fn from(field: Field) -> Self {
        Self {
            field_id: field.field_id,
            name: field.name,
            price_per_hour: field.price_per_hour,
            location: field.location,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldEnvelope {
    pub message: String,
    pub field: FieldResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldListResponse {
    pub message: String,
    pub fields: Vec<FieldResponse>,
    pub count: usize,
}

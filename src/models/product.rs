use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub category_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub price_in_cents: i64,
    /// Cloudinary reference in the form `<version>/<public id>`.
    pub image: String,
    pub sellable: bool,
    pub created_at: DateTime<Utc>,
}

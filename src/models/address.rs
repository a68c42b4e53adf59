use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Address {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub is_default: bool,
    pub label: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub street_number: Option<String>,
    pub district: Option<String>,
    pub city: String,
    pub postal_code: Option<String>,
    pub region: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAddress {
    pub is_default: bool,
    pub label: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub street_number: Option<String>,
    pub district: Option<String>,
    pub city: String,
    pub postal_code: Option<String>,
    pub region: String,
    pub country: String,
}

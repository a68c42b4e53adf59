use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Address, NewAddress};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    buyer_id: Uuid,
    address: &NewAddress,
) -> Result<Address, sqlx::Error> {
    sqlx::query_as::<_, Address>(
        "INSERT INTO addresses (
            id, buyer_id, is_default, label, address_line1, address_line2,
            street_number, district, city, postal_code, region, country
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(buyer_id)
    .bind(address.is_default)
    .bind(&address.label)
    .bind(&address.address_line1)
    .bind(&address.address_line2)
    .bind(&address.street_number)
    .bind(&address.district)
    .bind(&address.city)
    .bind(&address.postal_code)
    .bind(&address.region)
    .bind(&address.country)
    .fetch_one(executor)
    .await
}

/// Addresses for a buyer, default first.
pub async fn list_by_buyer(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<Address>, sqlx::Error> {
    sqlx::query_as::<_, Address>(
        "SELECT * FROM addresses WHERE buyer_id = $1 ORDER BY is_default DESC, created_at",
    )
    .bind(buyer_id)
    .fetch_all(pool)
    .await
}

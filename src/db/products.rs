use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Product;

/// Sellable products, newest first. `search_term` matches title or
/// description case-insensitively.
pub async fn list_sellable(
    pool: &PgPool,
    category_id: Option<i32>,
    search_term: Option<&str>,
) -> Result<Vec<Product>, sqlx::Error> {
    let pattern = search_term.map(|term| format!("%{}%", escape_like(term)));

    sqlx::query_as::<_, Product>(
        "SELECT * FROM products
         WHERE sellable
           AND ($1::int IS NULL OR category_id = $1)
           AND ($2::text IS NULL OR title ILIKE $2 OR description ILIKE $2)
         ORDER BY created_at DESC",
    )
    .bind(category_id)
    .bind(pattern)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    category_id: Option<i32>,
    title: &str,
    description: &str,
    price_in_cents: i64,
    image: &str,
    sellable: bool,
) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "INSERT INTO products (id, category_id, title, description, price_in_cents, image, sellable)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(category_id)
    .bind(title)
    .bind(description)
    .bind(price_in_cents)
    .bind(image)
    .bind(sellable)
    .fetch_one(pool)
    .await
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

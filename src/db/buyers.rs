use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Buyer;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Buyer, sqlx::Error> {
    sqlx::query_as::<_, Buyer>("INSERT INTO buyers (id, user_id) VALUES ($1, $2) RETURNING *")
        .bind(Uuid::now_v7())
        .bind(user_id)
        .fetch_one(executor)
        .await
}

pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Buyer>, sqlx::Error> {
    sqlx::query_as::<_, Buyer>("SELECT * FROM buyers WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

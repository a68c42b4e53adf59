use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewUser, User};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user: &NewUser,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (
            id, name, username, email, password_hash, person_type, cpf, cnpj,
            birth_date, gender, phone, whatsapp, alternate_phone, company_name,
            trade_name, state_registration, state_registration_exempt,
            pf_definition, pj_definition, marketing_opt_in
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&user.name)
    .bind(&user.username)
    .bind(&user.email)
    .bind(password_hash)
    .bind(&user.person_type)
    .bind(&user.cpf)
    .bind(&user.cnpj)
    .bind(user.birth_date)
    .bind(&user.gender)
    .bind(&user.phone)
    .bind(&user.whatsapp)
    .bind(&user.alternate_phone)
    .bind(&user.company_name)
    .bind(&user.trade_name)
    .bind(&user.state_registration)
    .bind(user.state_registration_exempt)
    .bind(&user.pf_definition)
    .bind(&user.pj_definition)
    .bind(user.marketing_opt_in)
    .fetch_one(executor)
    .await
}

/// Any user whose username or email equals `identity`.
pub async fn find_by_identity<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    identity: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 OR email = $1 LIMIT 1")
        .bind(identity)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

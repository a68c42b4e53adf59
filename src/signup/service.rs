use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::db;
use crate::db::accounts::CREDENTIALS_PROVIDER;
use crate::error::AppError;
use crate::models::UserSummary;

use super::Registration;

const DUPLICATE_MESSAGE: &str = "This username already exists";

/// Create the user, its buyer profile, the optional default address and the
/// credentials account. Everything but the duplicate check runs in one
/// transaction.
pub async fn register(pool: &PgPool, registration: &Registration) -> Result<UserSummary, AppError> {
    let username = &registration.user.username;

    if db::users::find_by_identity(pool, username).await?.is_some() {
        tracing::warn!(username = %username, "Signup rejected: username already exists");
        return Err(AppError::Conflict(DUPLICATE_MESSAGE.to_string()));
    }

    let pw_hash = password::hash(&registration.password).map_err(AppError::Internal)?;

    let mut tx = pool.begin().await?;

    let user = db::users::create(&mut *tx, &registration.user, &pw_hash)
        .await
        .map_err(duplicate_as_conflict)?;

    let buyer = db::buyers::create(&mut *tx, user.id).await?;

    if let Some(address) = &registration.address {
        db::addresses::create(&mut *tx, buyer.id, address).await?;
    }

    db::accounts::create(
        &mut *tx,
        user.id,
        CREDENTIALS_PROVIDER,
        &Uuid::now_v7().to_string(),
        CREDENTIALS_PROVIDER,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(UserSummary::from(&user))
}

/// A concurrent signup can pass the pre-check and still hit the unique index.
fn duplicate_as_conflict(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(DUPLICATE_MESSAGE.to_string())
        }
        _ => AppError::Database(err),
    }
}

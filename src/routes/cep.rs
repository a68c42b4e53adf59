use axum::extract::{Path, State};
use axum::Json;

use crate::address_lookup::{LookupError, PostalAddress};
use crate::brazil::{cep, only_digits};
use crate::error::AppError;
use crate::state::SharedState;

pub async fn lookup(
    State(state): State<SharedState>,
    Path(raw): Path<String>,
) -> Result<Json<PostalAddress>, AppError> {
    if !cep::is_valid(&raw) {
        return Err(AppError::BadRequest("Invalid CEP".to_string()));
    }

    let digits = only_digits(&raw);
    match state.address_lookup.lookup(&digits).await {
        Ok(address) => Ok(Json(address)),
        Err(LookupError::NotFound) => Err(AppError::NotFound("CEP not found".to_string())),
        Err(LookupError::Upstream(msg)) => Err(AppError::BadGateway(msg)),
    }
}

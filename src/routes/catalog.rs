use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::catalog::ProductCard;
use crate::db;
use crate::error::AppError;
use crate::models::Category;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ProductQuery {
    pub category: Option<i32>,
    pub q: Option<String>,
}

pub async fn list_categories(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = db::categories::list(&state.pool).await?;
    Ok(Json(categories))
}

/// A missing category is `null`, not a 404.
pub async fn get_category(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<Category>>, AppError> {
    if id < 1 {
        return Err(AppError::BadRequest("Category id must be at least 1".to_string()));
    }
    let category = db::categories::find_by_id(&state.pool, id).await?;
    Ok(Json(category))
}

pub async fn list_products(
    State(state): State<SharedState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductCard>>, AppError> {
    let term = query.q.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let products = db::products::list_sellable(&state.pool, query.category, term).await?;

    let cloud = &state.config.cloudinary_cloud_name;
    Ok(Json(
        products
            .iter()
            .map(|p| ProductCard::from_product(p, cloud))
            .collect(),
    ))
}

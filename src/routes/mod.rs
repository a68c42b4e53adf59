pub mod auth;
pub mod catalog;
pub mod cep;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route(
            "/api/signup",
            post(auth::signup).fallback(auth::method_not_allowed),
        )
        .route(
            "/api/login",
            post(auth::login).fallback(auth::method_not_allowed),
        )
        .route("/api/logout", post(auth::logout))
        .route("/api/me", get(auth::me))
        // Catalog
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/categories/{id}", get(catalog::get_category))
        .route("/api/products", get(catalog::list_products))
        // Address lookup
        .route("/api/cep/{cep}", get(cep::lookup))
}

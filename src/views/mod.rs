pub mod account;
pub mod auth;
pub mod home;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn public_routes() -> Router<SharedState> {
    Router::new()
        // Storefront
        .route("/", get(home::index))
        .route("/search", get(home::search))
        // Auth views
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/signup", get(auth::signup_page).post(auth::signup_submit))
        .route("/logout", post(auth::logout))
}

/// Pages that need a session; wrapped with the login redirect.
pub fn account_routes() -> Router<SharedState> {
    Router::new().route("/account", get(account::index))
}

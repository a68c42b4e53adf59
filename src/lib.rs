pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod brazil;
pub mod db;
pub mod models;
pub mod middleware;
pub mod routes;
pub mod views;
pub mod signup;
pub mod catalog;
pub mod media;
pub mod address_lookup;
pub mod client_ip;
pub mod rate_limit;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::address_lookup::AddressLookup;
use crate::config::Config;
use crate::middleware::auth_redirect::redirect_unauthorized;
use crate::rate_limit::{LoginRateLimiter, SignupRateLimiter};
use crate::state::{AppState, SharedState};

pub fn build_app(
    pool: PgPool,
    config: Config,
    address_lookup: Arc<dyn AddressLookup>,
) -> (Router, SharedState) {
    let state: SharedState = Arc::new(AppState {
        signup_limiter: SignupRateLimiter::new(config.signup_limit),
        login_limiter: LoginRateLimiter::new(),
        pool,
        config,
        address_lookup,
    });

    let max_body_size = state.config.max_body_size;

    let app = Router::new()
        .merge(routes::api_routes())
        .merge(views::public_routes())
        .merge(views::account_routes().layer(axum::middleware::from_fn(redirect_unauthorized)))
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_size))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
        .with_state(state.clone());

    (app, state)
}

/// Periodically drop stale rate limiter entries.
pub fn spawn_limiter_cleanup(state: SharedState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            state.signup_limiter.cleanup(Duration::from_secs(60 * 60));
            state.login_limiter.cleanup(Duration::from_secs(15 * 60));
        }
    })
}

async fn health() -> &'static str {
    "ok"
}

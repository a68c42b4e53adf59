use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookies, session_cookies};
use crate::auth::extractor::SessionUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::client_ip;
use crate::db;
use crate::error::AppError;
use crate::models::UserSummary;
use crate::signup::request::SignupRequest;
use crate::signup::{self, service, LOGIN_USERNAME_MAX, PASSWORD_MAX, PASSWORD_MIN};
use crate::state::SharedState;

const INVALID_INPUT: &str = "Something wrong with your input";

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn signup(
    State(state): State<SharedState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<UserSummary>, AppError> {
    let ip = client_ip::resolve(&headers, peer.ip(), &state.config.trusted_proxies);
    if let Err(retry_after) = state.signup_limiter.check(ip) {
        return Err(AppError::RateLimited(format!(
            "Too many signups. Retry after {retry_after}s"
        )));
    }

    let Json(req) = payload.map_err(|e| {
        tracing::warn!("Signup body rejected: {e}");
        AppError::BadRequest(INVALID_INPUT.to_string())
    })?;

    tracing::info!(
        username = %req.username,
        person_type = ?req.person_type,
        "Signup attempt"
    );

    let registration = req.validate().map_err(|errors| {
        tracing::warn!("Signup validation failed: {errors:?}");
        AppError::BadRequest(INVALID_INPUT.to_string())
    })?;

    let summary = service::register(&state.pool, &registration).await?;
    Ok(Json(summary))
}

pub async fn login(
    State(state): State<SharedState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<UserSummary>), AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::warn!("Login body rejected: {e}");
        AppError::BadRequest(INVALID_INPUT.to_string())
    })?;

    let summary = authenticate(&state, &req.username, &req.password).await?;
    let jar = issue_session(&state, &summary)?;
    Ok((jar, Json(summary)))
}

/// Check credentials. Wrong password is a 409 and counts towards the login
/// limiter; an unknown username is a 500 "No Such User".
pub async fn authenticate(
    state: &SharedState,
    username: &str,
    password_attempt: &str,
) -> Result<UserSummary, AppError> {
    check_credentials_shape(username, password_attempt)?;

    if state.login_limiter.check(username).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_username(&state.pool, username).await?;
    tracing::debug!(found = user.is_some(), "Login user lookup");

    let Some((user, hash)) = user.and_then(|u| u.password_hash.clone().map(|h| (u, h))) else {
        tracing::warn!(username = %username, "Login failed: no such user");
        return Err(AppError::UnknownUser("No Such User".to_string()));
    };

    let valid = password::verify(password_attempt, &hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(username);
        tracing::warn!(username = %username, "Login failed: invalid credentials");
        return Err(AppError::Conflict("Invalid Credentials".to_string()));
    }

    state.login_limiter.clear(username);
    tracing::info!(user_id = %user.id, "Login succeeded");
    Ok(UserSummary::from(&user))
}

/// Username 1..=50 and password 8..=64 characters, else 400.
fn check_credentials_shape(username: &str, password: &str) -> Result<(), AppError> {
    let username_len = signup::char_len(username);
    let password_len = signup::char_len(password);
    if username_len == 0
        || username_len > LOGIN_USERNAME_MAX
        || !(PASSWORD_MIN..=PASSWORD_MAX).contains(&password_len)
    {
        return Err(AppError::BadRequest(INVALID_INPUT.to_string()));
    }
    Ok(())
}

pub fn issue_session(state: &SharedState, user: &UserSummary) -> Result<CookieJar, AppError> {
    let token = encode_token(&Claims::for_user(user), &state.config.jwt_secret)
        .map_err(AppError::Internal)?;
    Ok(session_cookies(&token, state.config.secure_cookies))
}

pub async fn logout() -> (CookieJar, Json<MessageResponse>) {
    (
        clear_session_cookies(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

pub async fn me(SessionUser(user): SessionUser) -> Json<UserSummary> {
    Json(user)
}

/// Other methods on the signup and login endpoints get a 200 with a message.
pub async fn method_not_allowed() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "method not allowed".to_string(),
    })
}

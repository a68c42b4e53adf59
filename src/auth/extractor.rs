use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::jwt::{self, Claims};
use crate::error::AppError;
use crate::models::UserSummary;
use crate::state::SharedState;

/// The signed-in user, taken from a Bearer token or the session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser(pub UserSummary);

impl SessionUser {
    fn from_parts(parts: &Parts, secret: &str) -> Result<Self, AppError> {
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return decode(token, secret);
            }
        }

        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            return decode(cookie.value(), secret);
        }

        Err(AppError::Unauthorized("Not signed in".to_string()))
    }
}

fn decode(token: &str, secret: &str) -> Result<SessionUser, AppError> {
    let claims: Claims = jwt::decode_token(token, secret)
        .map_err(|_| AppError::Unauthorized("Invalid or expired session".to_string()))?;
    Ok(SessionUser(claims.summary()))
}

impl FromRequestParts<SharedState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        SessionUser::from_parts(parts, &state.config.jwt_secret)
    }
}

/// Pages that render differently for guests take `Option<SessionUser>`.
impl OptionalFromRequestParts<SharedState> for SessionUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(SessionUser::from_parts(parts, &state.config.jwt_secret).ok())
    }
}

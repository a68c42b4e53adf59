use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;

use super::jwt::SESSION_DAYS;

pub const SESSION_COOKIE: &str = "session";

pub fn session_cookies(token: &str, secure: bool) -> CookieJar {
    let session = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_DAYS))
        .build();

    CookieJar::new().add(session)
}

pub fn clear_session_cookies() -> CookieJar {
    let session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(session)
}

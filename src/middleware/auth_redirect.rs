use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Send signed-out browsers on account pages to the login page, remembering
/// where they were headed in `next`.
pub async fn redirect_unauthorized(req: Request, next: Next) -> Response {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    let response = next.run(req).await;
    if response.status() == StatusCode::UNAUTHORIZED {
        Redirect::to(&login_url(&target)).into_response()
    } else {
        response
    }
}

/// `/login` with `target` form-encoded into `next`.
pub fn login_url(target: &str) -> String {
    let next: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("/login?next={next}")
}

/// Only same-site absolute paths may be used as a post-login destination.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::{login_url, safe_next};

    #[test]
    fn login_url_encodes_path_and_query() {
        assert_eq!(login_url("/account"), "/login?next=%2Faccount");
        assert_eq!(
            login_url("/account?tab=enderecos&x=1"),
            "/login?next=%2Faccount%3Ftab%3Denderecos%26x%3D1"
        );
    }

    #[test]
    fn keeps_local_paths() {
        assert_eq!(safe_next(Some("/account")), "/account");
    }

    #[test]
    fn rejects_offsite_destinations() {
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(Some("/\\evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}

use std::net::SocketAddr;

use askama::Template;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::auth::cookie::clear_session_cookies;
use crate::auth::extractor::SessionUser;
use crate::client_ip;
use crate::error::AppError;
use crate::middleware::auth_redirect::safe_next;
use crate::models::UserSummary;
use crate::routes::auth::{authenticate, issue_session};
use crate::signup::form::{FieldErrors, SignupForm, GENDERS};
use crate::signup::{service, BusinessDefinition, PersonType};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "auth/login.html")]
#[allow(dead_code)]
struct LoginTemplate {
    user: Option<UserSummary>,
    username: String,
    next: String,
    error: Option<String>,
}

#[allow(dead_code)]
struct DefinitionOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[allow(dead_code)]
struct GenderOption {
    value: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
#[allow(dead_code)]
struct SignupTemplate {
    user: Option<UserSummary>,
    is_company: bool,
    form: SignupForm,
    errors: FieldErrors,
    error: Option<String>,
    definitions: Vec<DefinitionOption>,
    genders: Vec<GenderOption>,
}

impl SignupTemplate {
    fn new(form: SignupForm, errors: FieldErrors, error: Option<String>) -> Self {
        let definitions = BusinessDefinition::ALL
            .iter()
            .map(|d| DefinitionOption {
                value: d.as_str(),
                label: d.label(),
                selected: form.definition == d.as_str(),
            })
            .collect();
        let genders = GENDERS
            .iter()
            .map(|g| GenderOption {
                value: *g,
                selected: form.gender == *g,
            })
            .collect();

        SignupTemplate {
            user: None,
            is_company: form.person_type() == PersonType::PJ,
            form,
            errors,
            error,
            definitions,
            genders,
        }
    }

    /// Message for a field, empty when it is fine.
    fn err(&self, field: &str) -> &str {
        self.errors.get(field).unwrap_or("")
    }
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct SignupQuery {
    pub tipo: Option<String>,
}

fn render_login(username: String, next: String, error: Option<String>) -> Html<String> {
    let template = LoginTemplate {
        user: None,
        username,
        next,
        error,
    };
    Html(template.render().unwrap_or_default())
}

pub async fn login_page(session: Option<SessionUser>, Query(q): Query<LoginQuery>) -> Response {
    if session.is_some() {
        return Redirect::to("/").into_response();
    }
    let next = safe_next(q.next.as_deref()).to_string();
    render_login(String::new(), next, None).into_response()
}

pub async fn login_submit(State(state): State<SharedState>, Form(form): Form<LoginForm>) -> Response {
    let next = safe_next(form.next.as_deref()).to_string();

    let result = authenticate(&state, form.username.trim(), &form.password).await;
    let summary = match result {
        Ok(summary) => summary,
        Err(err) => {
            let (status, message) = match err {
                AppError::Conflict(_) => (
                    StatusCode::CONFLICT,
                    "Credenciais inválidas. Verifique usuário e senha.",
                ),
                AppError::BadRequest(_) => (
                    StatusCode::BAD_REQUEST,
                    "Entrada inválida. Corrija os campos e tente novamente.",
                ),
                AppError::UnknownUser(_) => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
                AppError::RateLimited(_) => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "Muitas tentativas. Tente novamente mais tarde.",
                ),
                other => {
                    tracing::error!("Login page error: {other}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Erro inesperado ao fazer login.",
                    )
                }
            };
            let page = render_login(form.username, next, Some(message.to_string()));
            return (status, page).into_response();
        }
    };

    match issue_session(&state, &summary) {
        Ok(jar) => (jar, Redirect::to(&next)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn signup_page(session: Option<SessionUser>, Query(q): Query<SignupQuery>) -> Response {
    if session.is_some() {
        return Redirect::to("/").into_response();
    }

    let form = SignupForm {
        person_type: match q.tipo.as_deref() {
            Some(t) if t.eq_ignore_ascii_case("pj") => "PJ".to_string(),
            _ => "PF".to_string(),
        },
        ..Default::default()
    };
    let template = SignupTemplate::new(form, FieldErrors::default(), None);
    Html(template.render().unwrap_or_default()).into_response()
}

pub async fn signup_submit(
    State(state): State<SharedState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(form): Form<SignupForm>,
) -> Response {
    let ip = client_ip::resolve(&headers, peer.ip(), &state.config.trusted_proxies);
    if state.signup_limiter.check(ip).is_err() {
        return render_signup(
            StatusCode::TOO_MANY_REQUESTS,
            form,
            FieldErrors::default(),
            "Muitas tentativas de cadastro. Tente novamente mais tarde.",
        );
    }

    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(errors) => {
            return render_signup(
                StatusCode::BAD_REQUEST,
                form,
                errors,
                "Verifique os campos destacados.",
            );
        }
    };

    let summary = match service::register(&state.pool, &registration).await {
        Ok(summary) => summary,
        Err(AppError::Conflict(_)) => {
            let mut errors = FieldErrors::default();
            errors.add("email", "Este e-mail já está cadastrado");
            return render_signup(
                StatusCode::CONFLICT,
                form,
                errors,
                "Erro ao criar conta. Verifique os dados.",
            );
        }
        Err(err) => return err.into_response(),
    };

    match issue_session(&state, &summary) {
        Ok(jar) => (jar, Redirect::to("/")).into_response(),
        Err(err) => err.into_response(),
    }
}

fn render_signup(
    status: StatusCode,
    mut form: SignupForm,
    errors: FieldErrors,
    message: &str,
) -> Response {
    form.password.clear();
    form.confirm_password.clear();
    let template = SignupTemplate::new(form, errors, Some(message.to_string()));
    (status, Html(template.render().unwrap_or_default())).into_response()
}

pub async fn logout() -> impl IntoResponse {
    (clear_session_cookies(), Redirect::to("/"))
}

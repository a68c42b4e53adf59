use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::auth::extractor::SessionUser;
use crate::brazil::{cep, phone};
use crate::db;
use crate::error::AppError;
use crate::models::{Address, User, UserSummary};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "account.html")]
#[allow(dead_code)]
struct AccountTemplate {
    user: Option<UserSummary>,
    profile: User,
    phone: String,
    document: String,
    addresses: Vec<AddressView>,
}

#[allow(dead_code)]
struct AddressView {
    label: String,
    line: String,
    city_region: String,
    cep: String,
    is_default: bool,
}

impl From<Address> for AddressView {
    fn from(a: Address) -> Self {
        let mut line = a.address_line1;
        if let Some(number) = a.street_number {
            line.push_str(", ");
            line.push_str(&number);
        }
        if let Some(extra) = a.address_line2 {
            line.push_str(" - ");
            line.push_str(&extra);
        }
        let city_region = match a.district {
            Some(district) => format!("{district}, {} / {}", a.city, a.region),
            None => format!("{} / {}", a.city, a.region),
        };

        AddressView {
            label: a.label.unwrap_or_else(|| "Endereço".to_string()),
            line,
            city_region,
            cep: a.postal_code.map(|c| cep::format(&c)).unwrap_or_default(),
            is_default: a.is_default,
        }
    }
}

pub async fn index(
    SessionUser(session): SessionUser,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let profile = db::users::find_by_id(&state.pool, session.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let addresses = match db::buyers::find_by_user(&state.pool, profile.id).await? {
        Some(buyer) => db::addresses::list_by_buyer(&state.pool, buyer.id)
            .await?
            .into_iter()
            .map(AddressView::from)
            .collect(),
        None => Vec::new(),
    };

    let document = profile
        .cnpj
        .clone()
        .or_else(|| profile.cpf.clone())
        .unwrap_or_default();
    let phone = profile
        .phone
        .as_deref()
        .or(profile.whatsapp.as_deref())
        .map(phone::format)
        .unwrap_or_default();

    let template = AccountTemplate {
        user: Some(session),
        profile,
        phone,
        document,
        addresses,
    };
    Ok(Html(template.render().unwrap_or_default()))
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub person_type: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub alternate_phone: Option<String>,
    pub company_name: Option<String>,
    pub trade_name: Option<String>,
    pub state_registration: Option<String>,
    pub state_registration_exempt: Option<bool>,
    pub pf_definition: Option<String>,
    pub pj_definition: Option<String>,
    pub marketing_opt_in: bool,
    pub created_at: DateTime<Utc>,
}

/// What signup and login hand back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
        }
    }
}

/// Profile fields of a user about to be inserted.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub person_type: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub alternate_phone: Option<String>,
    pub company_name: Option<String>,
    pub trade_name: Option<String>,
    pub state_registration: Option<String>,
    pub state_registration_exempt: Option<bool>,
    pub pf_definition: Option<String>,
    pub pj_definition: Option<String>,
    pub marketing_opt_in: bool,
}

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserSummary;

pub const SESSION_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub username: String,
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &UserSummary) -> Self {
        Self {
            sub: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            exp: (Utc::now() + Duration::days(SESSION_DAYS)).timestamp(),
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.sub,
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

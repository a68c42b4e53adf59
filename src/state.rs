use std::sync::Arc;

use sqlx::PgPool;

use crate::address_lookup::AddressLookup;
use crate::config::Config;
use crate::rate_limit::{LoginRateLimiter, SignupRateLimiter};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub address_lookup: Arc<dyn AddressLookup>,
    pub signup_limiter: SignupRateLimiter,
    pub login_limiter: LoginRateLimiter,
}

use std::net::IpAddr;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub log_level: String,
    pub cloudinary_cloud_name: String,
    pub viacep_url: String,
    /// Signups allowed per client IP per hour.
    pub signup_limit: u32,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("ZAVY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ZAVY_HOST: {e}"))?;

        let port: u16 = env_or("ZAVY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ZAVY_PORT: {e}"))?;

        let max_body_size: usize = env_or("ZAVY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid ZAVY_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("ZAVY_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid ZAVY_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let log_level = env_or("ZAVY_LOG_LEVEL", "info");

        let cloudinary_cloud_name = env_or("ZAVY_CLOUDINARY_CLOUD_NAME", "demo");
        let viacep_url = env_or("ZAVY_VIACEP_URL", "https://viacep.com.br")
            .trim_end_matches('/')
            .to_string();

        let signup_limit: u32 = env_or("ZAVY_SIGNUP_LIMIT", "10")
            .parse()
            .map_err(|e| format!("Invalid ZAVY_SIGNUP_LIMIT: {e}"))?;

        let secure_cookies = match env_or("ZAVY_SECURE_COOKIES", "true").as_str() {
            "false" | "0" | "no" => false,
            _ => true,
        };

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            max_body_size,
            trusted_proxies,
            log_level,
            cloudinary_cloud_name,
            viacep_url,
            signup_limit,
            secure_cookies,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

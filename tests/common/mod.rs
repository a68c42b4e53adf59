use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use zavy::address_lookup::{AddressLookup, LookupError, PostalAddress};
use zavy::config::Config;

/// CEP the stub lookup knows about.
pub const KNOWN_CEP: &str = "01310100";
/// CEP the stub lookup reports as an upstream failure.
pub const BROKEN_CEP: &str = "99999999";

/// Stands in for ViaCEP so tests never leave the machine.
pub struct StubLookup;

#[async_trait]
impl AddressLookup for StubLookup {
    async fn lookup(&self, cep_digits: &str) -> Result<PostalAddress, LookupError> {
        match cep_digits {
            KNOWN_CEP => Ok(PostalAddress {
                cep: "01310-100".to_string(),
                street: "Avenida Paulista".to_string(),
                complement: "de 612 a 1510 - lado par".to_string(),
                district: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            }),
            BROKEN_CEP => Err(LookupError::Upstream("connection reset".to_string())),
            _ => Err(LookupError::NotFound),
        }
    }
}

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST /api/signup, return (body, status).
    pub async fn signup(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/signup"))
            .json(body)
            .send()
            .await
            .expect("signup request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST /api/login, return (body, status, session cookie).
    pub async fn login(&self, username: &str, password: &str) -> (Value, StatusCode, Option<String>) {
        let resp = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let cookie = session_cookie(&resp);
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status, cookie)
    }

    /// Sign up a plain user and return its summary.
    pub async fn create_user(&self, username: &str, password: &str) -> Value {
        let (body, status) = self
            .signup(&json!({ "name": "Maria Silva", "username": username, "password": password }))
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");
        body
    }

    /// GET a JSON endpoint, optionally with a session cookie.
    pub async fn get_json(&self, path: &str, cookie: Option<&str>) -> (Value, StatusCode) {
        let mut req = self.client.get(self.url(path));
        if let Some(c) = cookie {
            req = req.header("cookie", c);
        }
        let resp = req.send().await.expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET a page, return (html, status).
    pub async fn get_page(&self, path: &str, cookie: Option<&str>) -> (String, StatusCode) {
        let mut req = self.client.get(self.url(path));
        if let Some(c) = cookie {
            req = req.header("cookie", c);
        }
        let resp = req.send().await.expect("page request failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// Insert a category with one sellable product, return the category id.
    pub async fn seed_category(&self, name: &str, product_title: &str, price_in_cents: i64) -> i32 {
        let category = zavy::db::categories::create(&self.pool, name)
            .await
            .expect("seed category failed");
        zavy::db::products::create(
            &self.pool,
            Some(category.id),
            product_title,
            "Produto de teste",
            price_in_cents,
            "1700000000/zavy/produto",
            true,
        )
        .await
        .expect("seed product failed");
        category.id
    }
}

/// `name=value` of the session cookie set by a response, if any.
pub fn session_cookie(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session=") && !v.starts_with("session=;"))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Same as [`spawn_app`] but lets a test tweak the config first.
pub async fn spawn_app_with(tweak: impl FnOnce(&mut Config)) -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let db_name = format!("zavy_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let mut config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        max_body_size: 65_536,
        trusted_proxies: vec![],
        log_level: "warn".to_string(),
        cloudinary_cloud_name: "demo".to_string(),
        viacep_url: "http://127.0.0.1:9".to_string(),
        signup_limit: 100,
        secure_cookies: false,
    };
    tweak(&mut config);

    let (app, _state) = zavy::build_app(pool.clone(), config, Arc::new(StubLookup));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}

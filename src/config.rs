use std::env;

use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    /// When unset the service runs on in-memory stores.
    pub database_url: Option<String>,
    pub api_prefix: String,
    pub rate_protected_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            database_url: env::var("DATABASE_URL").ok(),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap_or(1000),
        }
    }
}

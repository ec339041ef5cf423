use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub db: DbConfig,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub environment: String,
    pub page_limit_max: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => mysql_url_from_parts()?,
        };
        let db = DbConfig {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 60),
        };
        let port = std::env::var("APP_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        Ok(Self {
            db,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            page_limit_max: env_or::<i64>("PAGE_LIMIT_MAX", 100).max(1),
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Builds a `mysql://` URL from the split `DB_*` variables.
fn mysql_url_from_parts() -> anyhow::Result<String> {
    let host = std::env::var("DB_HOST").context("DATABASE_URL or DB_HOST must be set")?;
    let port = std::env::var("DB_PORT").unwrap_or_else(|_| "3306".into());
    let user = std::env::var("DB_USER").context("DB_USER must be set")?;
    let password = std::env::var("DB_PASSWORD").unwrap_or_default();
    let name = std::env::var("DB_NAME").context("DB_NAME must be set")?;
    Ok(mysql_url(&host, &port, &user, &password, &name))
}

fn mysql_url(host: &str, port: &str, user: &str, password: &str, name: &str) -> String {
    if password.is_empty() {
        format!("mysql://{user}@{host}:{port}/{name}")
    } else {
        format!("mysql://{user}:{password}@{host}:{port}/{name}")
    }
}

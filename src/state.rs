use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::products::{MySqlProductRepo, ProductRepo};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repo: Arc<dyn ProductRepo>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let pool = db::connect(&config.db).await?;
        let repo = Arc::new(MySqlProductRepo::new(pool)) as Arc<dyn ProductRepo>;
        Ok(Self { config, repo })
    }

    pub fn from_parts(config: Arc<AppConfig>, repo: Arc<dyn ProductRepo>) -> Self {
        Self { config, repo }
    }

    #[cfg(test)]
    pub fn fake_with(repo: Arc<crate::products::memory::InMemoryProductRepo>) -> Self {
        let config = Arc::new(AppConfig {
            db: crate::config::DbConfig {
                url: "mysql://root@localhost:3306/catalog".into(),
                max_connections: 1,
                acquire_timeout_secs: 1,
            },
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            environment: "test".into(),
            page_limit_max: 100,
        });
        Self::from_parts(config, repo)
    }
}

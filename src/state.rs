use crate::config::AppConfig;
use crate::storage::{MemStorage, PgStorage, Seed, Storage};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Storage>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let repo = match config.database_url.as_deref() {
            Some(url) => {
                let pg = PgStorage::connect(url).await?;
                pg.migrate().await?;
                info!("using postgres storage");
                Arc::new(pg) as Arc<dyn Storage>
            }
            None => {
                info!("using in-memory storage; data is lost on restart");
                Arc::new(MemStorage::new()) as Arc<dyn Storage>
            }
        };

        if let Some(path) = &config.seed_path {
            let seed = Seed::from_path(path)?;
            info!(
                path = %path.display(),
                categories = seed.categories.len(),
                products = seed.products.len(),
                services = seed.services.len(),
                testimonials = seed.testimonials.len(),
                "importing seed"
            );
            repo.import_seed(seed).await?;
        }

        Ok(Self { repo, config })
    }

    pub fn from_parts(repo: Arc<dyn Storage>, config: Arc<AppConfig>) -> Self {
        Self { repo, config }
    }

    /// In-memory state over the test fixture catalog.
    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: None,
            seed_path: None,
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
        });
        let repo = Arc::new(MemStorage::with_seed(crate::storage::seed::fixture()));
        Self::from_parts(repo, config)
    }
}

use std::sync::Arc;

use super::{
    config::Config,
    database::{FoodStore, init_db},
};

pub struct AppState {
    pub config: Config,
    pub store: FoodStore,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let pool = init_db(&config.database_url).await;
        let store = FoodStore::new(pool);

        if config.seed {
            store.seed().await.expect("Failed to seed database");
        }

        Arc::new(Self { config, store })
    }

    pub fn with_store(config: Config, store: FoodStore) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}

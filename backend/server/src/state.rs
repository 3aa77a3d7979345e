use std::sync::Arc;

use anyhow::Result;

use super::{
    config::Config,
    database::ProfileStore,
    identity::{HeaderIdentity, IdentityProvider},
};

pub struct AppState {
    pub config: Config,
    pub store: ProfileStore,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new() -> Result<Arc<Self>> {
        let config = Config::load()?;
        let store = ProfileStore::open(&config.db_path)?;

        Ok(Self::with_parts(config, store, Arc::new(HeaderIdentity)))
    }

    pub fn with_parts(
        config: Config,
        store: ProfileStore,
        identity: Arc<dyn IdentityProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            store,
            identity,
        })
    }
}

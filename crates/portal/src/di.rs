use crate::{
    abstract_trait::{DynIdentityClient, DynKeyValueStore, DynNavigator},
    cache::FileStore,
    service::IdentityHttpClient,
};
use anyhow::{Context, Result};
use shared::config::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub identity: DynIdentityClient,
    pub storage: DynKeyValueStore,
    pub navigator: DynNavigator,
}

impl DependenciesInject {
    pub fn new(config: &Config, navigator: DynNavigator) -> Result<Self> {
        let identity = Arc::new(
            IdentityHttpClient::new(&config.identity_base_url, config.identity_timeout)
                .context("Failed to create identity client")?,
        ) as DynIdentityClient;

        let storage = Arc::new(FileStore::new(&config.session_file)) as DynKeyValueStore;

        Ok(Self {
            identity,
            storage,
            navigator,
        })
    }
}

use cacheview_core::CacheConfig;

use crate::cache::CacheStore;

pub struct AppState {
    pub cache: CacheStore,
    pub config: CacheConfig,
}

impl AppState {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            cache: CacheStore::new(),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

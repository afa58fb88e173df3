use async_trait::async_trait;
use cacheview_core::api::{self, CLEAR_CACHE_PATH, OPERATION_PATH};
use cacheview_core::{CacheApi, ClearCacheResponse, OperationResponse, RequestError, UserResponse};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// [`CacheApi`] over HTTP against a running backend
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RequestError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        api::decode(status, &body)
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait(?Send)]
impl CacheApi for HttpApi {
    async fn operation(&self, param: &str) -> Result<OperationResponse, RequestError> {
        self.fetch(OPERATION_PATH, &[("param", param)]).await
    }

    async fn user(&self, user_id: u64) -> Result<UserResponse, RequestError> {
        self.fetch(&api::user_path(user_id), &[]).await
    }

    async fn clear_cache(&self) -> Result<ClearCacheResponse, RequestError> {
        self.fetch(CLEAR_CACHE_PATH, &[]).await
    }
}

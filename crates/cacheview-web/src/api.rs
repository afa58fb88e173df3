use async_trait::async_trait;
use cacheview_core::api::{self, CLEAR_CACHE_PATH, OPERATION_PATH};
use cacheview_core::{CacheApi, ClearCacheResponse, OperationResponse, RequestError, UserResponse};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// [`CacheApi`] over `fetch`, with paths relative to the page origin
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchApi;

impl FetchApi {
    pub fn same_origin() -> Self {
        Self
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RequestError> {
        let mut request = Request::get(path);
        if !query.is_empty() {
            request = request.query(query.iter().copied());
        }

        let resp = request
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        api::decode(status, &body)
    }
}

#[async_trait(?Send)]
impl CacheApi for FetchApi {
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

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use cacheview_core::api::CACHE_CLEARED;
use tracing::info;

use crate::dto::{ClearCacheReply, OperationQuery, OperationReply, UserReply};
use crate::error::AppError;
use crate::services;
use crate::state::AppState;

const DEFAULT_PARAM: &str = "default";

pub async fn operation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OperationQuery>,
) -> Result<Json<OperationReply>, AppError> {
    let param = query.param.unwrap_or_else(|| DEFAULT_PARAM.to_string());
    let cached = services::heavy_operation(&state, &param).await?;

    Ok(Json(OperationReply {
        result: cached.value,
        source: cached.origin.label(),
        origin: cached.origin,
    }))
}

pub async fn user(
    State(state): State<Arc<AppState>>,
    user_id: Result<Path<u64>, PathRejection>,
) -> Result<Json<UserReply>, AppError> {
    let Path(user_id) = user_id.map_err(|e| AppError::NotFound(format!("Unknown user: {}", e)))?;
    let cached = services::user_data(&state, user_id).await?;

    Ok(Json(UserReply {
        data: cached.value,
        source: cached.origin.label(),
        origin: cached.origin,
    }))
}

pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<ClearCacheReply> {
    let flushed = state.cache.flush_all();
    info!(flushed, "Cache flushed");

    Json(ClearCacheReply {
        status: CACHE_CLEARED,
    })
}

use tracing::info;

use crate::cache::Cached;
use crate::dto::UserRecord;
use crate::error::AppError;
use crate::state::AppState;

pub const OPERATION_PREFIX: &str = "heavy_operation";
pub const USER_PREFIX: &str = "get_user_data";

/// Expensive computation, simulated with a delay on every cache miss
pub async fn heavy_operation(state: &AppState, param: &str) -> Result<Cached<String>, AppError> {
    let delay = state.config.operation_delay();
    state
        .cache
        .cached(OPERATION_PREFIX, &(param,), state.config.operation_ttl(), || async move {
            info!(param, "Computing operation");
            tokio::time::sleep(delay).await;
            format!(
                "Resultado de operación con parámetro: {} (caracteres especiales: áéíóúñ)",
                param
            )
        })
        .await
}

/// Database lookup, simulated with a delay on every cache miss
pub async fn user_data(state: &AppState, user_id: u64) -> Result<Cached<UserRecord>, AppError> {
    let delay = state.config.user_delay();
    state
        .cache
        .cached(USER_PREFIX, &(user_id,), state.config.user_ttl(), || async move {
            info!(user_id, "Loading user");
            tokio::time::sleep(delay).await;
            UserRecord {
                user_id,
                name: format!("Usuario {} (áéíóúñ)", user_id),
                email: format!("user{}@example.com", user_id),
            }
        })
        .await
}

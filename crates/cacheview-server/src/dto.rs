use cacheview_core::Origin;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct OperationQuery {
    pub param: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct OperationReply {
    pub result: String,
    pub source: &'static str,
    pub origin: Origin,
}

#[derive(Debug, Serialize)]
pub struct UserReply {
    pub data: UserRecord,
    pub source: &'static str,
    pub origin: Origin,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheReply {
    pub status: &'static str,
}

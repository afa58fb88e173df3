//! Backend contract: endpoint paths, reply shapes and the client seam.
//!
//! Replies are decoded into explicit types at the network boundary. A body
//! that does not match its shape fails with [`RequestError::Decode`] instead
//! of rendering half-missing data.

use async_trait::async_trait;
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub const OPERATION_PATH: &str = "/operation";
pub const USER_PATH: &str = "/user";
pub const CLEAR_CACHE_PATH: &str = "/clear_cache";

/// Label the backend puts on replies served from the cache
pub const CACHE_LABEL: &str = "Caché (pymemcache)";
/// Label the backend puts on replies computed from the database
pub const DATABASE_LABEL: &str = "Base de datos";
/// Status returned by a successful cache flush
pub const CACHE_CLEARED: &str = "Caché completamente limpiada";

pub fn user_path(user_id: u64) -> String {
    format!("{}/{}", USER_PATH, user_id)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Where a reply's data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Cache,
    Database,
}

impl Origin {
    /// Classify a free-text label from a backend that sends no `origin` field
    pub fn from_label(label: &str) -> Self {
        if label == CACHE_LABEL {
            Origin::Cache
        } else {
            Origin::Database
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Origin::Cache => CACHE_LABEL,
            Origin::Database => DATABASE_LABEL,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Origin::Cache => "source-cache",
            Origin::Database => "source-db",
        }
    }
}

/// Resolved provenance of a reply: the label to display and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub label: String,
    pub origin: Origin,
}

impl Source {
    /// An explicit origin wins; otherwise it is sniffed from the label.
    pub fn resolve(label: &str, origin: Option<Origin>) -> Self {
        Self {
            label: label.to_string(),
            origin: origin.unwrap_or_else(|| Origin::from_label(label)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

/// Reply data: a plain string or a flat mapping kept in body order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Fields(Vec<Field>),
}

impl Payload {
    pub fn fields<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Payload::Fields(
            pairs
                .into_iter()
                .map(|(k, v)| Field {
                    key: k.into(),
                    value: v.into(),
                })
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PayloadVisitor)
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = Payload;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or an object of scalar values")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Payload, E> {
        Ok(Payload::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Payload, E> {
        Ok(Payload::Text(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Payload, A::Error> {
        let mut fields = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            let Some(value) = scalar_text(&value) else {
                return Err(de::Error::custom(format!("field `{key}` is not a scalar")));
            };
            fields.push(Field { key, value });
        }
        Ok(Payload::Fields(fields))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperationResponse {
    pub result: Payload,
    pub source: String,
    #[serde(default)]
    pub origin: Option<Origin>,
}

impl OperationResponse {
    pub fn source(&self) -> Source {
        Source::resolve(&self.source, self.origin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserResponse {
    pub data: Payload,
    pub source: String,
    #[serde(default)]
    pub origin: Option<Origin>,
}

impl UserResponse {
    pub fn source(&self) -> Source {
        Source::resolve(&self.source, self.origin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClearCacheResponse {
    pub status: String,
}

/// Check the status code and decode a reply body into `T`
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, RequestError> {
    if !(200..300).contains(&status) {
        return Err(RequestError::Status(status));
    }
    serde_json::from_str(body).map_err(|e| RequestError::Decode(e.to_string()))
}

/// The three backend endpoints the presenter calls.
///
/// Futures are not required to be `Send`: presenters run on a single UI
/// thread and browser fetch futures are `!Send`.
#[async_trait(?Send)]
pub trait CacheApi {
    async fn operation(&self, param: &str) -> Result<OperationResponse, RequestError>;
    async fn user(&self, user_id: u64) -> Result<UserResponse, RequestError>;
    async fn clear_cache(&self) -> Result<ClearCacheResponse, RequestError>;
}

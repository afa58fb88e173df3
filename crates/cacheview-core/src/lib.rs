// Domain modules
pub mod api;
pub mod config;
pub mod error;
pub mod panel;
pub mod presenter;

pub use api::{
    CacheApi, ClearCacheResponse, Field, OperationResponse, Origin, Payload, RequestError, Source,
    UserResponse,
};
pub use config::{CacheConfig, PresenterConfig, ServerConfig};
pub use error::{CacheViewError, Result};
pub use panel::{Background, Block, Panel, SourceTag, StatusKind};
pub use presenter::{
    ActionId, ContainerId, InputId, ManualScheduler, MemorySurface, ResultPresenter, Scheduler,
    Surface,
};

//! Three request/render actions over a [`Surface`], a [`CacheApi`] and a
//! [`Scheduler`].
//!
//! Every action is a single round-trip with no in-flight guard: overlapping
//! calls race and the last reply to resolve owns the container. Failures are
//! logged and shown as a failure status, never returned.

mod scheduler;
mod surface;

pub use scheduler::{ManualScheduler, ManualTimer, Scheduler, Task};
pub use surface::{ActionId, ContainerId, InputId, MemorySurface, Surface};

use crate::api::{CacheApi, Payload, RequestError, Source};
use crate::config::PresenterConfig;
use crate::panel::{Panel, StatusKind};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, error};

pub const OPERATION_FAILED: &str = "Error al ejecutar la operación";
pub const USER_FAILED: &str = "Error al obtener el usuario";
pub const CLEAR_FAILED: &str = "Error al limpiar la caché";

pub struct ResultPresenter<S, A, T: Scheduler> {
    surface: Rc<S>,
    api: A,
    scheduler: T,
    config: PresenterConfig,
    /// Pending status auto-clear per container
    timers: RefCell<HashMap<ContainerId, T::Handle>>,
}

impl<S, A, T> ResultPresenter<S, A, T>
where
    S: Surface + 'static,
    A: CacheApi,
    T: Scheduler,
{
    pub fn new(surface: Rc<S>, api: A, scheduler: T, config: PresenterConfig) -> Self {
        Self {
            surface,
            api,
            scheduler,
            config,
            timers: RefCell::new(HashMap::new()),
        }
    }

    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    pub fn render_result(&self, container: ContainerId, payload: &Payload, source: &Source) {
        self.cancel_clear(container);
        self.surface.paint(container, Panel::result(payload, source));
    }

    /// Show `message` and clear the container once the status has expired.
    ///
    /// Replaces any clear still pending for the same container.
    pub fn render_status(&self, container: ContainerId, message: &str, kind: StatusKind) {
        self.surface.paint(container, Panel::status(message, kind));

        let surface = Rc::clone(&self.surface);
        let handle = self.scheduler.schedule(
            self.config.status_clear_after(),
            Box::new(move || surface.paint(container, Panel::empty())),
        );
        self.timers.borrow_mut().insert(container, handle);
    }

    pub fn clear(&self, container: ContainerId) {
        self.cancel_clear(container);
        self.surface.paint(container, Panel::empty());
    }

    pub async fn run_operation(&self) {
        let param = self.input_or(InputId::Param, &self.config.default_param);
        debug!(param = %param, "Running operation");

        match self.api.operation(&param).await {
            Ok(resp) => self.render_result(ContainerId::OperationResult, &resp.result, &resp.source()),
            Err(e) => self.fail(ContainerId::OperationResult, OPERATION_FAILED, &e),
        }
    }

    pub async fn get_user(&self) {
        let raw = self.surface.input_value(InputId::UserId);
        let result = match parse_user_id(&raw, self.config.default_user_id) {
            Ok(user_id) => {
                debug!(user_id, "Fetching user");
                self.api.user(user_id).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(resp) => self.render_result(ContainerId::UserResult, &resp.data, &resp.source()),
            Err(e) => self.fail(ContainerId::UserResult, USER_FAILED, &e),
        }
    }

    pub async fn clear_cache(&self) {
        match self.api.clear_cache().await {
            Ok(resp) => {
                self.render_status(ContainerId::CacheStatus, &resp.status, StatusKind::Success);
                self.clear(ContainerId::OperationResult);
                self.clear(ContainerId::UserResult);
            }
            Err(e) => self.fail(ContainerId::CacheStatus, CLEAR_FAILED, &e),
        }
    }

    fn fail(&self, container: ContainerId, message: &str, err: &RequestError) {
        error!(container = container.dom_id(), "Request failed: {}", err);
        self.render_status(container, message, StatusKind::Failure);
    }

    fn input_or(&self, input: InputId, default: &str) -> String {
        let value = self.surface.input_value(input);
        if value.is_empty() {
            default.to_string()
        } else {
            value
        }
    }

    fn cancel_clear(&self, container: ContainerId) {
        self.timers.borrow_mut().remove(&container);
    }
}

fn parse_user_id(raw: &str, default: u64) -> Result<u64, RequestError> {
    if raw.is_empty() {
        return Ok(default);
    }
    raw.trim()
        .parse()
        .map_err(|_| RequestError::InvalidInput(format!("user id is not a number: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("", 1), Ok(1));
        assert_eq!(parse_user_id("42", 1), Ok(42));
        assert_eq!(parse_user_id(" 42 ", 1), Ok(42));
        assert!(matches!(parse_user_id("abc", 1), Err(RequestError::InvalidInput(_))));
        assert!(matches!(parse_user_id("  ", 1), Err(RequestError::InvalidInput(_))));
        assert!(matches!(parse_user_id("-3", 1), Err(RequestError::InvalidInput(_))));
    }
}

use cacheview_core::presenter::Task;
use cacheview_core::Scheduler;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// `setTimeout` on the page window
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// Pending `setTimeout`; dropping it calls `clearTimeout`
pub struct BrowserTimer {
    id: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for BrowserTimer {
    fn drop(&mut self) {
        let (Some(id), Some(window)) = (self.id, web_sys::window()) else {
            return;
        };
        window.clear_timeout_with_handle(id);
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn schedule(&self, delay: Duration, task: Task) -> BrowserTimer {
        let mut task = Some(task);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(task) = task.take() {
                task();
            }
        });

        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let id = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    timeout,
                )
                .ok()
        });

        if id.is_none() {
            tracing::warn!("Could not schedule timer, status will not clear");
        }

        BrowserTimer {
            id,
            _callback: callback,
        }
    }
}

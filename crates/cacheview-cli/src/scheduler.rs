use cacheview_core::presenter::Task;
use cacheview_core::Scheduler;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Timers on the current `LocalSet`; scheduling outside one panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

pub struct TokioTimer(JoinHandle<()>);

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTimer;

    fn schedule(&self, delay: Duration, task: Task) -> TokioTimer {
        TokioTimer(tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tokio::task::LocalSet;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(false));
                let flag = Rc::clone(&fired);
                let _timer = TokioScheduler.schedule(
                    Duration::from_millis(3000),
                    Box::new(move || flag.set(true)),
                );

                tokio::time::sleep(Duration::from_millis(2999)).await;
                assert!(!fired.get());
                tokio::time::sleep(Duration::from_millis(2)).await;
                assert!(fired.get());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(false));
                let flag = Rc::clone(&fired);
                let timer = TokioScheduler.schedule(
                    Duration::from_millis(10),
                    Box::new(move || flag.set(true)),
                );
                drop(timer);

                tokio::time::sleep(Duration::from_millis(50)).await;
                assert!(!fired.get());
            })
            .await;
    }
}

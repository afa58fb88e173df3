use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

/// Runs a task once after a delay.
///
/// Dropping the returned handle cancels the task if it has not run yet.
pub trait Scheduler {
    type Handle: 'static;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;
}

struct Pending {
    id: u64,
    due: Duration,
    task: Task,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Scheduler driven by hand: time only moves on [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

pub struct ManualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks still waiting to run
    pub fn pending(&self) -> usize {
        self.state
            .borrow()
            .pending
            .iter()
            .filter(|p| !p.cancelled.get())
            .count()
    }

    /// Move time forward and run every task that became due, in due order
    pub fn advance(&self, by: Duration) {
        let due = {
            let mut state = self.state.borrow_mut();
            state.now += by;
            let now = state.now;

            let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pending)
                .into_iter()
                .filter(|p| !p.cancelled.get())
                .partition(|p| p.due <= now);
            state.pending = rest;
            due.sort_by_key(|p| (p.due, p.id));
            due
        };

        for pending in due {
            // an earlier task in this batch may have cancelled a later one
            if !pending.cancelled.get() {
                (pending.task)();
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, delay: Duration, task: Task) -> ManualTimer {
        let mut state = self.state.borrow_mut();
        let cancelled = Rc::new(Cell::new(false));
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.pending.push(Pending {
            id,
            due,
            task,
            cancelled: Rc::clone(&cancelled),
        });
        ManualTimer { cancelled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_only_when_due() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let _timer = scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        scheduler.advance(Duration::from_millis(99));
        assert_eq!(fired.get(), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(fired.get(), 1);
        scheduler.advance(Duration::from_secs(10));
        assert_eq!(fired.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let timer = scheduler.schedule(Duration::from_millis(10), Box::new(move || flag.set(true)));
        assert_eq!(scheduler.pending(), 1);

        drop(timer);
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(Duration::from_millis(10));
        assert!(!fired.get());
    }

    #[test]
    fn test_runs_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let late = Rc::clone(&order);
        let early = Rc::clone(&order);
        let _a = scheduler.schedule(Duration::from_millis(20), Box::new(move || late.borrow_mut().push("late")));
        let _b = scheduler.schedule(Duration::from_millis(5), Box::new(move || early.borrow_mut().push("early")));

        scheduler.advance(Duration::from_millis(30));
        assert_eq!(*order.borrow(), vec!["early", "late"]);
    }
}

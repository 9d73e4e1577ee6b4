//! Debouncer - Single-slot cancellable deferred task
//!
//! Models "write after the user stops typing" in a cooperative,
//! single-threaded world: one pending task at most, each `schedule` replaces
//! (and thereby cancels) the previous one, and the host event loop drives
//! execution by calling [`Debouncer::poll`] each tick.
//!
//! No timer thread: due-ness is checked against `Instant::now()` at poll
//! time, and [`Debouncer::next_deadline`] lets a blocking loop compute its
//! wait timeout.
//!
//! # Example
//!
//! ```ignore
//! use spark_query::Debouncer;
//! use std::time::Duration;
//!
//! let debouncer = Debouncer::new(Duration::from_millis(300));
//!
//! debouncer.schedule(|| println!("i"));
//! debouncer.schedule(|| println!("iphone")); // replaces the first task
//!
//! // Event loop
//! loop {
//!     if debouncer.poll() {
//!         break; // printed "iphone" once, 300ms after the last schedule
//!     }
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

// =============================================================================
// DEBOUNCER
// =============================================================================

struct Pending {
    due: Instant,
    task: Box<dyn FnOnce()>,
}

/// Single-slot deferred task runner.
///
/// Cheap to clone: clones share the slot, so a binding can schedule while
/// the event loop polls through its own handle. Dropping the last clone
/// drops any pending task without running it.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    slot: Rc<RefCell<Option<Pending>>>,
}

impl Debouncer {
    /// Debouncer firing `delay` after the most recent schedule.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Defer a task, replacing (cancelling) any pending one.
    ///
    /// The previous task, if any, is dropped without running; the deadline
    /// restarts from now.
    pub fn schedule(&self, task: impl FnOnce() + 'static) {
        *self.slot.borrow_mut() = Some(Pending {
            due: Instant::now() + self.delay,
            task: Box::new(task),
        });
    }

    /// Run the pending task if its deadline has passed.
    ///
    /// Returns true when a task ran. The slot is emptied before the task
    /// executes, so the task may schedule again.
    pub fn poll(&self) -> bool {
        let task = {
            let mut slot = self.slot.borrow_mut();
            let due = slot.as_ref().is_some_and(|p| Instant::now() >= p.due);
            if due {
                slot.take().map(|p| p.task)
            } else {
                None
            }
        };

        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run the pending task now, ignoring the deadline.
    ///
    /// Returns true when a task ran.
    pub fn flush(&self) -> bool {
        let task = self.slot.borrow_mut().take().map(|p| p.task);
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Drop the pending task without running it.
    ///
    /// Returns true when there was one.
    pub fn cancel(&self) -> bool {
        self.slot.borrow_mut().take().is_some()
    }

    /// True while a task is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Deadline of the pending task, for event loops computing a wait
    /// timeout. None when nothing is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slot.borrow().as_ref().map(|p| p.due)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::thread;

    #[test]
    fn test_poll_waits_for_deadline() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();

        debouncer.schedule(move || ran_clone.set(true));
        assert!(debouncer.is_pending());
        assert!(!debouncer.poll(), "deadline not reached");
        assert!(!ran.get());

        thread::sleep(Duration::from_millis(30));
        assert!(debouncer.poll());
        assert!(ran.get());

        // Slot is consumed
        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll());
    }

    #[test]
    fn test_zero_delay_fires_on_next_poll() {
        let debouncer = Debouncer::new(Duration::ZERO);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        debouncer.schedule(move || count_clone.set(count_clone.get() + 1));
        assert!(debouncer.poll());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_schedule_replaces_pending_task() {
        let debouncer = Debouncer::new(Duration::ZERO);
        let value = Rc::new(Cell::new(0));

        let v1 = value.clone();
        debouncer.schedule(move || v1.set(1));
        let v2 = value.clone();
        debouncer.schedule(move || v2.set(2));

        assert!(debouncer.poll());
        assert_eq!(value.get(), 2, "only the latest task runs");
        assert!(!debouncer.poll(), "replaced task is gone, not queued");
    }

    #[test]
    fn test_flush_ignores_deadline() {
        let debouncer = Debouncer::new(Duration::from_secs(60));
        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();

        debouncer.schedule(move || ran_clone.set(true));
        assert!(!debouncer.poll(), "a minute away");
        assert!(debouncer.flush());
        assert!(ran.get());
        assert!(!debouncer.flush(), "nothing left to flush");
    }

    #[test]
    fn test_cancel_drops_task_unrun() {
        let debouncer = Debouncer::new(Duration::ZERO);
        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();

        debouncer.schedule(move || ran_clone.set(true));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel(), "already empty");

        thread::sleep(Duration::from_millis(5));
        assert!(!debouncer.poll());
        assert!(!ran.get());
    }

    #[test]
    fn test_task_may_reschedule() {
        let debouncer = Debouncer::new(Duration::ZERO);
        let count = Rc::new(Cell::new(0));

        let count_clone = count.clone();
        let debouncer_clone = debouncer.clone();
        debouncer.schedule(move || {
            count_clone.set(count_clone.get() + 1);
            let inner_count = count_clone.clone();
            debouncer_clone.schedule(move || inner_count.set(inner_count.get() + 1));
        });

        assert!(debouncer.poll());
        assert_eq!(count.get(), 1);
        assert!(debouncer.is_pending(), "task scheduled a follow-up");
        assert!(debouncer.poll());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let debouncer = Debouncer::new(Duration::ZERO);
        let clone = debouncer.clone();
        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();

        clone.schedule(move || ran_clone.set(true));
        assert!(debouncer.is_pending());
        assert!(debouncer.poll());
        assert!(ran.get());
    }

    #[test]
    fn test_drop_cancels_pending_task() {
        let flag = Rc::new(Cell::new(false));
        let debouncer = Debouncer::new(Duration::from_millis(5));

        let flag_for_task = flag.clone();
        debouncer.schedule(move || flag_for_task.set(true));
        assert_eq!(Rc::strong_count(&flag), 2);

        drop(debouncer);
        assert_eq!(
            Rc::strong_count(&flag),
            1,
            "pending task dropped without running"
        );
        assert!(!flag.get());
    }

    #[test]
    fn test_next_deadline() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        assert_eq!(debouncer.delay(), Duration::from_millis(50));
        assert!(debouncer.next_deadline().is_none());

        let before = Instant::now();
        debouncer.schedule(|| {});
        let deadline = debouncer.next_deadline().unwrap();
        assert!(deadline >= before + Duration::from_millis(50));

        debouncer.cancel();
        assert!(debouncer.next_deadline().is_none());
    }
}

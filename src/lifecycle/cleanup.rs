//! Per-view ledger of teardown actions.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::lifecycle::events::{EventTarget, EventType, ListenerId, TimerId, Timers, UiEvent};

type Action = Box<dyn FnOnce()>;

/// Ordered teardown actions, each run exactly once by [`run_all`].
///
/// Clones share the same ledger, so listeners created after mount (a timer
/// scheduled from a key handler, say) can still register their removal.
///
/// [`run_all`]: CleanupRegistry::run_all
#[derive(Clone, Default)]
pub struct CleanupRegistry {
    actions: Rc<RefCell<Vec<Action>>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&self, action: impl FnOnce() + 'static) {
        self.actions.borrow_mut().push(Box::new(action));
    }

    /// Add a listener to `target` and record its removal.
    pub fn listen(
        &self,
        target: &EventTarget,
        event_type: EventType,
        listener: impl Fn(&UiEvent) + 'static,
    ) -> ListenerId {
        let id = target.add_listener(event_type, Rc::new(listener));
        let target = target.clone();
        self.defer(move || {
            target.remove_listener(id);
        });
        id
    }

    /// Schedule a timer and record its cancellation. Cancelling a timer that
    /// already fired does nothing.
    pub fn set_timeout(
        &self,
        timers: &Timers,
        delay_ms: u64,
        callback: impl FnOnce() + 'static,
    ) -> TimerId {
        let id = timers.set_timeout(delay_ms, Box::new(callback));
        let timers = timers.clone();
        self.defer(move || {
            timers.clear_timeout(id);
        });
        id
    }

    /// Run every pending action in registration order and empty the ledger.
    ///
    /// Actions registered while this runs are kept for the next call.
    pub fn run_all(&self) -> usize {
        let actions = std::mem::take(&mut *self.actions.borrow_mut());
        let count = actions.len();
        for action in actions {
            action();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.actions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.borrow().is_empty()
    }
}

impl fmt::Debug for CleanupRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupRegistry")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_in_registration_order_exactly_once() {
        let registry = CleanupRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..4 {
            let log = Rc::clone(&log);
            registry.defer(move || log.borrow_mut().push(i));
        }
        assert_eq!(registry.run_all(), 4);
        assert_eq!(registry.run_all(), 0);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
        assert!(registry.is_empty());
    }

    #[test]
    fn listen_and_timeout_are_undone() {
        let registry = CleanupRegistry::new();
        let target = EventTarget::new();
        let timers = Timers::new();
        registry.listen(&target, EventType::KeyDown, |_| {});
        registry.listen(&target, EventType::Click, |_| {});
        registry.set_timeout(&timers, 100, || panic!("cancelled timer fired"));
        assert_eq!(target.listener_count(), 2);
        assert_eq!(timers.pending_count(), 1);

        assert_eq!(registry.run_all(), 3);
        assert_eq!(target.listener_count(), 0);
        assert_eq!(timers.pending_count(), 0);
        assert_eq!(timers.advance(200), 0);
    }

    #[test]
    fn action_may_register_during_run() {
        let registry = CleanupRegistry::new();
        let inner = registry.clone();
        registry.defer(move || inner.defer(|| {}));
        assert_eq!(registry.run_all(), 1);
        assert_eq!(registry.len(), 1);
    }
}

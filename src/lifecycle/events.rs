//! Shared event sources: a document-level listener table and a timer queue.
//!
//! Both are process-wide singletons in a browser. Views never touch them
//! directly; registration goes through [`CleanupRegistry`] so every handler
//! has a matching removal.
//!
//! [`CleanupRegistry`]: crate::lifecycle::CleanupRegistry

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    KeyDown,
    Click,
}

/// A user input event.
///
/// `Click` carries the `data-action` of the clicked element, e.g.
/// `"option:2"`, `"submit"` or `"value:12.5"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Key(String),
    Click(String),
}

impl UiEvent {
    pub fn key(key: impl Into<String>) -> Self {
        UiEvent::Key(key.into())
    }

    pub fn click(action: impl Into<String>) -> Self {
        UiEvent::Click(action.into())
    }

    pub fn event_type(&self) -> EventType {
        match self {
            UiEvent::Key(_) => EventType::KeyDown,
            UiEvent::Click(_) => EventType::Click,
        }
    }
}

pub type Listener = Rc<dyn Fn(&UiEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct TargetState {
    next_id: u64,
    listeners: Vec<(ListenerId, EventType, Listener)>,
}

/// Document-level event target. Clones share the listener table.
#[derive(Clone, Default)]
pub struct EventTarget {
    state: Rc<RefCell<TargetState>>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_listener(&self, event_type: EventType, listener: Listener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state.listeners.push((id, event_type, listener));
        id
    }

    pub(crate) fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(lid, _, _)| *lid != id);
        state.listeners.len() != before
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.state.borrow().listeners.iter().any(|(lid, _, _)| *lid == id)
    }

    /// Deliver `event` to every listener of its type, returning how many ran.
    ///
    /// A listener removed by an earlier listener in the same dispatch is
    /// skipped, so a view torn down mid-dispatch never sees the event.
    pub fn dispatch(&self, event: &UiEvent) -> usize {
        let wanted = event.event_type();
        let snapshot: Vec<(ListenerId, Listener)> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, ty, _)| *ty == wanted)
            .map(|(id, _, l)| (*id, Rc::clone(l)))
            .collect();

        let mut delivered = 0;
        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            listener(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct PendingTimer {
    id: TimerId,
    due_ms: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerState {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

/// Timer queue driven by a manual clock.
#[derive(Clone, Default)]
pub struct Timers {
    state: Rc<RefCell<TimerState>>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_timeout(&self, delay_ms: u64, callback: Box<dyn FnOnce()>) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let due_ms = state.now_ms + delay_ms;
        state.pending.push(PendingTimer { id, due_ms, callback });
        id
    }

    /// Cancel a pending timer. Cancelling a fired or unknown timer is a no-op.
    pub(crate) fn clear_timeout(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|t| t.id != id);
        state.pending.len() != before
    }

    /// Move the clock forward, firing due timers in due order.
    ///
    /// Timers scheduled by a callback fire in the same call if they fall due
    /// within the window.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.state.borrow().now_ms + ms;
        let mut fired = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let idx = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.id))
                    .map(|(i, _)| i);
                idx.map(|i| {
                    let timer = state.pending.remove(i);
                    state.now_ms = timer.due_ms;
                    timer.callback
                })
            };
            match next {
                Some(callback) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }
        self.state.borrow_mut().now_ms = target;
        fired
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Timers")
            .field("now_ms", &state.now_ms)
            .field("pending", &state.pending.len())
            .finish()
    }
}

/// The shared event sources handed to every view.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub document: EventTarget,
    pub timers: Timers,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }
}

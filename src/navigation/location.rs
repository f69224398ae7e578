//! The location fragment and its change notifications.
//!
//! [`Location`] is what the router reads and writes. In a browser it wraps
//! `window.location.hash` and the `hashchange` event; [`MemoryLocation`] is the
//! headless implementation used by native shells and tests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::RouterError;

/// Called with the new fragment after every change.
pub type ChangeListener = Rc<dyn Fn(&str) -> Result<(), RouterError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub trait Location {
    /// Everything after the first `#`, without the `#`.
    fn fragment(&self) -> String;

    /// Replace the fragment and notify subscribers.
    ///
    /// Errors raised by a subscriber are returned to the caller unchanged.
    fn set_fragment(&self, fragment: &str) -> Result<(), RouterError>;

    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId;

    /// Returns `false` if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

#[derive(Default)]
struct LocationState {
    fragment: String,
    next_id: u64,
    listeners: Vec<(SubscriptionId, ChangeListener)>,
}

/// In-memory location. Clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryLocation {
    state: Rc<RefCell<LocationState>>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fragment(fragment: &str) -> Self {
        let location = Self::default();
        location.state.borrow_mut().fragment = normalize(fragment).to_string();
        location
    }

    /// Navigate to a full URL, as a user following a link would.
    ///
    /// The fragment is taken verbatim: `app##/a` has the fragment `#/a`.
    pub fn set_href(&self, href: &str) -> Result<(), RouterError> {
        let fragment = href.split_once('#').map(|(_, f)| f).unwrap_or("");
        self.write(fragment)
    }

    fn write(&self, fragment: &str) -> Result<(), RouterError> {
        let listeners: Vec<ChangeListener> = {
            let mut state = self.state.borrow_mut();
            // Browsers fire no hashchange for an identical hash.
            if state.fragment == fragment {
                return Ok(());
            }
            state.fragment = fragment.to_string();
            state.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        for listener in listeners {
            listener(fragment)?;
        }
        Ok(())
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

fn normalize(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.state.borrow().fragment.clone()
    }

    fn set_fragment(&self, fragment: &str) -> Result<(), RouterError> {
        self.write(normalize(fragment))
    }

    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(sid, _)| *sid != id);
        state.listeners.len() != before
    }
}

impl fmt::Debug for MemoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryLocation")
            .field("fragment", &state.fragment)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn href_keeps_everything_after_first_hash() {
        let loc = MemoryLocation::new();
        loc.set_href("https://example.test/app#/quiz/a#b").unwrap();
        assert_eq!(loc.fragment(), "/quiz/a#b");
        loc.set_href("https://example.test/app").unwrap();
        assert_eq!(loc.fragment(), "");
    }

    #[test]
    fn href_with_doubled_hash_keeps_the_second_one() {
        let loc = MemoryLocation::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        loc.subscribe(Rc::new(move |f: &str| {
            s.borrow_mut().push(f.to_string());
            Ok(())
        }));
        loc.set_href("https://example.test/app##/quiz/a").unwrap();
        assert_eq!(loc.fragment(), "#/quiz/a");
        assert_eq!(*seen.borrow(), vec!["#/quiz/a".to_string()]);

        // set_fragment still accepts a leading `#` the way `location.hash` does.
        loc.set_fragment("#/quiz/a").unwrap();
        assert_eq!(loc.fragment(), "/quiz/a");
    }

    #[test]
    fn listeners_fire_only_on_change() {
        let loc = MemoryLocation::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        loc.subscribe(Rc::new(move |_: &str| {
            h.set(h.get() + 1);
            Ok(())
        }));
        loc.set_fragment("#/a").unwrap();
        loc.set_fragment("/a").unwrap();
        loc.set_fragment("/b").unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn unsubscribe_detaches_listener() {
        let loc = MemoryLocation::new();
        let id = loc.subscribe(Rc::new(|_: &str| Ok(())));
        assert_eq!(loc.listener_count(), 1);
        assert!(loc.unsubscribe(id));
        assert!(!loc.unsubscribe(id));
        assert_eq!(loc.listener_count(), 0);
    }
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// The page node a view renders into. Owned by the page shell; views only
/// hold a handle while mounted.
pub trait Container {
    fn replace_content(&self, markup: String);
    fn clear(&self);
    fn content(&self) -> String;
}

/// Markup buffer standing in for a DOM node. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    markup: Rc<RefCell<String>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `replace_content` calls so far.
    pub fn write_count(&self) -> u32 {
        self.writes.get()
    }

    pub fn is_empty(&self) -> bool {
        self.markup.borrow().is_empty()
    }
}

impl Container for MemoryContainer {
    fn replace_content(&self, markup: String) {
        *self.markup.borrow_mut() = markup;
        self.writes.set(self.writes.get() + 1);
    }

    fn clear(&self) {
        self.markup.borrow_mut().clear();
    }

    fn content(&self) -> String {
        self.markup.borrow().clone()
    }
}

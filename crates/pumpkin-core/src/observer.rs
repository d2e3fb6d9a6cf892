use std::cell::{Cell, RefCell};
use std::fmt;

pub type ListenerId = u64;

type LayoutListener = Box<dyn FnMut(ListenerId) + 'static>;

struct ListenerEntry {
    id: ListenerId,
    // `None` while the listener is running.
    callback: Option<LayoutListener>,
}

/// Layout-pass notifications for a container.
///
/// The framework calls [`dispatch_layout`](Self::dispatch_layout) after it has
/// measured and positioned the container's subtree. Listeners receive their own
/// id so they can remove themselves from inside the callback.
pub struct LayoutObserver {
    listeners: RefCell<Vec<ListenerEntry>>,
    next_listener_id: Cell<ListenerId>,
}

impl LayoutObserver {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(1),
        }
    }

    pub fn add_listener(&self, listener: impl FnMut(ListenerId) + 'static) -> ListenerId {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push(ListenerEntry {
            id,
            callback: Some(Box::new(listener)),
        });
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|entry| entry.id == id) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Notifies every listener registered before this call, in registration
    /// order. Listeners added during the dispatch run on the next pass.
    pub fn dispatch_layout(&self) {
        let ids: Vec<ListenerId> = self.listeners.borrow().iter().map(|entry| entry.id).collect();
        for id in ids {
            let callback = {
                let mut listeners = self.listeners.borrow_mut();
                listeners
                    .iter_mut()
                    .find(|entry| entry.id == id)
                    .and_then(|entry| entry.callback.take())
            };
            let Some(mut callback) = callback else {
                continue;
            };
            callback(id);
            let mut listeners = self.listeners.borrow_mut();
            if let Some(entry) = listeners.iter_mut().find(|entry| entry.id == id) {
                entry.callback = Some(callback);
            }
        }
    }
}

impl Default for LayoutObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutObserver")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/observer_tests.rs"]
mod tests;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::interaction::ZoomGesture;

type GestureQueue = Rc<RefCell<VecDeque<ZoomGesture>>>;

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, GestureQueue)>,
}

/// Single-threaded fan-out point between a host's input events and the
/// chart views listening to them.
///
/// Hosts call [`GestureHub::dispatch`] from their event handlers; each
/// attached [`GestureBinding`] receives its own copy of the gesture and
/// holds it until the owning view drains the queue.
#[derive(Debug, Clone, Default)]
pub struct GestureHub {
    inner: Rc<RefCell<HubInner>>,
}

impl GestureHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new listener. It stays registered until the returned
    /// binding is detached or dropped.
    #[must_use]
    pub fn attach(&self) -> GestureBinding {
        let queue: GestureQueue = Rc::default();
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::clone(&queue)));
        debug!(binding_id = id, listeners = inner.listeners.len(), "gesture binding attached");

        GestureBinding {
            id,
            queue,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Delivers `gesture` to every attached binding and returns how many
    /// received it.
    pub fn dispatch(&self, gesture: ZoomGesture) -> usize {
        let inner = self.inner.borrow();
        for (_, queue) in &inner.listeners {
            queue.borrow_mut().push_back(gesture);
        }
        trace!(?gesture, listeners = inner.listeners.len(), "gesture dispatched");
        inner.listeners.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Registration of one listener on a [`GestureHub`].
///
/// Dropping the binding unregisters it; gestures dispatched afterwards are
/// not seen, and anything still queued is discarded with it.
#[derive(Debug)]
pub struct GestureBinding {
    id: u64,
    queue: GestureQueue,
    hub: Weak<RefCell<HubInner>>,
}

impl GestureBinding {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Takes every queued gesture in arrival order.
    pub fn drain(&self) -> Vec<ZoomGesture> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Whether the hub this binding was attached to is still alive.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.hub.strong_count() > 0
    }

    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for GestureBinding {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let mut inner = hub.borrow_mut();
            inner.listeners.retain(|(id, _)| *id != self.id);
            debug!(
                binding_id = self.id,
                listeners = inner.listeners.len(),
                "gesture binding detached"
            );
        }
    }
}

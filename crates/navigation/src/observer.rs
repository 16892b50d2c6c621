//! Viewport size observation.
//!
//! The host owns the real resize signal (a window, a canvas, a terminal). It
//! exposes it through [`ViewportSource`]; views hold a [`ResizeSubscription`]
//! for as long as they are attached, and dropping it unsubscribes.

use clipmap_geo::Viewport;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type SubscriptionId = u64;

/// Callback receiving the new viewport after each resize.
pub type ResizeListener = Box<dyn FnMut(Viewport)>;

/// Something that knows the current viewport size and reports changes.
pub trait ViewportSource {
    fn current(&self) -> Viewport;

    fn subscribe(&self, listener: ResizeListener) -> SubscriptionId;

    /// Removes a listener. Returns false if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

type SharedListener = Rc<RefCell<ResizeListener>>;

#[derive(Default)]
struct SourceInner {
    viewport: Viewport,
    listeners: Vec<(SubscriptionId, SharedListener)>,
    next_id: SubscriptionId,
}

impl SourceInner {
    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }
}

/// A [`ViewportSource`] driven by explicit [`resize`](Self::resize) calls.
///
/// Clones share the same listeners. Listeners may subscribe, unsubscribe or
/// resize from inside a callback. A listener is never re-entered: a resize
/// raised while it runs is not delivered back to it.
#[derive(Clone, Default)]
pub struct ManualViewportSource {
    inner: Rc<RefCell<SourceInner>>,
}

impl fmt::Debug for ManualViewportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualViewportSource")
            .field("viewport", &inner.viewport)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl ManualViewportSource {
    pub fn new(viewport: Viewport) -> Self {
        let source = Self::default();
        source.inner.borrow_mut().viewport = viewport;
        source
    }

    pub fn listener_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner.listeners.len()
    }

    /// Records the new size and notifies every listener, in subscription order.
    ///
    /// Listeners added during the dispatch wait for the next resize; listeners
    /// removed during it are skipped. Each one sees the latest size.
    pub fn resize(&self, width: u32, height: u32) {
        let snapshot: Vec<(SubscriptionId, SharedListener)> = {
            let mut inner = self.inner.borrow_mut();
            inner.viewport = Viewport::new(width, height);
            inner.listeners.clone()
        };

        for (id, listener) in &snapshot {
            let viewport = {
                let inner = self.inner.borrow();
                if !inner.is_subscribed(*id) {
                    continue;
                }
                inner.viewport
            };
            match listener.try_borrow_mut() {
                Ok(mut callback) => (*callback)(viewport),
                Err(_) => tracing::trace!(id = *id, "Listener busy, skipping nested resize"),
            }
        }
    }
}

impl ViewportSource for ManualViewportSource {
    fn current(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    fn subscribe(&self, listener: ResizeListener) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let pos = inner.listeners.iter().position(|(lid, _)| *lid == id);
            pos.map(|pos| inner.listeners.remove(pos))
        };
        // Dropped outside the borrow: the listener may hold a handle to this source.
        removed.is_some()
    }
}

/// Keeps a listener subscribed until detached or dropped.
pub struct ResizeSubscription {
    id: Option<SubscriptionId>,
    release: Box<dyn Fn(SubscriptionId) -> bool>,
}

impl ResizeSubscription {
    pub fn attach<S>(source: &S, listener: impl FnMut(Viewport) + 'static) -> Self
    where
        S: ViewportSource + Clone + 'static,
    {
        let id = source.subscribe(Box::new(listener));
        let owner = source.clone();
        tracing::trace!(id, "Resize listener attached");
        Self {
            id: Some(id),
            release: Box::new(move |id| owner.unsubscribe(id)),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.id.is_some()
    }

    /// Unsubscribes. Calling it again does nothing.
    pub fn detach(&mut self) {
        if let Some(id) = self.id.take() {
            (self.release)(id);
            tracing::trace!(id, "Resize listener detached");
        }
    }
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription").field("id", &self.id).finish()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.detach();
    }
}

use std::{collections::VecDeque, sync::Arc};

use parking_lot::{Condvar, Mutex};

/// Thread-safe event queue feeding the single-threaded dispatcher.
///
/// Producers (socket layer, timer thread, application) enqueue from any thread; the dispatcher
/// dequeues from its own. Cloning the queue clones the handle, not the contents.
#[derive(Debug)]
pub struct EventQueue<T> {
    inner: Arc<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T> {
    events: Mutex<VecDeque<T>>,
    ready: Condvar,
}

impl<T> Clone for EventQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                events: Mutex::new(VecDeque::new()),
                ready: Condvar::new(),
            }),
        }
    }

    /// Appends an event at the tail of the queue.
    pub fn push(&self, event: T) {
        let mut events = self.inner.events.lock();
        events.push_back(event);
        self.inner.ready.notify_one();
    }

    /// Prepends an event, bypassing the FIFO order.
    ///
    /// Used for follow-up events a handler re-posts to itself.
    pub fn push_front(&self, event: T) {
        let mut events = self.inner.events.lock();
        events.push_front(event);
        self.inner.ready.notify_one();
    }

    /// Removes the head of the queue, without blocking.
    #[must_use]
    pub fn try_pop(&self) -> Option<T> {
        self.inner.events.lock().pop_front()
    }

    /// Removes the head of the queue, blocking until an event arrives.
    #[must_use]
    pub fn pop(&self) -> T {
        let mut events = self.inner.events.lock();
        loop {
            if let Some(event) = events.pop_front() {
                return event;
            }
            self.inner.ready.wait(&mut events);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.events.lock().is_empty()
    }
}

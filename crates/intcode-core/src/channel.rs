//! Inter-process Channel
//!
//! Blocking, unbounded FIFO of integers shared between processes and host
//! drivers. Handles are cheap clones over the same queue.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    queue: VecDeque<i64>,
    closed: bool,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    ready: Condvar,
}

/// Unbounded integer channel with explicit close
#[derive(Debug, Clone, Default)]
pub struct Channel {
    shared: Arc<Shared>,
}

impl Channel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an open channel pre-loaded with `values`.
    pub fn with_values<I: IntoIterator<Item = i64>>(values: I) -> Self {
        let channel = Self::new();
        channel.lock().queue.extend(values);
        channel
    }

    // The queue holds plain integers, so a panic while locked leaves it usable.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a value. Never blocks; values written after close are still queued.
    pub fn write(&self, value: i64) {
        self.lock().queue.push_back(value);
        self.shared.ready.notify_all();
    }

    /// Block until a value is available, or return `None` once the channel
    /// is closed and empty.
    pub fn read(&self) -> Option<i64> {
        let mut state = self.lock();
        loop {
            if let Some(value) = state.queue.pop_front() {
                return Some(value);
            }
            if state.closed {
                return None;
            }
            state = self
                .shared
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Pop the oldest value without blocking.
    pub fn try_read(&self) -> Option<i64> {
        self.lock().queue.pop_front()
    }

    /// Mark end-of-stream and wake every blocked reader. Idempotent.
    pub fn close(&self) {
        self.lock().closed = true;
        self.shared.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    /// Read until exhaustion. Blocks until the channel is closed.
    pub fn drain(&self) -> Vec<i64> {
        let mut values = Vec::new();
        while let Some(value) = self.read() {
            values.push(value);
        }
        values
    }
}

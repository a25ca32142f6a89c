//! Overwrite-on-full report buffer.
//!
//! Producer threads push report events faster than a sink can take them; a
//! scheduled drain forwards whatever accumulated since the last pass. The
//! buffer keeps memory bounded by retaining only the most recently written
//! `capacity` items: once it wraps, each write silently replaces the oldest
//! undrained slot. Favoring the newest data over completeness is the whole
//! point — a stalled sink must never block or bloat the producers.
//!
//! One coarse lock guards both operations. Both complete in time
//! proportional to capacity, and neither can fail after construction.

use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("buffer capacity must be greater than zero")]
pub struct InvalidCapacityError;

/// Fixed-capacity circular buffer safe for many concurrent producers and
/// any number of drain callers.
#[derive(Debug)]
pub struct RingBuffer<T> {
    capacity: usize,
    state: Mutex<BufferState<T>>,
}

#[derive(Debug)]
struct BufferState<T> {
    slots: Vec<Option<T>>,
    cursor: usize,
}

impl<T> RingBuffer<T> {
    /// Create a buffer holding at most `capacity` items.
    pub fn new(capacity: usize) -> Result<Self, InvalidCapacityError> {
        if capacity == 0 {
            return Err(InvalidCapacityError);
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            capacity,
            // Cursor advances before each write, so the first push lands
            // in slot 0.
            state: Mutex::new(BufferState {
                slots,
                cursor: capacity - 1,
            }),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store an item, overwriting the oldest undrained one once the buffer
    /// has wrapped.
    pub fn push(&self, item: T) {
        let mut state = self.lock();
        state.cursor = (state.cursor + 1) % self.capacity;
        let cursor = state.cursor;
        state.slots[cursor] = Some(item);
    }

    /// Atomically remove and return every buffered item.
    ///
    /// Items come back in slot order, not write order: after a wrap the
    /// newest item may precede older ones. Callers that need ordering must
    /// carry their own sequence in `T`.
    pub fn pop_all(&self) -> Vec<T> {
        let mut state = self.lock();
        state.slots.iter_mut().filter_map(Option::take).collect()
    }

    /// Acquire the state lock, recovering the guard if a previous holder
    /// panicked — the slots themselves are always either empty or whole.
    fn lock(&self) -> std::sync::MutexGuard<'_, BufferState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

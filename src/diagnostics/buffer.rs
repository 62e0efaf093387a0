// SPDX-License-Identifier: MPL-2.0
//! Bounded event history.
//!
//! Once full, every push drops the oldest entry. The number of dropped
//! entries is kept so reports can state how much history is missing.

use std::collections::VecDeque;

/// Bounds for [`BufferCapacity`].
pub mod buffer_capacity_bounds {
    pub const MIN: usize = 10;
    pub const MAX: usize = 10_000;
    pub const DEFAULT: usize = 1_000;
}

/// Event count kept by a [`CircularBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Clamps `value` into [`buffer_capacity_bounds`].
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

/// Fixed-size FIFO history, oldest entry first.
///
/// ```
/// use voice_lens::diagnostics::{BufferCapacity, CircularBuffer};
///
/// let mut history = CircularBuffer::new(BufferCapacity::new(10));
/// for page in 1..=12 {
///     history.push(page);
/// }
/// assert_eq!(history.iter().next(), Some(&3));
/// assert_eq!(history.evicted(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    entries: VecDeque<T>,
    capacity: usize,
    evicted: u64,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let capacity = capacity.value();
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    /// Appends `entry`, returning the entry it displaced, if any.
    pub fn push(&mut self, entry: T) -> Option<T> {
        let displaced = if self.entries.len() == self.capacity {
            self.evicted += 1;
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        displaced
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries dropped since creation or the last [`Self::clear`].
    #[must_use]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.evicted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(BufferCapacity::new(1).value(), buffer_capacity_bounds::MIN);
        assert_eq!(
            BufferCapacity::new(usize::MAX).value(),
            buffer_capacity_bounds::MAX
        );
        assert_eq!(BufferCapacity::new(250).value(), 250);
        assert_eq!(
            BufferCapacity::default().value(),
            buffer_capacity_bounds::DEFAULT
        );
    }

    #[test]
    fn push_returns_displaced_entry_once_full() {
        let mut history = CircularBuffer::new(BufferCapacity::new(10));
        for n in 0..10 {
            assert_eq!(history.push(n), None);
        }

        assert_eq!(history.push(10), Some(0));
        assert_eq!(history.push(11), Some(1));
        assert_eq!(history.len(), 10);
        assert_eq!(history.evicted(), 2);
        assert_eq!(
            history.iter().copied().collect::<Vec<_>>(),
            (2..12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn clear_resets_history_and_eviction_count() {
        let mut history = CircularBuffer::new(BufferCapacity::new(10));
        for n in 0..15 {
            history.push(n);
        }

        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.evicted(), 0);
        assert_eq!(history.capacity(), 10);
    }
}

// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bounded circular buffer of received spike keys
//!
//! Single-producer/single-consumer: the write end is advanced only by the
//! packet-reception path, the read end only by the dispatch path. The timer
//! tick's bulk clear runs on the consumer side. Push and pop are lock-free
//! bounded index updates, safe for a high-priority packet interrupt landing
//! between any two consumer instructions; the two consumer-side operations
//! themselves run at one priority level and never race each other.
//!
//! Capacity is fixed at construction and honored exactly; storage is rounded
//! up to a power of two so wrap-around is a mask. A full buffer drops the
//! incoming spike and counts the overflow; the caller must not retry.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use synfire_runtime::SpikeKey;

pub struct InputSpikeBuffer {
    slots: Box<[AtomicU32]>,
    mask: usize,
    capacity: usize,
    /// Write index, advanced only by `try_push` (monotonic, wraps via mask)
    tail: AtomicUsize,
    /// Read index, advanced only by `try_pop`
    head: AtomicUsize,
    overflows: AtomicU32,
    max_fill: AtomicU32,
}

impl InputSpikeBuffer {
    /// Create a buffer holding up to `capacity` spikes. A zero capacity is
    /// permitted and behaves as permanently full: every push overflows.
    pub fn new(capacity: usize) -> Self {
        let slot_count = if capacity == 0 {
            0
        } else {
            capacity.next_power_of_two()
        };
        let slots = (0..slot_count).map(|_| AtomicU32::new(0)).collect();
        Self {
            slots,
            mask: slot_count.saturating_sub(1),
            capacity,
            tail: AtomicUsize::new(0),
            head: AtomicUsize::new(0),
            overflows: AtomicU32::new(0),
            max_fill: AtomicU32::new(0),
        }
    }

    /// Append a spike. Fails when full, counting the overflow; the spike is
    /// dropped and must not be retried.
    pub fn try_push(&self, spike: SpikeKey) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        let fill = tail.wrapping_sub(head);
        if fill >= self.capacity {
            self.overflows.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        self.slots[tail & self.mask].store(spike.0, Ordering::Relaxed);
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        self.max_fill.fetch_max(fill as u32 + 1, Ordering::Relaxed);
        true
    }

    /// Remove and return the oldest buffered spike.
    pub fn try_pop(&self) -> Option<SpikeKey> {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head == tail {
            return None;
        }
        let key = self.slots[head & self.mask].load(Ordering::Relaxed);
        self.head.store(head.wrapping_add(1), Ordering::Release);
        Some(SpikeKey(key))
    }

    /// Discard everything currently buffered, returning the number discarded.
    /// Runs on the consumer side; pushes landing mid-clear are discarded too.
    pub fn clear(&self) -> u32 {
        let mut discarded = 0;
        while self.try_pop().is_some() {
            discarded += 1;
        }
        discarded
    }

    pub fn len(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        tail.wrapping_sub(head)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pushes attempted while full since construction.
    pub fn overflow_count(&self) -> u32 {
        self.overflows.load(Ordering::Relaxed)
    }

    /// High-water mark of buffer occupancy.
    pub fn max_fill(&self) -> u32 {
        self.max_fill.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let buffer = InputSpikeBuffer::new(8);
        for key in 0..5 {
            assert!(buffer.try_push(SpikeKey(key)));
        }
        for key in 0..5 {
            assert_eq!(buffer.try_pop(), Some(SpikeKey(key)));
        }
        assert_eq!(buffer.try_pop(), None);
    }

    #[test]
    fn test_overflow_counted_and_dropped() {
        let buffer = InputSpikeBuffer::new(4);
        for key in 0..5 {
            buffer.try_push(SpikeKey(key));
        }
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.overflow_count(), 1);
        assert_eq!(buffer.max_fill(), 4);
        // The dropped spike was the incoming one, not a buffered one
        assert_eq!(buffer.try_pop(), Some(SpikeKey(0)));
    }

    #[test]
    fn test_wraps_past_storage_boundary() {
        let buffer = InputSpikeBuffer::new(4);
        for round in 0..10u32 {
            assert!(buffer.try_push(SpikeKey(round)));
            assert_eq!(buffer.try_pop(), Some(SpikeKey(round)));
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_non_power_of_two_capacity_honored() {
        let buffer = InputSpikeBuffer::new(5);
        for key in 0..5 {
            assert!(buffer.try_push(SpikeKey(key)));
        }
        assert!(!buffer.try_push(SpikeKey(99)));
        assert_eq!(buffer.capacity(), 5);
        assert_eq!(buffer.max_fill(), 5);
    }

    #[test]
    fn test_clear_reports_discarded_count() {
        let buffer = InputSpikeBuffer::new(8);
        for key in 0..6 {
            buffer.try_push(SpikeKey(key));
        }
        assert_eq!(buffer.clear(), 6);
        assert!(buffer.is_empty());
        assert_eq!(buffer.clear(), 0);
    }

    #[test]
    fn test_zero_capacity_always_overflows() {
        let buffer = InputSpikeBuffer::new(0);
        assert!(!buffer.try_push(SpikeKey(1)));
        assert!(!buffer.try_push(SpikeKey(2)));
        assert_eq!(buffer.overflow_count(), 2);
        assert_eq!(buffer.try_pop(), None);
        assert_eq!(buffer.max_fill(), 0);
    }

    #[test]
    fn test_concurrent_producer_consumer_conserves_spikes() {
        use std::sync::Arc;

        let buffer = Arc::new(InputSpikeBuffer::new(64));
        let producer_buffer = Arc::clone(&buffer);
        let producer = std::thread::spawn(move || {
            let mut pushed = 0u32;
            for key in 0..10_000u32 {
                if producer_buffer.try_push(SpikeKey(key)) {
                    pushed += 1;
                }
            }
            pushed
        });

        let mut popped = Vec::new();
        while !producer.is_finished() {
            if let Some(key) = buffer.try_pop() {
                popped.push(key.0);
            }
        }
        while let Some(key) = buffer.try_pop() {
            popped.push(key.0);
        }

        let pushed = producer.join().unwrap();
        assert_eq!(popped.len() as u32, pushed);
        assert_eq!(pushed + buffer.overflow_count(), 10_000);
        // FIFO: keys come out strictly increasing even across overflow gaps
        assert!(popped.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

//! Ticket-based slot-ring queue.
//!
//! A ticket taken from `head` (producers) or `tail` (consumers) names both a
//! slot (`ticket % capacity`) and a generation (`ticket / capacity`). Each
//! slot carries a turn counter that walks `2g` (empty, writable by
//! generation `g`'s producer) -> `2g + 1` (full, readable by generation
//! `g`'s consumer) -> `2g + 2`, never decreasing and never skipping. The
//! Release store of the turn publishes the payload; the matching Acquire
//! load on the other side is the only synchronization edge the payload
//! needs, so the copy in between is a plain write.

use core::fmt;
use core::mem::MaybeUninit;

use crossbeam_utils::CachePadded;

use crate::backoff::Backoff;
use crate::error::{CapacityError, RecvError, SendError};
use crate::sync::{AtomicUsize, Ordering, UnsafeCell};

struct Slot<T> {
    turn: AtomicUsize,
    value: UnsafeCell<MaybeUninit<T>>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Slot {
            turn: AtomicUsize::new(0),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }
}

/// Bounded lock-free MPMC queue with ticket/turn slot coordination.
///
/// Capacity is fixed at construction and does not need to be a power of
/// two. All waiting is active spinning governed by a [`Backoff`] policy;
/// nothing here ever blocks in the kernel.
pub struct Queue<T> {
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
    slots: Box<[CachePadded<Slot<T>>]>,
    backoff: Backoff,
}

// SAFETY: values only move across threads as whole `T`s, and slot access is
// serialized per generation by the turn protocol.
unsafe impl<T: Send> Send for Queue<T> {}
// SAFETY: same argument; shared references only reach the storage through
// the turn gate.
unsafe impl<T: Send> Sync for Queue<T> {}

impl<T> Queue<T> {
    /// Creates a queue holding at most `capacity` items, with the default
    /// backoff policy.
    ///
    /// Fails with [`CapacityError`] when `capacity` is zero. The slot array
    /// is the only allocation the queue ever performs.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_backoff(capacity, Backoff::default())
    }

    /// Creates a queue with an explicit [`Backoff`] policy for the blocking
    /// operations.
    pub fn with_backoff(capacity: usize, backoff: Backoff) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }

        let slots = (0..capacity)
            .map(|_| CachePadded::new(Slot::new()))
            .collect();

        Ok(Queue {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            slots,
            backoff,
        })
    }

    /// Maximum number of items the queue can hold.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn slot(&self, ticket: usize) -> &Slot<T> {
        &self.slots[ticket % self.slots.len()]
    }

    /// Blocking enqueue. Spins until the claimed slot has been drained by
    /// all prior consumers, then publishes `value`.
    ///
    /// Never fails; if the queue stays full and no consumer drains it, the
    /// wait is unbounded. Callers that need a full-queue signal should use
    /// [`Queue::try_send`].
    pub fn send(&self, value: T) {
        let ticket = self.head.fetch_add(1, Ordering::Relaxed);
        let slot = self.slot(ticket);
        let turn = 2 * (ticket / self.capacity());

        let mut spin = 0;
        while slot.turn.load(Ordering::Acquire) != turn {
            spin = self.backoff.snooze(spin);
        }

        slot.value.with_mut(|ptr| {
            // SAFETY: turn == 2g excludes every other producer and consumer
            // from this slot until we bump the turn.
            unsafe { (*ptr).write(value) };
        });
        slot.turn.store(turn + 1, Ordering::Release);
    }

    /// Blocking dequeue. Spins until an item is published in the claimed
    /// slot, then moves it out and reopens the slot for the next
    /// generation's producer.
    pub fn recv(&self) -> T {
        let ticket = self.tail.fetch_add(1, Ordering::Relaxed);
        let slot = self.slot(ticket);
        let turn = 2 * (ticket / self.capacity()) + 1;

        let mut spin = 0;
        while slot.turn.load(Ordering::Acquire) != turn {
            spin = self.backoff.snooze(spin);
        }

        let value = slot.value.with(|ptr| {
            // SAFETY: the producer's Release store of 2g + 1 published an
            // initialized value, and turn == 2g + 1 makes us its only
            // reader. Moving it out leaves the slot logically uninitialized
            // again.
            unsafe { (*ptr).assume_init_read() }
        });
        slot.turn.store(turn + 1, Ordering::Release);
        value
    }

    /// Non-blocking enqueue. Returns `Err(SendError(value))` when the queue
    /// is full at the attempted position.
    ///
    /// Lost races against other producers are retried internally; only
    /// genuine fullness fails.
    pub fn try_send(&self, value: T) -> Result<(), SendError<T>> {
        let mut ticket = self.head.load(Ordering::Acquire);
        loop {
            let slot = self.slot(ticket);
            let turn = 2 * (ticket / self.capacity());

            if slot.turn.load(Ordering::Acquire) == turn {
                match self.head.compare_exchange_weak(
                    ticket,
                    ticket + 1,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        slot.value.with_mut(|ptr| {
                            // SAFETY: the successful CAS makes this ticket
                            // ours; turn == 2g keeps everyone else out.
                            unsafe { (*ptr).write(value) };
                        });
                        slot.turn.store(turn + 1, Ordering::Release);
                        return Ok(());
                    }
                    // Another producer claimed the ticket first.
                    Err(current) => {
                        ticket = current;
                        crate::sync::spin_loop();
                    }
                }
            } else {
                // Slot not writable. If head has not advanced either, the
                // queue is genuinely full at this position.
                let current = self.head.load(Ordering::Acquire);
                if current == ticket {
                    return Err(SendError(value));
                }
                ticket = current;
            }
        }
    }

    /// Non-blocking dequeue. Returns `Err(RecvError)` when the queue is
    /// empty at the attempted position.
    pub fn try_recv(&self) -> Result<T, RecvError> {
        let mut ticket = self.tail.load(Ordering::Acquire);
        loop {
            let slot = self.slot(ticket);
            let turn = 2 * (ticket / self.capacity()) + 1;

            if slot.turn.load(Ordering::Acquire) == turn {
                match self.tail.compare_exchange_weak(
                    ticket,
                    ticket + 1,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        let value = slot.value.with(|ptr| {
                            // SAFETY: turn == 2g + 1 means an initialized
                            // value was published and we are its sole
                            // consumer.
                            unsafe { (*ptr).assume_init_read() }
                        });
                        slot.turn.store(turn + 1, Ordering::Release);
                        return Ok(value);
                    }
                    Err(current) => {
                        ticket = current;
                        crate::sync::spin_loop();
                    }
                }
            } else {
                let current = self.tail.load(Ordering::Acquire);
                if current == ticket {
                    return Err(RecvError);
                }
                ticket = current;
            }
        }
    }

    /// Advisory snapshot of the number of items currently enqueued.
    ///
    /// The cursors are read independently with Relaxed ordering, so the
    /// result is racy under concurrent mutation. It is clamped to
    /// `0..=capacity` (blocked callers bump their cursor before waiting)
    /// and must not be used to gate correctness decisions.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        head.saturating_sub(tail).min(self.capacity())
    }

    /// Advisory emptiness check; same caveats as [`Queue::len`].
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        // An odd turn is exactly "published but not yet consumed".
        for slot in self.slots.iter() {
            if slot.turn.load(Ordering::Relaxed) % 2 == 1 {
                slot.value.with_mut(|ptr| {
                    // SAFETY: &mut self means no operation is in flight, so
                    // the odd-turn slot holds an initialized value nobody
                    // else will touch.
                    unsafe { (*ptr).assume_init_drop() };
                });
            }
        }
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn smoke() {
        let q = Queue::with_capacity(8).unwrap();
        q.send(42);
        assert_eq!(q.recv(), 42);
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(Queue::<i32>::with_capacity(0).unwrap_err(), CapacityError);
    }

    #[test]
    fn try_send_try_recv() {
        let q = Queue::with_capacity(4).unwrap();
        assert_eq!(q.try_recv(), Err(RecvError));
        for i in 0..4 {
            assert_eq!(q.try_send(i), Ok(()));
        }
        assert_eq!(q.try_send(99), Err(SendError(99)));
        for i in 0..4 {
            assert_eq!(q.try_recv(), Ok(i));
        }
        assert_eq!(q.try_recv(), Err(RecvError));
    }

    #[test]
    fn custom_backoff() {
        // A zero spin limit yields on every wait iteration.
        let q = Queue::with_backoff(2, Backoff::new(0)).unwrap();
        q.send(1u8);
        q.send(2);
        assert_eq!(q.recv(), 1);
        assert_eq!(q.recv(), 2);
    }

    #[test]
    fn len_is_clamped() {
        let q = Queue::with_capacity(3).unwrap();
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
        q.send("a");
        q.send("b");
        assert_eq!(q.len(), 2);
        assert!(!q.is_empty());
        let _ = q.recv();
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn non_power_of_two_capacity() {
        let q = Queue::with_capacity(7).unwrap();
        assert_eq!(q.capacity(), 7);
        for round in 0..5 {
            for i in 0..7 {
                q.send(round * 10 + i);
            }
            for i in 0..7 {
                assert_eq!(q.recv(), round * 10 + i);
            }
        }
        assert!(q.is_empty());
    }

    #[test]
    fn debug_output() {
        let q = Queue::with_capacity(2).unwrap();
        q.send(1);
        let s = format!("{q:?}");
        assert!(s.contains("capacity: 2"));
        assert!(s.contains("len: 1"));
    }
}

//! turnq - ticket-based bounded MPMC queue
//!
//! A fixed-capacity, lock-free multi-producer/multi-consumer queue built for
//! low-latency handoff between threads. Every operation claims a unique
//! ticket (an atomically incremented counter) that names one slot and one
//! generation; a per-slot "turn" counter then serializes the producer and
//! consumer that share that slot, so no mutex is ever taken and the hot path
//! never allocates.
//!
//! Blocking [`Queue::send`]/[`Queue::recv`] spin until their slot is ready;
//! [`Queue::try_send`]/[`Queue::try_recv`] return immediately with a
//! would-block result when the queue is full or empty at the attempted
//! position.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use turnq::Queue;
//!
//! let queue = Arc::new(Queue::with_capacity(4).unwrap());
//!
//! let q = queue.clone();
//! let producer = thread::spawn(move || {
//!     for i in 0..8 {
//!         q.send(i);
//!     }
//! });
//!
//! let mut sum = 0;
//! for _ in 0..8 {
//!     sum += queue.recv();
//! }
//! producer.join().unwrap();
//!
//! assert_eq!(sum, 28);
//! assert!(queue.is_empty());
//! ```
#![warn(missing_debug_implementations)]

mod backoff;
mod error;
mod queue;
mod sync;

pub use crate::backoff::Backoff;
pub use crate::error::{CapacityError, RecvError, SendError};
pub use crate::queue::Queue;

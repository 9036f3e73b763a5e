//! Error types returned by queue construction and the non-blocking
//! operations. A full or empty queue is a routine outcome, not a defect, so
//! the try-variants report it as a value rather than panicking.

use core::fmt;

/// Error returned by [`Queue::with_capacity`] when the requested capacity
/// is zero.
///
/// [`Queue::with_capacity`]: crate::Queue::with_capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "capacity must be greater than zero")
    }
}

impl std::error::Error for CapacityError {}

/// Error returned by [`Queue::try_send`] when the queue is full at the time
/// of the attempt. The rejected value is handed back to the caller.
///
/// [`Queue::try_send`]: crate::Queue::try_send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendError<T>(pub T);

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue is full")
    }
}

impl<T: fmt::Debug> std::error::Error for SendError<T> {}

/// Error returned by [`Queue::try_recv`] when the queue is empty at the
/// time of the attempt.
///
/// [`Queue::try_recv`]: crate::Queue::try_recv
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecvError;

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue is empty")
    }
}

impl std::error::Error for RecvError {}

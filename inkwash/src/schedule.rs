//! Next-frame scheduling.
//!
//! The host decides when a display refresh happens. Work asks for "the next
//! frame" and gets a handle back; the host later reports that handle as due
//! and the owner runs its frame. Cancelling a handle guarantees it is never
//! reported.

use std::collections::VecDeque;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    /// Ask for a callback at the next refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Pop the oldest due frame, if any.
    fn next_due(&mut self) -> Option<FrameHandle>;
}

/// FIFO scheduler driven by the host loop: every pending request is due at
/// the next refresh, in request order.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }

    fn next_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_request_order() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();

        assert_ne!(a, b);
        assert_eq!(queue.next_due(), Some(a));
        assert_eq!(queue.next_due(), Some(b));
        assert_eq!(queue.next_due(), None);
    }

    #[test]
    fn cancelled_never_fires() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        queue.cancel_frame(a);

        assert_eq!(queue.pending_count(), 1);
        assert_eq!(queue.next_due(), Some(b));
        assert!(queue.is_idle());
    }

    #[test]
    fn cancel_unknown_is_noop() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        queue.cancel_frame(FrameHandle(999));
        assert_eq!(queue.next_due(), Some(a));

        // Already fired
        queue.cancel_frame(a);
        assert!(queue.is_idle());
    }
}

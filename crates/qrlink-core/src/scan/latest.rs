use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Single-slot frame hand-off that keeps only the newest frame.
///
/// A producer that outpaces its consumers overwrites the pending frame
/// instead of queueing it. Frames still pending when the slot is closed are
/// delivered before `take` reports the end.
pub struct LatestFrame<T> {
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

struct SlotState<T> {
    pending: Option<T>,
    closed: bool,
    dropped: u64,
}

impl<T> Default for LatestFrame<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestFrame<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                pending: None,
                closed: false,
                dropped: 0,
            }),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish a frame, replacing any frame not yet taken.
    ///
    /// Returns `false` once the slot is closed; the frame is discarded.
    pub fn offer(&self, frame: T) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        if state.pending.replace(frame).is_some() {
            state.dropped += 1;
        }
        drop(state);
        self.ready.notify_one();
        true
    }

    /// Block until a frame is available. `None` once closed and drained.
    pub fn take(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(frame) = state.pending.take() {
                return Some(frame);
            }
            if state.closed {
                return None;
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }

    /// Close and discard any pending frame.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.pending = None;
        drop(state);
        self.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Frames overwritten before any consumer took them.
    pub fn dropped(&self) -> u64 {
        self.lock().dropped
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn newer_frame_replaces_pending() {
        let slot = LatestFrame::new();
        assert!(slot.offer(1));
        assert!(slot.offer(2));
        assert!(slot.offer(3));
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.dropped(), 2);
    }

    #[test]
    fn pending_frame_survives_close() {
        let slot = LatestFrame::new();
        slot.offer("last");
        slot.close();
        assert!(!slot.offer("late"));
        assert_eq!(slot.take(), Some("last"));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn shutdown_discards_pending() {
        let slot = LatestFrame::new();
        slot.offer(7);
        slot.shutdown();
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn close_wakes_blocked_consumer() {
        let slot = Arc::new(LatestFrame::<u32>::new());
        let consumer = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || slot.take())
        };
        thread::sleep(std::time::Duration::from_millis(20));
        slot.close();
        assert_eq!(consumer.join().unwrap(), None);
    }
}

//! Open/closed state shared between an overlay root and its parts.
//!
//! The root owns a [`VisibilityController`]. Parts that only need to branch
//! on the flag get a [`VisibilityReader`]; parts that want to change it
//! (triggers, close buttons) get an [`OpenSetter`], which can only queue a
//! request. The root applies queued requests through
//! [`VisibilityController::set_open`], so the controller is the only writer.

use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Owner of one overlay's open flag.
#[derive(Debug)]
pub struct VisibilityController {
    state: watch::Sender<bool>,
    requests_tx: mpsc::UnboundedSender<bool>,
    requests_rx: mpsc::UnboundedReceiver<bool>,
}

impl VisibilityController {
    /// Seed the flag from `open` when the caller controls it, else from
    /// `default_open`, else closed.
    #[must_use]
    pub fn initialize(default_open: Option<bool>, open: Option<bool>) -> Self {
        let initial = open.or(default_open).unwrap_or(false);
        let (state, _) = watch::channel(initial);
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        Self {
            state,
            requests_tx,
            requests_rx,
        }
    }

    #[must_use]
    pub fn current(&self) -> bool {
        *self.state.borrow()
    }

    /// Replace the flag and notify readers.
    ///
    /// Returns `true` if the value changed. Readers are only notified on a
    /// change, so one gesture yields one notification.
    pub fn set_open(&self, value: bool) -> bool {
        let changed = self.state.send_if_modified(|open| {
            if *open == value {
                false
            } else {
                *open = value;
                true
            }
        });
        if changed {
            debug!(open = value, "Overlay visibility changed");
        }
        changed
    }

    /// Read-only handle for dependents.
    #[must_use]
    pub fn subscribe(&self) -> VisibilityReader {
        VisibilityReader {
            rx: self.state.subscribe(),
        }
    }

    /// Request handle for parts that may ask the overlay to open or close.
    #[must_use]
    pub fn setter(&self) -> OpenSetter {
        OpenSetter {
            tx: self.requests_tx.clone(),
        }
    }

    /// Pop the next queued request, if any.
    pub fn next_request(&mut self) -> Option<bool> {
        self.requests_rx.try_recv().ok()
    }
}

/// Read-only view of an overlay's open flag.
#[derive(Debug, Clone)]
pub struct VisibilityReader {
    rx: watch::Receiver<bool>,
}

impl VisibilityReader {
    /// Current flag. Keeps returning the last value after the controller is
    /// dropped.
    #[must_use]
    pub fn current(&self) -> bool {
        *self.rx.borrow()
    }

    /// Whether the flag changed since this reader last called [`Self::observe`].
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Read the flag and mark it as seen.
    pub fn observe(&mut self) -> bool {
        *self.rx.borrow_and_update()
    }
}

/// Bounded handle that queues open/close requests for the owning root.
#[derive(Debug, Clone)]
pub struct OpenSetter {
    tx: mpsc::UnboundedSender<bool>,
}

impl OpenSetter {
    /// Queue a request. Requests sent after the root is gone are dropped.
    pub fn request(&self, open: bool) {
        if self.tx.send(open).is_err() {
            debug!(open, "Dropping visibility request for a destroyed overlay");
        }
    }

    pub fn open(&self) {
        self.request(true);
    }

    pub fn close(&self) {
        self.request(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_prefers_controlled_flag() {
        assert!(!VisibilityController::initialize(None, None).current());
        assert!(VisibilityController::initialize(Some(true), None).current());
        assert!(!VisibilityController::initialize(Some(true), Some(false)).current());
        assert!(VisibilityController::initialize(Some(false), Some(true)).current());
    }

    #[test]
    fn test_set_open_notifies_only_on_change() {
        let controller = VisibilityController::initialize(None, None);
        let mut reader = controller.subscribe();
        assert!(!reader.has_changed());

        assert!(controller.set_open(true));
        assert!(reader.has_changed());
        assert!(reader.observe());
        assert!(!reader.has_changed());

        assert!(!controller.set_open(true));
        assert!(!reader.has_changed());
    }

    #[test]
    fn test_setter_requests_are_queued_in_order() {
        let mut controller = VisibilityController::initialize(None, None);
        let setter = controller.setter();
        setter.open();
        setter.close();

        assert_eq!(controller.next_request(), Some(true));
        assert_eq!(controller.next_request(), Some(false));
        assert_eq!(controller.next_request(), None);
        // Requests alone never touch the flag.
        assert!(!controller.current());
    }

    #[test]
    fn test_reader_outlives_controller() {
        let controller = VisibilityController::initialize(Some(true), None);
        let reader = controller.subscribe();
        let setter = controller.setter();
        drop(controller);

        assert!(reader.current());
        assert!(!reader.has_changed());
        setter.close();
    }
}

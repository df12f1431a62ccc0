//! Event sink trait and standard implementations.

use crate::HolderEvent;
use parking_lot::Mutex;
use std::sync::mpsc;

/// Fire-and-forget receiver of holder events.
///
/// The engine calls [`submit`](Self::submit) after each successful
/// mutation, outside of any internal lock. Implementations must not
/// block for long and must never panic back into the engine; a sink that
/// cannot deliver simply drops the event.
pub trait EventSink: Send + Sync + std::fmt::Debug {
    /// Accepts one event. Delivery failures are swallowed.
    fn submit(&self, event: HolderEvent);
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn submit(&self, _event: HolderEvent) {}
}

/// A sink that records events in memory, for assertions in tests.
///
/// # Example
///
/// ```
/// use strata_event::{EventSink, HolderEvent, RecordingSink};
/// use strata_node::{HolderRef, Node};
///
/// let sink = RecordingSink::new();
/// let node = Node::builder("fly").build().expect("non-empty permission");
/// sink.submit(HolderEvent::node_set(HolderRef::group("admin"), node));
///
/// assert_eq!(sink.events().len(), 1);
/// assert_eq!(sink.events()[0].kind(), "node_set");
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<HolderEvent>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<HolderEvent> {
        self.events.lock().clone()
    }

    /// Drops all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn submit(&self, event: HolderEvent) {
        self.events.lock().push(event);
    }
}

/// A sink that forwards events into an unbounded channel.
///
/// This is the seam towards an external transport: the consumer end of
/// the channel lives in the host, which drains it on its own schedule.
/// If the receiver is gone, events are dropped silently.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<HolderEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiver the host drains.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<HolderEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn submit(&self, event: HolderEvent) {
        // Receiver gone means nobody cares any more.
        let _ = self.tx.send(event);
    }
}

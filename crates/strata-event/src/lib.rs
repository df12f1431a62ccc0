//! Mutation events for strata.
//!
//! The engine announces every successful mutation through an
//! [`EventSink`]. Delivery is fire-and-forget: the engine never waits on
//! a sink, and losing or reordering events never affects resolution
//! correctness. Transports (plugin buses, message queues, log streams)
//! adapt a sink on their side of the boundary.
//!
//! # Crate Architecture
//!
//! ```text
//! strata-node   (Node, HolderRef)
//!     ↑
//! strata-event  (HolderEvent, EventSink)  ◄── THIS CRATE
//!     ↑
//! strata-engine (emits events after each mutation)
//! ```
//!
//! # Provided Sinks
//!
//! | Sink | Use |
//! |------|-----|
//! | [`NoopSink`] | Discard everything (default wiring) |
//! | [`RecordingSink`] | Capture events for assertions in tests |
//! | [`ChannelSink`] | Forward into an unbounded channel for a transport |

mod event;
mod sink;

pub use event::HolderEvent;
pub use sink::{ChannelSink, EventSink, NoopSink, RecordingSink};

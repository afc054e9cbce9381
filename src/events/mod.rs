//! Event notification for board observers.
//!
//! The board raises an event for every observable state transition so a
//! renderer can stay in sync without polling.
//!
//! ## Key Components
//!
//! - [`EventKind`]: the five recognized kinds (`set`, `remove`, `form`,
//!   `destroy`, `clear`)
//! - [`BoardEvent`]: an event with its payload
//! - [`ListenerRegistry`]: callback storage and dispatch
//!
//! ## Delivery
//!
//! Callbacks run synchronously inside the board operation that raised the
//! event, once per event. Nothing is delivered while the board is running a
//! speculative query.

mod event;
mod registry;

pub use event::{BoardEvent, EventKind, FormedHexagon};
pub use registry::{Callback, ListenerId, ListenerRegistry};

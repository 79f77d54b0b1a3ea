//! # onslaught_event - Event Channels and Observers
//!
//! - Single-type event channels with cloneable senders
//! - One-shot observer registry keyed by the emitting object
//!
//! Events are drained by the owner within the tick they are sent, so
//! delivery is synchronous with respect to the simulation.

pub mod channel;
pub mod observer;

pub mod prelude {
    pub use crate::channel::{EventChannel, EventSender};
    pub use crate::observer::{Observers, SubscriberId};
}

pub use prelude::*;

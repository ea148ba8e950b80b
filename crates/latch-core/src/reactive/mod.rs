//! Single-threaded reactive primitives
//!
//! Producers are [`EventStream`]s: registries of callbacks fired on the UI
//! thread. Every subscription and timer a component creates is parked in its
//! [`Lifetime`], so dropping the component releases all of them.

mod event_stream;
mod lifetime;
mod timer;

pub use event_stream::{EventStream, Subscription};
pub use lifetime::Lifetime;
pub use timer::Timer;

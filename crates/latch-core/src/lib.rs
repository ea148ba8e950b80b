//! Latch core library
//!
//! Passcode storage, flood control, idle tracking and the small reactive
//! toolkit (event streams, lifetimes, timers) the terminal front-end is
//! built on. Nothing here touches the terminal.

pub mod error;
pub mod flood;
pub mod idle;
pub mod passcode;
pub mod reactive;
pub mod services;
pub mod settings;

pub use error::StoreError;
pub use flood::{FloodControl, FloodPolicy};
pub use idle::{IdleTimeProvider, InputActivity};
pub use passcode::{LocalPasscodeStore, PasscodeStore};
pub use services::{Services, SharedStore};
pub use settings::{format_auto_lock, Settings, AUTO_LOCK_OPTIONS, DEFAULT_AUTO_LOCK};

//! Reusable UI components

pub mod auto_lock_box;
pub mod confirm;
pub mod divider;
pub mod lock_icon;
pub mod password_input;

pub use auto_lock_box::AutoLockBox;
pub use confirm::{ConfirmBox, ConfirmOutcome};
pub use divider::Divider;
pub use lock_icon::LockIcon;
pub use password_input::PasswordInput;

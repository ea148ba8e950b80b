//! Latch TUI Library
//!
//! Terminal front-end for the local passcode: the create / check / change
//! entry section, the passcode management section, and the host application
//! that routes between them.

pub mod app;
pub mod lang;
pub mod sections;
pub mod ui;

pub use app::App;
pub use sections::{Section, SectionId};

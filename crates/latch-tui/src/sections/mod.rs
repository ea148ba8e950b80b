//! Navigable sections hosted by the app

pub mod passcode_enter;
pub mod passcode_manage;

pub use passcode_enter::{EntryMode, Focus, PasscodeEnter};
pub use passcode_manage::{ManageItem, PasscodeManage};

use std::time::Instant;

use crossterm::event::KeyCode;
use latch_core::reactive::EventStream;
use latch_core::Services;
use ratatui::prelude::*;

use crate::ui::Theme;

/// Identity of every section the host can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    PasscodeCreate,
    PasscodeCheck,
    PasscodeChange,
    PasscodeManage,
}

/// Contract between a section and the navigation host
pub trait Section {
    fn id(&self) -> SectionId;

    fn title(&self) -> &'static str;

    /// The show transition finished
    fn show_finished(&mut self) {}

    /// Move keyboard focus to the primary input
    fn set_inner_focus(&mut self) {}

    /// Requests to show another section
    fn section_show_other(&self) -> EventStream<SectionId>;

    /// Requests to go back
    fn section_show_back(&self) -> EventStream<()>;

    /// Sections to drop from history when this one is shown
    fn remove_from_stack(&self) -> Vec<SectionId> {
        Vec::new()
    }

    /// Claim a bottom-anchored strip of `parent`, if the section has one
    fn create_pinned_to_bottom(&mut self, _parent: Rect) -> Option<Rect> {
        None
    }

    fn handle_key(&mut self, key: KeyCode);

    /// Event loop tick; drives timers and animations
    fn tick(&mut self, now: Instant);

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn render_pinned_to_bottom(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}

    /// Footer key hints
    fn hints(&self) -> &'static [(&'static str, &'static str)];
}

/// Build the section for `id`
pub fn create_section(id: SectionId, services: Services) -> Box<dyn Section> {
    match id {
        SectionId::PasscodeCreate => Box::new(PasscodeEnter::new(EntryMode::Create, services)),
        SectionId::PasscodeCheck => Box::new(PasscodeEnter::new(EntryMode::Check, services)),
        SectionId::PasscodeChange => Box::new(PasscodeEnter::new(EntryMode::Change, services)),
        SectionId::PasscodeManage => Box::new(PasscodeManage::new(services)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Doubles for the store and idle provider

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use latch_core::{IdleTimeProvider, PasscodeStore, Services, Settings, StoreError};

    /// In-memory store that counts calls
    #[derive(Default)]
    pub struct CountingStore {
        pub passcode: Vec<u8>,
        pub sets: Rc<RefCell<Vec<Vec<u8>>>>,
        pub checks: Rc<Cell<u32>>,
        pub fail_writes: bool,
    }

    impl PasscodeStore for CountingStore {
        fn has_passcode(&self) -> bool {
            !self.passcode.is_empty()
        }

        fn set_passcode(&mut self, passcode: &[u8]) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.passcode = passcode.to_vec();
            self.sets.borrow_mut().push(passcode.to_vec());
            Ok(())
        }

        fn check_passcode(&self, passcode: &[u8]) -> bool {
            self.checks.set(self.checks.get() + 1);
            !self.passcode.is_empty() && self.passcode == passcode
        }
    }

    /// Idle provider with a settable idle time
    #[derive(Default)]
    pub struct FixedIdle {
        pub idle: Cell<Duration>,
        pub system_wide: bool,
    }

    impl IdleTimeProvider for FixedIdle {
        fn idle_time_at(&self, _now: Instant) -> Duration {
            self.idle.get()
        }

        fn system_idle_supported(&self) -> bool {
            self.system_wide
        }
    }

    pub struct Fixture {
        pub services: Services,
        pub idle: Rc<FixedIdle>,
        pub checks: Rc<Cell<u32>>,
        pub sets: Rc<RefCell<Vec<Vec<u8>>>>,
    }

    impl Fixture {
        /// Services over a store holding `passcode` (empty for none)
        pub fn new(passcode: &str) -> Self {
            Self::build(passcode, false, false)
        }

        pub fn read_only(passcode: &str) -> Self {
            Self::build(passcode, true, false)
        }

        /// Idle provider reporting system-wide idle detection
        pub fn system_idle(passcode: &str) -> Self {
            Self::build(passcode, false, true)
        }

        fn build(passcode: &str, fail_writes: bool, system_wide: bool) -> Self {
            let store = CountingStore {
                passcode: passcode.as_bytes().to_vec(),
                fail_writes,
                ..Default::default()
            };
            let checks = Rc::clone(&store.checks);
            let sets = Rc::clone(&store.sets);
            let idle = Rc::new(FixedIdle {
                system_wide,
                ..Default::default()
            });
            let services = Services::new(store, idle.clone(), Settings::default());
            Self {
                services,
                idle,
                checks,
                sets,
            }
        }

        /// Passcodes committed so far, oldest first
        pub fn commits(&self) -> Vec<Vec<u8>> {
            self.sets.borrow().clone()
        }

        pub fn stored_matches(&self, passcode: &str) -> bool {
            let before = self.checks.get();
            let matches = self.services.check_passcode(passcode.as_bytes());
            self.checks.set(before);
            matches
        }
    }
}

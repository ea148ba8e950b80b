//! Shared services handed to every section at construction

use std::cell::RefCell;
use std::rc::Rc;

use crate::{FloodControl, IdleTimeProvider, PasscodeStore, Settings, StoreError};

/// Passcode store shared across the UI thread
pub type SharedStore = Rc<RefCell<dyn PasscodeStore>>;

/// Everything the passcode sections read or write outside themselves
#[derive(Clone)]
pub struct Services {
    pub passcode: SharedStore,
    pub flood: Rc<RefCell<FloodControl>>,
    pub idle: Rc<dyn IdleTimeProvider>,
    pub settings: Rc<Settings>,
}

impl Services {
    /// Bundle a store, idle provider and settings with fresh flood control
    pub fn new(
        store: impl PasscodeStore + 'static,
        idle: Rc<dyn IdleTimeProvider>,
        settings: Settings,
    ) -> Self {
        let passcode: SharedStore = Rc::new(RefCell::new(store));
        Self {
            passcode,
            flood: Rc::new(RefCell::new(FloodControl::new())),
            idle,
            settings: Rc::new(settings),
        }
    }

    /// Commit a new passcode (empty clears it); a successful write resets
    /// bad tries
    pub fn set_passcode(&self, passcode: &[u8]) -> Result<(), StoreError> {
        self.passcode.borrow_mut().set_passcode(passcode)?;
        self.flood.borrow_mut().set_bad_tries(0);
        Ok(())
    }

    pub fn check_passcode(&self, passcode: &[u8]) -> bool {
        self.passcode.borrow().check_passcode(passcode)
    }

    pub fn has_passcode(&self) -> bool {
        self.passcode.borrow().has_passcode()
    }
}

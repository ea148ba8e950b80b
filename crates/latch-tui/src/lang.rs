//! User-facing strings

pub const APP_NAME: &str = "LATCH";

pub const SETTINGS_PASSCODE_TITLE: &str = "Local passcode";

pub const PASSCODE_CREATE_TITLE: &str = "Create Local Passcode";
pub const PASSCODE_CHECK_TITLE: &str = "Enter Local Passcode";
pub const PASSCODE_CHANGE_TITLE: &str = "Change Local Passcode";

pub const PASSCODE_ABOUT1: &str =
    "A local passcode locks this application on this device.";
pub const PASSCODE_ABOUT2: &str =
    "If you forget it, you will have to reset the application data.";
pub const PASSCODE_ABOUT3: &str =
    "The application locks itself after the auto-lock period without input.";

pub const PASSCODE_ENTER_FIRST: &str = "Enter a passcode";
pub const PASSCODE_CONFIRM_NEW: &str = "Re-enter the passcode";

pub const PASSCODE_CREATE_BUTTON: &str = "Save Passcode";
pub const PASSCODE_CHECK_BUTTON: &str = "Submit";
pub const PASSCODE_CHANGE_BUTTON: &str = "Save Passcode";

pub const PASSCODE_DIFFER: &str = "Passcodes are different";
pub const PASSCODE_IS_SAME: &str = "Passcode has not changed";
pub const PASSCODE_WRONG: &str = "Wrong passcode";
pub const FLOOD_ERROR: &str = "Too many tries. Please try again later.";
pub const PASSCODE_SAVE_FAILED: &str = "Could not save the passcode";

pub const PASSCODE_CHANGE: &str = "Change passcode";
pub const PASSCODE_AUTOLOCK_AWAY: &str = "Auto-lock if away for";
pub const PASSCODE_AUTOLOCK_INACTIVE: &str = "Auto-lock after inactivity of";
pub const SETTINGS_PASSCODE_DISABLE: &str = "Disable passcode";
pub const SETTINGS_PASSCODE_DISABLE_SURE: &str =
    "Are you sure you want to disable your local passcode?";
pub const SETTINGS_DISABLE_CONFIRM: &str = "Disable";
pub const SETTINGS_DISABLE_FAILED: &str = "Could not disable the passcode";

pub const AUTOLOCK_BOX_TITLE: &str = "Auto-lock";

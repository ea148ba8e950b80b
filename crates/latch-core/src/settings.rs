//! Process-wide settings read by the passcode screens

use std::cell::Cell;

use crate::reactive::EventStream;

/// Default auto-lock timeout (1 hour)
pub const DEFAULT_AUTO_LOCK: u32 = 3600;

/// Auto-lock durations offered by the editor, in seconds
pub const AUTO_LOCK_OPTIONS: &[u32] = &[60, 5 * 60, 3600, 5 * 3600];

/// Settings service shared by the sections
pub struct Settings {
    /// Auto-lock timeout in seconds
    auto_lock: Cell<u32>,
    /// Fired with the new value whenever the timeout changes
    auto_lock_changes: EventStream<u32>,
}

impl Settings {
    /// Create settings with the given auto-lock timeout
    pub fn new(auto_lock: u32) -> Self {
        Self {
            auto_lock: Cell::new(auto_lock),
            auto_lock_changes: EventStream::new(),
        }
    }

    pub fn auto_lock(&self) -> u32 {
        self.auto_lock.get()
    }

    /// Update the timeout, notifying subscribers if it changed
    ///
    /// The new value is stored before subscribers run, so they may read it
    /// back through a shared handle.
    pub fn set_auto_lock(&self, seconds: u32) {
        if self.auto_lock.get() == seconds {
            return;
        }
        self.auto_lock.set(seconds);
        tracing::debug!("Auto-lock set to {} seconds", seconds);
        self.auto_lock_changes.fire(seconds);
    }

    pub fn auto_lock_changes(&self) -> EventStream<u32> {
        self.auto_lock_changes.clone()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_LOCK)
    }
}

/// Render an auto-lock timeout for display
///
/// Both components present gives `"1h 30m"`; otherwise only the nonzero one
/// is spelled out.
pub fn format_auto_lock(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds - hours * 3600) / 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        plural(hours, "hour")
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[rstest]
    #[case(60, "1 minute")]
    #[case(300, "5 minutes")]
    #[case(3600, "1 hour")]
    #[case(18000, "5 hours")]
    #[case(5400, "1h 30m")]
    #[case(7260, "2h 1m")]
    #[case(3630, "1 hour")]
    fn test_format_auto_lock(#[case] seconds: u32, #[case] expected: &str) {
        assert_eq!(format_auto_lock(seconds), expected);
    }

    #[test]
    fn test_set_auto_lock_notifies_on_change() {
        let settings = Settings::default();
        let seen = Rc::new(Cell::new(0));

        let sink = Rc::clone(&seen);
        let _sub = settings.auto_lock_changes().subscribe(move |v| sink.set(*v));

        settings.set_auto_lock(DEFAULT_AUTO_LOCK);
        assert_eq!(seen.get(), 0);

        settings.set_auto_lock(300);
        assert_eq!(seen.get(), 300);
        assert_eq!(settings.auto_lock(), 300);
    }

    #[test]
    fn test_subscriber_reads_settings_during_change() {
        let settings = Rc::new(Settings::default());
        let seen = Rc::new(Cell::new(0));

        let sink = Rc::clone(&seen);
        let reader = Rc::clone(&settings);
        let _sub = settings
            .auto_lock_changes()
            .subscribe(move |_| sink.set(reader.auto_lock()));

        settings.set_auto_lock(60);
        assert_eq!(seen.get(), 60);
    }
}

//! Repeating timer polled from the UI tick

use std::time::{Duration, Instant};

/// Calls its callback once per elapsed interval
///
/// The callback receives the poll time, so work it does is measured on the
/// same clock that drives the timer.
///
/// The timer does not run on its own; the owner feeds it the current time
/// from the event loop tick. A poll that arrives several intervals late fires
/// once and realigns to the original cadence.
pub struct Timer {
    interval: Duration,
    next: Instant,
    callback: Box<dyn FnMut(Instant)>,
}

impl Timer {
    /// Create a timer that first fires one `interval` after `start`
    pub fn call_each(interval: Duration, start: Instant, callback: impl FnMut(Instant) + 'static) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next: start + interval,
            callback: Box::new(callback),
        }
    }

    /// Fire if an interval boundary has passed; returns whether it fired
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        let behind = now.duration_since(self.next).as_nanos();
        let periods = (behind / self.interval.as_nanos()).min(u32::MAX as u128 - 1) as u32 + 1;
        self.next += self.interval * periods;

        (self.callback)(now);
        true
    }

    /// Interval between firings
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Next boundary at which the timer fires
    pub fn next_deadline(&self) -> Instant {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fires_at_boundary() {
        let start = Instant::now();
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let mut timer = Timer::call_each(Duration::from_secs(60), start, move |_| {
            sink.set(sink.get() + 1)
        });

        assert!(!timer.poll(start + Duration::from_secs(59)));
        assert!(timer.poll(start + Duration::from_secs(60)));
        assert!(!timer.poll(start + Duration::from_secs(61)));
        assert!(timer.poll(start + Duration::from_secs(120)));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_late_poll_fires_once_and_realigns() {
        let start = Instant::now();
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let mut timer = Timer::call_each(Duration::from_secs(60), start, move |now| {
            sink.set(sink.get() + 1);
            assert_eq!(now, start + Duration::from_secs(250));
        });

        assert!(timer.poll(start + Duration::from_secs(250)));
        assert_eq!(hits.get(), 1);
        assert_eq!(timer.next_deadline(), start + Duration::from_secs(300));
    }
}

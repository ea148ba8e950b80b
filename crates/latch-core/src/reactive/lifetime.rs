//! Ownership scope for subscriptions and timers

use std::time::{Duration, Instant};

use super::{Subscription, Timer};

/// Owns everything a component has hooked up
///
/// Dropping (or [`Lifetime::destroy`]-ing) the lifetime unsubscribes every
/// stored subscription and cancels every timer.
#[derive(Default)]
pub struct Lifetime {
    subscriptions: Vec<Subscription>,
    timers: Vec<Timer>,
}

impl Lifetime {
    /// Create an empty lifetime
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a subscription alive for as long as this lifetime
    pub fn add(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Start a repeating timer owned by this lifetime
    pub fn call_each(
        &mut self,
        interval: Duration,
        start: Instant,
        callback: impl FnMut(Instant) + 'static,
    ) {
        self.timers.push(Timer::call_each(interval, start, callback));
    }

    /// Poll owned timers; returns how many fired
    pub fn tick(&mut self, now: Instant) -> usize {
        self.timers
            .iter_mut()
            .map(|timer| timer.poll(now))
            .filter(|fired| *fired)
            .count()
    }

    /// Release everything now
    pub fn destroy(&mut self) {
        self.timers.clear();
        self.subscriptions.clear();
    }

    /// Number of owned subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Number of owned timers
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::EventStream;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_drop_releases_subscriptions() {
        let stream = EventStream::<()>::new();
        {
            let mut lifetime = Lifetime::new();
            lifetime.add(stream.subscribe(|_| {}));
            lifetime.add(stream.subscribe(|_| {}));
            assert_eq!(stream.subscriber_count(), 2);
        }
        assert_eq!(stream.subscriber_count(), 0);
    }

    #[test]
    fn test_destroy_cancels_timers() {
        let start = Instant::now();
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);

        let mut lifetime = Lifetime::new();
        lifetime.call_each(Duration::from_secs(1), start, move |_| sink.set(sink.get() + 1));

        assert_eq!(lifetime.tick(start + Duration::from_secs(1)), 1);
        lifetime.destroy();
        assert_eq!(lifetime.tick(start + Duration::from_secs(2)), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(lifetime.timer_count(), 0);
    }
}

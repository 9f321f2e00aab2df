//! Time source for the evaluator.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Supplies the current time.
///
/// The evaluator derives the observed hour and the reinforcement timestamp
/// from this, so tests can pin both.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(at) }
    }

    /// Jump to `at`.
    ///
    /// # Panics
    /// Panics if the internal `Mutex` is poisoned.
    pub fn set(&self, at: DateTime<Utc>) {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut now = self.now.lock().expect("fixed clock lock poisoned");
        *now = at;
    }

    /// Move forward by `by`.
    ///
    /// # Panics
    /// Panics if the internal `Mutex` is poisoned.
    pub fn advance(&self, by: Duration) {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut now = self.now.lock().expect("fixed clock lock poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let now = self.now.lock().expect("fixed clock lock poisoned");
        *now
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

//! Clock

use std::{
    fmt::Debug,
    sync::{PoisonError, RwLock},
};

use jiff::{SignedDuration, Timestamp};

/// Source of the current instant.
pub trait Clock: Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Jump to `now`.
    pub fn set(&self, now: Timestamp) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Move the clock by `duration` (which may be negative).
    ///
    /// # Errors
    ///
    /// Returns an error when the result falls outside the supported timestamp range.
    pub fn advance(&self, duration: SignedDuration) -> Result<Timestamp, jiff::Error> {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);

        *now = now.checked_add(duration)?;

        Ok(*now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn fixed_clock_advances() -> TestResult {
        let start: Timestamp = "2025-03-01T12:00:00Z".parse()?;
        let clock = FixedClock::new(start);

        clock.advance(SignedDuration::from_hours(36))?;

        assert_eq!(clock.now(), "2025-03-03T00:00:00Z".parse::<Timestamp>()?);

        Ok(())
    }
}

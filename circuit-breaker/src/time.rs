use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// `true` once `now` is strictly past `since + timeout`.
///
/// A deadline that cannot be represented never expires.
pub fn expired(since: Instant, timeout: Duration, now: Instant) -> bool {
    since
        .checked_add(timeout)
        .is_some_and(|deadline| now > deadline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_clock_is_monotonic() {
        let clock = RealClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_expired_is_strict() {
        let start = Instant::now();
        let timeout = Duration::from_secs(10);

        assert!(!expired(start, timeout, start));
        assert!(!expired(start, timeout, start + timeout));
        assert!(expired(start, timeout, start + timeout + Duration::from_nanos(1)));
    }

    #[test]
    fn test_zero_timeout_expires_after_any_tick() {
        let start = Instant::now();
        assert!(!expired(start, Duration::ZERO, start));
        assert!(expired(start, Duration::ZERO, start + Duration::from_millis(1)));
    }

    #[test]
    fn test_unrepresentable_deadline_never_expires() {
        let start = Instant::now();
        assert!(!expired(start, Duration::MAX, start + Duration::from_secs(3600)));
    }
}

//! Fixed-point run durations.
//!
//! Times are ranked and compared for exact equality when building leaderboards,
//! so they are stored as whole milliseconds rather than floating-point seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Duration of one completed run, in whole milliseconds.
///
/// Derives `Ord`, so a slice of times sorts fastest-first with a stable sort,
/// and two runs finished in the same millisecond compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunTime(u64);

impl RunTime {
    pub const ZERO: RunTime = RunTime(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Convert an elapsed stopwatch reading, rounding to the nearest millisecond.
    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs.max(0.0) * 1000.0).round() as u64)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.0 / 1000, self.0 % 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_duration() {
        let mut times = vec![
            RunTime::from_millis(5000),
            RunTime::from_millis(3000),
            RunTime::from_millis(7000),
        ];
        times.sort();
        assert_eq!(
            times,
            vec![
                RunTime::from_millis(3000),
                RunTime::from_millis(5000),
                RunTime::from_millis(7000),
            ]
        );
    }

    #[test]
    fn conversion_from_seconds_is_exact_at_millis() {
        assert_eq!(RunTime::from_secs_f64(12.34), RunTime::from_millis(12340));
        assert_eq!(RunTime::from_secs_f64(0.0), RunTime::ZERO);
        assert_eq!(RunTime::from_secs_f64(-1.0), RunTime::ZERO);
    }

    #[test]
    fn displays_as_seconds() {
        assert_eq!(RunTime::from_millis(12340).to_string(), "12.340");
        assert_eq!(RunTime::from_millis(900).to_string(), "0.900");
    }
}

use crate::config::{coerce_threshold, DEFAULT_DISTANCE, DEFAULT_TAP_SPEED_MS};
use crate::input::Point;
use std::time::Duration;

/// Time and distance windows that keep taps in one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Maximum gap between taps
    pub speed: Duration,
    /// Maximum movement between taps, per axis
    pub distance: f64,
}

impl Thresholds {
    /// Build from loosely-typed values; anything unusable falls back to the
    /// default (500ms, 40px).
    pub fn coerce(speed_ms: Option<f64>, distance: Option<f64>) -> Self {
        Self {
            speed: ms(coerce_threshold(speed_ms, DEFAULT_TAP_SPEED_MS)),
            distance: coerce_threshold(distance, DEFAULT_DISTANCE),
        }
    }

    /// `true` when `b` lies inside the distance window around `a`.
    /// An unknown point on either side is never near.
    pub fn near(&self, a: Option<Point>, b: Option<Point>) -> bool {
        match (a.and_then(Point::finite), b.and_then(Point::finite)) {
            (Some(a), Some(b)) => {
                (b.x - a.x).abs() < self.distance && (b.y - a.y).abs() < self.distance
            }
            _ => false,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::coerce(None, None)
    }
}

pub(crate) fn ms(millis: f64) -> Duration {
    Duration::from_nanos((millis * 1_000_000.0).round() as u64)
}

/// Result of feeding one tap into a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Series {
    pub tap_count: u32,
    pub emit_double: bool,
}

/// Per-target tap series bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesState {
    tap_count: u32,
    last_timestamp: Option<Duration>,
    last_position: Option<Point>,
}

impl SeriesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last_timestamp
    }

    /// Forget the current series
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a tap at `now`/`position` continues the current series
    pub fn continues(&self, now: Duration, position: Option<Point>, thresholds: &Thresholds) -> bool {
        let in_time = match self.last_timestamp {
            Some(last) => now.checked_sub(last).is_some_and(|gap| gap < thresholds.speed),
            None => false,
        };
        in_time && thresholds.near(self.last_position, position)
    }

    /// Record a tap and decide what to emit.
    ///
    /// Bookkeeping is updated before the decision. Non-finite positions are
    /// stored as unknown so the next tap always starts a new series.
    pub fn advance(&mut self, now: Duration, position: Point, thresholds: &Thresholds) -> Series {
        let position = position.finite();

        if self.continues(now, position, thresholds) {
            self.tap_count += 1;
        } else {
            self.tap_count = 1;
        }

        self.last_timestamp = Some(now);
        self.last_position = position;

        log::debug!("tap series at {:?}: count {}", now, self.tap_count);

        Series {
            tap_count: self.tap_count,
            emit_double: self.tap_count == 2,
        }
    }

    /// Record a tap whose count the platform already decided.
    ///
    /// Only the distance to the previous tap is checked here, and only to
    /// gate the double; timing belongs to the platform.
    pub fn observe(
        &mut self,
        now: Duration,
        position: Point,
        tap_count: u32,
        thresholds: &Thresholds,
    ) -> Series {
        let position = position.finite();
        let near = thresholds.near(self.last_position, position);

        self.tap_count = tap_count;
        self.last_timestamp = Some(now);
        self.last_position = position;

        Series {
            tap_count,
            emit_double: tap_count == 2 && near,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms_: u64) -> Duration {
        Duration::from_millis(ms_)
    }

    #[test]
    fn test_counts_unbroken_series() {
        let t = Thresholds::default();
        let mut s = SeriesState::new();
        let p = Point::new(100.0, 100.0);

        let counts: Vec<u32> = (0..5)
            .map(|i| s.advance(at(i * 200), p, &t).tap_count)
            .collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_double_only_on_second_tap() {
        let t = Thresholds::default();
        let mut s = SeriesState::new();
        let p = Point::new(0.0, 0.0);

        let doubles: Vec<bool> = (0..4)
            .map(|i| s.advance(at(i * 100), p, &t).emit_double)
            .collect();
        assert_eq!(doubles, vec![false, true, false, false]);
    }

    #[test]
    fn test_gap_at_speed_resets() {
        let t = Thresholds::default();
        let mut s = SeriesState::new();
        let p = Point::new(5.0, 5.0);

        s.advance(at(0), p, &t);
        assert_eq!(s.advance(at(499), p, &t).tap_count, 2);
        assert_eq!(s.advance(at(999), p, &t).tap_count, 1);
        assert_eq!(s.advance(at(1200), p, &t).tap_count, 2);
    }

    #[test]
    fn test_movement_on_either_axis_resets() {
        let t = Thresholds::default();
        let mut s = SeriesState::new();

        s.advance(at(0), Point::new(0.0, 0.0), &t);
        assert_eq!(s.advance(at(50), Point::new(39.0, 39.0), &t).tap_count, 2);
        assert_eq!(s.advance(at(100), Point::new(79.0, 39.0), &t).tap_count, 1);
        assert_eq!(s.advance(at(150), Point::new(79.0, 80.0), &t).tap_count, 1);
    }

    #[test]
    fn test_unknown_position_forces_new_series() {
        let t = Thresholds::default();
        let mut s = SeriesState::new();
        let p = Point::new(1.0, 1.0);

        s.advance(at(0), p, &t);
        assert_eq!(s.advance(at(10), Point::NAN, &t).tap_count, 1);
        assert_eq!(s.last_position(), None);
        // compared against an unknown position
        assert_eq!(s.advance(at(20), p, &t).tap_count, 1);
        assert_eq!(s.advance(at(30), p, &t).tap_count, 2);
    }

    #[test]
    fn test_reset_starts_over() {
        let t = Thresholds::default();
        let mut s = SeriesState::new();
        let p = Point::new(1.0, 1.0);

        s.advance(at(0), p, &t);
        s.reset();
        assert_eq!(s.tap_count(), 0);
        assert_eq!(s.advance(at(10), p, &t).tap_count, 1);
    }

    #[test]
    fn test_observe_trusts_count_and_checks_distance() {
        let t = Thresholds::default();
        let mut s = SeriesState::new();

        assert_eq!(
            s.observe(at(0), Point::new(0.0, 0.0), 1, &t),
            Series {
                tap_count: 1,
                emit_double: false
            }
        );
        // time is not checked on this path
        assert!(s.observe(at(5000), Point::new(10.0, 10.0), 2, &t).emit_double);
        assert!(!s.observe(at(5100), Point::new(100.0, 10.0), 2, &t).emit_double);
        assert!(!s.observe(at(5200), Point::new(100.0, 10.0), 3, &t).emit_double);
    }

    #[test]
    fn test_invalid_thresholds_match_defaults() {
        let d = Thresholds::default();
        assert_eq!(d.speed, at(500));
        assert_eq!(d.distance, 40.0);
        assert_eq!(Thresholds::coerce(Some(-10.0), Some(0.0)), d);
        assert_eq!(Thresholds::coerce(Some(f64::NAN), None), d);
        assert_eq!(Thresholds::coerce(Some(250.0), Some(8.0)).speed, at(250));
    }
}

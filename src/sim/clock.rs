//! Time-of-day cursor and the playback cadence that drives it.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Hours in one simulated day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Hours advanced per playback tick.
pub const DEFAULT_TICK_HOURS: f64 = 0.1;

/// Cursor position within the day, always in `[0, 24)`.
///
/// # Examples
///
/// ```
/// use cdth_sim::sim::clock::TimeOfDay;
///
/// let mut t = TimeOfDay::new(23.95);
/// t.advance(0.1);
/// assert_eq!(t.hours(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct TimeOfDay(f64);

impl TimeOfDay {
    /// Start-of-session cursor: noon.
    pub const NOON: TimeOfDay = TimeOfDay(12.0);

    /// Creates a cursor, wrapping `hours` into `[0, 24)`.
    ///
    /// Non-finite values map to midnight.
    pub fn new(hours: f64) -> Self {
        Self(wrap_hours(hours))
    }

    /// Cursor position in hours.
    pub fn hours(self) -> f64 {
        self.0
    }

    /// Whole hour of the cursor (0–23).
    pub fn hour(self) -> u32 {
        self.0.floor() as u32
    }

    /// Advances by `delta` hours.
    ///
    /// Crossing the end of the day restarts at exactly midnight rather than
    /// carrying the overshoot. Negative deltas wrap backwards; non-finite
    /// deltas are ignored.
    pub fn advance(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let next = self.0 + delta;
        self.0 = if next >= HOURS_PER_DAY {
            0.0
        } else {
            wrap_hours(next)
        };
    }
}

fn wrap_hours(hours: f64) -> f64 {
    if !hours.is_finite() {
        return 0.0;
    }
    let wrapped = hours.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round tiny negatives up to exactly 24.0
    if wrapped >= HOURS_PER_DAY { 0.0 } else { wrapped }
}

impl From<f64> for TimeOfDay {
    fn from(hours: f64) -> Self {
        Self::new(hours)
    }
}

impl From<TimeOfDay> for f64 {
    fn from(t: TimeOfDay) -> Self {
        t.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = ((self.0 % 1.0) * 60.0).floor() as u32;
        write!(f, "{:02}:{:02}", self.hour(), minutes)
    }
}

/// Tick interval presets for animating the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackSpeed {
    /// 1x, 200 ms per tick.
    Slow,
    /// 2x, 100 ms per tick.
    Normal,
    /// 4x, 50 ms per tick.
    #[default]
    Fast,
}

impl PlaybackSpeed {
    /// Wall-clock delay between ticks.
    pub fn interval(self) -> Duration {
        match self {
            PlaybackSpeed::Slow => Duration::from_millis(200),
            PlaybackSpeed::Normal => Duration::from_millis(100),
            PlaybackSpeed::Fast => Duration::from_millis(50),
        }
    }

    /// Speed multiplier label.
    pub fn label(self) -> &'static str {
        match self {
            PlaybackSpeed::Slow => "1x",
            PlaybackSpeed::Normal => "2x",
            PlaybackSpeed::Fast => "4x",
        }
    }
}

/// Bounded tick counter for an external animation loop.
///
/// The session holds no timer; a caller pulls ticks from `Playback` and
/// advances the session cursor by [`Playback::step_hours`] each time.
pub struct Playback {
    /// Ticks already delivered.
    current: usize,
    /// Total ticks to deliver.
    total: usize,
    /// Hours advanced per tick.
    pub step_hours: f64,
    /// Tick cadence.
    pub speed: PlaybackSpeed,
}

impl Playback {
    /// Creates a playback of `total` ticks.
    pub fn new(total: usize, step_hours: f64, speed: PlaybackSpeed) -> Self {
        Self {
            current: 0,
            total,
            step_hours,
            speed,
        }
    }

    /// Playback covering one full day at `step_hours` per tick.
    pub fn full_day(step_hours: f64, speed: PlaybackSpeed) -> Self {
        let total = if step_hours > 0.0 && step_hours.is_finite() {
            (HOURS_PER_DAY / step_hours - 1e-9).ceil() as usize
        } else {
            0
        };
        Self::new(total, step_hours, speed)
    }

    /// Returns the index of the next tick, or `None` once exhausted.
    pub fn tick(&mut self) -> Option<usize> {
        if self.current < self.total {
            let tick = self.current;
            self.current += 1;
            Some(tick)
        } else {
            None
        }
    }

    /// Ticks left to deliver.
    pub fn remaining(&self) -> usize {
        self.total - self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wraps_into_day() {
        assert_eq!(TimeOfDay::new(24.0).hours(), 0.0);
        assert_eq!(TimeOfDay::new(25.5).hours(), 1.5);
        assert_eq!(TimeOfDay::new(-1.0).hours(), 23.0);
        assert_eq!(TimeOfDay::new(f64::NAN).hours(), 0.0);
        assert_eq!(TimeOfDay::new(f64::INFINITY).hours(), 0.0);
    }

    #[test]
    fn advance_restarts_at_midnight() {
        let mut t = TimeOfDay::new(23.95);
        t.advance(0.1);
        assert_eq!(t.hours(), 0.0);
    }

    #[test]
    fn advance_within_day() {
        let mut t = TimeOfDay::new(10.0);
        t.advance(0.5);
        assert_eq!(t.hours(), 10.5);
    }

    #[test]
    fn advance_backwards_wraps() {
        let mut t = TimeOfDay::new(0.5);
        t.advance(-1.0);
        assert_eq!(t.hours(), 23.5);
    }

    #[test]
    fn advance_ignores_non_finite() {
        let mut t = TimeOfDay::new(6.0);
        t.advance(f64::NAN);
        assert_eq!(t.hours(), 6.0);
    }

    #[test]
    fn display_formats_clock_time() {
        assert_eq!(TimeOfDay::new(9.5).to_string(), "09:30");
        assert_eq!(TimeOfDay::NOON.to_string(), "12:00");
    }

    #[test]
    fn playback_ticks_then_stops() {
        let mut p = Playback::new(2, 0.1, PlaybackSpeed::Fast);
        assert_eq!(p.tick(), Some(0));
        assert_eq!(p.tick(), Some(1));
        assert_eq!(p.tick(), None);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn full_day_playback_length() {
        assert_eq!(Playback::full_day(0.5, PlaybackSpeed::Slow).remaining(), 48);
        assert_eq!(Playback::full_day(0.1, PlaybackSpeed::Slow).remaining(), 240);
        assert_eq!(Playback::full_day(0.0, PlaybackSpeed::Slow).remaining(), 0);
    }

    #[test]
    fn speed_intervals() {
        assert_eq!(PlaybackSpeed::Slow.interval(), Duration::from_millis(200));
        assert_eq!(PlaybackSpeed::Fast.label(), "4x");
    }
}

//! Conversion of durations into timer reload values.
//!
//! The timer counts up and raises its overflow interrupt when it passes `0xFFFF`. To wait
//! for a duration the counter is preloaded with
//!
//! ```text
//! reload = 65535 - (oscillator_hz * duration) / (4 * prescaler)
//! ```
//!
//! truncated to 16 bits. Durations longer than the timer range saturate to a reload of 0.

use crate::{Config, Schedule};

/// Highest timer count, the overflow boundary.
pub const TIMER_TOP: f32 = 65535.0;

/// Timing constants derived from a [Config].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    oscillator: f32,
    divider: f32,
    duty_cycle_span: f32,
    min_pulse_reload: u16,
    max_complement_reload: u16,
    frame_complement_reload: u16,
}

impl Timing {
    pub fn new(config: &Config) -> Self {
        let mut timing = Self {
            oscillator: config.oscillator_hz as f32,
            divider: config.divider() as f32,
            duty_cycle_span: config.duty_cycle_span(),
            min_pulse_reload: 0,
            max_complement_reload: 0,
            frame_complement_reload: 0,
        };
        timing.min_pulse_reload = timing.reload(config.min_pulse);
        timing.max_complement_reload = timing.reload(timing.duty_cycle_span);
        timing.frame_complement_reload = timing.reload(config.frame_complement());
        timing
    }

    /// Timer ticks elapsing in `seconds`.
    #[inline]
    pub fn ticks(&self, seconds: f32) -> f32 {
        (self.oscillator * seconds) / self.divider
    }

    /// Timer reload value that overflows after `seconds`.
    ///
    /// The float conversion truncates and saturates: too long durations give 0.
    #[inline]
    pub fn reload(&self, seconds: f32) -> u16 {
        (TIMER_TOP - self.ticks(seconds)) as u16
    }

    /// Interval between the 0 and 180 degree pulse widths in seconds.
    #[inline]
    pub fn duty_cycle_span(&self) -> f32 {
        self.duty_cycle_span
    }

    /// Reload of the minimum pulse, schedule slot 0.
    #[inline]
    pub fn min_pulse_reload(&self) -> u16 {
        self.min_pulse_reload
    }

    /// Reload of the complement of the full duty cycle span, schedule slot 2 at 0 seconds.
    #[inline]
    pub fn max_complement_reload(&self) -> u16 {
        self.max_complement_reload
    }

    /// Reload that completes the frame after the longest pulse, schedule slot 3.
    #[inline]
    pub fn frame_complement_reload(&self) -> u16 {
        self.frame_complement_reload
    }

    /// Frame length in seconds that the timer actually produces for `schedule`.
    ///
    /// Each phase lasts `65536 - reload` ticks, so saturated phases show up as a short frame.
    pub fn frame_seconds(&self, schedule: &Schedule) -> f32 {
        let ticks: u32 = schedule
            .reloads()
            .iter()
            .map(|&reload| 0x1_0000 - reload as u32)
            .sum();
        ticks as f32 * self.divider / self.oscillator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        let timing = Timing::new(&Config::default());
        // 0.4ms at 6MHz is 2400 ticks.
        assert_eq!(timing.min_pulse_reload(), 63135);
        // 2.3ms at 6MHz is 13800 ticks.
        assert_eq!(timing.max_complement_reload(), 51735);
        // 17.3ms does not fit in 16 bits.
        assert_eq!(timing.frame_complement_reload(), 0);
        assert_eq!(timing.reload(0.0), 65535);
    }

    #[test]
    fn reload_formula() {
        let timing = Timing::new(&Config::default());
        let seconds = 0.00115f32;
        let expected = (65535.0 - (48_000_000.0 * seconds) / (4.0 * 2.0)) as u16;
        assert_eq!(timing.reload(seconds), expected);
        assert_eq!(timing.reload(0.001), 65535 - 6000);
    }

    #[test]
    fn reload_saturates() {
        let timing = Timing::new(&Config::default());
        assert_eq!(timing.reload(1.0), 0);
        assert_eq!(timing.reload(-1.0), u16::MAX);
    }

    #[test]
    fn frame_seconds_counts_full_overflows() {
        let config = Config {
            oscillator_hz: 72_000_000,
            prescaler: 5,
            ..Config::default()
        };
        let timing = Timing::new(&config);
        let schedule = Schedule::new(&timing);
        // Every phase is one tick longer than its nominal duration.
        let expected = 0.02 + 4.0 / 3_600_000.0;
        assert!((timing.frame_seconds(&schedule) - expected).abs() < 1e-6);

        let default = Timing::new(&Config::default());
        let short = default.frame_seconds(&Schedule::new(&default));
        assert!(short < 0.014);
    }
}

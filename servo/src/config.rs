use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

use crate::{Error, Level, OverflowTimer, Phase, Servo, Timing, TIMER_TOP};

/// Servo signal configuration.
///
/// Use [make][Config::make()] to create a new [Servo]. Defaults match a 48MHz oscillator,
/// a timer prescaler of 2 and a servo turning 180 degrees between 0.4ms and 2.7ms pulses.
///
/// Hobby servos nominally map 1ms..2ms to 0..180 degrees, but most have different offsets:
/// calibrate [min_pulse][Config::min_pulse] and [max_pulse][Config::max_pulse] to the servo.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Oscillator frequency in Hertz.
    pub oscillator_hz: u32,
    /// Pulse width in seconds that turns the servo to 0 degrees.
    pub min_pulse: f32,
    /// Pulse width in seconds that turns the servo to 180 degrees.
    pub max_pulse: f32,
    /// Timer prescaler.
    ///
    /// The timer counts once every `4 * prescaler` oscillator cycles. Bigger values reduce
    /// control accuracy, values too small make the long phases overflow the timer.
    pub prescaler: u16,
    /// Frame period in seconds.
    pub frame: f32,
    /// Electrical sense of the pulse.
    pub polarity: Polarity,
}

/// Pin level during the pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Pin is high during the pulse.
    ActiveHigh,
    /// Pin is low during the pulse, meant for an inverting output stage.
    ActiveLow,
}

impl Polarity {
    /// Pin level for a phase level given with [ActiveLow][Polarity::ActiveLow] sense.
    #[inline]
    pub fn apply(self, level: Level) -> Level {
        match self {
            Polarity::ActiveLow => level,
            Polarity::ActiveHigh => !level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oscillator_hz: 48_000_000,
            min_pulse: 0.0004,
            max_pulse: 0.0027,
            prescaler: 2,
            frame: 0.02,
            polarity: Polarity::ActiveLow,
        }
    }
}

impl Config {
    #[inline]
    pub fn make<T, P>(self, timer: T, pin: P) -> Servo<T, P>
    where
        T: OverflowTimer,
        P: OutputPin<Error = Infallible>,
    {
        Servo::new(timer, pin, self)
    }

    /// Interval between the 0 and 180 degree pulse widths in seconds.
    #[inline]
    pub fn duty_cycle_span(&self) -> f32 {
        self.max_pulse - self.min_pulse
    }

    /// Time after the longest pulse needed to complete a frame.
    #[inline]
    pub fn frame_complement(&self) -> f32 {
        self.frame - self.max_pulse
    }

    /// Oscillator cycles per timer tick.
    #[inline]
    pub fn divider(&self) -> u32 {
        4 * self.prescaler as u32
    }

    /// Check that every phase of the signal can be produced by the timer.
    pub fn validate(&self) -> Result<(), Error> {
        if self.prescaler == 0 {
            return Err(Error::ZeroPrescaler);
        }
        let pulses_ok = self.min_pulse.is_finite()
            && self.max_pulse.is_finite()
            && self.min_pulse >= 0.0
            && self.min_pulse < self.max_pulse;
        if !pulses_ok {
            return Err(Error::InvalidPulseRange);
        }
        if !(self.max_pulse < self.frame) {
            return Err(Error::PulseExceedsFrame);
        }

        let timing = Timing::new(self);
        let phases = [
            (Phase::MinPulse, self.min_pulse),
            (Phase::Pulse, self.duty_cycle_span()),
            (Phase::FrameComplement, self.frame_complement()),
        ];
        for &(phase, duration) in phases.iter() {
            if timing.ticks(duration) > TIMER_TOP {
                return Err(Error::PhaseTooLong(phase));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_calibration() {
        let config = Config::default();
        assert_eq!(config.oscillator_hz, 48_000_000);
        assert_eq!(config.divider(), 8);
        assert!((config.duty_cycle_span() - 0.0023).abs() < 1e-7);
        assert!((config.frame_complement() - 0.0173).abs() < 1e-7);
    }

    #[test]
    fn default_frame_complement_overflows_timer() {
        // 17.3ms at 6MHz is 103800 ticks.
        assert_eq!(
            Config::default().validate(),
            Err(Error::PhaseTooLong(Phase::FrameComplement))
        );
    }

    #[test]
    fn bluepill_timing_fits() {
        let config = Config {
            oscillator_hz: 72_000_000,
            prescaler: 5,
            ..Config::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = Config {
            prescaler: 8,
            ..Config::default()
        };
        assert_eq!(base.validate(), Ok(()));

        let zero = Config { prescaler: 0, ..base };
        assert_eq!(zero.validate(), Err(Error::ZeroPrescaler));

        let inverted = Config {
            min_pulse: 0.002,
            max_pulse: 0.001,
            ..base
        };
        assert_eq!(inverted.validate(), Err(Error::InvalidPulseRange));

        let nan = Config {
            min_pulse: f32::NAN,
            ..base
        };
        assert_eq!(nan.validate(), Err(Error::InvalidPulseRange));

        let long = Config {
            max_pulse: 0.03,
            ..base
        };
        assert_eq!(long.validate(), Err(Error::PulseExceedsFrame));

        let slow = Config {
            prescaler: 1,
            ..base
        };
        assert_eq!(slow.validate(), Err(Error::PhaseTooLong(Phase::FrameComplement)));
    }

    #[test]
    fn polarity_inverts_levels() {
        assert_eq!(Polarity::ActiveLow.apply(Level::Low), Level::Low);
        assert_eq!(Polarity::ActiveHigh.apply(Level::Low), Level::High);
        assert_eq!(Polarity::ActiveHigh.apply(Level::High), Level::Low);
    }
}

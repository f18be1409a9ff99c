use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

use crate::{Config, Level, OverflowTimer, Phase, Polarity, PulsePair, Schedule, Timing};

/// Largest commandable angle in degrees.
const MAX_ANGLE: i32 = 180;

/// Servo signal generator for one output pin.
///
/// Owns the timer and the pin. Share it between the main loop and the timer interrupt
/// behind a critical section, e.g. `cortex_m::interrupt::Mutex<RefCell<Option<Servo<..>>>>`.
///
/// A new pulse width is staged by [set_pulse_seconds][Servo::set_pulse_seconds()] and
/// latched by the interrupt handler when a frame enters [Phase::Pulse], so both variable
/// phases of a frame always belong to the same command.
pub struct Servo<T, P> {
    timer: T,
    pin: P,
    timing: Timing,
    polarity: Polarity,
    schedule: Schedule,
    commanded: PulsePair,
    pulse_seconds: f32,
    phase: Phase,
}

impl<T, P> Servo<T, P>
where
    T: OverflowTimer,
    P: OutputPin<Error = Infallible>,
{
    /// Bind the servo to `timer` and `pin` and start the signal.
    pub fn new(timer: T, pin: P, config: Config) -> Self {
        let timing = Timing::new(&config);
        let schedule = Schedule::new(&timing);
        let mut servo = Self {
            timer,
            pin,
            timing,
            polarity: config.polarity,
            schedule,
            commanded: schedule.pulse(),
            pulse_seconds: 0.0,
            phase: Phase::MinPulse,
        };
        servo.setup_timer(config.divider());
        servo
    }

    /// Restart the signal from the first phase of a frame.
    ///
    /// Keeps the commanded pulse width.
    pub fn setup(&mut self, config: &Config) {
        self.timing = Timing::new(config);
        self.polarity = config.polarity;
        self.schedule = Schedule::new(&self.timing);
        self.set_pulse_seconds(self.pulse_seconds);
        self.setup_timer(config.divider());
    }

    fn setup_timer(&mut self, divider: u32) {
        self.phase = Phase::MinPulse;
        self.schedule.latch(self.commanded);

        self.timer.stop();
        self.timer.configure(divider);
        self.timer.clear_overflow();
        self.timer.listen();
        self.timer.load(self.schedule.reload(Phase::MinPulse));
        self.drive(Phase::MinPulse.level());
        self.timer.start();
    }

    /// Timer overflow interrupt handler.
    ///
    /// Steps to the next phase, preloads the timer with its delay and drives the pin. Must
    /// finish well within the shortest phase, a late reload stretches the pulse.
    #[inline]
    pub fn on_overflow(&mut self) {
        self.phase = self.phase.next();
        if self.phase == Phase::Pulse {
            self.schedule.latch(self.commanded);
        }

        self.timer.stop();
        self.timer.load(self.schedule.reload(self.phase));
        self.drive(self.phase.level());
        self.timer.clear_overflow();
        self.timer.listen();
        self.timer.start();
    }

    /// Command the pulse width, in seconds above the minimum pulse.
    ///
    /// Clamped to `0..=duty_cycle_span`, NaN counts as 0. Takes effect from the next frame.
    pub fn set_pulse_seconds(&mut self, seconds: f32) {
        let span = self.timing.duty_cycle_span();
        let seconds = if seconds > span {
            span
        } else if seconds >= 0.0 {
            seconds
        } else {
            0.0
        };
        self.pulse_seconds = seconds;
        self.commanded = PulsePair {
            high: self.timing.reload(seconds),
            complement: self.timing.reload(span - seconds),
        };
    }

    /// Command the servo angle in degrees.
    ///
    /// Angles above 180 are clamped. Negative angles give a negative pulse width, which
    /// [set_pulse_seconds][Servo::set_pulse_seconds()] clamps to 0.
    pub fn set_angle(&mut self, angle: i32) {
        let angle = angle.min(MAX_ANGLE);
        let seconds = (self.timing.duty_cycle_span() / 180.0) * angle as f32;
        self.set_pulse_seconds(seconds);
    }

    /// Stop the signal and hand back the timer and pin.
    pub fn release(mut self) -> (T, P) {
        self.timer.stop();
        self.timer.unlisten();
        self.timer.clear_overflow();
        (self.timer, self.pin)
    }

    #[inline]
    fn drive(&mut self, level: Level) {
        let result = match self.polarity.apply(level) {
            Level::Low => self.pin.set_low(),
            Level::High => self.pin.set_high(),
        };
        result.unwrap_or_else(|never| match never {})
    }
}

impl<T, P> Servo<T, P> {
    /// Commanded pulse width above the minimum pulse, after clamping.
    #[inline]
    pub fn pulse_seconds(&self) -> f32 {
        self.pulse_seconds
    }

    /// Reloads staged for the next frame.
    #[inline]
    pub fn commanded(&self) -> PulsePair {
        self.commanded
    }

    /// Reloads the interrupt handler is running from.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

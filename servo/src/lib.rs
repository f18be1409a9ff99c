//! Hobby servo signal generator driven by a single timer overflow interrupt.
//!
//! One frame of the signal is split into four [phases][Phase]. Every timer overflow the
//! driver steps to the next phase, preloads the timer with the delay of that phase and
//! drives the output pin. The pulse width is commanded from the foreground with
//! [Servo::set_pulse_seconds()] or [Servo::set_angle()].
//!
//! Example use:
//!
//! ```ignore
//! let mut servo = Config {
//!     oscillator_hz: 72_000_000,
//!     prescaler: 5,
//!     ..Config::default()
//! }
//! .make(timer, pin);
//!
//! // From the timer overflow interrupt:
//! servo.on_overflow();
//!
//! // From the main loop, with the timer interrupt masked:
//! servo.set_angle(90);
//! ```
//!
//! The hardware is reached through two seams: the timer through [OverflowTimer], the output
//! pin through [embedded_hal::digital::v2::OutputPin].

#![no_std]

mod config;
mod driver;
mod error;
mod schedule;
mod timer;
mod timing;

#[cfg(test)]
mod fake;

pub use config::{Config, Polarity};
pub use driver::Servo;
pub use error::Error;
pub use schedule::{Level, Phase, PulsePair, Schedule};
pub use timer::OverflowTimer;
pub use timing::{Timing, TIMER_TOP};

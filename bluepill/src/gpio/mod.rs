//! GPIO peripheral.
//!
//! Example usage:
//!
//! ```ignore
//! clock::init();
//! gpio::enable();
//!
//! gpio::configure(PA0, gpio::OutputMode::PushPull(gpio::Speed::Max2MHz));
//! gpio::write(PA0, true);
//! ```

mod pac;
mod pinout;

pub use pac::{Pin, Port};
pub use pinout::*;

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

/// GPIO switching speed.
///
/// Lower speeds can reduce ringing.
#[derive(Clone, Copy, Debug)]
pub enum Speed {
    Max10MHz = 1,
    Max2MHz = 2,
    Max50MHz = 3,
}

/// GPIO output mode.
#[derive(Clone, Copy, Debug)]
pub enum OutputMode {
    PushPull(Speed),
    OpenDrain(Speed),
}

/// Enable GPIO ports.
///
/// Enables ports A, B and C.
#[inline]
pub fn enable() {
    Port::A.enable();
    Port::B.enable();
    Port::C.enable();
}

/// GPIO pin tuple struct.
///
/// Can be used to [configure][configure()] or [write][write()] to a pin. Selects exactly one
/// bit of one port, which makes it the output pin of a [timer_servo::Servo].
#[derive(Clone, Copy, Debug)]
pub struct Gpio(pub Port, pub Pin);

/// Configure the given GPIO pin as output.
#[inline]
pub fn configure(pin: Gpio, mode: OutputMode) {
    pac::configure(pin.0, pin.1, mode);
}

/// Set the GPIO pin value.
///
/// Assumes pin was [configured][configure] before calling this. Safe to call from interrupts:
/// no other pin of the port is touched.
#[inline]
pub fn write(pin: Gpio, value: bool) {
    pac::write(pin.0, pin.1, value)
}

impl OutputPin for Gpio {
    type Error = Infallible;

    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        write(*self, false);
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        write(*self, true);
        Ok(())
    }
}

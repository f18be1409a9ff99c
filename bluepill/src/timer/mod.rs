//! Timers as free running 16 bit overflow counters.
//!
//! Example use:
//!
//! ```ignore
//! let mut timer = timer::TIM2;
//! timer.configure(20); // OverflowTimer: one tick every 20 timer clock cycles.
//! timer.load(0xF000);
//! timer.listen();
//! timer.start(); // TIM2 interrupt fires after 0x1000 ticks.
//! ```

mod overflow;
mod timer;

pub use timer::Timer;

pub const TIM1: timer::Timer = timer::Timer::Tim1;
pub const TIM2: timer::Timer = timer::Timer::Tim2;
pub const TIM3: timer::Timer = timer::Timer::Tim3;
pub const TIM4: timer::Timer = timer::Timer::Tim4;

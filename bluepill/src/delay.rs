//! Block program for certain period of time.

use crate::clock;

const MILLIS_COUNT: u32 = clock::SPEED / 1_000;
const MICROS_COUNT: u32 = clock::SPEED / 1_000_000;

/// Blocks program for *atleast* `count` milliseconds.
#[inline]
pub fn millis(count: u32) {
    cortex_m::asm::delay(MILLIS_COUNT * count);
}

/// Blocks program for *atleast* `count` microseconds.
#[inline]
pub fn micros(count: u32) {
    cortex_m::asm::delay(MICROS_COUNT * count);
}

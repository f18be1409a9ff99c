//! Four phase schedule of one servo frame.
//!
//! | phase                      | lasts                              | pin, active low |
//! |----------------------------|------------------------------------|-----------------|
//! | [Phase::MinPulse]          | minimum pulse width                | low             |
//! | [Phase::Pulse]             | commanded pulse width              | low             |
//! | [Phase::MaxComplement]     | duty cycle span minus the command  | high            |
//! | [Phase::FrameComplement]   | rest of the frame                  | high            |

use core::ops::Not;

use crate::Timing;

/// Pin level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Not for Level {
    type Output = Level;

    #[inline]
    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// One of the four intervals composing a frame, in signal order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    MinPulse = 0,
    Pulse = 1,
    MaxComplement = 2,
    FrameComplement = 3,
}

impl Phase {
    /// Following phase, wraps to [MinPulse][Phase::MinPulse] after the frame completes.
    #[inline]
    pub fn next(self) -> Phase {
        match self {
            Phase::MinPulse => Phase::Pulse,
            Phase::Pulse => Phase::MaxComplement,
            Phase::MaxComplement => Phase::FrameComplement,
            Phase::FrameComplement => Phase::MinPulse,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Level the pin is driven to when entering this phase, for an active low pulse.
    #[inline]
    pub fn level(self) -> Level {
        match self {
            Phase::MinPulse | Phase::Pulse => Level::Low,
            Phase::MaxComplement | Phase::FrameComplement => Level::High,
        }
    }
}

/// Reload values of the two variable phases, written together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulsePair {
    /// Reload of [Phase::Pulse].
    pub high: u16,
    /// Reload of [Phase::MaxComplement].
    pub complement: u16,
}

/// Timer reload values, one per [Phase].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    reloads: [u16; 4],
}

impl Schedule {
    /// Schedule of a zero second pulse.
    pub fn new(timing: &Timing) -> Self {
        Self {
            reloads: [
                timing.min_pulse_reload(),
                timing.reload(0.0),
                timing.max_complement_reload(),
                timing.frame_complement_reload(),
            ],
        }
    }

    #[inline]
    pub fn reload(&self, phase: Phase) -> u16 {
        self.reloads[phase.index()]
    }

    #[inline]
    pub fn reloads(&self) -> &[u16; 4] {
        &self.reloads
    }

    /// Variable phases of this schedule.
    #[inline]
    pub fn pulse(&self) -> PulsePair {
        PulsePair {
            high: self.reloads[Phase::Pulse.index()],
            complement: self.reloads[Phase::MaxComplement.index()],
        }
    }

    /// Replace the variable phases.
    #[inline]
    pub fn latch(&mut self, pulse: PulsePair) {
        self.reloads[Phase::Pulse.index()] = pulse.high;
        self.reloads[Phase::MaxComplement.index()] = pulse.complement;
    }
}

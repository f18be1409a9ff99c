//! Recording timer and pin for tests.

extern crate std;

use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::digital::v2::OutputPin;

use crate::{Level, OverflowTimer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Configure(u32),
    Stop,
    Start,
    Load(u16),
    ClearOverflow,
    Listen,
    Unlisten,
}

#[derive(Debug, Default)]
pub struct FakeTimer {
    pub events: Vec<Event>,
}

impl FakeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter values loaded since the last clear.
    pub fn loads(&self) -> Vec<u16> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Load(count) => Some(*count),
                _ => None,
            })
            .collect()
    }
}

impl OverflowTimer for FakeTimer {
    fn configure(&mut self, divider: u32) {
        self.events.push(Event::Configure(divider));
    }

    fn stop(&mut self) {
        self.events.push(Event::Stop);
    }

    fn start(&mut self) {
        self.events.push(Event::Start);
    }

    fn load(&mut self, count: u16) {
        self.events.push(Event::Load(count));
    }

    fn clear_overflow(&mut self) {
        self.events.push(Event::ClearOverflow);
    }

    fn listen(&mut self) {
        self.events.push(Event::Listen);
    }

    fn unlisten(&mut self) {
        self.events.push(Event::Unlisten);
    }
}

#[derive(Debug, Default)]
pub struct FakePin {
    pub levels: Vec<Level>,
}

impl FakePin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level changes in the recorded writes, starting from `from`.
    pub fn edges(&self, from: Level) -> usize {
        let mut current = from;
        let mut edges = 0;
        for &level in self.levels.iter() {
            if level != current {
                edges += 1;
                current = level;
            }
        }
        edges
    }
}

impl OutputPin for FakePin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(Level::High);
        Ok(())
    }
}

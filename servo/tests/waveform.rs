//! Simulates the timer and the pin to measure the produced waveform.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::v2::OutputPin;
use timer_servo::{Config, Level, OverflowTimer, Phase, Servo};

/// Ticks per second with a 72MHz timer clock and prescaler 5.
const TICK_HZ: f32 = 3_600_000.0;

#[derive(Default)]
struct Sim {
    count: u16,
    running: bool,
    listening: bool,
    level: Option<Level>,
}

/// Preloaded counter overflows after `65536 - count` ticks.
struct SimTimer(Rc<RefCell<Sim>>);

struct SimPin(Rc<RefCell<Sim>>);

impl OverflowTimer for SimTimer {
    fn configure(&mut self, divider: u32) {
        assert_eq!(divider, 20);
    }

    fn stop(&mut self) {
        self.0.borrow_mut().running = false;
    }

    fn start(&mut self) {
        self.0.borrow_mut().running = true;
    }

    fn load(&mut self, count: u16) {
        let mut sim = self.0.borrow_mut();
        assert!(!sim.running, "counter loaded while running");
        sim.count = count;
    }

    fn clear_overflow(&mut self) {}

    fn listen(&mut self) {
        self.0.borrow_mut().listening = true;
    }

    fn unlisten(&mut self) {
        self.0.borrow_mut().listening = false;
    }
}

impl OutputPin for SimPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().level = Some(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().level = Some(Level::High);
        Ok(())
    }
}

fn servo() -> (Servo<SimTimer, SimPin>, Rc<RefCell<Sim>>) {
    let sim = Rc::new(RefCell::new(Sim::default()));
    let config = Config {
        oscillator_hz: 72_000_000,
        prescaler: 5,
        ..Config::default()
    };
    assert_eq!(config.validate(), Ok(()));
    let servo = config.make(SimTimer(sim.clone()), SimPin(sim.clone()));
    (servo, sim)
}

/// Runs one frame from the start of [Phase::MinPulse], returns (low ticks, high ticks).
fn frame(servo: &mut Servo<SimTimer, SimPin>, sim: &Rc<RefCell<Sim>>) -> (u32, u32) {
    assert_eq!(servo.phase(), Phase::MinPulse);
    let mut low = 0;
    let mut high = 0;
    for _ in 0..4 {
        {
            let sim = sim.borrow();
            assert!(sim.running && sim.listening);
            let ticks = 0x1_0000 - sim.count as u32;
            match sim.level {
                Some(Level::Low) => low += ticks,
                Some(Level::High) => high += ticks,
                None => panic!("pin never driven"),
            }
        }
        servo.on_overflow();
    }
    (low, high)
}

fn phase_ticks(sim: &Rc<RefCell<Sim>>) -> u32 {
    0x1_0000 - sim.borrow().count as u32
}

/// Nominal pulse in ticks. The produced pulse is up to 3 ticks longer: one per overflow
/// plus reload truncation.
fn expected_pulse_ticks(angle: i32) -> f32 {
    (0.0004 + 0.0023 * angle as f32 / 180.0) * TICK_HZ
}

#[test]
fn frame_period_is_constant() {
    let (mut servo, sim) = servo();
    frame(&mut servo, &sim);
    for angle in (0..=180).step_by(15) {
        servo.set_angle(angle);
        // First frame latches the command.
        frame(&mut servo, &sim);
        let (low, high) = frame(&mut servo, &sim);
        assert_eq!(low + high, 72_004, "angle {}", angle);
        let pulse = expected_pulse_ticks(angle);
        assert!((low as f32 - pulse).abs() <= 3.0, "angle {}: {} ticks", angle, low);
    }
}

#[test]
fn ninety_degrees_pulse() {
    let (mut servo, sim) = servo();
    servo.set_angle(90);
    let (low, high) = frame(&mut servo, &sim);
    assert_eq!((low, high), (1441 + 4141, 4141 + 62281));
    // 1.55ms pulse.
    assert!((low as f32 / TICK_HZ - 0.00155).abs() < 1e-6);
}

#[test]
fn mid_frame_command_never_tears() {
    let (mut servo, sim) = servo();
    frame(&mut servo, &sim);

    // Command arrives while the pulse phase of this frame runs.
    let mut ticks = phase_ticks(&sim);
    servo.on_overflow();
    assert_eq!(servo.phase(), Phase::Pulse);
    ticks += phase_ticks(&sim);
    servo.set_angle(180);
    for _ in 0..2 {
        servo.on_overflow();
        ticks += phase_ticks(&sim);
    }
    servo.on_overflow();
    assert_eq!(ticks, 72_004);

    let (low, high) = frame(&mut servo, &sim);
    assert_eq!(low + high, 72_004);
    assert!((low as f32 - expected_pulse_ticks(180)).abs() <= 3.0);
}

#[test]
fn negative_angle_holds_minimum_pulse() {
    let (mut servo, sim) = servo();
    servo.set_angle(-90);
    let (low, _) = frame(&mut servo, &sim);
    assert!((low as f32 - expected_pulse_ticks(0)).abs() <= 3.0);
}

#[test]
fn release_stops_signal() {
    let (servo, sim) = servo();
    let (_timer, _pin) = servo.release();
    let sim = sim.borrow();
    assert!(!sim.running);
    assert!(!sim.listening);
}

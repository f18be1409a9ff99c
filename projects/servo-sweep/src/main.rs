#![no_main]
#![no_std]

extern crate panic_halt;

use bluepill::{clock, delay, gpio, timer};
use core::cell::RefCell;
use cortex_m::interrupt::{free, Mutex};
use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use stm32f1xx_hal::pac::interrupt;
use timer_servo::{Config, Polarity, Servo};

/// Servo signal output pin.
const SERVO_PIN: gpio::Gpio = gpio::PA0;

/// GPIO mode of the servo pin.
const SERVO_PIN_MODE: gpio::OutputMode = gpio::OutputMode::PushPull(gpio::Speed::Max2MHz);

/// Timer generating the signal, serviced by the TIM2 interrupt.
const SERVO_TIMER: timer::Timer = timer::TIM2;

/// Servo wired straight to the pin, no inverting stage.
const SERVO_POLARITY: Polarity = Polarity::ActiveHigh;

/// Timer prescaler: 3.6MHz ticks at 72MHz, the 17.3ms frame complement fits in 16 bits.
const SERVO_PRESCALER: u16 = 5;

/// Sweep settings.
const SWEEP_STEP: i32 = 5; // Degrees per step.
const SWEEP_DELAY_MS: u32 = 40; // Two frames per step.

/// Signal generator, shared between the main loop and the timer interrupt.
static SERVO: Mutex<RefCell<Option<Servo<timer::Timer, gpio::Gpio>>>> =
    Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello servo!").unwrap();
    }

    // System setup.
    unsafe {
        clock::init();
    }
    gpio::enable();

    // Wait for peripherals to enable.
    delay::millis(1);

    gpio::write(SERVO_PIN, false);
    gpio::configure(SERVO_PIN, SERVO_PIN_MODE);

    let config = Config {
        oscillator_hz: SERVO_TIMER.clock_speed(),
        prescaler: SERVO_PRESCALER,
        polarity: SERVO_POLARITY,
        ..Config::default()
    };
    if let Err(err) = config.validate() {
        if cfg!(debug_assertions) {
            hprintln!("Servo config: {}", err).unwrap();
        }
        panic!();
    }

    // Starts the signal; the first overflow fires once the critical section ends.
    let frame = free(|cs| {
        let servo = config.make(SERVO_TIMER, SERVO_PIN);
        let frame = servo.timing().frame_seconds(servo.schedule());
        SERVO.borrow(cs).replace(Some(servo));
        frame
    });
    if cfg!(debug_assertions) {
        hprintln!("Servo on TIM2/PA0, frame {} s", frame).unwrap();
    }

    let mut angle: i32 = 0;
    let mut step = SWEEP_STEP;
    loop {
        free(|cs| {
            if let Some(servo) = SERVO.borrow(cs).borrow_mut().as_mut() {
                servo.set_angle(angle);
            }
        });
        delay::millis(SWEEP_DELAY_MS);

        if !(0..=180).contains(&(angle + step)) {
            step = -step;
            if cfg!(debug_assertions) {
                hprintln!("Sweep turns at {} degrees", angle).unwrap();
            }
        }
        angle += step;
    }
}

/// TIMER2 interrupt: next phase of the servo signal.
#[interrupt]
fn TIM2() {
    free(|cs| match SERVO.borrow(cs).borrow_mut().as_mut() {
        Some(servo) => servo.on_overflow(),
        // Overflow before the driver was stored.
        None => SERVO_TIMER.clear_update_interrupt_flag(),
    });
}

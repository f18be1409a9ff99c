use stm32f1xx_hal::pac::Peripherals as DevicePeripherals;
type GpioPtr = stm32f1xx_hal::pac::gpioa::RegisterBlock;
type GPIOA = stm32f1xx_hal::pac::GPIOA;
type GPIOB = stm32f1xx_hal::pac::GPIOB;
type GPIOC = stm32f1xx_hal::pac::GPIOC;

use super::{OutputMode, Speed};

/// Available GPIO ports.
#[derive(Clone, Copy, Debug)]
pub enum Port {
    A,
    B,
    C,
}

/// Available GPIO pins.
#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug)]
pub enum Pin {
    P0  = 0,
    P1  = 1,
    P2  = 2,
    P3  = 3,
    P4  = 4,
    P5  = 5,
    P6  = 6,
    P7  = 7,
    P8  = 8,
    P9  = 9,
    P10 = 10,
    P11 = 11,
    P12 = 12,
    P13 = 13,
    P14 = 14,
    P15 = 15,
}

impl Pin {
    /// Single bit mask of this pin.
    #[inline]
    pub fn mask(self) -> u32 {
        1 << self as u8
    }
}

impl Port {
    #[inline]
    fn ptr(self) -> *const GpioPtr {
        match self {
            Port::A => GPIOA::ptr(),
            Port::B => GPIOB::ptr(),
            Port::C => GPIOC::ptr(),
        }
    }

    #[inline]
    pub(crate) fn enable(self) {
        unsafe {
            let dp = DevicePeripherals::steal();
            match self {
                Port::A => dp.RCC.apb2enr.modify(|_, w| w.iopaen().enabled()),
                Port::B => dp.RCC.apb2enr.modify(|_, w| w.iopben().enabled()),
                Port::C => dp.RCC.apb2enr.modify(|_, w| w.iopcen().enabled()),
            }
        }
    }
}

/// MODE and CNF bits of an output pin.
fn crx_nibble(mode: OutputMode) -> u32 {
    let (cnf, speed): (u32, Speed) = match mode {
        OutputMode::PushPull(speed) => (0, speed),
        OutputMode::OpenDrain(speed) => (1, speed),
    };
    cnf << 2 | (speed as u32)
}

/// Configure this gpio pin with the given mode.
#[inline]
pub(crate) fn configure(port: Port, pin: Pin, mode: OutputMode) {
    let pin_nr = pin as usize;
    let nibble = crx_nibble(mode);
    let port_ptr = port.ptr();
    let shift = (pin_nr % 8) * 4;
    let mask = !(15 << shift);
    unsafe {
        if pin_nr < 8 {
            let value = (*port_ptr).crl.read().bits();
            (*port_ptr).crl.write(|w| w.bits((value & mask) | (nibble << shift)));
        } else {
            let value = (*port_ptr).crh.read().bits();
            (*port_ptr).crh.write(|w| w.bits((value & mask) | (nibble << shift)));
        }
    }
}

/// Sets the pin value.
///
/// Writes the set/reset registers, so the update is atomic with respect to the other pins.
#[inline]
pub(crate) fn write(port: Port, pin: Pin, value: bool) {
    unsafe {
        if value {
            (*port.ptr()).bsrr.write(|w| w.bits(pin.mask()));
        } else {
            (*port.ptr()).brr.write(|w| w.bits(pin.mask()));
        }
    }
}

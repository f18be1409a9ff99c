use crate::clock;
use cortex_m::peripheral::NVIC;
use stm32f1xx_hal::pac::{
    tim1::RegisterBlock as RegisterBlock1, tim2::RegisterBlock as RegisterBlock2,
    Interrupt, Peripherals as DevicePeripherals, TIM1, TIM2, TIM3, TIM4,
};

/// Slave mode selection bits of SMCR.
const SMS_MASK: u32 = 7;

enum TimerPtr {
    Tim1(*const RegisterBlock1),
    Tim234(*const RegisterBlock2),
}

#[derive(Clone, Copy, Debug)]
pub enum Timer {
    Tim1,
    Tim2,
    Tim3,
    Tim4,
}

impl Timer {
    #[inline]
    fn ptr(&self) -> TimerPtr {
        match self {
            Timer::Tim1 => TimerPtr::Tim1(TIM1::ptr()),
            Timer::Tim2 => TimerPtr::Tim234(TIM2::ptr()),
            Timer::Tim3 => TimerPtr::Tim234(TIM3::ptr()),
            Timer::Tim4 => TimerPtr::Tim234(TIM4::ptr()),
        }
    }

    /// Interrupt raised on a counter overflow.
    #[inline]
    pub fn interrupt(&self) -> Interrupt {
        match self {
            Timer::Tim1 => Interrupt::TIM1_UP,
            Timer::Tim2 => Interrupt::TIM2,
            Timer::Tim3 => Interrupt::TIM3,
            Timer::Tim4 => Interrupt::TIM4,
        }
    }

    /// Counter clock before the prescaler, in Hertz.
    ///
    /// TIM1 is clocked from APB2, the others from APB1.
    #[inline]
    pub fn clock_speed(&self) -> u32 {
        match self {
            Timer::Tim1 => clock::apb2_timer_speed(),
            _ => clock::apb1_timer_speed(),
        }
    }

    #[inline]
    pub fn enable_rcc(&mut self) {
        unsafe {
            let dp = DevicePeripherals::steal();
            match self {
                Timer::Tim1 => dp.RCC.apb2enr.modify(|_, w| w.tim1en().enabled()),
                Timer::Tim2 => dp.RCC.apb1enr.modify(|_, w| w.tim2en().enabled()),
                Timer::Tim3 => dp.RCC.apb1enr.modify(|_, w| w.tim3en().enabled()),
                Timer::Tim4 => dp.RCC.apb1enr.modify(|_, w| w.tim4en().enabled()),
            }
        }
    }

    #[inline]
    pub fn write_arr(&mut self, arr: u16) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).arr.write(|w| w.arr().bits(arr)),
                TimerPtr::Tim234(ptr) => (*ptr).arr.write(|w| w.arr().bits(arr)),
            }
        }
    }

    /// Prescaler is buffered, it applies from the next update event.
    #[inline]
    pub fn write_psc(&mut self, psc: u16) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).psc.write(|w| w.bits(psc as u32)),
                TimerPtr::Tim234(ptr) => (*ptr).psc.write(|w| w.bits(psc as u32)),
            }
        }
    }

    #[inline]
    pub fn write_counter_value(&mut self, count: u16) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).cnt.write(|w| w.bits(count as u32)),
                TimerPtr::Tim234(ptr) => (*ptr).cnt.write(|w| w.bits(count as u32)),
            }
        }
    }

    #[inline]
    pub fn enable(&mut self) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).cr1.modify(|_, w| w.cen().enabled()),
                TimerPtr::Tim234(ptr) => (*ptr).cr1.modify(|_, w| w.cen().enabled()),
            }
        }
    }

    #[inline]
    pub fn disable(&mut self) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).cr1.modify(|_, w| w.cen().disabled()),
                TimerPtr::Tim234(ptr) => (*ptr).cr1.modify(|_, w| w.cen().disabled()),
            }
        }
    }

    /// Count up, raising update events on counter overflow only.
    #[inline]
    pub fn count_up_overflow_only(&mut self) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).cr1.modify(|_, w| w.dir().clear_bit().urs().set_bit()),
                TimerPtr::Tim234(ptr) => {
                    (*ptr).cr1.modify(|_, w| w.dir().clear_bit().urs().set_bit())
                }
            }
        }
    }

    /// Clock the counter from the internal clock: slave mode disabled.
    #[inline]
    pub fn select_internal_clock(&mut self) {
        let mask = !SMS_MASK;
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => {
                    let value = (*ptr).smcr.read().bits() & mask;
                    (*ptr).smcr.write(|w| w.bits(value));
                }
                TimerPtr::Tim234(ptr) => {
                    let value = (*ptr).smcr.read().bits() & mask;
                    (*ptr).smcr.write(|w| w.bits(value));
                }
            }
        }
    }

    /// Software update event: loads the buffered prescaler and resets the counter.
    #[inline]
    pub fn generate_update(&mut self) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).egr.write(|w| w.ug().set_bit()),
                TimerPtr::Tim234(ptr) => (*ptr).egr.write(|w| w.ug().set_bit()),
            }
        }
    }

    #[inline]
    pub fn update_interrupt_enable(&self) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).dier.modify(|_, w| w.uie().enabled()),
                TimerPtr::Tim234(ptr) => (*ptr).dier.modify(|_, w| w.uie().enabled()),
            }
        }
    }

    #[inline]
    pub fn update_interrupt_disable(&self) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).dier.modify(|_, w| w.uie().disabled()),
                TimerPtr::Tim234(ptr) => (*ptr).dier.modify(|_, w| w.uie().disabled()),
            }
        }
    }

    #[inline]
    pub fn clear_update_interrupt_flag(&self) {
        unsafe {
            match self.ptr() {
                TimerPtr::Tim1(ptr) => (*ptr).sr.modify(|_, w| w.uif().clear_bit()),
                TimerPtr::Tim234(ptr) => (*ptr).sr.modify(|_, w| w.uif().clear_bit()),
            }
        }
    }

    /// Let the NVIC dispatch the overflow interrupt.
    #[inline]
    pub fn unmask_interrupt(&self) {
        unsafe { NVIC::unmask(self.interrupt()) };
    }

    #[inline]
    pub fn mask_interrupt(&self) {
        NVIC::mask(self.interrupt());
    }
}

use cortex_m::interrupt;
use timer_servo::OverflowTimer;

use super::Timer;

impl OverflowTimer for Timer {
    /// Auto reload is fixed at `0xFFFF`, so the counter overflows from `0xFFFF` to 0 like a
    /// 16 bit free running counter. The prescaler register holds `divider - 1`.
    fn configure(&mut self, divider: u32) {
        let psc = divider.saturating_sub(1).min(u16::MAX as u32) as u16;
        interrupt::free(|_| {
            self.enable_rcc();
            self.disable();
            self.select_internal_clock();
            self.count_up_overflow_only();
            self.write_arr(u16::MAX);
            self.write_psc(psc);
            self.generate_update();
            self.clear_update_interrupt_flag();
        });
    }

    #[inline]
    fn stop(&mut self) {
        self.disable();
    }

    #[inline]
    fn start(&mut self) {
        self.enable();
    }

    #[inline]
    fn load(&mut self, count: u16) {
        self.write_counter_value(count);
    }

    #[inline]
    fn clear_overflow(&mut self) {
        self.clear_update_interrupt_flag();
    }

    #[inline]
    fn listen(&mut self) {
        self.update_interrupt_enable();
        self.unmask_interrupt();
    }

    #[inline]
    fn unlisten(&mut self) {
        self.update_interrupt_disable();
        self.mask_interrupt();
    }
}

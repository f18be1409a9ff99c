/// 16 bit up-counting timer with an overflow interrupt.
///
/// The timer interrupt handler of the application calls
/// [Servo::on_overflow()][crate::Servo::on_overflow()] each time the counter passes `0xFFFF`.
pub trait OverflowTimer {
    /// Run from the internal clock, divided by `divider`, as a free running 16 bit counter.
    ///
    /// No external synchronisation or secondary oscillator. Implementations mask global
    /// interrupts while reconfiguring.
    fn configure(&mut self, divider: u32);

    /// Stop counting.
    fn stop(&mut self);

    /// Start counting.
    fn start(&mut self);

    /// Preload the counter.
    fn load(&mut self, count: u16);

    /// Clear the pending overflow flag.
    fn clear_overflow(&mut self);

    /// Enable the overflow interrupt and its dispatch.
    fn listen(&mut self);

    /// Disable the overflow interrupt.
    fn unlisten(&mut self);
}

use core::fmt;

use crate::Phase;

/// Reasons a [Config][crate::Config] can not produce a valid servo signal.
///
/// Returned by [Config::validate()][crate::Config::validate()]. The driver itself never fails:
/// an invalid configuration still runs, with saturated timer values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Timer prescaler is zero.
    ZeroPrescaler,
    /// Pulse widths are negative, not finite, or the minimum is not below the maximum.
    InvalidPulseRange,
    /// Maximum pulse width does not fit in the frame.
    PulseExceedsFrame,
    /// Delay of this phase does not fit in the 16 bit timer.
    PhaseTooLong(Phase),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroPrescaler => f.write_str("timer prescaler must be at least 1"),
            Error::InvalidPulseRange => f.write_str("pulse range must satisfy 0 <= min < max"),
            Error::PulseExceedsFrame => f.write_str("maximum pulse does not fit in the frame"),
            Error::PhaseTooLong(phase) => {
                write!(f, "{:?} phase overflows the 16 bit timer", phase)
            }
        }
    }
}

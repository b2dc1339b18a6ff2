//! The fixed table of legal baud rates.
//!
//! Each entry pairs a symbolic baud rate (the number a caller asks for, e.g. `115200`) with the
//! `speed_t` constant the terminal driver understands (e.g. `B115200`). The table is compiled in
//! and never changes at runtime. A rate that isn't listed is not supported on this platform.

use termios::speed_t;

use termios::os::target::{B115200, B230400, B57600};
use termios::{
    B110, B1200, B134, B150, B1800, B19200, B200, B2400, B300, B38400, B4800, B50, B600, B75,
    B9600,
};

#[cfg(target_os = "linux")]
use termios::os::linux::{
    B1000000, B1152000, B1500000, B2000000, B2500000, B3000000, B3500000, B4000000, B460800,
    B500000, B576000, B921600,
};

#[cfg(target_os = "macos")]
use termios::os::macos::{B14400, B28800, B7200, B76800};

#[cfg(target_os = "freebsd")]
use termios::os::freebsd::{B14400, B28800, B460800, B7200, B76800, B921600};

#[cfg(target_os = "openbsd")]
use termios::os::openbsd::{B14400, B28800, B7200, B76800};

/// One row of the speed table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpeedEntry {
    /// The symbolic baud rate.
    pub baud: u32,

    /// The driver's constant for `baud`.
    pub rate: speed_t,
}

const fn entry(baud: u32, rate: speed_t) -> SpeedEntry {
    SpeedEntry { baud, rate }
}

/// Every baud rate supported on the target platform, in ascending order.
pub static SPEEDS: &[SpeedEntry] = &[
    entry(50, B50),
    entry(75, B75),
    entry(110, B110),
    entry(134, B134),
    entry(150, B150),
    entry(200, B200),
    entry(300, B300),
    entry(600, B600),
    entry(1200, B1200),
    entry(1800, B1800),
    entry(2400, B2400),
    entry(4800, B4800),
    #[cfg(any(target_os = "macos", target_os = "freebsd", target_os = "openbsd"))]
    entry(7200, B7200),
    entry(9600, B9600),
    #[cfg(any(target_os = "macos", target_os = "freebsd", target_os = "openbsd"))]
    entry(14400, B14400),
    entry(19200, B19200),
    #[cfg(any(target_os = "macos", target_os = "freebsd", target_os = "openbsd"))]
    entry(28800, B28800),
    entry(38400, B38400),
    entry(57600, B57600),
    #[cfg(any(target_os = "macos", target_os = "freebsd", target_os = "openbsd"))]
    entry(76800, B76800),
    entry(115200, B115200),
    entry(230400, B230400),
    #[cfg(any(target_os = "linux", target_os = "freebsd"))]
    entry(460800, B460800),
    #[cfg(target_os = "linux")]
    entry(500000, B500000),
    #[cfg(target_os = "linux")]
    entry(576000, B576000),
    #[cfg(any(target_os = "linux", target_os = "freebsd"))]
    entry(921600, B921600),
    #[cfg(target_os = "linux")]
    entry(1000000, B1000000),
    #[cfg(target_os = "linux")]
    entry(1152000, B1152000),
    #[cfg(target_os = "linux")]
    entry(1500000, B1500000),
    #[cfg(target_os = "linux")]
    entry(2000000, B2000000),
    #[cfg(target_os = "linux")]
    entry(2500000, B2500000),
    #[cfg(target_os = "linux")]
    entry(3000000, B3000000),
    #[cfg(target_os = "linux")]
    entry(3500000, B3500000),
    #[cfg(target_os = "linux")]
    entry(4000000, B4000000),
];

/// Looks up the driver constant for a symbolic baud rate.
///
/// Returns `None` if `baud` is not in the table.
///
/// ```
/// assert!(cereal_unix::speed::lookup(9600).is_some());
/// assert!(cereal_unix::speed::lookup(9601).is_none());
/// ```
pub fn lookup(baud: u32) -> Option<speed_t> {
    SPEEDS.iter().find(|e| e.baud == baud).map(|e| e.rate)
}

/// Maps a driver constant back to its symbolic baud rate.
pub fn baud_for(rate: speed_t) -> Option<u32> {
    SPEEDS.iter().find(|e| e.rate == rate).map(|e| e.baud)
}

/// Iterates over the symbolic baud rates in the table.
pub fn supported_bauds() -> impl Iterator<Item = u32> {
    SPEEDS.iter().map(|e| e.baud)
}

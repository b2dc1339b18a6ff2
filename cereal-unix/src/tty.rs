use cereal_core::{Error, Result, TerminalDevice};

use std::ffi::CString;
use std::mem;
use std::path::Path;

use std::os::unix::prelude::*;

use ioctl_rs as ioctl;
use log::{debug, trace, warn};
use termios::Termios;

use super::attributes;
use super::error;

/// A TTY device opened for configuration.
///
/// The descriptor is owned by the port. Call [`close()`](#method.close) to release it and see
/// whether the OS reported an error; a port that is simply dropped is closed best-effort.
///
/// Configuration methods take `&mut self`. Each one is a separate fetch-modify-store round trip
/// against the kernel and nothing is cached in the port.
#[derive(Debug)]
pub struct TTYPort {
    fd: RawFd,
}

impl TTYPort {
    /// Opens a TTY device.
    ///
    /// `path` should be the path to a TTY device, e.g., `/dev/ttyUSB0`. The device is opened
    /// read-write and non-blocking, and does not become the controlling terminal of the process.
    /// Its attributes are left as they are.
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// cereal_unix::TTYPort::open(Path::new("/dev/ttyUSB0")).unwrap();
    /// ```
    ///
    /// ## Errors
    ///
    /// * `InvalidArgument` if `path` contains a NUL byte.
    /// * `Os` with the OS's errno if the device could not be opened, e.g. `ENOENT`, `EACCES` or
    ///   `EBUSY`.
    pub fn open(path: &Path) -> Result<Self> {
        use libc::{O_NOCTTY, O_NONBLOCK, O_RDWR};

        let cstr = match CString::new(path.as_os_str().as_bytes()) {
            Ok(s) => s,
            Err(_) => {
                return Err(Error::invalid_argument(format!(
                    "device path contains a NUL byte: {:?}",
                    path
                )))
            }
        };

        let fd = unsafe { libc::open(cstr.as_ptr(), O_RDWR | O_NOCTTY | O_NONBLOCK, 0) };
        if fd < 0 {
            let err = error::last_os_error();
            debug!("failed to open {}: {}", path.display(), err);
            return Err(err);
        }

        debug!("opened {} as fd {}", path.display(), fd);
        Ok(TTYPort { fd })
    }

    /// Closes the device.
    ///
    /// ## Errors
    ///
    /// Returns the OS error from `close(2)`, e.g. `EBADF` if the descriptor was already closed
    /// behind the port's back. The descriptor is not retried either way.
    pub fn close(self) -> Result<()> {
        let fd = self.into_raw_fd();

        if unsafe { libc::close(fd) } < 0 {
            return Err(error::last_os_error());
        }

        debug!("closed fd {}", fd);
        Ok(())
    }

    /// Returns `true` if the descriptor refers to a terminal.
    ///
    /// Configuration methods don't check this themselves; on a non-terminal they fail with the
    /// OS's own error, usually `ENOTTY`.
    pub fn is_terminal(&self) -> bool {
        unsafe { libc::isatty(self.fd) == 1 }
    }

    /// Requests or releases exclusive access to the device.
    ///
    /// While exclusive, further opens of the device by other processes fail with `EBUSY`.
    pub fn set_exclusive(&mut self, exclusive: bool) -> Result<()> {
        let retval = if exclusive {
            ioctl::tiocexcl(self.fd)
        } else {
            ioctl::tiocnxcl(self.fd)
        };

        retval.map_err(error::from_io_error)
    }

    /// Puts the device into raw mode. See [`make_raw()`](fn.make_raw.html).
    pub fn enter_raw_mode(&mut self) -> Result<()> {
        attributes::enter_raw_mode(self)
    }

    /// Sets the input and output baud rates. See [`set_speeds()`](fn.set_speeds.html).
    pub fn set_speeds(&mut self, input: u32, output: u32) -> Result<()> {
        attributes::set_speeds(self, input, output)
    }

    /// Enables or disables RTS/CTS flow control.
    pub fn set_hardware_flow_control(&mut self, enabled: bool) -> Result<()> {
        attributes::set_hardware_flow_control(self, enabled)
    }

    /// Reads back the `(input, output)` baud rates.
    ///
    /// A direction reports `None` if the device is running at a rate outside the speed table.
    pub fn baud_rates(&self) -> Result<(Option<u32>, Option<u32>)> {
        let termios = self.fetch_attributes()?;

        Ok((
            attributes::input_baud_rate(&termios),
            attributes::output_baud_rate(&termios),
        ))
    }

    /// Reads back whether RTS/CTS flow control is enabled.
    pub fn hardware_flow_control(&self) -> Result<bool> {
        let termios = self.fetch_attributes()?;
        Ok(attributes::hardware_flow_control(&termios))
    }
}

impl Drop for TTYPort {
    fn drop(&mut self) {
        if unsafe { libc::close(self.fd) } < 0 {
            warn!("failed to close fd {}: {}", self.fd, error::last_os_error());
        }
    }
}

impl AsRawFd for TTYPort {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl IntoRawFd for TTYPort {
    fn into_raw_fd(self) -> RawFd {
        let fd = self.fd;
        mem::forget(self);
        fd
    }
}

impl FromRawFd for TTYPort {
    /// Adopts a descriptor, e.g. one handed back by a collaborator that took it with
    /// `into_raw_fd()`. The port closes it when closed or dropped.
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        TTYPort { fd }
    }
}

impl TerminalDevice for TTYPort {
    type Attributes = Termios;

    fn fetch_attributes(&self) -> Result<Termios> {
        trace!("tcgetattr fd {}", self.fd);
        Termios::from_fd(self.fd).map_err(error::from_io_error)
    }

    fn store_attributes(&mut self, termios: &Termios) -> Result<()> {
        use termios::{tcsetattr, TCSANOW};

        trace!("tcsetattr fd {}", self.fd);
        tcsetattr(self.fd, TCSANOW, termios).map_err(error::from_io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cereal_core::ErrorKind;

    use std::ffi::OsStr;

    #[test]
    fn open_rejects_nul_in_path() {
        let path = Path::new(OsStr::from_bytes(b"/dev/tty\0S0"));
        let err = TTYPort::open(path).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn open_reports_missing_device() {
        let err = TTYPort::open(Path::new("/dev/cereal-does-not-exist")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Os(libc::ENOENT));
        assert!(err.description().starts_with("ENOENT"), "{}", err);
    }

    #[test]
    fn configuring_a_regular_file_fails_with_enotty() {
        let mut port = TTYPort::open(Path::new("/dev/null")).unwrap();

        assert!(!port.is_terminal());

        let err = port.enter_raw_mode().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Os(libc::ENOTTY));

        port.close().unwrap();
    }

    #[test]
    fn set_speeds_rejects_unlisted_rate_on_any_descriptor() {
        let mut port = TTYPort::open(Path::new("/dev/null")).unwrap();

        let err = port.set_speeds(12345, 9600).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

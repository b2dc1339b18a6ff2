//! Platform-independent pieces of cereal: the error type shared by every backend and the traits
//! that describe a terminal device whose attributes live in the kernel.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::result::Result as StdResult;

/// A type for results generated by interacting with terminal devices.
///
/// The `Err` type is hard-wired to [`cereal_core::Error`](struct.Error.html).
pub type Result<T> = StdResult<T, Error>;

/// Categories of errors that can occur when configuring a terminal device.
///
/// There are exactly two: the caller handed over something that could not be used, or the
/// operating system refused a call. OS errors carry the native `errno` unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument failed validation before any OS call was attempted, e.g. a baud rate missing
    /// from the speed table or a device path containing a NUL byte.
    InvalidArgument,

    /// An OS call failed. The member is the raw `errno` reported by the OS.
    Os(i32),
}

/// An error type for terminal device operations.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    description: String,
}

impl Error {
    /// Creates a new error of the given kind with a human-readable description.
    pub fn new<T: Into<String>>(kind: ErrorKind, description: T) -> Self {
        Error {
            kind,
            description: description.into(),
        }
    }

    /// Creates an `InvalidArgument` error.
    pub fn invalid_argument<T: Into<String>>(description: T) -> Self {
        Error::new(ErrorKind::InvalidArgument, description)
    }

    /// Returns the corresponding `ErrorKind` for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the OS `errno` if this error came from a failed OS call.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self.kind {
            ErrorKind::Os(errno) => Some(errno),
            ErrorKind::InvalidArgument => None,
        }
    }

    /// Returns the description of the error.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&self.description)
    }
}

impl StdError for Error {}

impl From<Error> for io::Error {
    fn from(error: Error) -> io::Error {
        match error.kind {
            ErrorKind::Os(errno) => io::Error::from_raw_os_error(errno),
            ErrorKind::InvalidArgument => io::Error::new(io::ErrorKind::InvalidInput, error.description),
        }
    }
}

/// A terminal device whose attributes are held by the OS.
///
/// Attributes are never cached: each configuration change is a fresh round trip of
/// `fetch_attributes()` followed by `store_attributes()`. The two calls are separate OS requests
/// and are not atomic with respect to other threads or processes configuring the same device.
pub trait TerminalDevice {
    /// The native attribute record, e.g. `struct termios` on POSIX systems.
    type Attributes;

    /// Reads the device's current attributes from the OS.
    ///
    /// ## Errors
    ///
    /// Returns an OS error if the attributes could not be read, for example because the handle
    /// does not refer to a terminal (`ENOTTY`) or has been closed (`EBADF`).
    fn fetch_attributes(&self) -> Result<Self::Attributes>;

    /// Writes attributes back to the device, taking effect immediately.
    ///
    /// ## Errors
    ///
    /// Returns an OS error if the driver rejected the attributes. The device keeps its previous
    /// configuration in that case.
    fn store_attributes(&mut self, attributes: &Self::Attributes) -> Result<()>;
}

/// An extension trait that provides the fetch-modify-store cycle for terminal devices.
pub trait TerminalDeviceExt: TerminalDevice {
    /// Alters the device's attributes.
    ///
    /// The current attributes are fetched exactly once and yielded to `change`. If `change`
    /// succeeds the result is stored exactly once. Nothing is stored when the fetch or the change
    /// fails, so the device is left as it was.
    ///
    /// ## Example
    ///
    /// ```
    /// use cereal_core::{Result, TerminalDevice, TerminalDeviceExt};
    ///
    /// struct Line(u32);
    ///
    /// impl TerminalDevice for Line {
    ///     type Attributes = u32;
    ///
    ///     fn fetch_attributes(&self) -> Result<u32> {
    ///         Ok(self.0)
    ///     }
    ///
    ///     fn store_attributes(&mut self, attributes: &u32) -> Result<()> {
    ///         self.0 = *attributes;
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let mut line = Line(0b0001);
    /// line.modify(|flags| {
    ///     *flags |= 0b0100;
    ///     Ok(())
    /// }).unwrap();
    ///
    /// assert_eq!(line.0, 0b0101);
    /// ```
    fn modify<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Self::Attributes) -> Result<()>,
    {
        let mut attributes = self.fetch_attributes()?;
        change(&mut attributes)?;
        self.store_attributes(&attributes)
    }
}

impl<T> TerminalDeviceExt for T where T: TerminalDevice {}

use cereal_core::{Error, ErrorKind};

use std::io;

use nix::errno::Errno;

/// Builds an error from the calling thread's current `errno`.
pub fn last_os_error() -> Error {
    from_io_error(io::Error::last_os_error())
}

/// Builds an error from a raw `errno` value.
///
/// The errno is kept verbatim as `ErrorKind::Os`. The description leads with the symbolic name so
/// that log lines read like `EBADF: Bad file descriptor (os error 9)`.
pub fn from_raw_os_error(errno: i32) -> Error {
    let message = io::Error::from_raw_os_error(errno);

    let description = match errno_name(errno) {
        Some(name) => format!("{}: {}", name, message),
        None => message.to_string(),
    };

    Error::new(ErrorKind::Os(errno), description)
}

/// Converts an error reported by the `termios` or `ioctl-rs` wrappers.
///
/// Both crates build every error with `io::Error::last_os_error()`, and so does
/// [`last_os_error()`](fn.last_os_error.html), so the errno-less branch can't be reached from
/// this crate. It only keeps the conversion total: an `io::Error` built by hand reports `EIO` with
/// its own message as the description.
pub fn from_io_error(io_error: io::Error) -> Error {
    match io_error.raw_os_error() {
        Some(errno) => from_raw_os_error(errno),
        None => Error::new(ErrorKind::Os(libc::EIO), io_error.to_string()),
    }
}

/// Returns the platform's symbolic name for an `errno` value, e.g. `"ENOENT"`.
///
/// Returns `None` for a value the platform doesn't define.
pub fn errno_name(errno: i32) -> Option<String> {
    match Errno::from_raw(errno) {
        Errno::UnknownErrno => None,
        known => Some(format!("{:?}", known)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_name_knows_device_errors() {
        assert_eq!(errno_name(libc::EBADF).as_deref(), Some("EBADF"));
        assert_eq!(errno_name(libc::ENOENT).as_deref(), Some("ENOENT"));
        assert_eq!(errno_name(libc::ENOTTY).as_deref(), Some("ENOTTY"));
    }

    #[test]
    fn errno_name_knows_pipe_and_timeout_errors() {
        assert_eq!(errno_name(libc::EPIPE).as_deref(), Some("EPIPE"));
        assert_eq!(errno_name(libc::ETIMEDOUT).as_deref(), Some("ETIMEDOUT"));
        assert_eq!(errno_name(libc::EOVERFLOW).as_deref(), Some("EOVERFLOW"));
    }

    #[test]
    fn errno_name_rejects_undefined_values() {
        assert_eq!(errno_name(-1), None);
        assert_eq!(errno_name(0), None);
    }

    #[test]
    fn from_raw_os_error_keeps_errno() {
        let err = from_raw_os_error(libc::EACCES);

        assert_eq!(err.kind(), ErrorKind::Os(libc::EACCES));
        assert!(err.description().starts_with("EACCES: "), "{}", err);
    }

    #[test]
    fn from_raw_os_error_names_broken_pipe() {
        let err = from_raw_os_error(libc::EPIPE);

        assert_eq!(err.raw_os_error(), Some(libc::EPIPE));
        assert!(err.description().starts_with("EPIPE: "), "{}", err);
    }

    #[test]
    fn from_io_error_unwraps_errno() {
        let err = from_io_error(io::Error::from_raw_os_error(libc::EBUSY));
        assert_eq!(err.raw_os_error(), Some(libc::EBUSY));
    }

    #[test]
    fn from_io_error_keeps_message_without_errno() {
        let err = from_io_error(io::Error::new(io::ErrorKind::Other, "wrapper failed"));
        assert_eq!(err.description(), "wrapper failed");
    }
}

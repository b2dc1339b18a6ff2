// Kept in its own test binary: the second close targets a descriptor number that is free, and no
// other test may be running that could reuse it in between.

mod common;

use std::os::unix::prelude::*;

use cereal_core::ErrorKind;
use cereal_unix::TTYPort;

use common::Pty;

#[test]
fn closing_twice_reports_ebadf() {
    let pty = Pty::open().unwrap();
    let fd = TTYPort::open(&pty.path).unwrap().into_raw_fd();

    let port = unsafe { TTYPort::from_raw_fd(fd) };
    port.close().unwrap();

    let port = unsafe { TTYPort::from_raw_fd(fd) };
    let err = port.close().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Os(libc::EBADF));
    assert_eq!(cereal_unix::errno_name(libc::EBADF).as_deref(), Some("EBADF"));
}

use std::ffi::CStr;
use std::io;
use std::path::PathBuf;
use std::ptr;

use std::os::unix::prelude::*;

/// A pseudo-terminal pair. The master stays open so the slave can be reopened by path.
pub struct Pty {
    master: RawFd,
    pub path: PathBuf,
}

impl Pty {
    pub fn open() -> io::Result<Self> {
        let mut master: libc::c_int = -1;
        let mut slave: libc::c_int = -1;

        let retval = unsafe {
            libc::openpty(&mut master, &mut slave, ptr::null_mut(), ptr::null_mut(), ptr::null_mut())
        };
        if retval < 0 {
            return Err(io::Error::last_os_error());
        }

        let mut name = [0 as libc::c_char; 128];
        let retval = unsafe { libc::ttyname_r(slave, name.as_mut_ptr(), name.len()) };

        unsafe {
            libc::close(slave);
        }

        if retval != 0 {
            unsafe {
                libc::close(master);
            }
            return Err(io::Error::from_raw_os_error(retval));
        }

        let name = unsafe { CStr::from_ptr(name.as_ptr()) };
        let path = PathBuf::from(std::ffi::OsStr::from_bytes(name.to_bytes()));

        Ok(Pty { master, path })
    }
}

impl Drop for Pty {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.master);
        }
    }
}

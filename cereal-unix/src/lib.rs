//! Raw-mode terminal configuration for Unix serial devices.
//!
//! A device is opened as a [`TTYPort`](struct.TTYPort.html) and then configured with three
//! independent operations, each a single fetch-modify-store round trip against the kernel:
//!
//! * [`enter_raw_mode()`](fn.enter_raw_mode.html)
//! * [`set_speeds()`](fn.set_speeds.html)
//! * [`set_hardware_flow_control()`](fn.set_hardware_flow_control.html)
//!
//! The operations are generic over [`TerminalDevice`], so they work with any device whose
//! attributes are a `termios` record.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let mut port = cereal_unix::TTYPort::open(Path::new("/dev/ttyUSB0")).unwrap();
//! port.enter_raw_mode().unwrap();
//! port.set_speeds(115200, 115200).unwrap();
//! port.set_hardware_flow_control(true).unwrap();
//! port.close().unwrap();
//! ```
//!
//! [`TerminalDevice`]: ../cereal_core/trait.TerminalDevice.html

pub use attributes::*;
pub use error::errno_name;
pub use tty::*;

pub mod speed;

mod attributes;
mod error;
mod tty;

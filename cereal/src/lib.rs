//! Open serial devices and put them into raw, fixed-speed, optionally flow-controlled mode.
//!
//! This crate only configures the line. Reading and writing bytes is left to whoever takes the
//! descriptor afterwards, e.g. through `AsRawFd` or `IntoRawFd`.
//!
//! ```no_run
//! let mut port = cereal::open("/dev/ttyUSB0").unwrap();
//!
//! port.enter_raw_mode().unwrap();
//! port.set_speeds(9600, 115200).unwrap();
//! port.set_hardware_flow_control(true).unwrap();
//!
//! port.close().unwrap();
//! ```

pub use cereal_core::{Error, ErrorKind, Result};
pub use cereal_core::{TerminalDevice, TerminalDeviceExt};

#[cfg(unix)]
pub use cereal_unix as unix;

#[cfg(unix)]
pub use unix::TTYPort as SystemPort;

use std::ffi::OsStr;

use log::debug;

/// A module that exports traits that are useful to have in scope.
///
/// It is intended to be glob imported:
///
/// ```no_run
/// use cereal::prelude::*;
/// ```
pub mod prelude {
    pub use cereal_core::{TerminalDevice, TerminalDeviceExt};
}

/// A convenience function for opening a native serial port.
///
/// The argument should be a path to a TTY device file. Hard-coding it diminishes the utility of
/// the program, so device names should usually come from external sources:
///
/// ```no_run
/// use std::env;
///
/// for arg in env::args_os().skip(1) {
///     let port = cereal::open(&arg).unwrap();
/// }
/// ```
#[cfg(unix)]
pub fn open<T: AsRef<OsStr> + ?Sized>(port: &T) -> Result<SystemPort> {
    use std::path::Path;

    unix::TTYPort::open(Path::new(port))
}

/// A declarative line configuration.
///
/// `apply()` runs the configurators one after another, each in its own fetch-modify-store round
/// trip. It is a convenience, not a transaction: if a later step fails, earlier steps stay
/// applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PortConfig {
    /// Put the line into raw mode.
    pub raw: bool,

    /// Input baud rate.
    pub input_baud: u32,

    /// Output baud rate.
    pub output_baud: u32,

    /// Use RTS/CTS flow control.
    pub hardware_flow_control: bool,
}

impl PortConfig {
    /// A raw 9600 baud line without flow control.
    pub const DEFAULT: PortConfig = PortConfig {
        raw: true,
        input_baud: 9600,
        output_baud: 9600,
        hardware_flow_control: false,
    };

    /// Returns a copy of the configuration using `baud` for both directions.
    pub fn with_baud(self, baud: u32) -> Self {
        PortConfig {
            input_baud: baud,
            output_baud: baud,
            ..self
        }
    }

    /// Applies the configuration to a port.
    ///
    /// Both baud rates are checked before the port is touched, so an unsupported rate never
    /// leaves the line half-configured.
    ///
    /// ## Errors
    ///
    /// * `InvalidArgument` if either baud rate is not supported on this platform.
    /// * `Os` from the first configurator that failed.
    #[cfg(unix)]
    pub fn apply(&self, port: &mut SystemPort) -> Result<()> {
        for &(direction, baud) in &[("input", self.input_baud), ("output", self.output_baud)] {
            if unix::speed::lookup(baud).is_none() {
                return Err(Error::invalid_argument(format!(
                    "unsupported {} baud rate: {}",
                    direction, baud
                )));
            }
        }

        if self.raw {
            port.enter_raw_mode()?;
        }

        port.set_speeds(self.input_baud, self.output_baud)?;
        port.set_hardware_flow_control(self.hardware_flow_control)?;

        debug!("applied {:?}", self);
        Ok(())
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        PortConfig::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_config_defaults_to_raw_9600() {
        let config: PortConfig = Default::default();

        assert!(config.raw);
        assert_eq!(config.input_baud, 9600);
        assert_eq!(config.output_baud, 9600);
        assert!(!config.hardware_flow_control);
    }

    #[test]
    fn port_config_with_baud_sets_both_directions() {
        let config = PortConfig::DEFAULT.with_baud(115200);

        assert_eq!(config.input_baud, 115200);
        assert_eq!(config.output_baud, 115200);
        assert!(config.raw);
    }

    #[cfg(unix)]
    #[test]
    fn port_config_rejects_unsupported_baud_before_touching_port() {
        // /dev/null isn't a terminal, so reaching any configurator would fail with ENOTTY.
        let mut port = open("/dev/null").unwrap();
        let config = PortConfig {
            output_baud: 12345,
            ..PortConfig::DEFAULT
        };

        let err = config.apply(&mut port).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.description().contains("output"), "{}", err);
    }

    #[cfg(unix)]
    #[test]
    fn port_config_surfaces_os_errors() {
        let mut port = open("/dev/null").unwrap();

        let err = PortConfig::DEFAULT.apply(&mut port).unwrap_err();

        assert!(err.raw_os_error().is_some());
        assert!(err.description().starts_with("ENOTTY"), "{}", err);
    }

    #[cfg(unix)]
    #[test]
    fn open_reports_missing_device() {
        let err = open("/dev/cereal-missing").unwrap_err();
        assert!(err.raw_os_error().is_some());
    }
}

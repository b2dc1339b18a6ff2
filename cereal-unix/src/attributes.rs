use cereal_core::{Error, Result, TerminalDevice, TerminalDeviceExt};

use log::debug;
use termios::{speed_t, Termios};

use super::error;
use super::speed;

/// Transforms terminal attributes into raw mode.
///
/// Reads return as soon as one byte is available. Input bytes are not translated, stripped or
/// flow-controlled, nothing is echoed, special characters generate no signals, characters are
/// eight bits without parity, output is not post-processed and modem status lines are ignored.
///
/// Applying the transformation twice has the same result as applying it once.
pub fn make_raw(termios: &mut Termios) {
    use termios::os::target::ECHOKE;
    use termios::{CLOCAL, CS8, CSIZE, PARENB}; // cflags
    use termios::{ECHO, ECHOE, ECHOK, ECHONL, ICANON, IEXTEN, ISIG}; // lflags
    use termios::{BRKINT, ICRNL, IGNBRK, IGNCR, IGNPAR, INLCR, INPCK, ISTRIP, IXON, PARMRK}; // iflags
    use termios::OPOST; // oflags
    use termios::{VMIN, VTIME}; // c_cc indexes

    termios.c_cc[VMIN] = 1;
    termios.c_cc[VTIME] = 0;

    termios.c_iflag &=
        !(ICRNL | INLCR | IGNCR | ISTRIP | IXON | BRKINT | IGNPAR | PARMRK | IGNBRK | INPCK);
    termios.c_lflag &= !(ICANON | ECHO | ECHOE | ECHOK | ECHOKE | ECHONL | ISIG | IEXTEN);

    termios.c_cflag &= !(CSIZE | PARENB);
    termios.c_cflag |= CS8 | CLOCAL;

    termios.c_oflag &= !OPOST;
}

/// Returns `true` if the attributes describe raw mode as set up by [`make_raw`].
pub fn is_raw(termios: &Termios) -> bool {
    let mut raw = *termios;
    make_raw(&mut raw);

    raw.c_iflag == termios.c_iflag
        && raw.c_oflag == termios.c_oflag
        && raw.c_cflag == termios.c_cflag
        && raw.c_lflag == termios.c_lflag
        && raw.c_cc == termios.c_cc
}

/// Writes input and output speed constants into the attributes, input first.
///
/// The constants are not validated here; a constant the platform rejects is reported as an OS
/// error.
pub fn apply_speeds(termios: &mut Termios, input: speed_t, output: speed_t) -> Result<()> {
    termios::cfsetispeed(termios, input).map_err(error::from_io_error)?;
    termios::cfsetospeed(termios, output).map_err(error::from_io_error)
}

/// Returns the input baud rate recorded in the attributes, if it's one from the speed table.
pub fn input_baud_rate(termios: &Termios) -> Option<u32> {
    speed::baud_for(termios::cfgetispeed(termios))
}

/// Returns the output baud rate recorded in the attributes, if it's one from the speed table.
pub fn output_baud_rate(termios: &Termios) -> Option<u32> {
    speed::baud_for(termios::cfgetospeed(termios))
}

/// Returns `true` if RTS/CTS flow control is enabled.
pub fn hardware_flow_control(termios: &Termios) -> bool {
    use termios::os::target::CRTSCTS;

    termios.c_cflag & CRTSCTS != 0
}

/// Sets or clears the RTS/CTS bit. No other field is touched.
pub fn set_hardware_flow_control_flag(termios: &mut Termios, enabled: bool) {
    use termios::os::target::CRTSCTS;

    if enabled {
        termios.c_cflag |= CRTSCTS;
    } else {
        termios.c_cflag &= !CRTSCTS;
    }
}

/// Puts a terminal device into raw mode.
///
/// The attributes are fetched, transformed by [`make_raw`] and stored back with immediate effect.
///
/// ## Errors
///
/// Returns the OS error of a failed fetch or store. The device keeps its previous configuration
/// in both cases.
pub fn enter_raw_mode<D>(device: &mut D) -> Result<()>
where
    D: TerminalDevice<Attributes = Termios>,
{
    device.modify(|termios| {
        make_raw(termios);
        Ok(())
    })?;

    debug!("entered raw mode");
    Ok(())
}

/// Sets a terminal device's input and output baud rates.
///
/// Both rates are checked against the speed table before the device is touched. They are
/// independent and may differ.
///
/// ## Errors
///
/// * `InvalidArgument` if either rate is not in the speed table. No OS call is made.
/// * `Os` if fetching the attributes, applying a rate or storing the attributes failed.
pub fn set_speeds<D>(device: &mut D, input: u32, output: u32) -> Result<()>
where
    D: TerminalDevice<Attributes = Termios>,
{
    let input_rate = match speed::lookup(input) {
        Some(rate) => rate,
        None => return Err(Error::invalid_argument(format!("unsupported input baud rate: {}", input))),
    };

    let output_rate = match speed::lookup(output) {
        Some(rate) => rate,
        None => return Err(Error::invalid_argument(format!("unsupported output baud rate: {}", output))),
    };

    device.modify(|termios| apply_speeds(termios, input_rate, output_rate))?;

    debug!("set speeds: input={} output={}", input, output);
    Ok(())
}

/// Enables or disables RTS/CTS hardware flow control on a terminal device.
///
/// ## Errors
///
/// Returns the OS error of a failed fetch or store.
pub fn set_hardware_flow_control<D>(device: &mut D, enabled: bool) -> Result<()>
where
    D: TerminalDevice<Attributes = Termios>,
{
    device.modify(|termios| {
        set_hardware_flow_control_flag(termios, enabled);
        Ok(())
    })?;

    debug!("set hardware flow control: {}", enabled);
    Ok(())
}

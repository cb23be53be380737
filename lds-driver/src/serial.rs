use crate::config::DriverConfig;
use crate::constants::{LIDAR_CMD_START_MOTOR, LIDAR_CMD_STOP_MOTOR};
use crate::error::Result;
use serialport::SerialPort;
use std::io::{Read, Write};

pub(crate) fn open(port_name: &str, config: &DriverConfig) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(port_name, config.baud_rate)
        .timeout(config.timeout)
        .open()?;
    log::info!("Opened {} at {} baud", port_name, config.baud_rate);
    Ok(port)
}

// Firmware from 2017.10 onwards spins up on its own; the command is harmless there.
pub(crate) fn start_motor(port: &mut Box<dyn SerialPort>) -> Result<()> {
    send_command(port, LIDAR_CMD_START_MOTOR)?;
    Ok(())
}

pub(crate) fn stop_motor(port: &mut Box<dyn SerialPort>) -> Result<()> {
    send_command(port, LIDAR_CMD_STOP_MOTOR)?;
    Ok(())
}

pub(crate) fn stop_motor_and_flush(port: &mut Box<dyn SerialPort>) -> Result<()> {
    stop_motor(port)?;
    flush(port)?;
    Ok(())
}

pub(crate) fn send_command(port: &mut Box<dyn SerialPort>, command: u8) -> std::io::Result<()> {
    port.write_all(&[command])?;
    port.flush()
}

pub(crate) fn get_n_read(port: &mut Box<dyn SerialPort>) -> Result<usize> {
    let n_u32: u32 = port.bytes_to_read()?;
    Ok(n_u32.try_into().unwrap_or(0))
}

/// Discards pending input until the driver reports none left.
pub(crate) fn flush(port: &mut Box<dyn SerialPort>) -> Result<()> {
    loop {
        let n_read: usize = get_n_read(port)?;
        if n_read == 0 {
            return Ok(());
        }
        let mut packet: Vec<u8> = vec![0; n_read];
        port.read_exact(packet.as_mut_slice())?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::sleep_ms;
    use serialport::TTYPort;
    use std::io::{Read, Write};

    #[test]
    fn test_start_motor() {
        let (master, mut slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut master_ptr = Box::new(master) as Box<dyn SerialPort>;
        start_motor(&mut master_ptr).unwrap();

        sleep_ms(10);

        let mut buf = [0u8; 1];
        slave.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [b'b']);
    }

    #[test]
    fn test_stop_motor() {
        let (master, mut slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut master_ptr = Box::new(master) as Box<dyn SerialPort>;
        stop_motor(&mut master_ptr).unwrap();

        sleep_ms(10);

        let mut buf = [0u8; 1];
        slave.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [b'e']);
    }

    #[test]
    fn test_flush() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        master.write_all(&[0xFA, 0xA0, 0x2C, 0x01]).unwrap();

        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;

        sleep_ms(10);

        assert_eq!(slave_ptr.bytes_to_read().unwrap(), 4);
        flush(&mut slave_ptr).unwrap();
        assert_eq!(slave_ptr.bytes_to_read().unwrap(), 0);

        // when zero bytes to read
        flush(&mut slave_ptr).unwrap();
        assert_eq!(slave_ptr.bytes_to_read().unwrap(), 0);
    }

    #[test]
    fn test_flush_large_input() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;

        let pending: Vec<u8> = (0..3000).map(|i| i as u8).collect();
        master.write_all(&pending).unwrap();
        sleep_ms(50);

        flush(&mut slave_ptr).unwrap();
        assert_eq!(slave_ptr.bytes_to_read().unwrap(), 0);

        // the next byte written is the next byte read
        master.write_all(&[0x5A]).unwrap();
        sleep_ms(10);
        let mut buf = [0u8; 1];
        slave_ptr.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0x5A]);
    }
}

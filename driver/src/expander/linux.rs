//! Linux userspace transport through the `i2c-dev` character devices.
use crate::{BusResult, ExpanderBus};
use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;
use log::{debug, trace};
use std::fmt::{Debug, Formatter};
use std::num::ParseIntError;

/// Parses a slave address, either decimal or `0x`-prefixed hexadecimal.
pub fn parse_address(s: &str) -> Result<u16, ParseIntError> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

/// [ExpanderBus] writing to `/dev/i2c-<bus>`.
pub struct LinuxExpanderBus {
    dev: LinuxI2CDevice,
    bus: u8,
    address: u16,
}

impl LinuxExpanderBus {
    /// Opens `/dev/i2c-<bus>` and binds it to the expander at `address`.
    ///
    /// # Errors
    /// - `BusError::Unavailable` if the device node is missing or not accessible.
    /// - `BusError::Io` for any other failure to open or bind the device.
    pub fn new(bus: u8, address: u16) -> BusResult<Self> {
        let path = format!("/dev/i2c-{}", bus);
        debug!("Opening {} @ {:#04x}", path, address);
        let dev = LinuxI2CDevice::new(&path, address).map_err(std::io::Error::from)?;
        Ok(Self { dev, bus, address })
    }
}

impl Debug for LinuxExpanderBus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LinuxExpanderBus(/dev/i2c-{} @ {:#04x})", self.bus, self.address)
    }
}

impl ExpanderBus for LinuxExpanderBus {
    fn transmit(&mut self, byte: u8) -> BusResult<()> {
        trace!("{:?} <- {:08b}", self, byte);
        self.dev.write(&[byte]).map_err(std::io::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_parse_in_both_radixes() {
        assert_eq!(parse_address("0x27"), Ok(0x27));
        assert_eq!(parse_address(" 0X3f\n"), Ok(0x3F));
        assert_eq!(parse_address("39"), Ok(39));
        assert!(parse_address("0xZZ").is_err());
        assert!(parse_address("").is_err());
    }

    #[test]
    fn missing_bus_is_unavailable() {
        let err = LinuxExpanderBus::new(255, 0x27).unwrap_err();
        assert_eq!(err, crate::BusError::Unavailable);
    }
}

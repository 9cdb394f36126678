use crate::{BusError, BusResult, ExpanderBus};
use embedded_hal::i2c::{Error, I2c};
use log::trace;
use std::fmt::{Debug, Formatter};

/// [ExpanderBus] over any `embedded-hal` I2C bus, with a 7-bit expander address.
pub struct I2cExpanderBus<I: I2c> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cExpanderBus<I> {
    /// PCF8574 backpack address with A0 to A2 pulled high.
    pub const DEFAULT_ADDRESS: u8 = 0x27;

    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the bus back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> Debug for I2cExpanderBus<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "I2cExpanderBus({:#04x})", self.address)
    }
}

impl<I: I2c> ExpanderBus for I2cExpanderBus<I> {
    fn transmit(&mut self, byte: u8) -> BusResult<()> {
        trace!("{:?} <- {:08b}", self, byte);
        self.i2c
            .write(self.address, &[byte])
            .map_err(|err| BusError::from(err.kind()))
    }
}

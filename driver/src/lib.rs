//! Driver for HD44780-compatible character LCDs wired to an 8-bit I2C I/O expander.
//!
//! The expander latches one byte, and every LCD pin (RS, RW, E, backlight and the four upper data
//! lines) is one bit of it. The controller's 4-bit parallel protocol is synthesized by rewriting
//! that byte over the bus, see [lcd::hd44780::driver::ExpanderHD44780Driver].
pub mod delay;
pub mod expander;
pub mod lcd;

use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum BusError {
    #[error("address not acknowledged")]
    NoAcknowledge,
    #[error("bus arbitration lost")]
    ArbitrationLoss,
    #[error("bus error")]
    Bus,
    #[error("data overrun")]
    Overrun,
    #[error("transport unavailable")]
    Unavailable,
    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),
    #[error("error: {0}")]
    Other(String),
}

impl From<std::io::Error> for BusError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                BusError::Unavailable
            }
            kind => BusError::Io(kind),
        }
    }
}

impl From<embedded_hal::i2c::ErrorKind> for BusError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;

        match kind {
            ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLoss,
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::Overrun => BusError::Overrun,
            other => BusError::Other(format!("{:?}", other)),
        }
    }
}

pub type BusResult<T> = Result<T, BusError>;

/// The single point of contact with the physical bus.
///
/// Implementations send exactly one byte to the expander per call, as one write transaction,
/// without retrying. Whatever goes wrong is reported as a [BusError].
pub trait ExpanderBus: Debug {
    /// Latches `byte` on the expander outputs.
    fn transmit(&mut self, byte: u8) -> BusResult<()>;
}

impl<B: ExpanderBus + ?Sized> ExpanderBus for &mut B {
    fn transmit(&mut self, byte: u8) -> BusResult<()> {
        (**self).transmit(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

    #[test]
    fn i2c_error_kinds_map_onto_bus_errors() {
        assert_eq!(
            BusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            BusError::NoAcknowledge
        );
        assert_eq!(BusError::from(ErrorKind::ArbitrationLoss), BusError::ArbitrationLoss);
        assert_eq!(BusError::from(ErrorKind::Bus), BusError::Bus);
        assert_eq!(BusError::from(ErrorKind::Overrun), BusError::Overrun);
        assert!(matches!(BusError::from(ErrorKind::Other), BusError::Other(_)));
    }

    #[test]
    fn missing_device_node_is_unavailable() {
        let err = std::io::Error::from(std::io::ErrorKind::NotFound);
        assert_eq!(BusError::from(err), BusError::Unavailable);

        let err = std::io::Error::from(std::io::ErrorKind::TimedOut);
        assert_eq!(BusError::from(err), BusError::Io(std::io::ErrorKind::TimedOut));
    }
}

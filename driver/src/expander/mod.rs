//! The I/O expander side of the wiring: which pin sits on which bit, and the byte that is latched.
//!
//! Wiring of the common PCF8574 backpack, P7 to P0:
//! `D7 D6 D5 D4 BL E RW RS`.

mod i2c;
#[cfg(target_os = "linux")]
mod linux;

pub use i2c::*;
#[cfg(target_os = "linux")]
pub use linux::*;

use std::fmt::{Debug, Formatter};

/// Role of an expander output pin.
///
/// The discriminant is the bit position on the expander. `Data0` to `Data3` drive the
/// controller's D4 to D7 lines, the only data lines used in 4-bit mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum PinRole {
    RegisterSelect = 0,
    ReadWrite = 1,
    Enable = 2,
    Backlight = 3,
    Data0 = 4,
    Data1 = 5,
    Data2 = 6,
    Data3 = 7,
}

impl PinRole {
    /// Data lines, lowest bit first.
    pub const DATA: [PinRole; 4] = [PinRole::Data0, PinRole::Data1, PinRole::Data2, PinRole::Data3];

    /// Bit position of the pin on the expander.
    pub const fn bit(self) -> u8 {
        self as u8
    }

    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }
}

/// Half of a logical byte sent over the 4-bit interface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Nibble {
    High,
    Low,
}

impl Nibble {
    /// Transfer order of the two halves.
    pub const ORDER: [Nibble; 2] = [Nibble::High, Nibble::Low];

    /// Extracts this half of `value`, right-aligned.
    pub const fn of(self, value: u8) -> u8 {
        match self {
            Nibble::High => value >> 4,
            Nibble::Low => value & 0x0F,
        }
    }
}

/// Output state latched in the expander.
///
/// Every change goes through a [PinRole], so no caller does raw bit arithmetic on the wiring.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct ExpanderByte(u8);

impl ExpanderByte {
    pub const fn new() -> Self {
        ExpanderByte(0)
    }

    /// Raw value to put on the bus.
    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_set(self, role: PinRole) -> bool {
        self.0 & role.mask() != 0
    }

    pub fn set(&mut self, role: PinRole, value: bool) {
        if value {
            self.0 |= role.mask();
        } else {
            self.0 &= !role.mask();
        }
    }

    /// Puts the low four bits of `nibble` on the data lines. Other pins are left alone.
    pub fn set_data_nibble(&mut self, nibble: u8) {
        for (i, role) in PinRole::DATA.into_iter().enumerate() {
            self.set(role, nibble & (1 << i) != 0);
        }
    }

    /// Value currently on the data lines, right-aligned.
    pub fn data_nibble(self) -> u8 {
        PinRole::DATA
            .into_iter()
            .enumerate()
            .filter(|&(_, role)| self.is_set(role))
            .fold(0, |acc, (i, _)| acc | 1 << i)
    }
}

impl Debug for ExpanderByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExpanderByte({:08b})", self.0)
    }
}

impl From<ExpanderByte> for u8 {
    fn from(byte: ExpanderByte) -> Self {
        byte.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_follow_backpack_wiring() {
        assert_eq!(PinRole::RegisterSelect.mask(), 0b0000_0001);
        assert_eq!(PinRole::ReadWrite.mask(), 0b0000_0010);
        assert_eq!(PinRole::Enable.mask(), 0b0000_0100);
        assert_eq!(PinRole::Backlight.mask(), 0b0000_1000);
        assert_eq!(PinRole::Data0.mask(), 0b0001_0000);
        assert_eq!(PinRole::Data3.mask(), 0b1000_0000);
    }

    #[test]
    fn set_and_clear_touch_one_bit() {
        let mut byte = ExpanderByte::new();
        byte.set(PinRole::Backlight, true);
        byte.set(PinRole::Enable, true);
        assert_eq!(byte.value(), 0b0000_1100);

        byte.set(PinRole::Enable, false);
        assert_eq!(byte.value(), 0b0000_1000);
        assert!(byte.is_set(PinRole::Backlight));
        assert!(!byte.is_set(PinRole::Enable));

        // Setting twice is a no-op
        byte.set(PinRole::Backlight, true);
        assert_eq!(byte.value(), 0b0000_1000);
    }

    #[test]
    fn data_nibble_replaces_only_data_lines() {
        let mut byte = ExpanderByte::new();
        byte.set(PinRole::RegisterSelect, true);
        byte.set(PinRole::Backlight, true);

        byte.set_data_nibble(0b1111);
        assert_eq!(byte.value(), 0b1111_1001);

        byte.set_data_nibble(0b0101);
        assert_eq!(byte.value(), 0b0101_1001);
        assert_eq!(byte.data_nibble(), 0b0101);

        // Bits above the nibble are ignored
        byte.set_data_nibble(0b1010_0011);
        assert_eq!(byte.value(), 0b0011_1001);
    }

    #[test]
    fn nibbles_are_sourced_from_both_halves() {
        assert_eq!(Nibble::High.of(0xA5), 0x0A);
        assert_eq!(Nibble::Low.of(0xA5), 0x05);
        assert_eq!(Nibble::ORDER, [Nibble::High, Nibble::Low]);
    }
}

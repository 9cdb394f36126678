//! HD44780 LCD module.
//!
//! Only the write path of the controller's 4-bit interface is used: the R/W line is held low and
//! completion is never polled, so every operation is followed by a fixed wait from [timing].

pub mod command;
pub mod driver;
pub mod timing;

//! HD44780 instruction codes used by this driver.
//!
//! Only the write-side instructions needed to bring up and use a single-line display are here.

/// Clears the display and sets the cursor to the home position.
pub const CLEAR_DISPLAY: u8 = 0b00000001;

/// Sets the cursor to the home position.
pub const RETURN_HOME: u8 = 0b00000010;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    /// Moves the cursor to the left after writing data.
    Left,
    /// Moves the cursor to the right after writing data.
    Right,
}

/// Entry mode set. Command: `000001IS`.
pub const fn entry_mode(cursor_direction: CursorDirection, shift: bool) -> u8 {
    let mut command = 0b00000100;
    if matches!(cursor_direction, CursorDirection::Right) {
        command |= 0b00000010;
    }
    if shift {
        command |= 0b00000001;
    }
    command
}

/// Display on/off control. Command: `00001DCB`.
pub const fn display_control(display_on: bool, cursor_on: bool, blink_on: bool) -> u8 {
    let mut command = 0b00001000;
    if display_on {
        command |= 0b00000100;
    }
    if cursor_on {
        command |= 0b00000010;
    }
    if blink_on {
        command |= 0b00000001;
    }
    command
}

/// Function set. Command: `001DNF??`.
///
/// `data_length` is `true` for the 8-bit interface, `two_lines` selects 2-line mode and `font`
/// selects the 5x10 font.
pub const fn function_set(data_length: bool, two_lines: bool, font: bool) -> u8 {
    let mut command = 0b00100000;
    if data_length {
        command |= 0b00010000;
    }
    if two_lines {
        command |= 0b00001000;
    }
    if font {
        command |= 0b00000100;
    }
    command
}

/// Bring-up sequence, sent in this order as commands.
///
/// Return home first puts the controller in a known cursor state whatever power-on reset left.
/// Then 4-bit interface with one line and 5x8 font; display on with no cursor; auto-increment
/// without shifting; and a clear.
pub const INIT_SEQUENCE: [u8; 5] = [
    RETURN_HOME,
    function_set(false, false, false),
    display_control(true, false, false),
    entry_mode(CursorDirection::Right, false),
    CLEAR_DISPLAY,
];

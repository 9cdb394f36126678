mod expander;

use crate::BusResult;
use crate::lcd::hd44780::command::{
    CLEAR_DISPLAY, CursorDirection, RETURN_HOME, display_control, entry_mode,
};
use log::warn;
use std::fmt::Debug;
pub use expander::*;

/// Byte cap of a single [HD44780Driver::write_text] call in the reference write path.
pub const MAX_WRITE_LEN: usize = 16;

pub trait HD44780Driver: Debug {
    /// Initializes the HD44780 controller, see
    /// [INIT_SEQUENCE](crate::lcd::hd44780::command::INIT_SEQUENCE).
    ///
    /// Stops at the first failed command and returns its error.
    fn init(&mut self) -> BusResult<()>;

    /// Clears the display and sets the cursor to the home position.
    fn clear(&mut self) -> BusResult<()> {
        self.send_command(CLEAR_DISPLAY)
    }

    /// Sets the cursor to the home position.
    fn home(&mut self) -> BusResult<()> {
        self.send_command(RETURN_HOME)
    }

    /// Sets the display to the specified entry mode.
    fn set_entry_mode(&mut self, cursor_direction: CursorDirection, shift: bool) -> BusResult<()> {
        self.send_command(entry_mode(cursor_direction, shift))
    }

    /// Sets the display on/off, cursor on/off, and blinking on/off.
    fn set_display_control(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> BusResult<()> {
        self.send_command(display_control(display_on, cursor_on, blink_on))
    }

    /// Replaces the screen contents with at most `max_len` bytes of `text`.
    ///
    /// The display is cleared and homed first. Newlines are consumed but not displayed, as the
    /// display only has one line.
    ///
    /// Returns the number of bytes consumed, newlines included. On error, some prefix of the text
    /// may already be on the display.
    fn write_text(&mut self, text: &[u8], max_len: usize) -> BusResult<usize> {
        let text = &text[..text.len().min(max_len)];

        self.clear()?;
        self.home()?;

        for &byte in text.iter().filter(|&&byte| byte != b'\n') {
            self.send_char(byte)?;
        }

        Ok(text.len())
    }

    /// Writes a string at the cursor, without clearing.
    fn print(&mut self, s: &str) -> BusResult<()> {
        for c in s.chars() {
            if c.is_ascii() {
                self.send_char(c as u8)?;
            } else {
                warn!("Non-ASCII character: {}", c);
                self.send_char(b'?')?
            }
        }
        Ok(())
    }

    /// Leaves the display blank with the backlight off.
    ///
    /// Every step is attempted even if an earlier one failed, since the display is being given up
    /// anyway. Returns the first error.
    fn shutdown(&mut self) -> BusResult<()> {
        let steps = [
            ("clear", self.clear()),
            ("home", self.home()),
            ("backlight off", self.set_backlight(false)),
        ];

        let mut result = Ok(());
        for (step, step_result) in steps {
            if let Err(err) = step_result {
                warn!("Shutdown step {} failed: {}", step, err);
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    // Low-level commands
    // These are implemented by the driver implementation; the methods above are built on them.

    /// Sends a command to the HD44780 controller.
    /// Sets the RS pin to 0 (command).
    fn send_command(&mut self, command: u8) -> BusResult<()>;

    /// Sends a character (DDRAM data) to the HD44780 controller.
    /// Sets the RS pin to 1 (data).
    fn send_char(&mut self, data: u8) -> BusResult<()>;

    /// Turns the backlight on or off. Independent of the controller state.
    fn set_backlight(&mut self, on: bool) -> BusResult<()>;
}

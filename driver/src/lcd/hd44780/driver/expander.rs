use crate::expander::{ExpanderByte, Nibble, PinRole};
use crate::lcd::hd44780::command::INIT_SEQUENCE;
use crate::lcd::hd44780::driver::HD44780Driver;
use crate::lcd::hd44780::timing::TimingProfile;
use crate::{BusResult, ExpanderBus};
use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};
use std::fmt::{Debug, Formatter};

/// Progress of the controller bring-up.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DriverState {
    #[default]
    Uninitialized,
    /// Interface width and line count are set.
    FunctionSet,
    /// Display is on and the entry mode may still be pending.
    DisplayConfigured,
    /// Bring-up finished, the display accepts commands and characters.
    Ready,
}

/// State reached after each step of [INIT_SEQUENCE].
const INIT_STATES: [DriverState; INIT_SEQUENCE.len()] = [
    DriverState::Uninitialized,
    DriverState::FunctionSet,
    DriverState::DisplayConfigured,
    DriverState::DisplayConfigured,
    DriverState::Ready,
];

/// HD44780 driver talking 4-bit mode through an 8-bit I/O expander.
///
/// The driver owns the bus and keeps a copy of the byte latched on the expander. Each pin change
/// is made on a scratch copy, transmitted as a whole, and only kept once the bus accepted it. One
/// logical byte costs six bus writes: per nibble, one to present the data, and two for the E pulse.
///
/// Waits are done with the given [DelayNs], since there is no busy flag to poll with R/W tied low.
/// Use [ThreadSleep](crate::delay::ThreadSleep) outside of tests.
///
/// The driver is not synchronized; it's meant to have a single owner per display.
pub struct ExpanderHD44780Driver<B: ExpanderBus, D: DelayNs> {
    bus: B,
    delay: D,
    byte: ExpanderByte,
    state: DriverState,
}

impl<B: ExpanderBus, D: DelayNs> ExpanderHD44780Driver<B, D> {
    /// Creates an uninitialized driver. Nothing is sent until [HD44780Driver::init] is called.
    pub fn new(bus: B, delay: D) -> Self {
        ExpanderHD44780Driver {
            bus,
            delay,
            byte: ExpanderByte::new(),
            state: DriverState::Uninitialized,
        }
    }

    /// Creates a driver, initializes the controller and turns the backlight on.
    ///
    /// # Errors
    /// The first bus error of the bring-up. The remaining steps are not attempted, and it's up to
    /// the caller whether to try again.
    pub fn attach(bus: B, delay: D) -> BusResult<Self> {
        let mut driver = Self::new(bus, delay);
        driver.init()?;
        driver.set_backlight(true)?;
        debug!("{:?} attached.", driver);
        Ok(driver)
    }

    /// Blanks the display, turns the backlight off, and gives the bus back.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn detach(mut self) -> B {
        if let Err(err) = self.shutdown() {
            warn!("{:?} detached uncleanly: {}", self, err);
        } else {
            debug!("{:?} detached.", self);
        }
        self.bus
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The byte last accepted by the bus.
    pub fn expander_byte(&self) -> ExpanderByte {
        self.byte
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Sends one byte as two nibbles, high nibble first, then waits `post_delay_us`.
    ///
    /// Stops at the first failed transmission.
    pub fn send(&mut self, value: u8, register_select: bool, post_delay_us: u32) -> BusResult<()> {
        trace!("Sending data: {:08b}, RS: {}", value, register_select);

        for nibble in Nibble::ORDER {
            self.send_nibble(nibble.of(value), register_select)?;
        }

        if post_delay_us > 0 {
            self.delay.delay_us(post_delay_us);
        }
        Ok(())
    }

    /// Presents `value` on the data lines with RS set as given, then latches it with an E pulse.
    fn send_nibble(&mut self, value: u8, register_select: bool) -> BusResult<()> {
        let mut next = self.byte;
        next.set(PinRole::RegisterSelect, register_select);
        next.set_data_nibble(value);
        self.transmit(next)?;
        self.pulse_enable()
    }

    /// Drives E high then low. The controller samples the data lines on the falling edge.
    ///
    /// The falling edge is sent even when the rising edge failed, so E isn't left high if the
    /// expander did latch it. Returns the first error.
    fn pulse_enable(&mut self) -> BusResult<()> {
        let mut high = self.byte;
        high.set(PinRole::Enable, true);
        let rising = self.transmit(high);
        self.delay.delay_us(TimingProfile::SETTLE_HIGH_US);

        let mut low = self.byte;
        low.set(PinRole::Enable, false);
        let falling = self.transmit(low);
        self.delay.delay_us(TimingProfile::SETTLE_LOW_US);

        rising.and(falling)
    }

    /// Sends `next` and keeps it as the latched byte if the bus took it.
    fn transmit(&mut self, next: ExpanderByte) -> BusResult<()> {
        self.bus.transmit(next.value())?;
        self.byte = next;
        Ok(())
    }
}

impl<B: ExpanderBus, D: DelayNs> Debug for ExpanderHD44780Driver<B, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpanderHD44780Driver")
            .field("bus", &self.bus)
            .field("byte", &self.byte)
            .field("state", &self.state)
            .finish()
    }
}

impl<B: ExpanderBus, D: DelayNs> HD44780Driver for ExpanderHD44780Driver<B, D> {
    fn init(&mut self) -> BusResult<()> {
        self.state = DriverState::Uninitialized;

        for (command, state) in INIT_SEQUENCE.into_iter().zip(INIT_STATES) {
            self.send_command(command)?;
            if self.state != state {
                debug!("{:?} -> {:?}", self.state, state);
                self.state = state;
            }
        }
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> BusResult<()> {
        self.send(command, false, TimingProfile::COMMAND_DELAY_US)
    }

    fn send_char(&mut self, data: u8) -> BusResult<()> {
        self.send(data, true, TimingProfile::DATA_DELAY_US)
    }

    fn set_backlight(&mut self, on: bool) -> BusResult<()> {
        let mut next = self.byte;
        next.set(PinRole::Backlight, on);
        self.delay.delay_us(TimingProfile::BACKLIGHT_SETTLE_US);
        self.transmit(next)
    }
}

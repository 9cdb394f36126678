/// Wait states of the write-only 4-bit protocol.
///
/// These are properties of the controller, not of a particular display, so they are not
/// configurable.
#[derive(Debug, Copy, Clone)]
pub struct TimingProfile;

impl TimingProfile {
    /// Settle time after raising E.
    pub const SETTLE_HIGH_US: u32 = 20;
    /// Settle time after lowering E. The controller samples the data lines on this edge.
    pub const SETTLE_LOW_US: u32 = 40;
    /// Wait after a command byte. Covers the controller's execution time.
    pub const COMMAND_DELAY_US: u32 = 120;
    /// Wait after a data byte written to DDRAM.
    pub const DATA_DELAY_US: u32 = 45;
    /// Wait before latching a backlight change.
    pub const BACKLIGHT_SETTLE_US: u32 = 20;
    /// Time a freshly written screen is left standing after power-up, before it's cleared.
    pub const INIT_STABILIZE_MS: u32 = 500;
}

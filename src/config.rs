//! Driver timing configuration
//!
//! All delays the driver waits on are datasheet values for the SX1276 family. They are
//! collected here so a board with slower wiring or a different module can stretch them
//! without touching the driver.

/// Timing parameters used by the transports and the startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Delay between chip-select assertion and the first exchange of a register write, in
    /// nanoseconds. Default: 5 µs
    pub write_settle_ns: u32,

    /// Upper bound on completion-flag polls per byte before a
    /// [`TransportTimeout`](crate::Error::TransportTimeout) is reported
    pub max_polls: u32,

    /// How long the reset line is held low, in milliseconds. Datasheet minimum is 100 µs
    pub reset_assert_ms: u32,

    /// Wait after releasing reset before the chip accepts SPI traffic. Datasheet: 5 ms
    pub reset_settle_ms: u32,

    /// Pause around entering long-range mode during [`start`](crate::Device::start)
    pub startup_settle_ms: u32,

    /// Wait for the oscillator after entering Standby in the configuration load
    pub standby_settle_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            write_settle_ns: 5_000,
            max_polls: 10_000,
            reset_assert_ms: 1,
            reset_settle_ms: 5,
            startup_settle_ms: 10,
            standby_settle_ms: 10,
        }
    }
}

//! Reset, configuration load and startup
//!
//! [`Device::load_configuration`] writes a complete, known-good LoRa setup in one pass:
//!
//! | Setting            | Value                                   |
//! |--------------------|-----------------------------------------|
//! | Bandwidth          | 125 kHz                                 |
//! | Coding rate        | 4/5, explicit header                    |
//! | Spreading factor   | 7, payload CRC off                      |
//! | Preamble           | 8 symbols                               |
//! | Max payload        | 255 bytes                               |
//! | PA                 | PA_BOOST, +17 dBm, 40 µs ramp           |
//! | Over-current limit | 100 mA                                  |
//! | LNA                | G1, HF boost on, AGC on                 |
//! | FIFO base          | TX and RX at 0x00                       |
//!
//! The remaining entries pin reserved and AGC registers to the values this setup was
//! tuned with. Register writes are not acknowledged by the chip, so the
//! load does not read anything back.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    frequency,
    registers::{Mode, Register},
    transport::Transport,
    Device, Error,
};

/// Sync word for private networks, the chip's reset value
pub const DEFAULT_SYNC_WORD: u8 = 0x12;

/// Number of entries written by [`Device::load_configuration`]
pub const CONFIGURATION_LEN: usize = 36;

/// Builds the `(address, value)` table written by [`Device::load_configuration`].
pub fn configuration_table(sync_word: u8) -> [(u8, u8); CONFIGURATION_LEN] {
    use Register::*;

    [
        // 868 MHz placeholder, replaced by `set_frequency` during `start`
        (FrfMsb.addr(), 0xD9),
        (FrfMid.addr(), 0x00),
        (FrfLsb.addr(), 0x00),
        (PaConfig.addr(), 0x8F),
        (PaRamp.addr(), 0x09),
        (Ocp.addr(), 0x2B),
        (Lna.addr(), 0x23),
        (FifoTxBaseAddr.addr(), 0x00),
        (FifoRxBaseAddr.addr(), 0x00),
        (FifoRxCurrentAddr.addr(), 0x00),
        (IrqFlagsMask.addr(), 0x00),
        (RxNbBytes.addr(), 0x00),
        (ModemConfig1.addr(), 0x72),
        (ModemConfig2.addr(), 0x70),
        (SymbTimeoutLsb.addr(), 0x64),
        (PreambleMsb.addr(), 0x00),
        (PreambleLsb.addr(), 0x08),
        (MaxPayloadLength.addr(), 0xFF),
        (HopPeriod.addr(), 0x00),
        (FifoRxByteAddr.addr(), 0x00),
        (ModemConfig3.addr(), 0x04),
        (0x2F, 0x45),
        (0x30, 0x55),
        (0x31, 0xC3),
        (0x33, 0x27),
        (0x36, 0x03),
        (0x37, 0x0A),
        (SyncWord.addr(), sync_word),
        (0x3A, 0x49),
        (Tcxo.addr(), 0x09),
        (PaDac.addr(), 0x84),
        (AgcRef.addr(), 0x1C),
        (AgcThresh1.addr(), 0x0E),
        (AgcThresh2.addr(), 0x5B),
        (AgcThresh3.addr(), 0xCC),
        (Pll.addr(), 0xD0),
    ]
}

impl<T, RST, D> Device<T, RST, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Applies the known-good register configuration with the given sync word.
    ///
    /// Enters long-range Sleep, then Standby, waits for the oscillator and writes the whole
    /// table. The chip is left in Standby.
    pub fn load_configuration(&mut self, sync_word: u8) -> Result<(), Error> {
        self.enter_long_range_mode()?;
        self.set_mode(Mode::Standby)?;
        self.delay.delay_ms(self.config.standby_settle_ms);

        for (address, value) in configuration_table(sync_word) {
            self.write_raw(address, value)?;
        }
        log::debug!("configuration loaded, sync word {sync_word:#04x}");
        Ok(())
    }
}

impl<T, RST, D> Device<T, RST, D>
where
    T: Transport,
    RST: OutputPin,
    D: DelayNs,
{
    /// Pulses the reset line low and waits for the chip to come back.
    ///
    /// All registers return to their reset values, so the tracked mode is forgotten. It is
    /// forgotten before the line is driven, so a pin fault also leaves it unknown.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.tracked = None;
        self.reset.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(self.config.reset_assert_ms);
        self.reset.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(self.config.reset_settle_ms);
        Ok(())
    }

    /// Brings the radio from power-up to a configured Standby on `freq_mhz`.
    ///
    /// Sequence: reset, enter long-range mode, load the configuration with `sync_word`,
    /// set the carrier frequency. The SPI peripheral itself must already be set up.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `freq_mhz` cannot be encoded; the chip is not touched
    pub fn start(&mut self, freq_mhz: f64, sync_word: u8) -> Result<(), Error> {
        frequency::to_word(freq_mhz)?;

        log::debug!("starting radio at {freq_mhz} MHz");
        self.reset()?;
        self.delay.delay_ms(self.config.startup_settle_ms);
        self.enter_long_range_mode()?;
        self.delay.delay_ms(self.config.startup_settle_ms);
        self.load_configuration(sync_word)?;
        self.set_frequency(freq_mhz)
    }
}

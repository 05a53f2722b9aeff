//! RF configuration
//!
//! Carrier frequency and modem bandwidth. The frequency registers may only be written in
//! Sleep or Standby; the value is validated before the chip is touched.

use crate::{
    frequency,
    registers::{Bandwidth, Frf, Mode, ModemConfig1},
    transport::Transport,
    Device, Error,
};

impl<T, RST, D> Device<T, RST, D>
where
    T: Transport,
{
    /// Sets the carrier frequency in megahertz, rounded to the nearest 61 Hz step.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - negative or above the 24-bit range; nothing is sent
    /// * `Error::PreconditionViolation` - the chip is not in Sleep or Standby
    pub fn set_frequency(&mut self, freq_mhz: f64) -> Result<(), Error> {
        let word = frequency::to_word(freq_mhz)?;

        let mode = self.read_mode()?.mode();
        if !matches!(mode, Mode::Sleep | Mode::Standby) {
            return Err(Error::PreconditionViolation(mode));
        }

        log::debug!("frequency {freq_mhz} MHz (word {word:#08x})");
        self.write_register(Frf { value: word })
    }

    /// Reads back the carrier frequency in megahertz.
    pub fn frequency(&mut self) -> Result<f64, Error> {
        let frf = self.read_register::<Frf>()?;
        Ok(frequency::from_word(frf.value))
    }

    /// Reads the signal bandwidth from `RegModemConfig1`.
    pub fn bandwidth(&mut self) -> Result<Bandwidth, Error> {
        Ok(self.read_register::<ModemConfig1>()?.bandwidth)
    }

    /// Changes the signal bandwidth, keeping coding rate and header mode.
    pub fn set_bandwidth(&mut self, bandwidth: Bandwidth) -> Result<(), Error> {
        let config = self.read_register::<ModemConfig1>()?;
        self.write_register(ModemConfig1 { bandwidth, ..config })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        frequency::STEP_MHZ,
        registers::{Bandwidth, Mode},
        testing::{device, FakeChip},
        Error, InvalidArgument,
    };

    #[test]
    fn frequency_round_trips_through_the_chip() {
        let mut chip = FakeChip::new();
        let mut device = device(&mut chip);
        device.set_frequency(433.175).unwrap();
        let read = device.frequency().unwrap();
        assert!((read - 433.175).abs() <= STEP_MHZ);
    }

    #[test]
    fn frequency_is_written_msb_first() {
        let mut chip = FakeChip::new();
        device(&mut chip).set_frequency(915.0).unwrap();
        assert_eq!(chip.regs[0x06..=0x08], [0xE4, 0xC0, 0x00]);
    }

    #[test]
    fn invalid_frequency_never_reaches_the_bus() {
        let mut chip = FakeChip::new();
        assert_eq!(
            device(&mut chip).set_frequency(2000.0),
            Err(Error::InvalidArgument(InvalidArgument::FrequencyOutOfRange))
        );
        assert!(chip.log.is_empty());
    }

    #[test]
    fn frequency_needs_sleep_or_standby() {
        let mut chip = FakeChip::new();
        let mut device = device(&mut chip);
        device.set_mode(Mode::RxContinuous).unwrap();
        assert_eq!(
            device.set_frequency(868.0),
            Err(Error::PreconditionViolation(Mode::RxContinuous))
        );
    }

    #[test]
    fn bandwidth_change_keeps_coding_rate() {
        let mut chip = FakeChip::new();
        chip.regs[0x1D] = 0x72;
        let mut device = device(&mut chip);
        device.set_bandwidth(Bandwidth::Khz250).unwrap();
        assert_eq!(device.bandwidth().unwrap(), Bandwidth::Khz250);
        let (chip, _, _) = device.release();
        assert_eq!(chip.regs[0x1D], 0x82);
    }
}

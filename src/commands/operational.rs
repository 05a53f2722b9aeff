//! Operating mode control
//!
//! Every mode change is a read-modify-write of `RegOpMode` that replaces only the three
//! mode bits, so the long-range bit survives it. Switching the long-range bit itself is only
//! possible from Sleep; [`Device::enter_long_range_mode`] and
//! [`Device::exit_long_range_mode`] take care of getting there first.
//!
//! The driver keeps a shadow copy of the register as last written. It is cleared whenever
//! it cannot be trusted:
//! - a mode change failed part way, so the chip may or may not have switched
//! - the chip was put into a mode it leaves on its own (Tx, RxSingle, CAD)
//! - the chip was reset
//!
//! [`Device::verify_mode`] compares the shadow against hardware.

use crate::{
    registers::{Mode, OpMode},
    transport::Transport,
    Device, Error,
};

impl<T, RST, D> Device<T, RST, D> {
    /// The operating mode register as last written by this driver, if it is still known.
    pub fn tracked_mode(&self) -> Option<OpMode> {
        self.tracked
    }
}

impl<T, RST, D> Device<T, RST, D>
where
    T: Transport,
{
    /// Reads the operating mode register from the chip.
    pub fn read_mode(&mut self) -> Result<OpMode, Error> {
        self.read_register::<OpMode>()
    }

    /// Switches the chip to `mode`, keeping the long-range bit and every other non-mode bit.
    ///
    /// Calling this twice with the same mode leaves the register unchanged the second time.
    /// After a failure the tracked mode is unknown; call [`read_mode`](Self::read_mode)
    /// before relying on the chip state.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error> {
        self.modify_op_mode(|reg| reg.with_mode(mode)).map(|_| ())
    }

    /// Puts the chip into LoRa (long range) framing, entering Sleep first if needed.
    ///
    /// The chip is left in Sleep with the long-range bit set.
    pub fn enter_long_range_mode(&mut self) -> Result<(), Error> {
        self.switch_long_range(true)
    }

    /// Returns the chip to FSK/OOK framing, entering Sleep first if needed.
    ///
    /// The chip is left in Sleep with the long-range bit clear.
    pub fn exit_long_range_mode(&mut self) -> Result<(), Error> {
        self.switch_long_range(false)
    }

    /// Reads the chip's mode and checks it against the tracked mode.
    ///
    /// When the tracked mode is unknown the hardware value is adopted. Either way the
    /// tracked mode equals the hardware value afterwards.
    ///
    /// # Errors
    /// * `Error::PreconditionViolation` - the chip is not in the mode the driver last set
    pub fn verify_mode(&mut self) -> Result<OpMode, Error> {
        let actual = self.read_mode()?;

        match self.tracked.replace(actual) {
            Some(expected) if expected != actual => {
                log::warn!(
                    "op mode mismatch: expected {:#04x}, chip reports {:#04x}",
                    expected.raw(),
                    actual.raw()
                );
                Err(Error::PreconditionViolation(actual.mode()))
            }
            _ => Ok(actual),
        }
    }

    fn switch_long_range(&mut self, enabled: bool) -> Result<(), Error> {
        if self.read_mode()?.mode() != Mode::Sleep {
            self.set_mode(Mode::Sleep)?;
        }
        self.modify_op_mode(|reg| reg.with_long_range(enabled).with_mode(Mode::Sleep))?;
        log::debug!("long range mode {}", if enabled { "on" } else { "off" });
        Ok(())
    }

    fn modify_op_mode(&mut self, f: impl FnOnce(OpMode) -> OpMode) -> Result<OpMode, Error> {
        let result = self.read_mode().and_then(|current| {
            let next = f(current);
            self.write_register(next)?;
            log::debug!("op mode {:?} -> {:?}", current.mode(), next.mode());
            Ok(next)
        });

        self.tracked = match result {
            Ok(reg) if !reg.mode().is_transient() => Some(reg),
            _ => None,
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        registers::{Mode, OpMode, Register},
        testing::{device, FakeChip},
        Error,
    };

    #[test]
    fn set_mode_is_a_read_modify_write() {
        let mut chip = FakeChip::new();
        chip.regs[0x01] = 0b1000_1001;
        device(&mut chip).set_mode(Mode::RxContinuous).unwrap();

        assert_eq!(chip.op_mode().raw(), 0b1000_1101);
        assert_eq!(chip.log.len(), 2);
    }

    #[test]
    fn set_mode_twice_is_idempotent() {
        let mut chip = FakeChip::new();
        {
            let mut device = device(&mut chip);
            device.set_mode(Mode::FreqSynthRx).unwrap();
        }
        let first = chip.op_mode();
        device(&mut chip).set_mode(Mode::FreqSynthRx).unwrap();
        assert_eq!(chip.op_mode(), first);
    }

    #[test]
    fn long_range_survives_mode_changes() {
        let mut chip = FakeChip::new();
        let mut device = device(&mut chip);
        device.enter_long_range_mode().unwrap();

        for mode in [
            Mode::Standby,
            Mode::Tx,
            Mode::RxContinuous,
            Mode::FreqSynthTx,
            Mode::ChannelActivityDetect,
            Mode::Sleep,
            Mode::RxSingle,
        ] {
            device.set_mode(mode).unwrap();
            let reg = device.read_mode().unwrap();
            assert!(reg.long_range(), "lost long range in {mode:?}");
            assert_eq!(reg.mode(), mode);
        }
    }

    #[test]
    fn enter_long_range_goes_through_sleep() {
        let mut chip = FakeChip::new();
        device(&mut chip).enter_long_range_mode().unwrap();

        assert_eq!(chip.writes_to(Register::OpMode), [0x08, 0x88]);
        assert!(chip.op_mode().long_range());
        assert_eq!(chip.op_mode().mode(), Mode::Sleep);
    }

    #[test]
    fn enter_long_range_from_sleep_skips_the_extra_write() {
        let mut chip = FakeChip::new();
        chip.regs[0x01] = 0x00;
        device(&mut chip).enter_long_range_mode().unwrap();

        assert_eq!(chip.writes_to(Register::OpMode), [0x80]);
    }

    #[test]
    fn exit_long_range_clears_the_bit_in_sleep() {
        let mut chip = FakeChip::new();
        let mut device = device(&mut chip);
        device.enter_long_range_mode().unwrap();
        device.set_mode(Mode::Standby).unwrap();
        device.exit_long_range_mode().unwrap();

        let reg = device.read_mode().unwrap();
        assert!(!reg.long_range());
        assert_eq!(reg.mode(), Mode::Sleep);
    }

    #[test]
    fn tracked_mode_follows_successful_changes() {
        let mut chip = FakeChip::new();
        let mut device = device(&mut chip);
        assert_eq!(device.tracked_mode(), None);

        device.set_mode(Mode::Standby).unwrap();
        assert_eq!(device.tracked_mode().map(OpMode::mode), Some(Mode::Standby));

        device.set_mode(Mode::Tx).unwrap();
        assert_eq!(device.tracked_mode(), None);
    }

    #[test]
    fn failed_write_leaves_mode_unknown() {
        let mut chip = FakeChip::new();
        chip.fail_after = Some(3);
        let mut device = device(&mut chip);

        device.set_mode(Mode::Standby).unwrap();
        assert_eq!(device.set_mode(Mode::Sleep), Err(Error::TransportTimeout));
        assert_eq!(device.tracked_mode(), None);
    }

    #[test]
    fn verify_mode_reports_disagreement() {
        let mut chip = FakeChip::new();
        let mut device = device(&mut chip);
        device.set_mode(Mode::Standby).unwrap();
        assert_eq!(device.verify_mode().map(OpMode::mode), Ok(Mode::Standby));

        // Raw access bypasses the tracked mode.
        device.write_raw(0x01, 0x0D).unwrap();
        assert_eq!(
            device.verify_mode(),
            Err(Error::PreconditionViolation(Mode::RxContinuous))
        );
        assert_eq!(device.verify_mode().map(OpMode::mode), Ok(Mode::RxContinuous));
    }
}

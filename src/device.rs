//! RFM95W / SX1276 Device Interface
//!
//! This module provides the owned handle for one physical radio. All traffic goes through
//! the register access protocol implemented here:
//!
//! - a write clocks `address | 0x80` then the value
//! - a read clocks `address` then a dummy `0x00` and keeps the byte that comes back
//!
//! Both are one [`Transport`] transaction, so chip-select stays asserted across the address
//! and data phases. The handle is the only path to the bus; code that shares a radio
//! between threads must hold a lock around the handle, never around single exchanges.
//!
//! Operating-mode control, RF setup and packet transmission are implemented on
//! [`Device`] in the [`commands`](crate::commands) module.
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
//! use rfm95w::{Config, Device, Error, SpiTransport};
//!
//! fn bring_up<SPI, RST, D>(spi: SPI, reset: RST, delay: D) -> Result<Device<SpiTransport<SPI>, RST, D>, Error>
//! where
//!     SPI: SpiDevice,
//!     RST: OutputPin,
//!     D: DelayNs,
//! {
//!     let config = Config::default();
//!     let transport = SpiTransport::new(spi, &config);
//!     let mut device = Device::new(transport, reset, delay, config);
//!
//!     device.start(868.1, 0x12)?;
//!     Ok(device)
//! }
//! ```

use core::convert::Infallible;

use regiface::{ByteArray, ReadableRegister, WritableRegister};

use crate::{
    registers::{OpMode, Register, Version, MAX_ADDRESS},
    transport::{Access, Transport},
    Config, Error, InvalidArgument,
};

/// Set in the address byte to mark a register write
pub const WRITE_BIT: u8 = 0x80;

/// Number of registers covered by [`Device::dump_registers`]
pub const DUMP_LEN: usize = 0x20;

/// Main device interface for the radio.
///
/// Owns the bus transport, the reset line and a delay source, and remembers the last
/// operating mode it set (see [`Device::tracked_mode`]).
pub struct Device<T, RST, D> {
    pub(crate) transport: T,
    pub(crate) reset: RST,
    pub(crate) delay: D,
    pub(crate) config: Config,
    pub(crate) tracked: Option<OpMode>,
}

impl<T, RST, D> Device<T, RST, D> {
    /// Creates a new Device. No bus traffic is issued until the first call.
    ///
    /// The tracked mode starts out unknown; [`start`](Device::start) or any mode change
    /// establishes it.
    pub fn new(transport: T, reset: RST, delay: D, config: Config) -> Self {
        Self {
            transport,
            reset,
            delay,
            config,
            tracked: None,
        }
    }

    /// Releases the transport, reset pin and delay.
    pub fn release(self) -> (T, RST, D) {
        (self.transport, self.reset, self.delay)
    }

    /// Returns the timing configuration the device was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<T, RST, D> Device<T, RST, D>
where
    T: Transport,
{
    /// Writes `value` to the register at `address`.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `address` is above 0x7F; nothing is sent
    /// * `Error::Bus` / `Error::TransportTimeout` - the transaction failed
    pub fn write_raw(&mut self, address: u8, value: u8) -> Result<(), Error> {
        check_address(address)?;
        log::trace!("write {address:#04x} <- {value:#04x}");
        self.transport
            .exchange(Access::Write, address | WRITE_BIT, value)
            .map(|_| ())
    }

    /// Reads the register at `address`.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `address` is above 0x7F; nothing is sent
    /// * `Error::Bus` / `Error::TransportTimeout` - the transaction failed
    pub fn read_raw(&mut self, address: u8) -> Result<u8, Error> {
        check_address(address)?;
        let value = self.transport.exchange(Access::Read, address, 0x00)?;
        log::trace!("read {address:#04x} -> {value:#04x}");
        Ok(value)
    }

    /// Reads a typed register value from the device.
    ///
    /// Registers wider than one byte are read one address at a time, starting at the
    /// register's address with the most significant byte.
    ///
    /// # Errors
    /// * `Error::Bus` / `Error::TransportTimeout` - a transaction failed
    /// * `Error::Deserialization` - the value has no typed representation
    pub fn read_register<R>(&mut self) -> Result<R, Error>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();

        for (offset, byte) in (0u8..).zip(raw_value.as_mut().iter_mut()) {
            *byte = self.read_raw(R::id() + offset)?;
        }

        R::from_bytes(raw_value).map_err(|_| Error::Deserialization)
    }

    /// Writes a typed register value to the device, most significant byte first.
    ///
    /// # Errors
    /// * `Error::Bus` / `Error::TransportTimeout` - a transaction failed
    pub fn write_register<R>(&mut self, register: R) -> Result<(), Error>
    where
        R: WritableRegister<IdType = u8, Error = Infallible>,
    {
        let raw_value = match register.to_bytes() {
            Ok(bytes) => bytes,
            Err(never) => match never {},
        };

        for (offset, byte) in (0u8..).zip(raw_value.as_ref().iter()) {
            self.write_raw(R::id() + offset, *byte)?;
        }
        Ok(())
    }

    /// Reads the silicon revision. 0x12 on production SX1276 parts.
    pub fn version(&mut self) -> Result<u8, Error> {
        Ok(self.read_register::<Version>()?.value)
    }

    /// Reads registers `0x00..0x20` and logs each of them at debug level.
    ///
    /// Note that reading address 0x00 pops a byte from the FIFO.
    pub fn dump_registers(&mut self) -> Result<[u8; DUMP_LEN], Error> {
        let mut dump = [0u8; DUMP_LEN];
        for (address, value) in (0u8..).zip(dump.iter_mut()) {
            *value = self.read_raw(address)?;
            log::debug!("reg {address:#04x}: {value:#04x}");
        }
        Ok(dump)
    }

    pub(crate) fn write(&mut self, register: Register, value: u8) -> Result<(), Error> {
        self.write_raw(register.addr(), value)
    }

    pub(crate) fn read(&mut self, register: Register) -> Result<u8, Error> {
        self.read_raw(register.addr())
    }
}

fn check_address(address: u8) -> Result<(), InvalidArgument> {
    if address > MAX_ADDRESS {
        return Err(InvalidArgument::RegisterAddress(address));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    use super::*;
    use crate::{
        registers::{Frf, PreambleLength},
        testing::{device, FakeChip, NoPin},
        SpiTransport,
    };

    #[test]
    fn write_register_is_two_exchanges_in_one_transaction() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::delay(5_000),
            SpiTransaction::write(0x80 | 0x39),
            SpiTransaction::write(0x55),
            SpiTransaction::transaction_end(),
        ];
        let config = Config::default();
        let transport = SpiTransport::new(SpiMock::new(&expectations), &config);
        let mut device = Device::new(transport, NoPin, NoopDelay::new(), config);

        device.write_raw(0x39, 0x55).unwrap();

        let (transport, _, _) = device.release();
        transport.release().done();
    }

    #[test]
    fn read_register_sends_dummy_and_returns_reply() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write(0x42),
            SpiTransaction::transfer_in_place(vec![0x00], vec![0x12]),
            SpiTransaction::transaction_end(),
        ];
        let config = Config::default();
        let transport = SpiTransport::new(SpiMock::new(&expectations), &config);
        let mut device = Device::new(transport, NoPin, NoopDelay::new(), config);

        assert_eq!(device.version().unwrap(), 0x12);

        let (transport, _, _) = device.release();
        transport.release().done();
    }

    #[test]
    fn out_of_range_address_issues_no_traffic() {
        let mut chip = FakeChip::new();
        {
            let mut device = device(&mut chip);
            assert_eq!(
                device.write_raw(0x80, 0x01),
                Err(Error::InvalidArgument(InvalidArgument::RegisterAddress(0x80)))
            );
            assert!(device.read_raw(0xFF).is_err());
        }
        assert!(chip.log.is_empty());
    }

    #[test]
    fn multi_byte_registers_use_consecutive_addresses() {
        let mut chip = FakeChip::new();
        {
            let mut device = device(&mut chip);
            device.write_register(Frf { value: 0x00D8_A000 }).unwrap();
            device.write_register(PreambleLength { symbols: 0x0108 }).unwrap();
            assert_eq!(device.read_register::<Frf>().unwrap().value, 0x00D8_A000);
        }
        assert_eq!(chip.regs[0x06..=0x08], [0xD8, 0xA0, 0x00]);
        assert_eq!(chip.regs[0x20..=0x21], [0x01, 0x08]);
    }

    #[test]
    fn undecodable_value_is_a_deserialization_error() {
        let mut chip = FakeChip::new();
        chip.regs[0x1D] = 0xF2;
        let mut device = device(&mut chip);
        assert_eq!(
            device.read_register::<crate::registers::ModemConfig1>(),
            Err(Error::Deserialization)
        );
    }

    #[test]
    fn dump_reads_first_page() {
        let mut chip = FakeChip::new();
        chip.regs[0x1D] = 0x72;
        let dump = device(&mut chip).dump_registers().unwrap();
        assert_eq!(dump[0x1D], 0x72);
        assert_eq!(chip.log.len(), DUMP_LEN);
    }
}

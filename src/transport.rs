//! Bus transport
//!
//! The chip speaks a two-byte framing on its SPI port: an address byte followed by a data
//! byte, both clocked while chip-select is held low. This module provides that primitive
//! and nothing else; what the address byte means is up to the register layer in
//! [`device`](crate::device).
//!
//! Two implementations are provided:
//!
//! - [`SpiTransport`] for any `embedded_hal::spi::SpiDevice`. The HAL owns chip-select and
//!   completion handling, the write settle delay is issued as a delay operation inside the
//!   transaction.
//! - [`PolledTransport`] for a bare serial peripheral that only exposes a data buffer and a
//!   completion flag ([`SerialPort`]), with chip-select driven by hand. Every completion wait
//!   is bounded and reports [`Error::TransportTimeout`] instead of hanging on a missing chip.

use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    spi::{Operation, SpiDevice},
};

use crate::{Config, Error};

/// Direction of a register transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Address phase followed by a dummy byte; the reply to the dummy is the register value
    Read,
    /// Address phase followed by the value; needs the write settle delay after chip-select
    Write,
}

/// A single chip-select framed transaction on the radio's bus.
///
/// Implementations must exchange exactly two bytes, `address` then `data`, under one
/// chip-select assertion, and return the byte received during the data phase. For
/// [`Access::Write`] the returned byte carries no meaning.
pub trait Transport {
    /// Performs the transaction, blocking until both bytes have been exchanged.
    fn exchange(&mut self, access: Access, address: u8, data: u8) -> Result<u8, Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn exchange(&mut self, access: Access, address: u8, data: u8) -> Result<u8, Error> {
        T::exchange(self, access, address, data)
    }
}

/// Transport over an `embedded-hal` SPI device.
pub struct SpiTransport<SPI> {
    spi: SPI,
    write_settle_ns: u32,
}

impl<SPI> SpiTransport<SPI> {
    /// Wraps an SPI device whose chip-select is bound to the radio.
    pub fn new(spi: SPI, config: &Config) -> Self {
        Self {
            spi,
            write_settle_ns: config.write_settle_ns,
        }
    }

    /// Releases the underlying SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Transport for SpiTransport<SPI>
where
    SPI: SpiDevice,
{
    fn exchange(&mut self, access: Access, address: u8, data: u8) -> Result<u8, Error> {
        let header = [address];
        let mut value = [data];

        let result = match access {
            Access::Write => self.spi.transaction(&mut [
                Operation::DelayNs(self.write_settle_ns),
                Operation::Write(&header),
                Operation::Write(&value),
            ]),
            Access::Read => self.spi.transaction(&mut [
                Operation::Write(&header),
                Operation::TransferInPlace(&mut value),
            ]),
        };
        result.map_err(|_| Error::Bus)?;

        Ok(value[0])
    }
}

/// A serial peripheral driven one byte at a time.
///
/// This is the shape of a microcontroller synchronous serial port in master mode: loading
/// the buffer starts an exchange, a flag reports completion, and the received byte is
/// left in the same buffer.
pub trait SerialPort {
    /// Loads `byte` into the transmit buffer, starting an exchange.
    fn load(&mut self, byte: u8);

    /// Returns `true` once the current exchange has finished.
    fn is_complete(&mut self) -> bool;

    /// Clears the completion flag.
    fn clear_complete(&mut self);

    /// Takes the byte received during the last exchange.
    fn take(&mut self) -> u8;
}

/// Transport over a [`SerialPort`] with a hand-driven, active-low chip-select.
pub struct PolledTransport<P, CS, D> {
    port: P,
    cs: CS,
    delay: D,
    write_settle_ns: u32,
    max_polls: u32,
}

impl<P, CS, D> PolledTransport<P, CS, D> {
    /// Creates the transport. The chip-select line should already idle high.
    pub fn new(port: P, cs: CS, delay: D, config: &Config) -> Self {
        Self {
            port,
            cs,
            delay,
            write_settle_ns: config.write_settle_ns,
            max_polls: config.max_polls,
        }
    }

    /// Releases the peripheral, chip-select pin and delay.
    pub fn release(self) -> (P, CS, D) {
        (self.port, self.cs, self.delay)
    }
}

impl<P, CS, D> PolledTransport<P, CS, D>
where
    P: SerialPort,
    CS: OutputPin,
    D: DelayNs,
{
    fn framed(&mut self, access: Access, address: u8, data: u8) -> Result<u8, Error> {
        if access == Access::Write {
            self.delay.delay_ns(self.write_settle_ns);
        }
        self.exchange_byte(address)?;
        self.exchange_byte(data)
    }

    fn exchange_byte(&mut self, byte: u8) -> Result<u8, Error> {
        self.port.clear_complete();
        self.port.load(byte);

        let mut polls = 0;
        while !self.port.is_complete() {
            polls += 1;
            if polls >= self.max_polls {
                log::warn!("serial exchange of {byte:#04x} timed out after {polls} polls");
                return Err(Error::TransportTimeout);
            }
        }

        self.port.clear_complete();
        Ok(self.port.take())
    }
}

impl<P, CS, D> Transport for PolledTransport<P, CS, D>
where
    P: SerialPort,
    CS: OutputPin,
    D: DelayNs,
{
    fn exchange(&mut self, access: Access, address: u8, data: u8) -> Result<u8, Error> {
        self.cs.set_low().map_err(|_| Error::Pin)?;
        let result = self.framed(access, address, data);
        // Chip-select is released even when the exchange failed.
        let released = self.cs.set_high().map_err(|_| Error::Pin);

        let received = result?;
        released?;
        Ok(received)
    }
}

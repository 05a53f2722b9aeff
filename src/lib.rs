#![no_std]
//! RFM95W / SX1276 LoRa Radio Driver
//!
//! This crate provides a type-safe interface for the HopeRF RFM95W module and the Semtech
//! SX1276/77/78/79 transceivers it is built on, driven in LoRa mode over SPI.
//!
//! # Features
//! - Frequency range: 137-1020 MHz, 61 Hz resolution
//! - LoRa modulation: SF6-12, BW 7.8-500 kHz
//! - Output power up to +20 dBm on PA_BOOST
//! - 256 byte FIFO shared between TX and RX
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`transport`]: Bus transport
//!   - One chip-select framed two-byte exchange per register access
//!   - `SpiDevice` based transport and a bounded, polled transport for bare serial ports
//!
//! - [`device`]: Main device interface
//!   - Register access protocol, raw and typed
//!   - Owns the bus, reset line and delay for one chip
//!
//! - [`registers`]: Register map and typed register values
//!
//! - [`frequency`]: Conversion between MHz and the 24-bit frequency word
//!
//! - [`commands`]: Operations on the device
//!   - [`commands::operational`]: Operating mode state machine
//!   - [`commands::rf`]: Frequency and bandwidth
//!   - [`commands::packet`]: Transmission and IRQ flags
//!   - [`commands::setup`]: Reset, configuration load and startup
//!
//! # Usage
//! Typed registers are declared with the `regiface` crate and read or written through
//! [`Device::read_register`] and [`Device::write_register`]. The usual sequence is:
//!
//! 1. Bring up the SPI peripheral and wrap it in a transport
//! 2. Create a [`Device`] with the transport, reset pin and a delay
//! 3. Call [`Device::start`] with the carrier frequency and sync word
//! 4. Call [`Device::transmit`] and poll [`Device::irq_flags`] for `TX_DONE`
//!
//! # Important Notes
//! - The long-range bit can only change in Sleep
//! - Mode changes never touch the long-range bit
//! - Nothing is retried; faults are returned to the caller
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
//! use rfm95w::{Config, Device, Error, IrqFlags, SpiTransport};
//!
//! fn send<SPI, RST, D>(spi: SPI, reset: RST, delay: D) -> Result<(), Error>
//! where
//!     SPI: SpiDevice,
//!     RST: OutputPin,
//!     D: DelayNs,
//! {
//!     let config = Config::default();
//!     let mut radio = Device::new(SpiTransport::new(spi, &config), reset, delay, config);
//!
//!     radio.start(868.1, 0x12)?;
//!     radio.transmit(b"hello")?;
//!
//!     while !radio.irq_flags()?.contains(IrqFlags::TX_DONE) {}
//!     radio.clear_irq_flags()
//! }
//! ```

pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod frequency;
pub mod registers;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use device::Device;
pub use error::{Error, InvalidArgument};
pub use registers::*;
pub use transport::{Access, PolledTransport, SerialPort, SpiTransport, Transport};

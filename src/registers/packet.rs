//! FIFO and packet status registers
//!
//! The chip has a single 256-byte FIFO shared by transmit and receive. The SPI side reaches
//! it through `RegFifo` (0x00) at the position held in `RegFifoAddrPtr`; every access
//! advances the pointer by one.

use bitflags::bitflags;
use core::convert::Infallible;

use regiface::{
    register, FromByteArray, ReadableRegister, Register, ToByteArray, WritableRegister,
};

/// FIFO SPI pointer register (address: 0x0D)
#[register(0x0Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister, WritableRegister)]
pub struct FifoAddrPtr {
    pub address: u8,
}

/// Transmit base address register (address: 0x0E)
///
/// Where the modem starts reading the payload when Tx is entered. Defaults to 0x80.
#[register(0x0Eu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct FifoTxBaseAddr {
    pub address: u8,
}

impl Default for FifoTxBaseAddr {
    fn default() -> Self {
        Self { address: 0x80 }
    }
}

/// Payload length register (address: 0x22)
///
/// Number of FIFO bytes sent on entering Tx. Must not be zero in implicit header mode.
#[register(0x22u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister, WritableRegister)]
pub struct PayloadLength {
    pub length: u8,
}

bitflags! {
    /// LoRa IRQ flags (address: 0x12)
    ///
    /// Flags stay set until cleared by writing a one to them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqFlags: u8 {
        /// No packet arrived before the symbol timeout
        const RX_TIMEOUT = 1 << 7;
        /// Packet reception complete
        const RX_DONE = 1 << 6;
        /// Payload CRC check failed
        const PAYLOAD_CRC_ERROR = 1 << 5;
        /// Valid header received
        const VALID_HEADER = 1 << 4;
        /// Transmission complete, the chip is back in Standby
        const TX_DONE = 1 << 3;
        /// Channel activity detection finished
        const CAD_DONE = 1 << 2;
        /// Frequency hopping channel change requested
        const FHSS_CHANGE_CHANNEL = 1 << 1;
        /// Activity seen during channel activity detection
        const CAD_DETECTED = 1;
    }
}

impl FromByteArray for IrqFlags {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self::from_bits_retain(bytes[0]))
    }
}

impl ToByteArray for IrqFlags {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits()])
    }
}

// `bitflags!` owns the struct definition, so the register impls are written out by hand.
impl Register for IrqFlags {
    type IdType = u8;

    fn id() -> Self::IdType {
        0x12
    }
}

impl ReadableRegister for IrqFlags {}

impl WritableRegister for IrqFlags {}

impl FromByteArray for FifoAddrPtr {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { address: bytes[0] })
    }
}

impl ToByteArray for FifoAddrPtr {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.address])
    }
}

impl FromByteArray for FifoTxBaseAddr {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { address: bytes[0] })
    }
}

impl ToByteArray for FifoTxBaseAddr {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.address])
    }
}

impl FromByteArray for PayloadLength {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { length: bytes[0] })
    }
}

impl ToByteArray for PayloadLength {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.length])
    }
}

//! Driver error types
//!
//! Every fallible operation in the crate reports an [`Error`]. No layer retries on its own:
//! a chip that stops answering is not expected to recover without outside intervention, so
//! the fault is handed straight back to the caller.

use core::fmt;

use crate::registers::Mode;

/// Reasons an argument was refused before any bus traffic was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// Packet longer than the 255 bytes the payload length register can describe
    PacketTooLong(usize),
    /// Frequency is negative, not a number, or does not fit the 24-bit register triple
    FrequencyOutOfRange,
    /// Register address outside `0x00..=0x7F`
    RegisterAddress(u8),
}

/// The main error type for the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The bus never signalled completion of a byte exchange within the configured bound
    TransportTimeout,
    /// The underlying SPI implementation reported a failure
    Bus,
    /// Driving the chip-select or reset line failed
    Pin,
    /// A caller-supplied value was rejected
    InvalidArgument(InvalidArgument),
    /// The chip is not in a mode that permits the operation. Holds the mode read back
    /// from hardware.
    PreconditionViolation(Mode),
    /// A register value read back from the chip has no meaning in its typed form
    Deserialization,
}

impl From<InvalidArgument> for Error {
    fn from(err: InvalidArgument) -> Self {
        Error::InvalidArgument(err)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PacketTooLong(len) => write!(f, "packet of {len} bytes exceeds 255"),
            Self::FrequencyOutOfRange => f.write_str("frequency cannot be encoded in 24 bits"),
            Self::RegisterAddress(addr) => write!(f, "register address {addr:#04x} out of range"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportTimeout => f.write_str("bus transfer did not complete"),
            Self::Bus => f.write_str("bus error"),
            Self::Pin => f.write_str("pin error"),
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::PreconditionViolation(mode) => write!(f, "operation not permitted in {mode:?} mode"),
            Self::Deserialization => f.write_str("unrecognised register value"),
        }
    }
}

impl core::error::Error for Error {}

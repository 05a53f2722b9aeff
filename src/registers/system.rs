//! Operating mode and identification registers
//!
//! `RegOpMode` (0x01) packs three things into one byte:
//! - bit 7: LongRangeMode, selecting LoRa framing over FSK/OOK
//! - bit 6: AccessSharedReg, bit 3: LowFrequencyModeOn
//! - bits 2:0: the transceiver mode
//!
//! The long-range bit can only be changed while the chip is in Sleep. Every mode change
//! therefore goes through [`OpMode::with_mode`], which touches nothing but the low three bits.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Transceiver operating mode, bits 2:0 of `RegOpMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Lowest power; the only mode in which the long-range bit may change
    Sleep,
    /// Oscillator running; required for FIFO access and most configuration
    Standby,
    /// Frequency synthesis for transmit
    FreqSynthTx,
    /// Transmit one packet, then return to Standby on its own
    Tx,
    /// Frequency synthesis for receive
    FreqSynthRx,
    /// Receive until told otherwise
    RxContinuous,
    /// Receive one packet, then return to Standby on its own
    RxSingle,
    /// Channel activity detection, then return to Standby on its own
    ChannelActivityDetect,
}

impl Mode {
    /// Mask of the mode field within `RegOpMode`
    pub const MASK: u8 = 0b0000_0111;

    /// Decodes the mode field. Every 3-bit value is a mode, so this cannot fail.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & Self::MASK {
            0b000 => Self::Sleep,
            0b001 => Self::Standby,
            0b010 => Self::FreqSynthTx,
            0b011 => Self::Tx,
            0b100 => Self::FreqSynthRx,
            0b101 => Self::RxContinuous,
            0b110 => Self::RxSingle,
            _ => Self::ChannelActivityDetect,
        }
    }

    /// Encodes the mode as the 3-bit field value
    pub const fn bits(self) -> u8 {
        match self {
            Self::Sleep => 0b000,
            Self::Standby => 0b001,
            Self::FreqSynthTx => 0b010,
            Self::Tx => 0b011,
            Self::FreqSynthRx => 0b100,
            Self::RxContinuous => 0b101,
            Self::RxSingle => 0b110,
            Self::ChannelActivityDetect => 0b111,
        }
    }

    /// Whether the chip leaves this mode by itself once the operation completes
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Tx | Self::RxSingle | Self::ChannelActivityDetect)
    }
}

/// Operating mode register (address: 0x01)
///
/// Holds the raw register byte so that bits this driver does not model survive every
/// read-modify-write.
///
/// # Important Notes
/// - Reset value is 0x09 on the SX1276: FSK, low-frequency mode on, Standby
/// - LongRangeMode may only be written in Sleep
/// - After Tx, RxSingle and CAD the chip returns to Standby without being told
#[register(0x01u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct OpMode {
    bits: u8,
}

impl OpMode {
    /// LoRa (long range) framing when set, FSK/OOK when clear
    pub const LONG_RANGE: u8 = 0b1000_0000;

    /// Wraps a raw register byte
    pub const fn from_raw(bits: u8) -> Self {
        Self { bits }
    }

    /// The register byte as read or to be written
    pub const fn raw(self) -> u8 {
        self.bits
    }

    /// The operating mode field
    pub const fn mode(self) -> Mode {
        Mode::from_bits(self.bits)
    }

    /// Whether LongRangeMode is set
    pub const fn long_range(self) -> bool {
        self.bits & Self::LONG_RANGE != 0
    }

    /// Replaces the mode field, keeping every other bit
    pub const fn with_mode(self, mode: Mode) -> Self {
        Self {
            bits: (self.bits & !Mode::MASK) | mode.bits(),
        }
    }

    /// Sets or clears LongRangeMode, keeping every other bit
    pub const fn with_long_range(self, enabled: bool) -> Self {
        let bits = if enabled {
            self.bits | Self::LONG_RANGE
        } else {
            self.bits & !Self::LONG_RANGE
        };
        Self { bits }
    }
}

/// Silicon revision register (address: 0x42)
///
/// Reads 0x12 on production SX1276 silicon. A value of 0x00 or 0xFF usually means nothing
/// is answering on the bus.
#[register(0x42u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct Version {
    /// Full revision number in bits 7:4, metal mask revision in bits 3:0
    pub value: u8,
}

impl FromByteArray for OpMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { bits: bytes[0] })
    }
}

impl ToByteArray for OpMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits])
    }
}

impl FromByteArray for Version {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

//! LoRa modem configuration registers
//!
//! Bandwidth, coding rate, spreading factor and header mode live in three packed registers
//! (`RegModemConfig1..3`). The remaining registers here set the preamble, the largest
//! payload the receiver will accept and the sync word that separates networks.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Error type for modem configuration fields that hold an undocumented code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidModemConfig(pub u8);

/// Signal bandwidth, bits 7:4 of `RegModemConfig1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    Khz7_8,
    Khz10_4,
    Khz15_6,
    Khz20_8,
    Khz31_25,
    Khz41_7,
    Khz62_5,
    Khz125,
    Khz250,
    Khz500,
}

impl Bandwidth {
    pub fn from_bits(bits: u8) -> Result<Self, InvalidModemConfig> {
        match bits {
            0b0000 => Ok(Self::Khz7_8),
            0b0001 => Ok(Self::Khz10_4),
            0b0010 => Ok(Self::Khz15_6),
            0b0011 => Ok(Self::Khz20_8),
            0b0100 => Ok(Self::Khz31_25),
            0b0101 => Ok(Self::Khz41_7),
            0b0110 => Ok(Self::Khz62_5),
            0b0111 => Ok(Self::Khz125),
            0b1000 => Ok(Self::Khz250),
            0b1001 => Ok(Self::Khz500),
            invalid => Err(InvalidModemConfig(invalid)),
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Bandwidth in hertz
    pub fn hz(self) -> u32 {
        match self {
            Self::Khz7_8 => 7_800,
            Self::Khz10_4 => 10_400,
            Self::Khz15_6 => 15_600,
            Self::Khz20_8 => 20_800,
            Self::Khz31_25 => 31_250,
            Self::Khz41_7 => 41_700,
            Self::Khz62_5 => 62_500,
            Self::Khz125 => 125_000,
            Self::Khz250 => 250_000,
            Self::Khz500 => 500_000,
        }
    }
}

/// Forward error correction rate, bits 3:1 of `RegModemConfig1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodingRate {
    Cr4_5 = 1,
    Cr4_6 = 2,
    Cr4_7 = 3,
    Cr4_8 = 4,
}

impl CodingRate {
    pub fn from_bits(bits: u8) -> Result<Self, InvalidModemConfig> {
        match bits {
            1 => Ok(Self::Cr4_5),
            2 => Ok(Self::Cr4_6),
            3 => Ok(Self::Cr4_7),
            4 => Ok(Self::Cr4_8),
            invalid => Err(InvalidModemConfig(invalid)),
        }
    }
}

/// Modem configuration 1 (address: 0x1D)
#[register(0x1Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig1 {
    pub bandwidth: Bandwidth,
    pub coding_rate: CodingRate,
    /// Implicit header mode; explicit headers carry length, coding rate and CRC presence
    pub implicit_header: bool,
}

/// Modem configuration 2 (address: 0x1E)
#[register(0x1Eu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig2 {
    /// Spreading factor, 6 to 12
    pub spreading_factor: u8,
    /// Keep sending the FIFO content instead of a single packet
    pub tx_continuous: bool,
    /// Generate and check a payload CRC
    pub rx_payload_crc: bool,
    /// Bits 9:8 of the RX symbol timeout
    pub symb_timeout_msb: u8,
}

/// Modem configuration 3 (address: 0x26)
#[register(0x26u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig3 {
    /// Mandated when a symbol lasts longer than 16 ms
    pub low_data_rate_optimize: bool,
    /// LNA gain set by the internal AGC loop instead of [`Lna`](super::Lna)
    pub agc_auto: bool,
}

/// Preamble length registers (addresses: 0x20..=0x21)
///
/// Number of preamble symbols, not counting the 4.25 symbols the modem adds.
#[register(0x20u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PreambleLength {
    pub symbols: u16,
}

/// Maximum payload length register (address: 0x23)
///
/// Received packets longer than this raise a header CRC error.
#[register(0x23u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct MaxPayloadLength {
    pub length: u8,
}

/// LoRa sync word register (address: 0x39)
///
/// 0x34 is reserved for LoRaWAN networks, 0x12 is the chip default for private networks.
#[register(0x39u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct SyncWord {
    pub value: u8,
}

impl FromByteArray for ModemConfig1 {
    type Error = InvalidModemConfig;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            bandwidth: Bandwidth::from_bits(bytes[0] >> 4)?,
            coding_rate: CodingRate::from_bits((bytes[0] >> 1) & 0x07)?,
            implicit_header: bytes[0] & 0x01 != 0,
        })
    }
}

impl ToByteArray for ModemConfig1 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.bandwidth.bits() << 4)
            | ((self.coding_rate as u8) << 1)
            | self.implicit_header as u8])
    }
}

impl FromByteArray for ModemConfig2 {
    type Error = InvalidModemConfig;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        let spreading_factor = bytes[0] >> 4;
        if !(6..=12).contains(&spreading_factor) {
            return Err(InvalidModemConfig(spreading_factor));
        }
        Ok(Self {
            spreading_factor,
            tx_continuous: bytes[0] & 0x08 != 0,
            rx_payload_crc: bytes[0] & 0x04 != 0,
            symb_timeout_msb: bytes[0] & 0x03,
        })
    }
}

impl ToByteArray for ModemConfig2 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([((self.spreading_factor & 0x0F) << 4)
            | ((self.tx_continuous as u8) << 3)
            | ((self.rx_payload_crc as u8) << 2)
            | (self.symb_timeout_msb & 0x03)])
    }
}

impl FromByteArray for ModemConfig3 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            low_data_rate_optimize: bytes[0] & 0x08 != 0,
            agc_auto: bytes[0] & 0x04 != 0,
        })
    }
}

impl ToByteArray for ModemConfig3 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([((self.low_data_rate_optimize as u8) << 3) | ((self.agc_auto as u8) << 2)])
    }
}

impl FromByteArray for PreambleLength {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            symbols: u16::from_be_bytes(bytes),
        })
    }
}

impl ToByteArray for PreambleLength {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.symbols.to_be_bytes())
    }
}

impl FromByteArray for MaxPayloadLength {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { length: bytes[0] })
    }
}

impl ToByteArray for MaxPayloadLength {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.length])
    }
}

impl FromByteArray for SyncWord {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

impl ToByteArray for SyncWord {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modem_config_1_decodes_125khz_4_5() {
        let config = ModemConfig1::from_bytes([0x72]).unwrap();
        assert_eq!(config.bandwidth, Bandwidth::Khz125);
        assert_eq!(config.coding_rate, CodingRate::Cr4_5);
        assert!(!config.implicit_header);
        assert_eq!(config.to_bytes().unwrap(), [0x72]);
    }

    #[test]
    fn undocumented_bandwidth_is_rejected() {
        assert_eq!(
            ModemConfig1::from_bytes([0xF2]),
            Err(InvalidModemConfig(0x0F))
        );
        assert_eq!(Bandwidth::from_bits(0b1010), Err(InvalidModemConfig(0b1010)));
    }

    #[test]
    fn modem_config_2_decodes_sf7() {
        let config = ModemConfig2::from_bytes([0x70]).unwrap();
        assert_eq!(config.spreading_factor, 7);
        assert!(!config.rx_payload_crc);
        assert_eq!(config.to_bytes().unwrap(), [0x70]);
        assert!(ModemConfig2::from_bytes([0x20]).is_err());
    }

    #[test]
    fn modem_config_3_agc_on() {
        let config = ModemConfig3::from_bytes([0x04]).unwrap();
        assert!(config.agc_auto);
        assert!(!config.low_data_rate_optimize);
    }

    #[test]
    fn preamble_is_big_endian() {
        assert_eq!(PreambleLength { symbols: 8 }.to_bytes().unwrap(), [0x00, 0x08]);
    }
}

//! RF-related registers
//!
//! This module contains registers related to the RF front end:
//! - Carrier frequency
//! - Power amplifier selection, output level and ramp
//! - Over-current protection
//! - Low-noise amplifier gain

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Carrier frequency registers (addresses: 0x06..=0x08)
///
/// 24-bit frequency word, MSB first. `Frf = Fxosc * value / 2^19`, which for the 32 MHz
/// crystal is `value / 16384` MHz. See [`frequency`](crate::frequency) for the conversion.
///
/// # Important Notes
/// - Only written in Sleep or Standby
/// - The new value takes effect when the LSB is written
#[register(0x06u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct Frf {
    /// 24-bit frequency word
    pub value: u32,
}

/// Power amplifier configuration register (address: 0x09)
#[register(0x09u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PaConfig {
    /// Route output to PA_BOOST (up to +20 dBm) instead of RFO
    pub pa_boost: bool,
    /// Max power selection, `Pmax = 10.8 + 0.6 * max_power` dBm (3 bits)
    pub max_power: u8,
    /// Output power step (4 bits). On PA_BOOST, `Pout = 17 - (15 - output_power)` dBm
    pub output_power: u8,
}

/// PA ramp time register (address: 0x0A)
#[register(0x0Au8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PaRamp {
    /// Rise/fall time code (4 bits), 0x09 = 40 µs default
    pub ramp: u8,
}

/// Over-current protection register (address: 0x0B)
///
/// # Current Limit Calculation
/// - trim <= 15: `45 + 5 * trim` mA
/// - trim <= 27: `-30 + 10 * trim` mA
/// - otherwise 240 mA
#[register(0x0Bu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct Ocp {
    /// Enable over-current protection
    pub enabled: bool,
    /// Current limit trim (5 bits)
    pub trim: u8,
}

impl Ocp {
    /// Current limit in milliamps for the configured trim
    pub fn limit_ma(&self) -> u16 {
        let trim = u16::from(self.trim);
        match trim {
            0..=15 => 45 + 5 * trim,
            16..=27 => 10 * trim - 30,
            _ => 240,
        }
    }
}

/// LNA settings register (address: 0x0C)
#[register(0x0Cu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct Lna {
    /// Gain step (3 bits), 0b001 = G1 maximum gain
    pub gain: u8,
    /// High-frequency LNA current boost (2 bits), 0b11 = 150% current
    pub boost_hf: u8,
}

impl FromByteArray for Frf {
    type Error = Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            value: u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]),
        })
    }
}

impl ToByteArray for Frf {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let [_, msb, mid, lsb] = self.value.to_be_bytes();
        Ok([msb, mid, lsb])
    }
}

impl FromByteArray for PaConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            pa_boost: bytes[0] & 0x80 != 0,
            max_power: (bytes[0] >> 4) & 0x07,
            output_power: bytes[0] & 0x0F,
        })
    }
}

impl ToByteArray for PaConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([((self.pa_boost as u8) << 7)
            | ((self.max_power & 0x07) << 4)
            | (self.output_power & 0x0F)])
    }
}

impl FromByteArray for PaRamp {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            ramp: bytes[0] & 0x0F,
        })
    }
}

impl ToByteArray for PaRamp {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.ramp & 0x0F])
    }
}

impl FromByteArray for Ocp {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            enabled: bytes[0] & 0x20 != 0,
            trim: bytes[0] & 0x1F,
        })
    }
}

impl ToByteArray for Ocp {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([((self.enabled as u8) << 5) | (self.trim & 0x1F)])
    }
}

impl FromByteArray for Lna {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            gain: (bytes[0] >> 5) & 0x07,
            boost_hf: bytes[0] & 0x03,
        })
    }
}

impl ToByteArray for Lna {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([((self.gain & 0x07) << 5) | (self.boost_hf & 0x03)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frf_splits_msb_first() {
        let frf = Frf { value: 0x00D9_0000 };
        assert_eq!(frf.to_bytes().unwrap(), [0xD9, 0x00, 0x00]);
        assert_eq!(Frf::from_bytes([0xD8, 0xA0, 0x00]).unwrap().value, 0x00D8_A000);
    }

    #[test]
    fn known_good_front_end_values_decode() {
        let pa = PaConfig::from_bytes([0x8F]).unwrap();
        assert!(pa.pa_boost);
        assert_eq!(pa.output_power, 15);
        assert_eq!(pa.to_bytes().unwrap(), [0x8F]);

        let ocp = Ocp::from_bytes([0x2B]).unwrap();
        assert!(ocp.enabled);
        assert_eq!(ocp.limit_ma(), 100);

        let lna = Lna::from_bytes([0x23]).unwrap();
        assert_eq!(lna.gain, 1);
        assert_eq!(lna.boost_hf, 0b11);
        assert_eq!(lna.to_bytes().unwrap(), [0x23]);
    }
}

//! Carrier frequency conversion
//!
//! The chip programs its synthesizer with a 24-bit word: `Frf = Fxosc * word / 2^19`. With
//! the 32 MHz crystal fitted to RFM95W modules that is `word = MHz * 2^14`, so one step is
//! 61.035 Hz and the word tops out just below 1024 MHz.
//!
//! Conversion is lossy. `decode(encode(f))` is within [`STEP_MHZ`] of `f`, not equal to it.

use crate::error::InvalidArgument;

/// Frequency word steps per megahertz
pub const STEPS_PER_MHZ: f64 = 16_384.0;

/// Synthesizer resolution in megahertz
pub const STEP_MHZ: f64 = 1.0 / STEPS_PER_MHZ;

/// Largest value of the 24-bit frequency word
pub const WORD_MAX: u32 = 0x00FF_FFFF;

/// Converts megahertz to the 24-bit frequency word, rounding to the nearest step.
pub fn to_word(freq_mhz: f64) -> Result<u32, InvalidArgument> {
    if freq_mhz.is_nan() || freq_mhz < 0.0 {
        return Err(InvalidArgument::FrequencyOutOfRange);
    }

    let scaled = freq_mhz * STEPS_PER_MHZ + 0.5;
    if scaled >= f64::from(WORD_MAX) + 1.0 {
        return Err(InvalidArgument::FrequencyOutOfRange);
    }

    Ok(scaled as u32)
}

/// Converts a 24-bit frequency word back to megahertz.
pub fn from_word(word: u32) -> f64 {
    f64::from(word & WORD_MAX) / STEPS_PER_MHZ
}

/// Encodes `freq_mhz` as the `(msb, mid, lsb)` register triple.
pub fn encode(freq_mhz: f64) -> Result<[u8; 3], InvalidArgument> {
    let [_, msb, mid, lsb] = to_word(freq_mhz)?.to_be_bytes();
    Ok([msb, mid, lsb])
}

/// Decodes the `(msb, mid, lsb)` register triple to megahertz.
pub fn decode(bytes: [u8; 3]) -> f64 {
    from_word(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
}

//! Register definitions for the RFM95W / SX1276 in LoRa mode
//! Addresses follow the SX1276/77/78/79 datasheet, rev. 7. FSK/OOK page registers are not listed.

mod modem;
mod packet;
mod rf;
mod system;

pub use modem::*;
pub use packet::*;
pub use rf::*;
pub use system::*;

/// Highest address reachable on the bus; the top bit of the address byte selects a write.
pub const MAX_ADDRESS: u8 = 0x7F;

/// Named register addresses of the LoRa register page.
///
/// These are wire constants. Registers `0x27..=0x3F` are documented as reserved in LoRa
/// mode except where listed; the configuration load still touches some of them by address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    Fifo = 0x00,
    OpMode = 0x01,
    FrfMsb = 0x06,
    FrfMid = 0x07,
    FrfLsb = 0x08,
    PaConfig = 0x09,
    PaRamp = 0x0A,
    Ocp = 0x0B,
    Lna = 0x0C,
    FifoAddrPtr = 0x0D,
    FifoTxBaseAddr = 0x0E,
    FifoRxBaseAddr = 0x0F,
    FifoRxCurrentAddr = 0x10,
    IrqFlagsMask = 0x11,
    IrqFlags = 0x12,
    RxNbBytes = 0x13,
    RxHeaderCntValueMsb = 0x14,
    RxHeaderCntValueLsb = 0x15,
    RxPacketCntValueMsb = 0x16,
    RxPacketCntValueLsb = 0x17,
    ModemStat = 0x18,
    PktSnrValue = 0x19,
    PktRssiValue = 0x1A,
    RssiValue = 0x1B,
    HopChannel = 0x1C,
    ModemConfig1 = 0x1D,
    ModemConfig2 = 0x1E,
    SymbTimeoutLsb = 0x1F,
    PreambleMsb = 0x20,
    PreambleLsb = 0x21,
    PayloadLength = 0x22,
    MaxPayloadLength = 0x23,
    HopPeriod = 0x24,
    FifoRxByteAddr = 0x25,
    ModemConfig3 = 0x26,
    SyncWord = 0x39,
    Temp = 0x3C,
    LowBat = 0x3D,
    DioMapping1 = 0x40,
    DioMapping2 = 0x41,
    Version = 0x42,
    Tcxo = 0x4B,
    PaDac = 0x4D,
    FormerTemp = 0x5B,
    AgcRef = 0x61,
    AgcThresh1 = 0x62,
    AgcThresh2 = 0x63,
    AgcThresh3 = 0x64,
    Pll = 0x70,
}

impl Register {
    /// Raw bus address of the register
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

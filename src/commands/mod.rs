//! Radio operations
//!
//! This module implements the driver's operations on [`Device`](crate::Device), built on
//! the register access protocol. They are organized into functional categories:
//!
//! # Categories
//! - [`operational`]: Operating mode control
//!   - Read-modify-write mode changes that preserve the long-range bit
//!   - Entering and leaving long-range (LoRa) mode via Sleep
//!   - Tracked mode and verification against hardware
//!
//! - [`rf`]: RF configuration
//!   - Carrier frequency
//!   - Signal bandwidth
//!
//! - [`packet`]: Transmission and status
//!   - Loading the FIFO and starting Tx
//!   - Reading and clearing IRQ flags
//!
//! - [`setup`]: Startup
//!   - Hardware reset
//!   - Bulk configuration load
//!   - The full power-up sequence
//!
//! # Important Notes
//! - Frequency may only be changed in Sleep or Standby
//! - FIFO access requires Standby; [`transmit`](crate::Device::transmit) enters it itself
//! - Tx, RxSingle and CAD end on their own; completion shows up in the IRQ flags
//! - No operation retries after a bus fault

pub mod operational;
pub mod packet;
pub mod rf;
pub mod setup;

pub use setup::{configuration_table, CONFIGURATION_LEN, DEFAULT_SYNC_WORD};

//! Packet transmission and IRQ status
//!
//! [`Device::transmit`] loads the FIFO and hands the packet to the modem. It does not wait:
//! the chip sends the packet and drops back to Standby by itself, raising
//! [`IrqFlags::TX_DONE`] when finished. Poll [`Device::irq_flags`] to find out.

use crate::{
    registers::{FifoAddrPtr, IrqFlags, Mode, PayloadLength, Register},
    transport::Transport,
    Device, Error, InvalidArgument,
};

impl<T, RST, D> Device<T, RST, D>
where
    T: Transport,
{
    /// Sends `packet`, returning as soon as the chip has entered Tx.
    ///
    /// Sequence: Standby, FIFO pointer to 0, payload length to 0, one FIFO write per byte,
    /// payload length to `packet.len()`, Tx. An empty packet is allowed.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - more than 255 bytes; nothing is sent
    pub fn transmit(&mut self, packet: &[u8]) -> Result<(), Error> {
        let length = u8::try_from(packet.len())
            .map_err(|_| InvalidArgument::PacketTooLong(packet.len()))?;

        self.set_mode(Mode::Standby)?;
        self.write_register(FifoAddrPtr { address: 0 })?;
        self.write_register(PayloadLength { length: 0 })?;

        for &byte in packet {
            self.write(Register::Fifo, byte)?;
        }

        self.write_register(PayloadLength { length })?;
        log::debug!("transmitting {length} bytes");
        self.set_mode(Mode::Tx)
    }

    /// Reads the IRQ flags register. Flags are reported as the chip sets them.
    pub fn irq_flags(&mut self) -> Result<IrqFlags, Error> {
        self.read_register::<IrqFlags>()
    }

    /// Clears every IRQ flag.
    pub fn clear_irq_flags(&mut self) -> Result<(), Error> {
        self.write_register(IrqFlags::all())
    }
}

//! Simulated radio for unit tests
//!
//! [`FakeChip`] answers the two-byte register protocol from an in-memory register file. It
//! models the behaviour the driver depends on: the FIFO pointer auto-increment, the
//! long-range bit only changing in Sleep, and IRQ flags clearing on a written one.

extern crate std;

use std::vec::Vec;

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

use crate::{
    device::WRITE_BIT,
    registers::{Mode, OpMode, Register},
    transport::{Access, Transport},
    Config, Device, Error,
};

pub struct FakeChip {
    pub regs: [u8; 0x80],
    pub fifo: [u8; 256],
    /// Every transaction as `(access, address byte, data byte)`
    pub log: Vec<(Access, u8, u8)>,
    /// Number of transactions to accept before every further one times out
    pub fail_after: Option<usize>,
}

impl FakeChip {
    /// Power-on state: FSK Standby with low-frequency mode on, revision 0x12
    pub fn new() -> Self {
        let mut regs = [0u8; 0x80];
        regs[Register::OpMode.addr() as usize] = 0x09;
        regs[Register::Version.addr() as usize] = 0x12;
        regs[Register::FifoTxBaseAddr.addr() as usize] = 0x80;
        Self {
            regs,
            fifo: [0u8; 256],
            log: Vec::new(),
            fail_after: None,
        }
    }

    pub fn op_mode(&self) -> OpMode {
        OpMode::from_raw(self.regs[Register::OpMode.addr() as usize])
    }

    /// Data bytes of every write to `register`, in order
    pub fn writes_to(&self, register: Register) -> Vec<u8> {
        self.log
            .iter()
            .filter(|(access, address, _)| {
                *access == Access::Write && *address == register.addr() | WRITE_BIT
            })
            .map(|(_, _, data)| *data)
            .collect()
    }

    fn write(&mut self, address: usize, value: u8) {
        match address {
            0x00 => {
                let ptr = &mut self.regs[Register::FifoAddrPtr.addr() as usize];
                self.fifo[*ptr as usize] = value;
                *ptr = ptr.wrapping_add(1);
            }
            0x01 => {
                let current = self.op_mode();
                let requested = OpMode::from_raw(value);
                let long_range = if current.mode() == Mode::Sleep {
                    requested.long_range()
                } else {
                    current.long_range()
                };
                self.regs[address] = requested.with_long_range(long_range).raw();
            }
            0x12 => self.regs[address] &= !value,
            0x42 => {}
            _ => self.regs[address] = value,
        }
    }

    fn read(&mut self, address: usize) -> u8 {
        if address == 0x00 {
            let ptr = &mut self.regs[Register::FifoAddrPtr.addr() as usize];
            let value = self.fifo[*ptr as usize];
            *ptr = ptr.wrapping_add(1);
            return value;
        }
        self.regs[address]
    }
}

impl Transport for FakeChip {
    fn exchange(&mut self, access: Access, address: u8, data: u8) -> Result<u8, Error> {
        if self.fail_after.is_some_and(|limit| self.log.len() >= limit) {
            return Err(Error::TransportTimeout);
        }
        self.log.push((access, address, data));

        let register = (address & !WRITE_BIT) as usize;
        match access {
            Access::Write => {
                self.write(register, data);
                Ok(0)
            }
            Access::Read => Ok(self.read(register)),
        }
    }
}

/// Output pin that accepts every level
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn device(chip: &mut FakeChip) -> Device<&mut FakeChip, NoPin, NoopDelay> {
    Device::new(chip, NoPin, NoopDelay::new(), Config::default())
}

//! Recording command channel that behaves like an HT16D35B's display RAM.

extern crate std;

use std::vec::Vec;

use crate::command::Cmd;
use crate::interface::CommandChannel;
use crate::RAM_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub opcode: u8,
    pub payload: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MockChannel {
    pub sent: Vec<Sent>,
    pub reads: usize,
    pub ram: [u8; RAM_SIZE],
    read_pointer: usize,
    /// Fail once this many more commands have been sent
    pub fail_after: Option<usize>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the chip powered up with junk in its RAM.
    pub fn with_ram(ram: [u8; RAM_SIZE]) -> Self {
        Self {
            ram,
            ..Self::default()
        }
    }

    pub fn clear_log(&mut self) {
        self.sent.clear();
        self.reads = 0;
    }

    /// `(address, value)` of every RAM write, in order.
    pub fn ram_writes(&self) -> Vec<(u8, u8)> {
        self.sent
            .iter()
            .filter(|s| s.opcode == Cmd::WRITE_DISPLAY_RAM)
            .map(|s| (s.payload[0], s.payload[1]))
            .collect()
    }

    pub fn opcodes(&self) -> Vec<u8> {
        self.sent.iter().map(|s| s.opcode).collect()
    }

    fn check_fault(&mut self) -> Result<(), BusFault> {
        match self.fail_after {
            Some(0) => Err(BusFault),
            Some(n) => {
                self.fail_after = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl CommandChannel for MockChannel {
    type Error = BusFault;

    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error> {
        self.check_fault()?;
        match opcode {
            Cmd::WRITE_DISPLAY_RAM => self.ram[payload[0] as usize] = payload[1],
            Cmd::READ_DISPLAY_RAM => self.read_pointer = payload[0] as usize,
            _ => {}
        }
        self.sent.push(Sent {
            opcode,
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        self.send_command(Cmd::READ_DISPLAY_RAM, &[address])?;
        self.reads += 1;
        Ok(self.ram[self.read_pointer])
    }
}

//! Transports between the driver and the HT16D35B.
//!
//! The driver only needs two blocking operations, captured by [`CommandChannel`]: send an opcode
//! with its payload as one transaction, and read back one display RAM byte. [`I2cInterface`] and
//! [`SpiInterface`] implement them on top of the `embedded-hal` bus traits; anything else that
//! can frame those two operations (a bit-banged bus, a test double) can implement the trait too.
//!
//! Retries and timeouts are the transport's business. Both provided implementations report
//! the first bus error unchanged.

use embedded_hal::i2c::{self, I2c};
use embedded_hal::spi::{self, SpiDevice};
use log::trace;

use crate::command::Cmd;
use crate::error::ConfigError;

/// Byte-oriented, blocking command transport.
pub trait CommandChannel {
    /// Transport error
    type Error: core::fmt::Debug;

    /// Send `opcode` followed by `payload` as a single framed transaction.
    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error>;

    /// Address display RAM at `address` and read one byte back.
    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error>;
}

impl<T: CommandChannel + ?Sized> CommandChannel for &mut T {
    type Error = T::Error;

    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).send_command(opcode, payload)
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        (**self).read_register(address)
    }
}

/// HT16D35B over I²C.
///
/// Every command is one write transfer to the device address. A RAM read is a write of
/// `[0x81, address]` followed by a one byte read transfer.
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Wrap an I²C bus. `address` must be a non-reserved 7-bit address.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, ConfigError> {
        if !(0x08..=0x77).contains(&address) {
            return Err(ConfigError::InvalidAddress(address));
        }
        Ok(Self { i2c, address })
    }

    /// The configured device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> CommandChannel for I2cInterface<I2C> {
    type Error = I2C::Error;

    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error> {
        trace!("i2c {:#04x}: cmd {:#04x} {:02x?}", self.address, opcode, payload);
        if payload.is_empty() {
            return self.i2c.write(self.address, &[opcode]);
        }
        // adjacent writes are merged into one transfer
        self.i2c.transaction(
            self.address,
            &mut [i2c::Operation::Write(&[opcode]), i2c::Operation::Write(payload)],
        )
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        self.send_command(Cmd::READ_DISPLAY_RAM, &[address])?;
        let mut value = [0u8];
        self.i2c.read(self.address, &mut value)?;
        trace!("i2c {:#04x}: ram[{}] = {:#04x}", self.address, address, value[0]);
        Ok(value[0])
    }
}

/// HT16D35B over SPI.
///
/// Chip select is handled by the [`SpiDevice`]; each command is one transaction. A RAM read
/// sends `[0x81, address]`, then clocks a dummy byte and reads the reply in a second
/// transaction.
#[derive(Debug)]
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiInterface<SPI> {
    /// Wrap an SPI device.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give the device back.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> CommandChannel for SpiInterface<SPI> {
    type Error = SPI::Error;

    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error> {
        trace!("spi: cmd {:#04x} {:02x?}", opcode, payload);
        if payload.is_empty() {
            return self.spi.write(&[opcode]);
        }
        self.spi.transaction(&mut [
            spi::Operation::Write(&[opcode]),
            spi::Operation::Write(payload),
        ])
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        self.send_command(Cmd::READ_DISPLAY_RAM, &[address])?;
        let mut value = [0u8];
        self.spi.transaction(&mut [
            spi::Operation::Write(&[0x00]),
            spi::Operation::Read(&mut value),
        ])?;
        trace!("spi: ram[{}] = {:#04x}", address, value[0]);
        Ok(value[0])
    }
}

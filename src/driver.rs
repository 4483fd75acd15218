//! The HT16D35B display controller.
//!
//! [`Ht16d35`] owns the logical [`PixelBuffer`] and a [`RamImage`] mirroring the controller's
//! display RAM. Buffer edits never touch the bus; [`Ht16d35::update`] is the only call that
//! moves pixels to the hardware.
//!
//! # Update strategies
//! - [`UpdateStrategy::Diff`] (default): rebuild the full RAM image from the buffer, compare it
//!   with the mirror and write only the bytes that changed. An unchanged buffer costs no bus
//!   traffic at all.
//! - [`UpdateStrategy::ReadModifyWrite`]: zero all 28 RAM bytes, then for every lit element
//!   read its RAM byte back, OR in the COM bit and write it again. This issues one read and one
//!   write per lit element and exists for bring-up and for comparing against the chip's own RAM.
//!   The resulting RAM and mirror are identical to the diff strategy.
//!
//! # Lifecycle
//! `Uninitialized → Resetting → Configured → Active`. [`Ht16d35::init`] walks the whole sequence;
//! until it has configured the controller, calls that talk to the display RAM or brightness
//! register return [`Error::NotInitialized`].

use embedded_graphics::prelude::Point;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;
use log::{debug, trace};

use crate::command::{Cmd, InitStep, INIT_SEQUENCE};
use crate::error::{ConfigError, Error};
use crate::font;
use crate::interface::{CommandChannel, I2cInterface, SpiInterface};
use crate::pin_map;
use crate::pixel::{Pixel, PixelBuffer};
use crate::ram::RamImage;
use crate::{clamp_brightness, MAX_BRIGHTNESS, RAM_SIZE};

/// Controller lifecycle state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Nothing has been sent yet
    #[default]
    Uninitialized,
    /// Software reset issued, configuration in progress
    Resetting,
    /// Configuration sent and display RAM zeroed; the final clear is pending
    Configured,
    /// Fully initialized; buffer and RAM are in sync after each update
    Active,
}

/// How [`Ht16d35::update`] moves the buffer into display RAM
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateStrategy {
    /// Write only the RAM bytes that differ from the mirror
    #[default]
    Diff,
    /// Clear all RAM, then read-modify-write every lit element
    ReadModifyWrite,
}

/// Construction-time settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Global duty sent during init, `0..=63`
    pub brightness: u8,
    /// Default update strategy
    pub strategy: UpdateStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Full brightness, diff updates.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            brightness: MAX_BRIGHTNESS,
            strategy: UpdateStrategy::Diff,
        }
    }

    /// Set the initial brightness, clamped to `0..=63`.
    #[must_use]
    pub const fn with_brightness(mut self, level: i32) -> Self {
        self.brightness = clamp_brightness(level);
        self
    }

    /// Set the default update strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: UpdateStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Driver for one KEM-5088 matrix on an HT16D35B.
pub struct Ht16d35<CH> {
    channel: CH,
    buffer: PixelBuffer,
    mirror: RamImage,
    config: Config,
    state: State,
}

impl<I2C: I2c> Ht16d35<I2cInterface<I2C>> {
    /// Create a driver on an I²C bus. Nothing is sent until [`init`](Self::init).
    pub fn new_i2c(i2c: I2C, address: u8, config: Config) -> Result<Self, ConfigError> {
        debug!("creating new Ht16d35 instance (I2C {:#04x})", address);
        Ok(Self::new(I2cInterface::new(i2c, address)?, config))
    }
}

impl<SPI: SpiDevice> Ht16d35<SpiInterface<SPI>> {
    /// Create a driver on an SPI device. Nothing is sent until [`init`](Self::init).
    pub fn new_spi(spi: SPI, config: Config) -> Self {
        debug!("creating new Ht16d35 instance (SPI)");
        Self::new(SpiInterface::new(spi), config)
    }
}

impl<CH> Ht16d35<CH>
where
    CH: CommandChannel,
{
    /// Create a driver on any command channel. Nothing is sent until [`init`](Self::init).
    pub fn new(channel: CH, config: Config) -> Self {
        Self {
            channel,
            buffer: PixelBuffer::new(),
            mirror: RamImage::new(),
            config: config.with_brightness(i32::from(config.brightness)),
            state: State::Uninitialized,
        }
    }

    /// Reset and configure the controller, then blank the display.
    ///
    /// On failure the controller is left half configured; call `init` again to restart from
    /// the software reset.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<CH::Error>> {
        debug!("initializing ht16d35");
        for step in INIT_SEQUENCE {
            trace!("init step: {:?}", step);
            match *step {
                InitStep::SoftwareReset => {
                    self.state = State::Resetting;
                    self.send(Cmd::SOFTWARE_RESET, &[])?;
                }
                InitStep::DelayMs(ms) => {
                    delay.delay_ms(u32::from(ms));
                }
                InitStep::Cmd(command) => {
                    self.send(command.opcode, command.payload)?;
                }
                InitStep::Brightness => {
                    self.send(Cmd::GLOBAL_BRIGHTNESS, &[self.config.brightness])?;
                }
                InitStep::ClearDisplay => {
                    // RAM content after reset is unknown, so write every byte once; the mirror
                    // only matches the chip once all of them have landed
                    for address in 0..RAM_SIZE as u8 {
                        self.write_display_ram(address, 0)?;
                    }
                    self.state = State::Configured;
                    self.clear(Pixel::OFF)?;
                }
            }
        }
        self.state = State::Active;
        debug!("init sequence complete");
        Ok(())
    }

    /// Flush the pixel buffer to display RAM with the configured strategy.
    pub fn update(&mut self) -> Result<(), Error<CH::Error>> {
        self.update_with(self.config.strategy)
    }

    /// Flush the pixel buffer to display RAM with an explicit strategy.
    ///
    /// On a transport error the mirror keeps every write that completed; the buffer is
    /// untouched, so a later update retries whatever is still different.
    pub fn update_with(&mut self, strategy: UpdateStrategy) -> Result<(), Error<CH::Error>> {
        self.ensure_configured()?;
        match strategy {
            UpdateStrategy::Diff => self.update_diff(),
            UpdateStrategy::ReadModifyWrite => self.update_read_modify_write(),
        }
    }

    fn update_diff(&mut self) -> Result<(), Error<CH::Error>> {
        let target = RamImage::from_buffer(&self.buffer);
        let current = self.mirror;
        let mut writes = 0usize;
        for (address, value) in current.diff(&target) {
            self.write_display_ram(address, value)?;
            writes += 1;
        }
        debug!("update: {} RAM writes", writes);
        Ok(())
    }

    fn update_read_modify_write(&mut self) -> Result<(), Error<CH::Error>> {
        for address in 0..RAM_SIZE as u8 {
            self.write_display_ram(address, 0)?;
        }
        let buffer = self.buffer;
        for (x, y, pixel) in buffer.iter() {
            for select in &pin_map::map(x, y, pixel) {
                let current = self.read_display_ram(select.row_address)?;
                self.write_display_ram(select.row_address, current | select.mask())?;
            }
        }
        debug!("update: read-modify-write complete");
        Ok(())
    }

    /// Set every pixel to `color` and flush.
    pub fn clear(&mut self, color: impl Into<Pixel>) -> Result<(), Error<CH::Error>> {
        self.ensure_configured()?;
        self.buffer.fill(color.into());
        self.update()
    }

    /// Set one pixel in the buffer. Out-of-range coordinates are ignored; call
    /// [`update`](Self::update) to show the change.
    pub fn set_pixel(&mut self, p: Point, color: impl Into<Pixel>) {
        self.buffer.set_pixel(p, color.into());
    }

    /// Set the global duty. Values outside `0..=63` are clamped; the level actually sent is
    /// returned.
    pub fn set_brightness(&mut self, level: i32) -> Result<u8, Error<CH::Error>> {
        self.ensure_configured()?;
        let level = clamp_brightness(level);
        debug!("set brightness {}", level);
        self.send(Cmd::GLOBAL_BRIGHTNESS, &[level])?;
        self.config.brightness = level;
        Ok(level)
    }

    /// Render a glyph into the buffer without flushing. See [`font::render_char`].
    pub fn render_char(&mut self, ch: char, offset: Point, color: impl Into<Pixel>) {
        font::render_char(&mut self.buffer, ch, offset, color.into());
    }

    /// Render a glyph into the buffer and flush.
    pub fn show_char(
        &mut self,
        ch: char,
        offset: Point,
        color: impl Into<Pixel>,
    ) -> Result<(), Error<CH::Error>> {
        self.render_char(ch, offset, color);
        self.update()
    }

    /// Read one byte of display RAM back from the controller.
    pub fn read_display_ram(&mut self, address: u8) -> Result<u8, Error<CH::Error>> {
        Self::check_address(address)?;
        self.channel.read_register(address).map_err(Error::Interface)
    }

    /// Write one byte of display RAM and record it in the mirror.
    ///
    /// The next diff update will overwrite it again if it disagrees with the buffer.
    pub fn write_display_ram(&mut self, address: u8, value: u8) -> Result<(), Error<CH::Error>> {
        Self::check_address(address)?;
        trace!("ram[{}] <- {:#04x}", address, value);
        self.send(Cmd::WRITE_DISPLAY_RAM, &[address, value])?;
        self.mirror.set(address, value);
        Ok(())
    }

    fn send(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Error<CH::Error>> {
        self.channel
            .send_command(opcode, payload)
            .map_err(Error::Interface)
    }

    fn check_address(address: u8) -> Result<(), Error<CH::Error>> {
        if address as usize >= RAM_SIZE {
            return Err(Error::AddressOutOfRange(address));
        }
        Ok(())
    }

    fn ensure_configured(&self) -> Result<(), Error<CH::Error>> {
        match self.state {
            State::Configured | State::Active => Ok(()),
            State::Uninitialized | State::Resetting => Err(Error::NotInitialized),
        }
    }
}

impl<CH> Ht16d35<CH> {
    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Current settings; brightness tracks the last level sent.
    pub fn config(&self) -> Config {
        self.config
    }

    /// The logical image.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// The logical image, for drawing with `embedded-graphics`.
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// What the driver believes the controller's display RAM holds.
    pub fn mirror(&self) -> &RamImage {
        &self.mirror
    }

    /// Give the command channel back.
    pub fn release(self) -> CH {
        self.channel
    }
}

impl<CH> core::fmt::Debug for Ht16d35<CH> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ht16d35")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("mirror", &self.mirror.as_bytes())
            .finish_non_exhaustive()
    }
}

//! Driver for the KEM-5088 8×8 RGB LED matrix on a Holtek HT16D35B controller.
//!
//! ## How the HT16D35B drives an LED matrix
//!
//! The HT16D35B is a constant-current LED controller with 8 **COM** (common) outputs and 28
//! usable **ROW** driver outputs. Every LED element sits at the crossing of one COM line and one
//! ROW line, and the controller keeps one byte of display RAM per ROW line:
//!
//! - **Display RAM** – 28 bytes, one per ROW address; bit *n* of a byte lights the element wired
//!   between that ROW and COM *n*.
//! - **Binary mode** – each RAM bit is plain on/off. The chip also offers a grayscale mode, which
//!   this driver does not use.
//! - **Global duty** – a single 0–63 duty value dims the whole panel at once.
//! - **Command framing** – every transaction is an opcode byte optionally followed by payload
//!   bytes, over either I²C or SPI.
//!
//! ### The KEM-5088 pin layout
//! The KEM-5088 package routes its 8 rows to COM0–COM7 in order, but every logical *column*
//! drives three separate ROW lines, one per colour channel, and those ROW lines are scattered
//! over the address space:
//!
//! | Column | Red | Green | Blue |
//! |-------:|----:|------:|-----:|
//! | 0      | 0   | 8     | 23   |
//! | 1      | 1   | 9     | 22   |
//! | …      | …   | …     | …    |
//! | 7      | 7   | 15    | 16   |
//!
//! A RAM byte therefore holds one colour channel of one column for all eight rows, and lighting a
//! single pixel can touch up to three RAM bytes. The full table lives in [`pin_map`] and is the
//! only place that knows about the wiring.
//!
//! ## Driver structure
//!
//! - [`pixel::PixelBuffer`] – the logical 8×8 image; mutated freely, never touches hardware.
//! - [`ram::RamImage`] – a 28-byte image of the controller's display RAM. The driver keeps one as
//!   a mirror of what was last written.
//! - [`driver::Ht16d35`] – owns both; [`driver::Ht16d35::update`] rebuilds the hardware image from
//!   the buffer and writes only the RAM bytes that differ from the mirror.
//! - [`interface::CommandChannel`] – the transport seam, with [`interface::I2cInterface`] and
//!   [`interface::SpiInterface`] built on `embedded-hal`.
//! - [`font`] – a 5×7 ASCII font that renders into the pixel buffer.
//!
//! ## Example
//! ```rust,ignore
//! use embedded_graphics::prelude::*;
//! use ht16d35_matrix::prelude::*;
//!
//! let mut display = Ht16d35::new_i2c(i2c, DEFAULT_I2C_ADDRESS, Config::default())?;
//! display.init(&mut delay)?;
//!
//! display.set_pixel(Point::new(0, 0), Pixel::RED);
//! display.update()?;
//!
//! display.show_char('A', Point::new(1, 0), Pixel::GREEN)?;
//! ```
//!
//! ## Available Feature Flags
//!
//! ### `defmt` Feature
//! Implements `defmt::Format` for the public data types so they can be emitted with the `defmt`
//! logging framework. No functional changes; purely adds trait impls. Regular diagnostics go
//! through the [`log`] facade.
#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]

pub mod command;
pub mod driver;
pub mod error;
pub mod font;
pub mod interface;
pub mod pin_map;
pub mod pixel;
pub mod ram;

#[cfg(test)]
mod testing;

/// Number of logical columns on the matrix
pub const WIDTH: usize = 8;

/// Number of logical rows on the matrix
pub const HEIGHT: usize = 8;

/// Size of the controller's display RAM in bytes (ROW addresses 0–27)
pub const RAM_SIZE: usize = 28;

/// Highest global duty value accepted by the controller
pub const MAX_BRIGHTNESS: u8 = 63;

/// A normalized channel level strictly above this value turns the channel on
pub const ON_THRESHOLD: f32 = 0.5;

/// An 8-bit channel value strictly above this value turns the channel on.
///
/// This is [`ON_THRESHOLD`] expressed on the 0–255 scale.
pub const ON_THRESHOLD_U8: u8 = 127;

/// Default 7-bit I²C address of the HT16D35B
pub const DEFAULT_I2C_ADDRESS: u8 = 0x68;

/// Clamp an arbitrary brightness request into the controller's `0..=63` duty range.
#[must_use]
pub const fn clamp_brightness(level: i32) -> u8 {
    if level < 0 {
        0
    } else if level > MAX_BRIGHTNESS as i32 {
        MAX_BRIGHTNESS
    } else {
        level as u8
    }
}

/// Useful exports
pub mod prelude {
    pub use crate::driver::{Config, Ht16d35, State, UpdateStrategy};
    pub use crate::error::{ConfigError, Error};
    pub use crate::interface::{CommandChannel, I2cInterface, SpiInterface};
    pub use crate::pixel::{Pixel, PixelBuffer};
    pub use crate::{DEFAULT_I2C_ADDRESS, HEIGHT, MAX_BRIGHTNESS, WIDTH};
}

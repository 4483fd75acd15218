//! Logical pixel model for the 8×8 matrix.
//!
//! A [`Pixel`] only knows whether each of its red, green and blue elements is lit. Colour input
//! with more resolution (normalized levels or [`Rgb888`]) is converted once, at the buffer
//! boundary, by thresholding every channel against [`ON_THRESHOLD`](crate::ON_THRESHOLD).
//!
//! [`PixelBuffer`] holds the whole image and implements the `embedded-graphics` [`DrawTarget`]
//! trait, so primitives and text can be drawn into it directly.
//!
//! # Example
//! ```rust
//! use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
//! use ht16d35_matrix::pixel::{Pixel, PixelBuffer};
//!
//! let mut buffer = PixelBuffer::new();
//! Rectangle::new(Point::new(2, 2), Size::new(4, 4))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::BLUE))
//!     .draw(&mut buffer)
//!     .unwrap();
//! assert_eq!(buffer.get(Point::new(3, 3)), Some(Pixel::BLUE));
//! ```

use core::convert::Infallible;

use bitfield::bitfield;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Point, Size};

use crate::{HEIGHT, ON_THRESHOLD, ON_THRESHOLD_U8, WIDTH};

bitfield! {
    /// On/off state of the three colour elements of one LED.
    ///
    /// The bit layout is as follows:
    /// - Bit 2: Blue element
    /// - Bit 1: Green element
    /// - Bit 0: Red element
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[repr(transparent)]
    pub struct Pixel(u8);
    impl Debug;
    pub red, set_red: 0;
    pub green, set_green: 1;
    pub blue, set_blue: 2;
}

impl Pixel {
    /// All elements off
    pub const OFF: Self = Self::from_channels(false, false, false);
    /// Red element only
    pub const RED: Self = Self::from_channels(true, false, false);
    /// Green element only
    pub const GREEN: Self = Self::from_channels(false, true, false);
    /// Blue element only
    pub const BLUE: Self = Self::from_channels(false, false, true);
    /// Red and green
    pub const YELLOW: Self = Self::from_channels(true, true, false);
    /// Green and blue
    pub const CYAN: Self = Self::from_channels(false, true, true);
    /// Red and blue
    pub const MAGENTA: Self = Self::from_channels(true, false, true);
    /// All elements on
    pub const WHITE: Self = Self::from_channels(true, true, true);

    /// Build a pixel from explicit channel states.
    #[must_use]
    pub const fn from_channels(red: bool, green: bool, blue: bool) -> Self {
        let mut bits = 0;
        if red {
            bits |= 0b001;
        }
        if green {
            bits |= 0b010;
        }
        if blue {
            bits |= 0b100;
        }
        Self(bits)
    }

    /// Convert normalized channel levels (nominally `0.0..=1.0`) into a pixel.
    ///
    /// A channel is on when its level is strictly greater than
    /// [`ON_THRESHOLD`](crate::ON_THRESHOLD). `NaN` counts as off.
    #[must_use]
    pub fn from_levels(red: f32, green: f32, blue: f32) -> Self {
        Self::from_channels(
            red > ON_THRESHOLD,
            green > ON_THRESHOLD,
            blue > ON_THRESHOLD,
        )
    }

    /// Returns true if no element is lit.
    #[must_use]
    pub const fn is_off(self) -> bool {
        self.0 & 0b111 == 0
    }
}

impl From<Rgb888> for Pixel {
    fn from(color: Rgb888) -> Self {
        Self::from_channels(
            color.r() > ON_THRESHOLD_U8,
            color.g() > ON_THRESHOLD_U8,
            color.b() > ON_THRESHOLD_U8,
        )
    }
}

impl From<(f32, f32, f32)> for Pixel {
    fn from((red, green, blue): (f32, f32, f32)) -> Self {
        Self::from_levels(red, green, blue)
    }
}

/// The logical 8×8 image, stored row-major as `pixels[y][x]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelBuffer {
    pixels: [[Pixel; WIDTH]; HEIGHT],
}

impl PixelBuffer {
    /// Create a buffer with every pixel off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels: [[Pixel::OFF; WIDTH]; HEIGHT],
        }
    }

    /// Set a pixel. Coordinates outside the matrix are ignored.
    pub fn set_pixel(&mut self, p: Point, pixel: Pixel) {
        if let Some((x, y)) = Self::index(p) {
            self.pixels[y][x] = pixel;
        }
    }

    /// Read a pixel, or `None` if the point is outside the matrix.
    #[must_use]
    pub fn get(&self, p: Point) -> Option<Pixel> {
        Self::index(p).map(|(x, y)| self.pixels[y][x])
    }

    /// Set every pixel to the same value.
    pub fn fill(&mut self, pixel: Pixel) {
        for row in &mut self.pixels {
            row.fill(pixel);
        }
    }

    /// Iterate over all pixels as `(x, y, pixel)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Pixel)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &pixel)| (x, y, pixel)))
    }

    fn index(p: Point) -> Option<(usize, usize)> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some((x, y))
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for PixelBuffer {
    type Color = Rgb888;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for embedded_graphics::Pixel(point, color) in pixels {
            self.set_pixel(point, color.into());
        }
        Ok(())
    }
}

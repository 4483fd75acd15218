//! Images of the controller's 28-byte display RAM.
//!
//! The driver uses a [`RamImage`] twice: once as the mirror of what the controller currently
//! holds, and once as the scratch target rebuilt from the pixel buffer on every update. The
//! difference between the two is exactly the set of RAM writes an update has to issue.

use crate::pin_map;
use crate::pixel::PixelBuffer;
use crate::RAM_SIZE;

/// One byte per ROW address; bit *n* of each byte is COM line *n*.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RamImage {
    bytes: [u8; RAM_SIZE],
}

impl RamImage {
    /// An image with every element off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; RAM_SIZE],
        }
    }

    /// Build the hardware image a pixel buffer needs.
    ///
    /// Every lit element is OR-combined into its ROW address, so pixels sharing a ROW line
    /// accumulate in one byte.
    #[must_use]
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let mut image = Self::new();
        for (x, y, pixel) in buffer.iter() {
            for select in &pin_map::map(x, y, pixel) {
                image.bytes[select.row_address as usize] |= select.mask();
            }
        }
        image
    }

    /// Value at a RAM address, or `None` past the end of RAM.
    #[must_use]
    pub fn get(&self, address: u8) -> Option<u8> {
        self.bytes.get(address as usize).copied()
    }

    /// Store a value. Addresses past the end of RAM are ignored.
    pub fn set(&mut self, address: u8, value: u8) {
        if let Some(byte) = self.bytes.get_mut(address as usize) {
            *byte = value;
        }
    }

    /// The raw RAM bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RAM_SIZE] {
        &self.bytes
    }

    /// Addresses where `target` differs from `self`, paired with the target value, in
    /// ascending address order.
    pub fn diff<'a>(&'a self, target: &'a RamImage) -> impl Iterator<Item = (u8, u8)> + 'a {
        self.bytes
            .iter()
            .zip(target.bytes.iter())
            .enumerate()
            .filter(|(_, (current, wanted))| current != wanted)
            .map(|(address, (_, &wanted))| (address as u8, wanted))
    }
}

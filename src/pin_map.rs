//! KEM-5088 wiring: which controller lines light which LED element.
//!
//! This module is the single source of truth for the package's physical wiring. Each logical
//! column owns three ROW addresses (red, green, blue) and each logical row is one COM line.
//! Nothing else in the crate may derive ROW addresses or COM bits on its own.

use crate::pixel::Pixel;
use crate::{HEIGHT, WIDTH};

/// ROW addresses for each column as `[red, green, blue]`.
///
/// All 24 addresses are distinct and below [`RAM_SIZE`](crate::RAM_SIZE).
pub const COLUMN_TO_ROW_ADDRESSES: [[u8; 3]; WIDTH] = [
    [0, 8, 23],
    [1, 9, 22],
    [2, 10, 21],
    [3, 11, 20],
    [4, 12, 19],
    [5, 13, 18],
    [6, 14, 17],
    [7, 15, 16],
];

/// COM line for each logical row.
///
/// The KEM-5088 wires its rows to COM0–COM7 in order, but the mapping is a property of the
/// package, so it stays a table.
pub const ROW_TO_COM_BIT: [u8; HEIGHT] = [0, 1, 2, 3, 4, 5, 6, 7];

/// One element to light: a RAM byte (ROW address) and the bit in it (COM line).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSelect {
    /// Display RAM address of the ROW line
    pub row_address: u8,
    /// COM line, used as the bit index inside the RAM byte
    pub com_bit: u8,
}

impl PinSelect {
    /// Bit mask of the COM line within a RAM byte.
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self.com_bit
    }
}

/// The elements a single pixel lights, in red, green, blue order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinUpdates {
    selects: [PinSelect; 3],
    len: usize,
}

impl PinUpdates {
    const fn empty() -> Self {
        Self {
            selects: [PinSelect {
                row_address: 0,
                com_bit: 0,
            }; 3],
            len: 0,
        }
    }

    fn push(&mut self, select: PinSelect) {
        self.selects[self.len] = select;
        self.len += 1;
    }

    /// The selected elements.
    #[must_use]
    pub fn as_slice(&self) -> &[PinSelect] {
        &self.selects[..self.len]
    }

    /// Number of elements to light.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the pixel lights nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over the selected elements.
    pub fn iter(&self) -> core::slice::Iter<'_, PinSelect> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a PinUpdates {
    type Item = &'a PinSelect;
    type IntoIter = core::slice::Iter<'a, PinSelect>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Map a pixel to the controller elements it lights.
///
/// `x` and `y` must be below [`WIDTH`] and [`HEIGHT`]; callers are expected to have
/// bounds-checked already. An all-off pixel yields no elements.
#[must_use]
pub fn map(x: usize, y: usize, pixel: Pixel) -> PinUpdates {
    let [red, green, blue] = COLUMN_TO_ROW_ADDRESSES[x];
    let com_bit = ROW_TO_COM_BIT[y];

    let mut updates = PinUpdates::empty();
    for (on, row_address) in [
        (pixel.red(), red),
        (pixel.green(), green),
        (pixel.blue(), blue),
    ] {
        if on {
            updates.push(PinSelect {
                row_address,
                com_bit,
            });
        }
    }
    updates
}

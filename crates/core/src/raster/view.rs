//! Read-only grayscale accessor consumed by texture algorithms

use super::{GrayElement, GrayRaster};
use image::{ImageBuffer, Luma};
use std::ops::Deref;

/// Largest intensity allowed by the accessor contract (8-bit gray).
pub const MAX_GRAY: u32 = 255;

/// Opaque 2D grayscale accessor.
///
/// Coordinates are 0-indexed `(row, col)` with `row < height()` and
/// `col < width()`. Implementations must return intensities in
/// `0..=MAX_GRAY`; algorithms check this and treat a violation as a
/// programming error.
pub trait GrayView {
    /// Number of columns
    fn width(&self) -> usize;

    /// Number of rows
    fn height(&self) -> usize;

    /// Intensity at (row, col)
    fn gray_at(&self, row: usize, col: usize) -> u32;

    /// Dimensions as (rows, cols)
    fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }
}

impl<V: GrayView + ?Sized> GrayView for &V {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn gray_at(&self, row: usize, col: usize) -> u32 {
        (**self).gray_at(row, col)
    }
}

impl<T: GrayElement> GrayView for GrayRaster<T> {
    fn width(&self) -> usize {
        self.cols()
    }

    fn height(&self) -> usize {
        self.rows()
    }

    fn gray_at(&self, row: usize, col: usize) -> u32 {
        self.data()[(row, col)].level()
    }
}

// `image` addresses pixels as (x, y) = (col, row).
impl<C> GrayView for ImageBuffer<Luma<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> usize {
        ImageBuffer::width(self) as usize
    }

    fn height(&self) -> usize {
        ImageBuffer::height(self) as usize
    }

    fn gray_at(&self, row: usize, col: usize) -> u32 {
        self.get_pixel(col as u32, row as u32)[0] as u32
    }
}

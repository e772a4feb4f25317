//! Main grayscale raster type

use crate::error::{Error, Result};
use crate::raster::GrayElement;
use image::{GrayImage, Luma};
use ndarray::{Array2, ArrayView2};

/// A 2D grayscale grid.
///
/// `GrayRaster<T>` stores intensities of type `T` row-major, indexed
/// `(row, col)`.
///
/// # Example
///
/// ```
/// use texel_core::GrayRaster;
///
/// let mut raster: GrayRaster<u8> = GrayRaster::new(4, 4);
/// raster.set(1, 2, 200).unwrap();
/// assert_eq!(raster.get(1, 2).unwrap(), 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GrayRaster<T: GrayElement> {
    data: Array2<T>,
}

impl<T: GrayElement> GrayRaster<T> {
    /// Create a new raster filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create a new raster filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a raster from row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let data = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { data })
    }

    /// Create a raster from nested rows, all of the same length
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != cols) {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows.len(),
            });
        }
        let data: Vec<T> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::from_vec(data, rows.len(), cols)
    }

    /// Create a raster from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        match self.data.get_mut((row, col)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            }),
        }
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume the raster and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Intensity range and mean over all cells, `None` when empty
    pub fn statistics(&self) -> Option<GrayStatistics<T>> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        let (mut min, mut max, mut sum) = (first, first, first.level() as f64);
        for value in iter {
            min = min.min(value);
            max = max.max(value);
            sum += value.level() as f64;
        }
        Some(GrayStatistics {
            min,
            max,
            mean: sum / self.len() as f64,
        })
    }
}

impl GrayRaster<u8> {
    /// Copy an 8-bit luma image from the `image` crate
    pub fn from_luma(image: &GrayImage) -> Self {
        let (cols, rows) = image.dimensions();
        let data = Array2::from_shape_fn((rows as usize, cols as usize), |(r, c)| {
            image.get_pixel(c as u32, r as u32)[0]
        });
        Self { data }
    }

    /// Convert back into an `image` crate luma buffer
    pub fn to_luma(&self) -> GrayImage {
        let (rows, cols) = self.shape();
        GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
            Luma([self.data[(y as usize, x as usize)]])
        })
    }
}

/// Basic statistics for a grayscale raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayStatistics<T> {
    pub min: T,
    pub max: T,
    pub mean: f64,
}

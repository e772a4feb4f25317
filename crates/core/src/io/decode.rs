//! Grayscale image loading

use super::tiff_io::{decode_gray_tiff, read_gray_tiff};
use crate::error::Result;
use crate::raster::GrayRaster;
use std::io::Cursor;
use std::path::Path;

/// Read any supported image file as 8-bit grayscale
///
/// `.tif`/`.tiff` files are decoded natively; everything else goes through
/// the `image` crate and is converted to luma.
pub fn read_gray<P: AsRef<Path>>(path: P) -> Result<GrayRaster<u8>> {
    let path = path.as_ref();
    let is_tiff = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"));

    if is_tiff {
        return read_gray_tiff(path);
    }

    let image = image::open(path)?;
    Ok(GrayRaster::from_luma(&image.to_luma8()))
}

/// Decode an in-memory image as 8-bit grayscale
pub fn decode_gray(bytes: &[u8]) -> Result<GrayRaster<u8>> {
    if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
        return decode_gray_tiff(Cursor::new(bytes));
    }

    let image = image::load_from_memory(bytes)?;
    Ok(GrayRaster::from_luma(&image.to_luma8()))
}

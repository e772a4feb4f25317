//! Native TIFF reading/writing
//!
//! Uses the `tiff` crate directly so 16-bit grayscale scans and float
//! matrix exports do not go through an RGB conversion.

use crate::error::{Error, Result};
use crate::raster::GrayRaster;
use ndarray::Array2;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::Gray32Float;

/// Read a single-band grayscale TIFF into an 8-bit raster
///
/// 8-bit samples are kept as-is; 16-bit samples keep their high byte.
pub fn read_gray_tiff<P: AsRef<Path>>(path: P) -> Result<GrayRaster<u8>> {
    let file = File::open(path.as_ref())?;
    decode_gray_tiff(BufReader::new(file))
}

/// Decode a grayscale TIFF from any `Read + Seek` source
pub(crate) fn decode_gray_tiff<R>(reader: R) -> Result<GrayRaster<u8>>
where
    R: std::io::Read + std::io::Seek,
{
    let mut decoder = Decoder::new(reader)
        .map_err(|e| Error::Other(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Other(format!("Cannot read dimensions: {}", e)))?;
    let rows = height as usize;
    let cols = width as usize;

    match decoder.colortype() {
        Ok(ColorType::Gray(8)) | Ok(ColorType::Gray(16)) => {}
        Ok(other) => {
            return Err(Error::UnsupportedDataType(format!(
                "expected single-band 8 or 16-bit gray TIFF, got {:?}",
                other
            )));
        }
        Err(e) => return Err(Error::Other(format!("Cannot read color type: {}", e))),
    }

    let result = decoder
        .read_image()
        .map_err(|e| Error::Other(format!("Cannot read image data: {}", e)))?;

    let data: Vec<u8> = match result {
        DecodingResult::U8(buf) => buf,
        DecodingResult::U16(buf) => buf.iter().map(|&v| (v >> 8) as u8).collect(),
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF sample format".to_string(),
            ));
        }
    };

    GrayRaster::from_vec(data, rows, cols)
}

/// Write a co-occurrence matrix as a single-band 32-bit float TIFF
pub fn write_matrix_tiff<P: AsRef<Path>>(matrix: &Array2<f64>, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    encode_matrix(matrix, file)
}

/// Write a co-occurrence matrix into an in-memory TIFF buffer
pub fn write_matrix_tiff_to_buffer(matrix: &Array2<f64>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_matrix(matrix, Cursor::new(&mut buf))?;
    Ok(buf)
}

fn encode_matrix<W>(matrix: &Array2<f64>, writer: W) -> Result<()>
where
    W: std::io::Write + std::io::Seek,
{
    let (rows, cols) = matrix.dim();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    // Iteration order of `iter()` is logical row-major regardless of layout.
    let data: Vec<f32> = matrix.iter().map(|&v| v as f32).collect();

    let image = encoder
        .new_image::<Gray32Float>(cols as u32, rows as u32)
        .map_err(|e| Error::Other(format!("Cannot create TIFF image: {}", e)))?;
    image
        .write_data(&data)
        .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;

    Ok(())
}

//! I/O for grayscale images and co-occurrence matrices
//!
//! - Image decoding through the `image` crate, TIFF through `tiff`
//! - Matrix export as 32-bit float TIFF or CSV

mod csv;
mod decode;
mod tiff_io;

pub use csv::write_matrix_csv;
pub use decode::{decode_gray, read_gray};
pub use tiff_io::{read_gray_tiff, write_matrix_tiff, write_matrix_tiff_to_buffer};

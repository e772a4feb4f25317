//! Plain-text matrix export

use crate::error::Result;
use ndarray::Array2;
use std::io::Write;

/// Write a matrix as comma-separated values, one matrix row per line
pub fn write_matrix_csv<W: Write>(matrix: &Array2<f64>, mut writer: W) -> Result<()> {
    for row in matrix.rows() {
        let mut first = true;
        for value in row {
            if !first {
                writer.write_all(b",")?;
            }
            write!(writer, "{}", value)?;
            first = false;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

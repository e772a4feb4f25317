//! Grayscale raster data structures and accessors

mod element;
mod grid;
mod view;

pub use element::GrayElement;
pub use grid::{GrayRaster, GrayStatistics};
pub use view::{GrayView, MAX_GRAY};

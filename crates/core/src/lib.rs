//! # Texel Core
//!
//! Core types, traits and I/O for the texel texture toolkit.
//!
//! This crate provides:
//! - `GrayRaster<T>`: row-major grayscale grid
//! - `GrayView`: the read-only accessor every texture algorithm consumes
//! - `Algorithm`: common trait for parameterized algorithms
//! - I/O for grayscale images and co-occurrence matrices

pub mod error;
pub mod io;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{GrayElement, GrayRaster, GrayView, MAX_GRAY};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GrayElement, GrayRaster, GrayView, MAX_GRAY};
    pub use crate::{Algorithm, ParallelAlgorithm};
}

/// Core trait for all algorithms in texel.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}

/// Marker trait for algorithms that can be parallelized
pub trait ParallelAlgorithm: Algorithm {
    /// Execute in parallel using available cores
    fn execute_parallel(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;
}

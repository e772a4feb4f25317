//! # Texel Algorithms
//!
//! Texture analysis algorithms for texel.
//!
//! ## Available Algorithm Categories
//!
//! - **texture**: Gray level co-occurrence matrices (0°, 45°, 90°, 135°)

mod maybe_rayon;
pub mod texture;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::texture::{
        cooccurrence, cooccurrence_parallel, max_gray, Cooccurrence, Direction, Glcm, GlcmParams,
    };
    pub use texel_core::prelude::*;
}

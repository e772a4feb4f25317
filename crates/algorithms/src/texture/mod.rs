//! Texture statistics
//!
//! - **GLCM**: Gray-Level Co-occurrence Matrix for one of four directions,
//!   sequential or row-band parallel

mod direction;
mod glcm;

pub use direction::Direction;
pub use glcm::{cooccurrence, cooccurrence_parallel, max_gray, Cooccurrence, Glcm, GlcmParams};

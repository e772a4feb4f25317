//! Gray element trait for integer intensity cells

use num_traits::Zero;
use std::fmt::Debug;

/// Trait for types that can be stored in a grayscale cell.
///
/// Intensities are unsigned integers; [`GrayElement::level`] widens them
/// to the `u32` level used to index co-occurrence matrices.
pub trait GrayElement: Copy + Debug + Ord + Zero + Send + Sync + 'static {
    /// Intensity as a matrix level
    fn level(self) -> u32;
}

macro_rules! impl_gray_element {
    ($t:ty) => {
        impl GrayElement for $t {
            fn level(self) -> u32 {
                self as u32
            }
        }
    };
}

impl_gray_element!(u8);
impl_gray_element!(u16);
impl_gray_element!(u32);

/// Switch between rayon and plain iterators.
///
/// With the `parallel` feature this re-exports rayon's prelude. Without it
/// (single-threaded or WASM builds) `into_par_iter()` is `into_iter()`, so
/// the `.map().collect()` chains used by the band scans compile unchanged.
#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

/// Worker count used to size row bands.
#[cfg(feature = "parallel")]
pub fn current_num_threads() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Sequential stand-in for `rayon::prelude::IntoParallelIterator`.
    pub trait IntoParallelIterator {
        type Iter;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }

    pub fn current_num_threads() -> usize {
        1
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;

//! Gray-Level Co-occurrence Matrix (GLCM)
//!
//! Counts how often intensity `a` is followed by intensity `b` one pixel
//! away in a fixed [`Direction`]. The matrix is kept ordered: `[a][b]` and
//! `[b][a]` are separate cells and are never averaged together.

use std::ops::Range;

use ndarray::Array2;
use texel_core::raster::{GrayRaster, GrayView, MAX_GRAY};
use texel_core::{Algorithm, Error, ParallelAlgorithm, Result};
use tracing::debug;

use super::direction::Direction;
use crate::maybe_rayon::*;

/// Parameters for GLCM computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlcmParams {
    /// Pairing direction
    pub direction: Direction,
    /// Size the matrix to the brightest pixel instead of 256 levels (default: true)
    pub auto_range: bool,
    /// Divide every cell by the pair count (default: true)
    pub normalize: bool,
}

impl GlcmParams {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_auto_range(mut self, auto_range: bool) -> Self {
        self.auto_range = auto_range;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for GlcmParams {
    fn default() -> Self {
        Self {
            direction: Direction::Degree0,
            auto_range: true,
            normalize: true,
        }
    }
}

/// A computed co-occurrence matrix together with its pair count
#[derive(Debug, Clone, PartialEq)]
pub struct Glcm {
    matrix: Array2<f64>,
    pairs: usize,
    max_gray: u32,
    params: GlcmParams,
}

impl Glcm {
    /// The `levels x levels` matrix, indexed `[first][second]`
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Array2<f64> {
        self.matrix
    }

    /// Number of pixel pairs accumulated
    pub fn pairs(&self) -> usize {
        self.pairs
    }

    /// Highest intensity the matrix can index
    pub fn max_gray(&self) -> u32 {
        self.max_gray
    }

    /// Matrix side length (`max_gray + 1`)
    pub fn levels(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn direction(&self) -> Direction {
        self.params.direction
    }

    pub fn params(&self) -> &GlcmParams {
        &self.params
    }

    pub fn is_normalized(&self) -> bool {
        self.params.normalize
    }

    /// Cell for intensity `first` followed by `second`
    pub fn get(&self, first: usize, second: usize) -> Option<f64> {
        self.matrix.get((first, second)).copied()
    }

    /// Sum over all cells: the pair count for raw matrices, 1 once normalized
    pub fn sum(&self) -> f64 {
        self.matrix.sum()
    }
}

/// GLCM algorithm
#[derive(Debug, Clone, Default)]
pub struct Cooccurrence;

impl Algorithm for Cooccurrence {
    type Input = GrayRaster<u8>;
    type Output = Glcm;
    type Params = GlcmParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "GLCM"
    }

    fn description(&self) -> &'static str {
        "Gray level co-occurrence matrix for one pairing direction"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        cooccurrence(&input, &params)
    }
}

impl ParallelAlgorithm for Cooccurrence {
    fn execute_parallel(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        cooccurrence_parallel(&input, &params)
    }
}

/// Compute the co-occurrence matrix of `image` in one sequential pass.
///
/// Returns [`Error::InvalidDimensions`] for an image with no rows or no
/// columns. An image too small to hold a single pair (e.g. 1x1) yields an
/// all-zero matrix with `pairs() == 0`.
///
/// # Panics
/// If the image reports an intensity above [`MAX_GRAY`] or above the
/// matrix range. Both violate the [`GrayView`] contract.
pub fn cooccurrence<V>(image: &V, params: &GlcmParams) -> Result<Glcm>
where
    V: GrayView + ?Sized,
{
    let (max_gray, scan) = prepare(image, params)?;
    let levels = max_gray as usize + 1;

    let mut matrix = Array2::zeros((levels, levels));
    let pairs = accumulate(image, &scan, scan.rows.clone(), &mut matrix);

    Ok(finish(matrix, pairs, max_gray, *params))
}

/// Same result as [`cooccurrence`], scanning row bands concurrently.
///
/// Each band fills its own partial matrix; partials are summed before
/// normalization so counts are exact.
pub fn cooccurrence_parallel<V>(image: &V, params: &GlcmParams) -> Result<Glcm>
where
    V: GrayView + Sync + ?Sized,
{
    let (max_gray, scan) = prepare(image, params)?;
    let levels = max_gray as usize + 1;
    let bands = band_ranges(scan.rows.clone(), current_num_threads());

    let partials: Vec<(Array2<f64>, usize)> = bands
        .into_par_iter()
        .map(|rows| {
            let mut partial = Array2::zeros((levels, levels));
            let pairs = accumulate(image, &scan, rows, &mut partial);
            (partial, pairs)
        })
        .collect();

    let mut matrix = Array2::zeros((levels, levels));
    let mut pairs = 0;
    for (partial, count) in partials {
        matrix += &partial;
        pairs += count;
    }

    Ok(finish(matrix, pairs, max_gray, *params))
}

/// Brightest intensity in the image, 0 for an empty image.
///
/// # Panics
/// If any intensity exceeds [`MAX_GRAY`].
pub fn max_gray<V>(image: &V) -> u32
where
    V: GrayView + ?Sized,
{
    let mut max = 0;
    for row in 0..image.height() {
        for col in 0..image.width() {
            let gray = image.gray_at(row, col);
            assert!(
                gray <= MAX_GRAY,
                "gray level {} at ({}, {}) exceeds {}",
                gray,
                row,
                col,
                MAX_GRAY
            );
            max = max.max(gray);
        }
    }
    max
}

/// First pixels of a direction: every pixel whose partner is inside the image
#[derive(Debug, Clone)]
struct Scan {
    dr: isize,
    dc: isize,
    rows: Range<usize>,
    cols: Range<usize>,
}

impl Scan {
    fn new(direction: Direction, height: usize, width: usize) -> Self {
        let (dr, dc) = direction.offset();
        Self {
            dr,
            dc,
            rows: span(dr, height),
            cols: span(dc, width),
        }
    }
}

fn span(delta: isize, len: usize) -> Range<usize> {
    let start = (-delta).max(0) as usize;
    let end = len.saturating_sub(delta.max(0) as usize);
    start.min(end)..end
}

fn prepare<V>(image: &V, params: &GlcmParams) -> Result<(u32, Scan)>
where
    V: GrayView + ?Sized,
{
    let (height, width) = image.shape();
    if height == 0 || width == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    let max_gray = if params.auto_range { max_gray(image) } else { MAX_GRAY };
    Ok((max_gray, Scan::new(params.direction, height, width)))
}

fn accumulate<V>(image: &V, scan: &Scan, rows: Range<usize>, matrix: &mut Array2<f64>) -> usize
where
    V: GrayView + ?Sized,
{
    let levels = matrix.nrows();
    let mut pairs = 0;

    for row in rows {
        let partner_row = (row as isize + scan.dr) as usize;
        for col in scan.cols.clone() {
            let partner_col = (col as isize + scan.dc) as usize;
            let first = level_at(image, row, col, levels);
            let second = level_at(image, partner_row, partner_col, levels);
            matrix[(first, second)] += 1.0;
            pairs += 1;
        }
    }

    pairs
}

fn level_at<V>(image: &V, row: usize, col: usize, levels: usize) -> usize
where
    V: GrayView + ?Sized,
{
    let gray = image.gray_at(row, col) as usize;
    assert!(
        gray < levels,
        "gray level {} at ({}, {}) outside a {}-level matrix",
        gray,
        row,
        col,
        levels
    );
    gray
}

fn band_ranges(rows: Range<usize>, bands: usize) -> Vec<Range<usize>> {
    let len = rows.len();
    let bands = bands.clamp(1, len.max(1));
    let step = len.div_ceil(bands).max(1);

    (0..bands)
        .map(|b| rows.start + (b * step).min(len)..rows.start + ((b + 1) * step).min(len))
        .filter(|band| !band.is_empty())
        .collect()
}

fn finish(mut matrix: Array2<f64>, pairs: usize, max_gray: u32, params: GlcmParams) -> Glcm {
    if params.normalize {
        let divisor = pairs.max(1) as f64;
        matrix.mapv_inplace(|v| v / divisor);
    }

    debug!(
        direction = %params.direction,
        levels = matrix.nrows(),
        pairs,
        normalized = params.normalize,
        "co-occurrence matrix built"
    );

    Glcm {
        matrix,
        pairs,
        max_gray,
        params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(rows: &[&[u8]]) -> GrayRaster<u8> {
        GrayRaster::from_rows(rows).unwrap()
    }

    fn raw_fixed(direction: Direction) -> GlcmParams {
        GlcmParams::new(direction).with_auto_range(false).with_normalize(false)
    }

    /// Deterministic texture with every level in 0..=255 likely present
    fn noisy_raster(rows: usize, cols: usize) -> GrayRaster<u8> {
        let mut state: u32 = 0x2545_f491;
        let data = (0..rows * cols)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        GrayRaster::from_vec(data, rows, cols).unwrap()
    }

    fn nonzero_cells(glcm: &Glcm) -> Vec<((usize, usize), f64)> {
        glcm.matrix()
            .indexed_iter()
            .filter(|(_, v)| **v != 0.0)
            .map(|(idx, v)| (idx, *v))
            .collect()
    }

    #[test]
    fn horizontal_pairs_on_2x2() {
        let img = raster(&[&[0, 1], &[2, 3]]);
        let glcm = cooccurrence(&img, &raw_fixed(Direction::Degree0)).unwrap();

        assert_eq!(glcm.levels(), 256);
        assert_eq!(glcm.pairs(), 2);
        assert_eq!(nonzero_cells(&glcm), vec![((0, 1), 1.0), ((2, 3), 1.0)]);
    }

    #[test]
    fn vertical_pairs_on_2x2() {
        let img = raster(&[&[0, 1], &[2, 3]]);
        let glcm = cooccurrence(&img, &raw_fixed(Direction::Degree90)).unwrap();

        assert_eq!(glcm.pairs(), 2);
        assert_eq!(nonzero_cells(&glcm), vec![((0, 2), 1.0), ((1, 3), 1.0)]);
    }

    #[test]
    fn diagonal_pairs_start_from_lower_row() {
        let img = raster(&[&[0, 1], &[2, 3]]);

        // 45°: lower-left (2) then upper-right (1)
        let glcm = cooccurrence(&img, &raw_fixed(Direction::Degree45)).unwrap();
        assert_eq!(glcm.pairs(), 1);
        assert_eq!(nonzero_cells(&glcm), vec![((2, 1), 1.0)]);

        // 135°: lower-right (3) then upper-left (0)
        let glcm = cooccurrence(&img, &raw_fixed(Direction::Degree135)).unwrap();
        assert_eq!(glcm.pairs(), 1);
        assert_eq!(nonzero_cells(&glcm), vec![((3, 0), 1.0)]);
    }

    #[test]
    fn single_pixel_has_no_pairs() {
        let img = raster(&[&[7]]);
        for direction in Direction::ALL {
            let auto = cooccurrence(&img, &GlcmParams::new(direction)).unwrap();
            assert_eq!(auto.pairs(), 0);
            assert_eq!(auto.levels(), 8);
            assert_eq!(auto.sum(), 0.0);

            let fixed = cooccurrence(&img, &GlcmParams::new(direction).with_auto_range(false)).unwrap();
            assert_eq!(fixed.pairs(), 0);
            assert_eq!(fixed.matrix().dim(), (256, 256));
            assert!(fixed.matrix().iter().all(|&v| v == 0.0));
        }

        let black = raster(&[&[0]]);
        let glcm = cooccurrence(&black, &GlcmParams::default()).unwrap();
        assert_eq!(glcm.matrix().dim(), (1, 1));
        assert_eq!(glcm.get(0, 0), Some(0.0));
    }

    #[test]
    fn uniform_image_concentrates_mass() {
        let img = GrayRaster::filled(4, 6, 5u8);
        for direction in Direction::ALL {
            let glcm = cooccurrence(&img, &GlcmParams::new(direction)).unwrap();
            assert_eq!(glcm.levels(), 6);
            assert_eq!(glcm.max_gray(), 5);
            assert_eq!(glcm.get(5, 5), Some(1.0));
            assert_eq!(nonzero_cells(&glcm).len(), 1);
        }
    }

    #[test]
    fn raw_sum_equals_pair_count() {
        let img = noisy_raster(7, 11);
        for direction in Direction::ALL {
            let glcm = cooccurrence(&img, &GlcmParams::new(direction).with_normalize(false)).unwrap();
            assert_eq!(glcm.pairs(), direction.pair_count(7, 11));
            assert_eq!(glcm.sum(), glcm.pairs() as f64);
        }
        assert_eq!(Direction::Degree0.pair_count(7, 11), 7 * 10);
        assert_eq!(Direction::Degree90.pair_count(7, 11), 6 * 11);
        assert_eq!(Direction::Degree45.pair_count(7, 11), 6 * 10);
    }

    #[test]
    fn normalized_sums_to_one() {
        let img = noisy_raster(16, 9);
        for direction in Direction::ALL {
            let glcm = cooccurrence(&img, &GlcmParams::new(direction)).unwrap();
            assert!(glcm.is_normalized());
            assert!((glcm.sum() - 1.0).abs() < 1e-9, "{}: sum {}", direction, glcm.sum());
            assert!(glcm.matrix().iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn range_follows_auto_flag() {
        let img = raster(&[&[3, 40, 12], &[0, 9, 1]]);

        let auto = cooccurrence(&img, &GlcmParams::default()).unwrap();
        assert_eq!(auto.levels(), 41);
        assert_eq!(auto.max_gray(), max_gray(&img));

        let fixed = cooccurrence(&img, &GlcmParams::default().with_auto_range(false)).unwrap();
        assert_eq!(fixed.levels(), 256);
        assert_eq!(fixed.max_gray(), MAX_GRAY);
    }

    #[test]
    fn ascending_gradient_is_not_symmetrized() {
        let rows: Vec<Vec<u8>> = (0..4).map(|_| (0..10).map(|c| c * 3).collect()).collect();
        let img = GrayRaster::from_rows(&rows).unwrap();
        let glcm = cooccurrence(&img, &GlcmParams::new(Direction::Degree0)).unwrap();

        let above: f64 = glcm
            .matrix()
            .indexed_iter()
            .filter(|((a, b), _)| b > a)
            .map(|(_, v)| *v)
            .sum();
        assert!((above - 1.0).abs() < 1e-12);
        // 4 rows x 9 pairs, one (0, 3) pair per row
        assert_eq!(glcm.pairs(), 36);
        assert_eq!(glcm.get(0, 3), Some(4.0 / 36.0));
        assert_eq!(glcm.get(3, 0), Some(0.0));
    }

    #[test]
    fn parallel_matches_sequential() {
        let img = noisy_raster(37, 23);
        for direction in Direction::ALL {
            for (auto_range, normalize) in [(true, true), (false, false)] {
                let params = GlcmParams::new(direction)
                    .with_auto_range(auto_range)
                    .with_normalize(normalize);
                let seq = cooccurrence(&img, &params).unwrap();
                let par = cooccurrence_parallel(&img, &params).unwrap();
                assert_eq!(seq, par, "{} auto={} norm={}", direction, auto_range, normalize);
            }
        }
    }

    #[test]
    fn band_ranges_cover_rows_once() {
        assert_eq!(band_ranges(1..10, 4), vec![1..4, 4..7, 7..10]);
        assert_eq!(band_ranges(0..3, 8), vec![0..1, 1..2, 2..3]);
        assert_eq!(band_ranges(0..5, 0), vec![0..5]);
        assert!(band_ranges(1..1, 4).is_empty());
    }

    #[test]
    fn luma_buffer_matches_raster() {
        let img = noisy_raster(5, 8);
        let luma = img.to_luma();
        let params = GlcmParams::new(Direction::Degree135).with_normalize(false);
        assert_eq!(
            cooccurrence(&luma, &params).unwrap(),
            cooccurrence(&img, &params).unwrap()
        );
    }

    #[test]
    fn empty_image_is_rejected() {
        let img: GrayRaster<u8> = GrayRaster::new(0, 4);
        assert!(matches!(
            cooccurrence(&img, &GlcmParams::default()),
            Err(Error::InvalidDimensions { width: 4, height: 0 })
        ));
        assert!(cooccurrence_parallel(&img, &GlcmParams::default()).is_err());
    }

    #[test]
    #[should_panic(expected = "exceeds 255")]
    fn auto_range_rejects_wide_levels() {
        let img = GrayRaster::from_rows(&[[10u16, 300]]).unwrap();
        let _ = cooccurrence(&img, &GlcmParams::default());
    }

    #[test]
    #[should_panic(expected = "outside a 256-level matrix")]
    fn fixed_range_rejects_wide_levels() {
        let img = GrayRaster::from_rows(&[[10u16, 300]]).unwrap();
        let _ = cooccurrence(&img, &GlcmParams::default().with_auto_range(false));
    }

    #[test]
    fn algorithm_trait_uses_defaults() {
        let img = raster(&[&[1, 2], &[2, 1]]);
        let glcm = Cooccurrence.execute_default(img.clone()).unwrap();
        assert_eq!(glcm.direction(), Direction::Degree0);
        assert_eq!(glcm.levels(), 3);
        assert_eq!(glcm.get(1, 2), Some(0.5));
        assert_eq!(glcm.get(2, 1), Some(0.5));

        let par = Cooccurrence.execute_parallel(img, GlcmParams::default()).unwrap();
        assert_eq!(par, glcm);
    }
}

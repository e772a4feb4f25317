//! Pairing directions for co-occurrence scans

use std::fmt;
use std::str::FromStr;
use texel_core::Error;

/// Angle between the two pixels of a co-occurrence pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Horizontal: left pixel, then its right neighbor
    #[default]
    Degree0,
    /// Diagonal: pixel, then its upper-right neighbor
    Degree45,
    /// Vertical: upper pixel, then the pixel below it
    Degree90,
    /// Anti-diagonal: pixel, then its upper-left neighbor
    Degree135,
}

impl Direction {
    /// All four directions in ascending angle
    pub const ALL: [Direction; 4] = [
        Direction::Degree0,
        Direction::Degree45,
        Direction::Degree90,
        Direction::Degree135,
    ];

    /// Angle in degrees
    pub fn degrees(self) -> u32 {
        match self {
            Direction::Degree0 => 0,
            Direction::Degree45 => 45,
            Direction::Degree90 => 90,
            Direction::Degree135 => 135,
        }
    }

    /// `(Δrow, Δcol)` from the first pixel of a pair to the second.
    ///
    /// Rows grow downwards. 90° points down while 45° and 135° point up;
    /// the resulting matrices are not symmetric, so the signs matter.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Degree0 => (0, 1),
            Direction::Degree45 => (-1, 1),
            Direction::Degree90 => (1, 0),
            Direction::Degree135 => (-1, -1),
        }
    }

    /// Number of pairs a `rows x cols` image yields in this direction
    pub fn pair_count(self, rows: usize, cols: usize) -> usize {
        let (dr, dc) = self.offset();
        rows.saturating_sub(dr.unsigned_abs()) * cols.saturating_sub(dc.unsigned_abs())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let angle = lower
            .strip_suffix('°')
            .or_else(|| lower.strip_suffix("deg"))
            .unwrap_or(&lower)
            .trim();

        match angle {
            "0" => Ok(Direction::Degree0),
            "45" => Ok(Direction::Degree45),
            "90" => Ok(Direction::Degree90),
            "135" => Ok(Direction::Degree135),
            _ => Err(Error::InvalidParameter {
                name: "direction",
                value: s.to_string(),
                reason: "expected one of 0, 45, 90, 135".to_string(),
            }),
        }
    }
}

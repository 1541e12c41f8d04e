//! Dense correlation surface over all template placements.

use crate::util::{LocateError, LocateResult};

/// Scores for every top-left placement, row-major.
///
/// For an image `W x H` and a template `w x h` the map is
/// `(W - w + 1) x (H - h + 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreMap {
    scores: Vec<f32>,
    width: usize,
    height: usize,
}

/// Extremes of a score map and their placements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxLoc {
    pub min: f32,
    pub max: f32,
    pub min_loc: (usize, usize),
    pub max_loc: (usize, usize),
}

impl ScoreMap {
    pub(crate) fn new(scores: Vec<f32>, width: usize, height: usize) -> LocateResult<Self> {
        if width == 0 || height == 0 {
            return Err(LocateError::InvalidDimensions { width, height });
        }
        if scores.len() != width * height {
            return Err(LocateError::BufferTooSmall {
                needed: width * height,
                got: scores.len(),
            });
        }
        Ok(Self {
            scores,
            width,
            height,
        })
    }

    /// Number of placement columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of placement rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major scores.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Score of the placement with top-left corner `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Minimum and maximum scores with their first occurrence in scan order.
    pub fn min_max_loc(&self) -> MinMaxLoc {
        let mut out = MinMaxLoc {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            min_loc: (0, 0),
            max_loc: (0, 0),
        };
        for (idx, &score) in self.scores.iter().enumerate() {
            let loc = (idx % self.width, idx / self.width);
            if score < out.min {
                out.min = score;
                out.min_loc = loc;
            }
            if score > out.max {
                out.max = score;
                out.max_loc = loc;
            }
        }
        out
    }

    /// Placements scoring at least `threshold`, in scan order.
    pub(crate) fn above(&self, threshold: f32) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .filter(move |&(_, &score)| score >= threshold)
            .map(move |(idx, &score)| (idx % self.width, idx / self.width, score))
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreMap;

    #[test]
    fn min_max_loc_reports_first_extremes() {
        let map = ScoreMap::new(vec![0.1, 0.9, -0.4, 0.9, -0.4, 0.2], 3, 2).unwrap();
        let mm = map.min_max_loc();
        assert_eq!(mm.max, 0.9);
        assert_eq!(mm.max_loc, (1, 0));
        assert_eq!(mm.min, -0.4);
        assert_eq!(mm.min_loc, (2, 0));
    }

    #[test]
    fn above_filters_by_threshold() {
        let map = ScoreMap::new(vec![0.1, 0.9, 0.85, 0.2], 2, 2).unwrap();
        let hits: Vec<_> = map.above(0.8).collect();
        assert_eq!(hits, vec![(1, 0, 0.9), (0, 1, 0.85)]);
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(ScoreMap::new(vec![0.0; 5], 3, 2).is_err());
    }
}

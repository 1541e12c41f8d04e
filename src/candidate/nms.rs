//! Non-maximum suppression utilities for candidates.

use crate::candidate::topk::{sort_peaks_desc, Peak};

/// Applies 2D non-maximum suppression using Chebyshev distance.
///
/// Peaks are sorted by descending score and kept if they are farther than
/// `radius` in Chebyshev distance from all previously kept peaks.
pub fn nms_2d(peaks: &mut [Peak], radius: usize) -> Vec<Peak> {
    sort_peaks_desc(peaks);
    if radius == 0 {
        return peaks.to_vec();
    }

    let mut kept: Vec<Peak> = Vec::new();
    'outer: for peak in peaks.iter().copied() {
        for kept_peak in kept.iter() {
            let dx = peak.x.abs_diff(kept_peak.x);
            let dy = peak.y.abs_diff(kept_peak.y);
            if dx.max(dy) <= radius {
                continue 'outer;
            }
        }
        kept.push(peak);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::nms_2d;
    use crate::candidate::topk::Peak;

    #[test]
    fn suppresses_neighbours_within_radius() {
        let mut peaks = vec![
            Peak { x: 10, y: 10, score: 0.8 },
            Peak { x: 11, y: 12, score: 0.95 },
            Peak { x: 40, y: 10, score: 0.9 },
        ];
        let kept = nms_2d(&mut peaks, 3);
        let coords: Vec<_> = kept.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(11, 12), (40, 10)]);
    }
}

//! Top-K candidate tracking for match peaks.

use std::cmp::Ordering;

/// Scored template placement (top-left corner in image space).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the placement.
    pub x: usize,
    /// Y coordinate (row) of the placement.
    pub y: usize,
    /// ZNCC score at the placement.
    pub score: f32,
}

/// Descending score, then scan order (row first) so ties resolve to the
/// placement a raster scan meets first.
fn peak_cmp_desc(a: &Peak, b: &Peak) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Sorts peaks by descending score with deterministic tie-breaking.
pub(crate) fn sort_peaks_desc(peaks: &mut [Peak]) {
    peaks.sort_by(peak_cmp_desc);
}

/// Top-K container with O(k) insertion cost.
pub struct TopK {
    k: usize,
    items: Vec<Peak>,
}

impl TopK {
    /// Creates a new Top-K collector.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k.min(1024)),
        }
    }

    /// Pushes a peak, evicting the lowest-ranked one if at capacity.
    pub fn push(&mut self, peak: Peak) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(peak);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if peak_cmp_desc(item, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }

        if peak_cmp_desc(&peak, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = peak;
        }
    }

    /// Pushes every peak from an iterator.
    pub fn extend<I: IntoIterator<Item = Peak>>(&mut self, peaks: I) {
        for peak in peaks {
            self.push(peak);
        }
    }

    /// Returns peaks sorted by descending score.
    pub fn into_sorted_desc(mut self) -> Vec<Peak> {
        sort_peaks_desc(&mut self.items);
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::{Peak, TopK};

    fn peak(x: usize, y: usize, score: f32) -> Peak {
        Peak { x, y, score }
    }

    #[test]
    fn keeps_highest_scores_in_order() {
        let mut topk = TopK::new(2);
        topk.extend([peak(0, 0, 0.1), peak(1, 0, 0.9), peak(2, 0, 0.5)]);
        let kept = topk.into_sorted_desc();
        assert_eq!(kept, vec![peak(1, 0, 0.9), peak(2, 0, 0.5)]);
    }

    #[test]
    fn ties_prefer_earlier_scan_position() {
        let mut topk = TopK::new(1);
        topk.extend([peak(4, 2, 0.7), peak(9, 1, 0.7), peak(3, 1, 0.7)]);
        assert_eq!(topk.into_sorted_desc(), vec![peak(3, 1, 0.7)]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut topk = TopK::new(0);
        topk.push(peak(0, 0, 1.0));
        assert!(topk.into_sorted_desc().is_empty());
    }
}
